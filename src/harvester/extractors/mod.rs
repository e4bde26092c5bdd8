// Link extractors - turn free-form description text into (text, link) pairs
//
// Two variants share the LinkExtractor trait:
// - Line mode: every URL paired with the text preceding it on its line (default)
// - Markdown mode: [text](url) links plus bare URLs captioned by themselves

mod line;
mod markdown;
mod traits;

pub use line::LineExtractor;
pub use markdown::MarkdownExtractor;
pub use traits::{ExtractorKind, LinkExtractor};
