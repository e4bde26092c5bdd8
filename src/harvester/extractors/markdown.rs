// Markdown extractor - [text](url) links plus bare URLs
//
// Markdown links keep their bracketed caption. Bare URLs outside any Markdown
// link are captioned with the URL itself and are only looked for in the text
// between Markdown links. Results are ordered by position in the description.

use lazy_static::lazy_static;
use regex::Regex;

use super::line::URL_RE;
use super::traits::LinkExtractor;
use crate::harvester::models::LinkEntry;

lazy_static! {
    static ref MARKDOWN_RE: Regex =
        Regex::new(r"\[(?P<text>[^\]]+)\]\((?P<link>https?://[^)\s]+)\)").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    /// Bare URLs in text between Markdown links
    fn extract_bare(gap: &str, out: &mut Vec<LinkEntry>) {
        for m in URL_RE.find_iter(gap) {
            out.push(LinkEntry::new(m.as_str(), m.as_str()));
        }
    }
}

impl LinkExtractor for MarkdownExtractor {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extract(&self, description: &str) -> Vec<LinkEntry> {
        let mut links = Vec::new();
        let mut cursor = 0;

        for caps in MARKDOWN_RE.captures_iter(description) {
            let (Some(whole), Some(text), Some(link)) =
                (caps.get(0), caps.name("text"), caps.name("link"))
            else {
                continue;
            };
            Self::extract_bare(&description[cursor..whole.start()], &mut links);
            links.push(LinkEntry::new(text.as_str().trim(), link.as_str()));
            cursor = whole.end();
        }
        Self::extract_bare(&description[cursor..], &mut links);

        links
    }
}
