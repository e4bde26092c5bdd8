// Harvester module - playlist enumeration, link extraction and export

pub mod errors;
pub mod export;
pub mod extractors;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod traits;
pub mod utils;

pub use errors::{HarvestError, SourceError};
pub use export::{CsvExport, Encoding, ExportOptions};
pub use extractors::{ExtractorKind, LineExtractor, LinkExtractor, MarkdownExtractor};
pub use models::{
    ExportRow, ExportSummary, LinkEntry, PlaylistRef, Progress, ProgressStatus, Report,
    SkippedVideo, VideoMetadata, VideoRecord, VideoRef,
};
pub use pipeline::Harvester;
pub use sources::{FailureReason, Launcher, MetadataSource, SourceConfig, YtDlpSource};
pub use traits::{LogProgress, ProgressObserver};
