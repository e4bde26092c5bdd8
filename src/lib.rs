pub mod config;
pub mod harvester;

pub use config::Config;
pub use harvester::{
    ExtractorKind, HarvestError, Harvester, LinkEntry, LinkExtractor, PlaylistRef, Report,
    VideoRecord, VideoRef, YtDlpSource,
};
