// LinkExtractor trait and variant selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{LineExtractor, MarkdownExtractor};
use crate::harvester::models::LinkEntry;

/// Pure text-to-links extraction, no I/O
pub trait LinkExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Extract links in first-appearance order
    fn extract(&self, description: &str) -> Vec<LinkEntry>;
}

/// Which extractor variant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Text preceding each URL on the same line
    #[default]
    Line,
    /// Markdown [text](url) links plus bare URLs
    Markdown,
}

impl ExtractorKind {
    pub fn build(self) -> Box<dyn LinkExtractor> {
        match self {
            Self::Line => Box::new(LineExtractor),
            Self::Markdown => Box::new(MarkdownExtractor),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown extractor '{}' (expected line or markdown)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("line".parse::<ExtractorKind>(), Ok(ExtractorKind::Line));
        assert_eq!("Markdown".parse::<ExtractorKind>(), Ok(ExtractorKind::Markdown));
        assert!("html".parse::<ExtractorKind>().is_err());
    }

    #[test]
    fn test_kind_builds_matching_extractor() {
        assert_eq!(ExtractorKind::default().build().name(), "line");
        assert_eq!(ExtractorKind::Markdown.build().name(), "markdown");
    }
}
