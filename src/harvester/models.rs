// Common data models for the harvesting pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

use super::sources::diagnostics::FailureReason;

/// Playlist URL or id, passed through to the metadata source untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistRef(String);

impl PlaylistRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Video URL or id as reported by the playlist listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoRef(String);

impl VideoRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw text fetched for one video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl VideoMetadata {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }

    /// Description text, empty when the platform sent none
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// One URL found in a description and the text just before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub text: String,
    pub link: String,
}

impl LinkEntry {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// Links extracted from a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "video_url")]
    pub video_ref: VideoRef,
    pub title: String,
    pub links: Vec<LinkEntry>,
}

impl VideoRecord {
    /// Flatten into one export row per link, in link order
    pub fn rows(&self) -> impl Iterator<Item = ExportRow<'_>> {
        self.links.iter().map(move |entry| ExportRow {
            video_ref: &self.video_ref,
            title: &self.title,
            text: &entry.text,
            link: &entry.link,
        })
    }
}

/// A video that could not be fetched and was left out of the results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedVideo {
    #[serde(rename = "video_url")]
    pub video_ref: VideoRef,
    pub reason: Option<FailureReason>,
    pub message: String,
}

/// Whole-playlist result of report mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "playlist_url")]
    pub playlist_ref: PlaylistRef,
    pub videos: Vec<VideoRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedVideo>,
}

impl Report {
    /// Total number of links across all videos
    pub fn link_count(&self) -> usize {
        self.videos.iter().map(|v| v.links.len()).sum()
    }
}

/// One flattened (video, link) pair as written to the export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRow<'a> {
    pub video_ref: &'a VideoRef,
    pub title: &'a str,
    pub text: &'a str,
    pub link: &'a str,
}

/// Outcome of export mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub videos: usize,
    pub skipped: Vec<SkippedVideo>,
}

/// Progress information handed to observers, once per processed video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the video in the playlist
    pub index: usize,
    pub total: usize,
    pub video_ref: VideoRef,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    Done { links: usize },
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_description_is_empty() {
        let meta: VideoMetadata =
            serde_json::from_str(r#"{"title": "t", "description": null}"#).unwrap();
        assert_eq!(meta.description_text(), "");

        let meta: VideoMetadata = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(meta.description_text(), "");
    }

    #[test]
    fn test_record_rows_follow_link_order() {
        let record = VideoRecord {
            video_ref: VideoRef::new("v1"),
            title: "Title".to_string(),
            links: vec![LinkEntry::new("a", "https://a"), LinkEntry::new("", "https://b")],
        };
        let rows: Vec<_> = record.rows().map(|r| (r.title, r.text, r.link)).collect();
        assert_eq!(rows, vec![("Title", "a", "https://a"), ("Title", "", "https://b")]);
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report {
            playlist_ref: PlaylistRef::new("https://www.youtube.com/playlist?list=PL1"),
            videos: vec![VideoRecord {
                video_ref: VideoRef::new("https://www.youtube.com/watch?v=1"),
                title: "One".to_string(),
                links: vec![LinkEntry::new("site:", "https://example.com")],
            }],
            skipped: Vec::new(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["playlist_url"], "https://www.youtube.com/playlist?list=PL1");
        assert_eq!(json["videos"][0]["video_url"], "https://www.youtube.com/watch?v=1");
        assert_eq!(json["videos"][0]["links"][0]["text"], "site:");
        assert!(json.get("skipped").is_none());
        assert_eq!(report.link_count(), 1);
    }
}
