// Scripted metadata source for pipeline tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::MetadataSource;
use crate::harvester::errors::SourceError;
use crate::harvester::models::{PlaylistRef, VideoMetadata, VideoRef};

#[derive(Default)]
pub(crate) struct ScriptedSource {
    playlists: HashMap<String, Vec<VideoRef>>,
    videos: HashMap<String, VideoMetadata>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn playlist(mut self, id: &str, videos: &[&str]) -> Self {
        self.playlists
            .insert(id.to_string(), videos.iter().copied().map(VideoRef::new).collect());
        self
    }

    pub(crate) fn video(mut self, id: &str, title: &str, description: Option<&str>) -> Self {
        self.videos.insert(
            id.to_string(),
            VideoMetadata::new(title, description.map(str::to_string)),
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl MetadataSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn list_videos(&self, playlist: &PlaylistRef) -> Result<Vec<VideoRef>, SourceError> {
        self.record(format!("list {}", playlist));
        self.playlists.get(playlist.as_str()).cloned().ok_or_else(|| {
            SourceError::from(format!("ERROR: [youtube:tab] {}: The playlist does not exist.", playlist))
        })
    }

    async fn get_metadata(&self, video: &VideoRef) -> Result<VideoMetadata, SourceError> {
        self.record(format!("get {}", video));
        self.videos.get(video.as_str()).cloned().ok_or_else(|| {
            SourceError::from(format!("ERROR: [youtube] {}: Private video", video))
        })
    }
}
