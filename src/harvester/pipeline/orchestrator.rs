// Harvester - drives enumeration and record building in playlist order
//
// Report mode collects the records in memory. Export mode streams each
// record's links to the CSV file as soon as the video is processed. In both
// modes a failing video is logged and skipped; a failing playlist or export
// write ends the run.

use std::num::NonZeroUsize;

use tracing::{info, warn};

use super::{build_record, enumerate};
use crate::harvester::errors::HarvestError;
use crate::harvester::export::{CsvExport, ExportOptions};
use crate::harvester::extractors::{LineExtractor, LinkExtractor};
use crate::harvester::models::{
    ExportSummary, PlaylistRef, Progress, ProgressStatus, Report, SkippedVideo, VideoRecord,
    VideoRef,
};
use crate::harvester::sources::MetadataSource;
use crate::harvester::traits::ProgressObserver;

pub struct Harvester<S: MetadataSource> {
    source: S,
    extractor: Box<dyn LinkExtractor>,
    observer: Option<Box<dyn ProgressObserver>>,
}

impl<S: MetadataSource> Harvester<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: Box::new(LineExtractor),
            observer: None,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn enumerate(
        &self,
        playlist: &PlaylistRef,
        limit: Option<NonZeroUsize>,
    ) -> Result<Vec<VideoRef>, HarvestError> {
        enumerate(&self.source, playlist, limit).await
    }

    pub async fn build_record(&self, video: &VideoRef) -> Result<VideoRecord, HarvestError> {
        build_record(&self.source, self.extractor.as_ref(), video).await
    }

    /// Build every record in order, handing each to `sink`
    ///
    /// Video fetch failures are collected and returned; any other error
    /// (including one returned by `sink`) stops the loop.
    async fn for_each_record<F>(
        &self,
        videos: &[VideoRef],
        mut sink: F,
    ) -> Result<Vec<SkippedVideo>, HarvestError>
    where
        F: FnMut(VideoRecord) -> Result<(), HarvestError>,
    {
        let total = videos.len();
        let mut skipped = Vec::new();

        for (i, video) in videos.iter().enumerate() {
            let status = match self.build_record(video).await {
                Ok(record) => {
                    let links = record.links.len();
                    sink(record)?;
                    ProgressStatus::Done { links }
                }
                Err(HarvestError::VideoFetch { video: _, source }) => {
                    let permanent = source.reason().is_some_and(|r| r.is_permanent());
                    warn!(video = %video, permanent, "Skipping video: {}", source);
                    if let Some(hint) = source.reason().and_then(|r| r.hint()) {
                        warn!(video = %video, "Hint: {}", hint);
                    }
                    skipped.push(SkippedVideo {
                        video_ref: video.clone(),
                        reason: source.reason(),
                        message: source.to_string(),
                    });
                    ProgressStatus::Skipped
                }
                Err(other) => return Err(other),
            };

            if let Some(observer) = &self.observer {
                observer.on_progress(&Progress {
                    index: i + 1,
                    total,
                    video_ref: video.clone(),
                    status,
                });
            }
        }

        Ok(skipped)
    }

    /// Collect links for every video of the playlist into a report
    pub async fn build_report(
        &self,
        playlist: &PlaylistRef,
        limit: Option<NonZeroUsize>,
    ) -> Result<Report, HarvestError> {
        let videos = self.enumerate(playlist, limit).await?;
        info!(
            playlist = %playlist,
            count = videos.len(),
            source = self.source.name(),
            extractor = self.extractor.name(),
            "Processing videos"
        );

        let mut records = Vec::with_capacity(videos.len());
        let skipped = self
            .for_each_record(&videos, |record| {
                records.push(record);
                Ok(())
            })
            .await?;

        Ok(Report {
            playlist_ref: playlist.clone(),
            videos: records,
            skipped,
        })
    }

    /// Write one CSV row per link of every video of the playlist
    pub async fn export(
        &self,
        playlist: &PlaylistRef,
        limit: Option<NonZeroUsize>,
        options: &ExportOptions,
    ) -> Result<ExportSummary, HarvestError> {
        let videos = self.enumerate(playlist, limit).await?;
        info!(
            playlist = %playlist,
            count = videos.len(),
            path = %options.path.display(),
            encoding = %options.encoding,
            source = self.source.name(),
            extractor = self.extractor.name(),
            "Extracting links from videos"
        );

        let mut export = CsvExport::create(options)?;
        let mut exported = 0;
        let result = self
            .for_each_record(&videos, |record| {
                export.write_record(&record)?;
                exported += 1;
                Ok(())
            })
            .await;
        let skipped = match result {
            Ok(skipped) => skipped,
            Err(e) => {
                warn!(
                    path = %export.path().display(),
                    rows = export.rows(),
                    "Export stopped, rows written so far are kept"
                );
                return Err(e);
            }
        };
        let rows = export.finish()?;

        Ok(ExportSummary {
            rows,
            videos: exported,
            skipped,
        })
    }
}
