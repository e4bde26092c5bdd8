// Video record builder

use crate::harvester::errors::HarvestError;
use crate::harvester::extractors::LinkExtractor;
use crate::harvester::models::{VideoRecord, VideoRef};
use crate::harvester::sources::MetadataSource;

/// Fetch one video's metadata and extract the links from its description
pub async fn build_record(
    source: &dyn MetadataSource,
    extractor: &dyn LinkExtractor,
    video: &VideoRef,
) -> Result<VideoRecord, HarvestError> {
    let metadata = source
        .get_metadata(video)
        .await
        .map_err(|source| HarvestError::VideoFetch {
            video: video.to_string(),
            source,
        })?;

    let links = extractor.extract(metadata.description_text());

    Ok(VideoRecord {
        video_ref: video.clone(),
        title: metadata.title,
        links,
    })
}
