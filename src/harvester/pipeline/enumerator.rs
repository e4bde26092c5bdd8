// Playlist enumerator

use std::num::NonZeroUsize;

use tracing::debug;

use crate::harvester::errors::HarvestError;
use crate::harvester::models::{PlaylistRef, VideoRef};
use crate::harvester::sources::MetadataSource;

/// List the playlist's videos in platform order, keeping at most `limit`
pub async fn enumerate(
    source: &dyn MetadataSource,
    playlist: &PlaylistRef,
    limit: Option<NonZeroUsize>,
) -> Result<Vec<VideoRef>, HarvestError> {
    let mut videos = source
        .list_videos(playlist)
        .await
        .map_err(|source| HarvestError::PlaylistFetch {
            playlist: playlist.to_string(),
            source,
        })?;

    let total = videos.len();
    if let Some(limit) = limit {
        videos.truncate(limit.get());
    }

    debug!(
        playlist = %playlist,
        total,
        kept = videos.len(),
        "Enumerated playlist"
    );
    Ok(videos)
}
