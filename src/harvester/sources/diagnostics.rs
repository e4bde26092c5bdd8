// Failure diagnostics - classifies why the platform refused a playlist or video
//
// yt-dlp reports every failure as free text on stderr. The pipeline only needs
// to know which video or playlist failed, but the reason makes the skip
// message actionable for the user.

use serde::{Deserialize, Serialize};

/// Reasons the platform may refuse to hand out metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Playlist id does not exist or the playlist is private
    PlaylistNotFound,

    /// Private video requiring authorization
    PrivateVideo,

    /// Video deleted or unavailable
    VideoUnavailable,

    /// Age-restricted content requiring login
    AgeRestricted,

    /// Member-only content (requires channel membership)
    MembersOnly,

    /// Geographic restriction
    GeoBlocked,

    /// Rate limiting (429 or similar)
    RateLimited,

    /// Bot detection triggered
    BotDetection,

    /// HTTP 403 Forbidden - general access denied
    Http403Forbidden,

    /// Network timeout (soft IP block)
    NetworkTimeout,

    /// URL not recognised by any extractor
    UnsupportedUrl,

    /// Generic/unknown failure
    Unknown,
}

impl FailureReason {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::PlaylistNotFound => "Playlist does not exist or is private",
            Self::PrivateVideo => "Private video",
            Self::VideoUnavailable => "Video unavailable",
            Self::AgeRestricted => "Age-restricted content",
            Self::MembersOnly => "Members-only content",
            Self::GeoBlocked => "Geographic restriction",
            Self::RateLimited => "Rate limited by the platform",
            Self::BotDetection => "Bot detection triggered",
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::NetworkTimeout => "Network timeout",
            Self::UnsupportedUrl => "Unsupported URL",
            Self::Unknown => "Unknown failure",
        }
    }

    /// Content is gone or locked for everyone, not just this client
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::PlaylistNotFound | Self::VideoUnavailable | Self::UnsupportedUrl
        )
    }

    /// Check if cookies might help
    pub fn cookies_might_help(&self) -> bool {
        matches!(
            self,
            Self::PrivateVideo
                | Self::AgeRestricted
                | Self::MembersOnly
                | Self::BotDetection
                | Self::Http403Forbidden
        )
    }

    /// Check if proxy might help
    pub fn proxy_might_help(&self) -> bool {
        matches!(
            self,
            Self::GeoBlocked
                | Self::RateLimited
                | Self::BotDetection
                | Self::Http403Forbidden
                | Self::NetworkTimeout
        )
    }

    /// One-line hint printed next to a skipped video
    pub fn hint(&self) -> Option<&'static str> {
        if self.cookies_might_help() {
            Some("try --cookies with a cookies.txt exported from a logged-in browser")
        } else if self.proxy_might_help() {
            Some("try --proxy or run again later")
        } else {
            None
        }
    }
}

/// Analyze error message and return failure reason
pub fn diagnose_error(error: &str) -> Option<FailureReason> {
    let lower = error.to_lowercase();

    // Playlist-level failures first, they also mention "unavailable"
    if lower.contains("the playlist does not exist")
        || lower.contains("playlist does not exist")
        || lower.contains("this playlist is private")
        || lower.contains("playlist is unavailable")
        || lower.contains("unable to recognize playlist")
    {
        return Some(FailureReason::PlaylistNotFound);
    }

    if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        return Some(FailureReason::UnsupportedUrl);
    }

    // Members-only content
    if lower.contains("members only")
        || lower.contains("members-only")
        || lower.contains("join this channel")
        || lower.contains("available to members")
    {
        return Some(FailureReason::MembersOnly);
    }

    // Age restriction
    if lower.contains("age-restricted")
        || lower.contains("sign in to confirm your age")
        || lower.contains("age_verification")
    {
        return Some(FailureReason::AgeRestricted);
    }

    // Private video
    if lower.contains("private video")
        || lower.contains("video is private")
        || lower.contains("sign in if you've been granted access")
    {
        return Some(FailureReason::PrivateVideo);
    }

    // Video unavailable
    if lower.contains("video unavailable")
        || lower.contains("video has been removed")
        || lower.contains("this video is no longer available")
        || lower.contains("video is unavailable")
    {
        return Some(FailureReason::VideoUnavailable);
    }

    // Geographic restriction
    if lower.contains("not available in your country")
        || lower.contains("blocked in your country")
        || lower.contains("geo restricted")
        || lower.contains("geo-restricted")
    {
        return Some(FailureReason::GeoBlocked);
    }

    // Rate limiting
    if lower.contains("http error 429")
        || lower.contains("rate limit")
        || lower.contains("too many requests")
    {
        return Some(FailureReason::RateLimited);
    }

    // Bot detection
    if lower.contains("not a bot")
        || lower.contains("captcha")
        || lower.contains("unusual traffic")
    {
        return Some(FailureReason::BotDetection);
    }

    // HTTP 403 (general)
    if lower.contains("http error 403") || lower.contains("forbidden") {
        return Some(FailureReason::Http403Forbidden);
    }

    // Network timeout
    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection refused")
        || lower.contains("network unreachable")
    {
        return Some(FailureReason::NetworkTimeout);
    }

    if !error.trim().is_empty() {
        return Some(FailureReason::Unknown);
    }

    None
}
