use thiserror::Error;

/// Malformed subtitle input or derived ranges
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("subtitle entry {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("subtitle entry {index}: end time {end} is before start time {start}")]
    InvertedTiming { index: usize, start: f64, end: f64 },

    #[error("subtitle entry {index}: text is empty")]
    EmptyText { index: usize },

    #[error("stage range {name}: end index {end} is before start index {start}")]
    InvertedRange {
        name: String,
        start: usize,
        end: usize,
    },
}

/// Invalid heuristics configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("expected {expected} stage definitions, got {actual}")]
    StageCount { expected: usize, actual: usize },

    #[error("stage definition {index} has an empty name")]
    EmptyStageName { index: usize },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by the Bilibili web API
#[derive(Error, Debug)]
pub enum BilibiliError {
    #[error("Cannot find BV id from input. Provide BV id or bilibili video URL.")]
    MissingBvid,

    #[error("{endpoint} api failed: code={code} msg={message}")]
    Api {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    #[error("No pages found.")]
    NoPages,

    #[error("No subtitle found for this video.")]
    NoSubtitles,

    #[error("Subtitle URL is empty.")]
    EmptySubtitleUrl,

    #[error("Subtitle body is empty.")]
    EmptyBody,
}
