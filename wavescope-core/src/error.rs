use thiserror::Error;

/// Configuration errors surfaced to the host. Gesture-driven operations never
/// fail; they saturate instead.
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("buffer of {length} samples is too short, need more than {min}")]
    BufferTooShort { length: usize, min: usize },

    #[error("buffer has no channels")]
    NoChannels,

    #[error("channel {channel} has {found} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid channel count: {0}")]
    InvalidChannelCount(usize),

    #[error("invalid style: {0}")]
    Style(#[from] serde_json::Error),
}
