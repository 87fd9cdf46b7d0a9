use thiserror::Error;

/// Failure conditions for one analysis call.
///
/// An empty transcription (silence, no chords found) is a successful result;
/// these variants cover malformed input and broken configuration only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    #[error("channel {channel} has {got} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        got: usize,
    },

    #[error("non-finite sample at channel {channel}, index {index}")]
    NonFiniteSample { channel: usize, index: usize },

    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("MusicXML export failed: {0}")]
    Export(String),
}
