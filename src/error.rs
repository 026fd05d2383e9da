use core::panic::Location;
use enough::StopReason;

use crate::jxl::CodecStatus;
use crate::pixel::PixelLayout;

/// Errors from PFM decoding, JPEG XL encoding and container output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PfmError {
    #[error("malformed PFM header: {0}")]
    MalformedHeader(String),

    #[error("truncated payload: expected {expected} samples, found {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported channel layout {0:?}: only single-channel images can be encoded")]
    UnsupportedChannelLayout(PixelLayout),

    #[error("codec error at {location}: status {status}")]
    Codec {
        status: CodecStatus,
        location: &'static Location<'static>,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl PfmError {
    /// Codec failure tagged with the caller's source location.
    #[track_caller]
    pub(crate) fn codec(status: CodecStatus) -> Self {
        PfmError::Codec {
            status,
            location: Location::caller(),
        }
    }
}

impl From<StopReason> for PfmError {
    fn from(r: StopReason) -> Self {
        PfmError::Cancelled(r)
    }
}
