use crate::error::PfmError;

/// Caps on raster size and on the buffers the pipeline allocates.
///
/// `None` means uncapped; the default caps nothing. Raster caps are checked
/// against a PFM header before any sample is read, and again before an
/// image is handed to the encoder.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`, independent of channel count.
    pub max_pixels: Option<u64>,
    /// Largest single buffer in bytes: the decoded sample buffer, or the
    /// encoder's output buffer after a doubling.
    pub max_memory_bytes: Option<u64>,
}

fn over(what: &str, value: u64, cap: Option<u64>) -> Result<(), PfmError> {
    match cap {
        Some(cap) if value > cap => Err(PfmError::LimitExceeded(format!(
            "{what} {value} over cap {cap}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Reject a `width` x `height` raster that breaks a dimension cap.
    pub(crate) fn check_raster(&self, width: u32, height: u32) -> Result<(), PfmError> {
        over("width", u64::from(width), self.max_width)?;
        over("height", u64::from(height), self.max_height)?;
        over(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Reject a `bytes`-sized buffer named `what` that breaks the memory cap.
    pub(crate) fn check_buffer(&self, what: &str, bytes: usize) -> Result<(), PfmError> {
        over(what, bytes as u64, self.max_memory_bytes)
    }
}
