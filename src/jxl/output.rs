use log::debug;

use crate::error::PfmError;
use crate::limits::Limits;

/// Growable output buffer with a write cursor separate from its capacity.
pub(crate) struct OutputBuffer {
    buf: Vec<u8>,
    written: usize,
}

impl OutputBuffer {
    pub(crate) fn new(initial: usize) -> Self {
        Self {
            buf: vec![0; initial.max(1)],
            written: 0,
        }
    }

    /// Unwritten space after the cursor.
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Move the cursor past `n` freshly written bytes.
    ///
    /// Returns `false` if `n` exceeds the spare space.
    pub(crate) fn advance(&mut self, n: usize) -> bool {
        if n > self.buf.len() - self.written {
            return false;
        }
        self.written += n;
        true
    }

    /// Double the capacity, keeping written bytes in place.
    pub(crate) fn grow(&mut self, limits: Option<&Limits>) -> Result<(), PfmError> {
        let new_len = self
            .buf
            .len()
            .checked_mul(2)
            .ok_or_else(|| PfmError::LimitExceeded("output buffer size overflows usize".into()))?;
        if let Some(limits) = limits {
            limits.check_buffer("output buffer", new_len)?;
        }
        debug!(
            "growing output buffer {} -> {new_len} bytes ({} written)",
            self.buf.len(),
            self.written
        );
        self.buf.resize(new_len, 0);
        Ok(())
    }

    /// The written bytes, without trailing spare space.
    pub(crate) fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.written);
        self.buf
    }
}
