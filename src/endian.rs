//! Byte order detection and float byte swapping.

use enough::Stop;

use crate::error::PfmError;

/// Byte order of stored float samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the machine we are running on.
    pub const fn host() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    pub fn is_host(&self) -> bool {
        *self == Self::host()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little-endian",
            ByteOrder::Big => "big-endian",
        }
    }
}

/// Reverse all four bytes of a float's bit pattern.
#[inline]
pub fn swap_f32(value: f32) -> f32 {
    f32::from_bits(value.to_bits().swap_bytes())
}

/// Byte-swap every sample in place, checking `stop` once per chunk.
pub(crate) fn swap_in_place(samples: &mut [f32], stop: &dyn Stop) -> Result<(), PfmError> {
    for chunk in samples.chunks_mut(64 * 1024) {
        stop.check()?;
        for s in chunk.iter_mut() {
            *s = swap_f32(*s);
        }
    }
    Ok(())
}
