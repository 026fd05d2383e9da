/// Sample memory layout of a float raster.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 32-bit float grayscale (`Pf`).
    GrayF32,
    /// 3 channels, 32-bit float RGB (`PF`).
    RgbF32,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * 4
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::GrayF32 => 1,
            Self::RgbF32 => 3,
        }
    }

    /// The PFM type byte following `P`.
    pub(crate) fn pfm_tag(&self) -> u8 {
        match self {
            Self::GrayF32 => b'f',
            Self::RgbF32 => b'F',
        }
    }

    pub(crate) fn from_pfm_tag(tag: u8) -> Option<Self> {
        match tag {
            b'f' => Some(Self::GrayF32),
            b'F' => Some(Self::RgbF32),
            _ => None,
        }
    }
}
