use crate::pixel::PixelLayout;

/// A decoded float raster, row-major, no padding.
///
/// `samples.len() == width * height * layout.channels()`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub samples: Vec<f32>,
}

/// Kind of non-finite sample found by [`RasterImage::non_finite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonFiniteKind {
    Nan,
    Infinite,
}

/// A NaN or infinite sample, with its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonFinite {
    /// Index into `samples`.
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub kind: NonFiniteKind,
}

impl RasterImage {
    /// Number of channels per pixel (1 or 3).
    pub fn channel_count(&self) -> usize {
        self.layout.channels()
    }

    /// Iterate over NaN and infinite samples in storage order.
    pub fn non_finite(&self) -> impl Iterator<Item = NonFinite> + '_ {
        let channels = self.channel_count();
        let width = (self.width as usize).max(1);
        self.samples.iter().enumerate().filter_map(move |(index, s)| {
            let kind = if s.is_nan() {
                NonFiniteKind::Nan
            } else if s.is_infinite() {
                NonFiniteKind::Infinite
            } else {
                return None;
            };
            let pixel = index / channels;
            Some(NonFinite {
                index,
                x: (pixel % width) as u32,
                y: (pixel / width) as u32,
                kind,
            })
        })
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of single-channel samples.
    ///
    /// Returns `None` unless the layout is [`PixelLayout::GrayF32`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, f32>> {
        if self.layout != PixelLayout::GrayF32 {
            return None;
        }
        Some(imgref::ImgRef::new(
            &self.samples,
            self.width as usize,
            self.height as usize,
        ))
    }
}
