//! JPEG XL encode orchestration for single-channel float rasters.
//!
//! The compression itself happens in a [`JxlBackend`]; this module
//! configures it, submits one frame and drains its output into a buffer
//! that doubles whenever the backend runs out of space.

mod backend;
#[cfg(feature = "jpegxl")]
mod libjxl;
mod output;

pub use backend::{
    BasicInfo, CodecStatus, ColorEncoding, ColorSpace, DataType, Endianness, FrameOption,
    JxlBackend, PixelFormat, Primaries, ProcessOutput, RenderingIntent, TransferFunction,
    WhitePoint,
};
#[cfg(feature = "jpegxl")]
pub use libjxl::LibJxlBackend;

use std::path::Path;

use enough::Stop;
use log::{debug, trace};

use crate::container::write_container;
use crate::error::PfmError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::raster::RasterImage;
use output::OutputBuffer;

/// Encoder effort used for every frame.
pub const EFFORT: u32 = 7;

/// Starting size of the output buffer before any doubling.
pub const INITIAL_OUTPUT_CAPACITY: usize = 64;

/// Per-call encode settings.
///
/// A `distance` of zero or less selects lossless mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodeOptions {
    pub bits_per_sample: u32,
    pub exponent_bits: u32,
    pub distance: f32,
    pub resampling: u32,
}

impl EncodeOptions {
    /// Lossless, full 32-bit float precision, no resampling.
    pub const fn lossless() -> Self {
        Self {
            bits_per_sample: 32,
            exponent_bits: 8,
            distance: 0.0,
            resampling: 1,
        }
    }

    /// Lossy at `distance`, full 32-bit float precision, no resampling.
    pub const fn lossy(distance: f32) -> Self {
        Self {
            distance,
            ..Self::lossless()
        }
    }

    pub const fn with_bit_depth(mut self, bits_per_sample: u32, exponent_bits: u32) -> Self {
        self.bits_per_sample = bits_per_sample;
        self.exponent_bits = exponent_bits;
        self
    }

    pub const fn with_resampling(mut self, resampling: u32) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn is_lossless(&self) -> bool {
        self.distance <= 0.0
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::lossless()
    }
}

#[track_caller]
fn check(result: Result<(), CodecStatus>) -> Result<(), PfmError> {
    match result {
        Ok(()) => Ok(()),
        Err(status) => Err(PfmError::codec(status)),
    }
}

/// Builder for a JPEG XL encode.
///
/// ```no_run
/// # #[cfg(feature = "jpegxl")]
/// # {
/// use zenpfm::jxl::{EncodeOptions, EncodeRequest, LibJxlBackend};
/// use zenpfm::Unstoppable;
///
/// let image = zenpfm::decode_file("input.pfm", Unstoppable)?;
/// let bytes = EncodeRequest::new(EncodeOptions::lossy(1.0))
///     .encode(&image, LibJxlBackend::new()?, Unstoppable)?;
/// zenpfm::write_container("lossy.jxl", &bytes)?;
/// # }
/// # Ok::<(), zenpfm::PfmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    options: EncodeOptions,
    limits: Option<&'a Limits>,
    initial_capacity: usize,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            options,
            limits: None,
            initial_capacity: INITIAL_OUTPUT_CAPACITY,
        }
    }

    /// Cap the output buffer with `limits.max_memory_bytes`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode a decoded raster. Only [`PixelLayout::GrayF32`] is accepted.
    pub fn encode<B: JxlBackend>(
        &self,
        image: &RasterImage,
        backend: B,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PfmError> {
        if image.layout != PixelLayout::GrayF32 {
            return Err(PfmError::UnsupportedChannelLayout(image.layout));
        }
        self.encode_gray(&image.samples, image.width, image.height, backend, &stop)
    }

    /// Encode raw grayscale samples, row-major, `width * height` of them.
    pub fn encode_samples<B: JxlBackend>(
        &self,
        samples: &[f32],
        width: u32,
        height: u32,
        backend: B,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PfmError> {
        self.encode_gray(samples, width, height, backend, &stop)
    }

    /// Encode and write the container to `path`.
    ///
    /// The file is only created once encoding has succeeded.
    pub fn encode_to_file<B: JxlBackend>(
        &self,
        image: &RasterImage,
        path: impl AsRef<Path>,
        backend: B,
        stop: impl Stop,
    ) -> Result<usize, PfmError> {
        let bytes = self.encode(image, backend, stop)?;
        write_container(path, &bytes)?;
        Ok(bytes.len())
    }

    fn encode_gray<B: JxlBackend>(
        &self,
        samples: &[f32],
        width: u32,
        height: u32,
        mut backend: B,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, PfmError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PfmError::DimensionsTooLarge { width, height })?;
        if samples.len() != expected {
            return Err(PfmError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        if let Some(limits) = self.limits {
            limits.check_raster(width, height)?;
        }

        let opts = &self.options;
        debug!(
            "encoding {width}x{height} gray f32: {} bits/{} exponent, {}, resampling {}",
            opts.bits_per_sample,
            opts.exponent_bits,
            if opts.is_lossless() {
                "lossless".to_owned()
            } else {
                format!("distance {}", opts.distance)
            },
            opts.resampling
        );

        check(backend.set_basic_info(&BasicInfo {
            xsize: width,
            ysize: height,
            num_color_channels: 1,
            num_extra_channels: 0,
            bits_per_sample: opts.bits_per_sample,
            exponent_bits_per_sample: opts.exponent_bits,
            uses_original_profile: true,
        }))?;
        check(backend.set_color_encoding(&ColorEncoding::LINEAR_GRAY))?;

        check(backend.set_frame_option(FrameOption::Effort(EFFORT)))?;
        if opts.is_lossless() {
            check(backend.set_frame_option(FrameOption::Lossless(true)))?;
        } else {
            check(backend.set_frame_option(FrameOption::Lossless(false)))?;
            check(backend.set_frame_option(FrameOption::Distance(opts.distance)))?;
        }
        check(backend.set_frame_option(FrameOption::Resampling(opts.resampling)))?;

        stop.check()?;

        let format = PixelFormat {
            num_channels: 1,
            data_type: DataType::Float,
            endianness: Endianness::Native,
            align: 0,
        };
        check(backend.add_image_frame(&format, samples))?;
        backend.close_input();

        self.drain(&mut backend, stop)
    }

    /// Pull output until the backend reports anything but `NeedMoreOutput`.
    fn drain<B: JxlBackend>(&self, backend: &mut B, stop: &dyn Stop) -> Result<Vec<u8>, PfmError> {
        let mut out = OutputBuffer::new(self.initial_capacity);
        loop {
            stop.check()?;
            let ProcessOutput { status, written } = backend.process_output(out.spare_mut());
            if !out.advance(written) {
                return Err(PfmError::codec(CodecStatus::Error));
            }
            trace!(
                "process_output: {status}, {written} bytes, {}/{} used",
                out.written(),
                out.capacity()
            );
            match status {
                CodecStatus::NeedMoreOutput => out.grow(self.limits)?,
                CodecStatus::Success => break,
                other => return Err(PfmError::codec(other)),
            }
        }
        let bytes = out.into_bytes();
        debug!("encoded {} bytes", bytes.len());
        Ok(bytes)
    }
}
