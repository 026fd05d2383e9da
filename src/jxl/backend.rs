//! The encoder contract the orchestrator drives.
//!
//! Shapes mirror libjxl's encoder API: basic info and color encoding first,
//! frame options, one image frame, close input, then repeated output
//! processing into caller-provided space.

use core::fmt;

/// Encoder status codes, numbered as libjxl numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecStatus {
    Success,
    Error,
    NeedMoreOutput,
    NotSupported,
}

impl CodecStatus {
    pub fn code(self) -> i32 {
        match self {
            CodecStatus::Success => 0,
            CodecStatus::Error => 1,
            CodecStatus::NeedMoreOutput => 2,
            CodecStatus::NotSupported => 3,
        }
    }
}

impl fmt::Display for CodecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecStatus::Success => "success",
            CodecStatus::Error => "error",
            CodecStatus::NeedMoreOutput => "need more output",
            CodecStatus::NotSupported => "not supported",
        };
        write!(f, "{name} ({})", self.code())
    }
}

/// Image-level metadata supplied before any pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicInfo {
    pub xsize: u32,
    pub ysize: u32,
    pub num_color_channels: u32,
    pub num_extra_channels: u32,
    pub bits_per_sample: u32,
    pub exponent_bits_per_sample: u32,
    pub uses_original_profile: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Gray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitePoint {
    D65,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primaries {
    Srgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferFunction {
    Linear,
    Srgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderingIntent {
    Perceptual,
    Relative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorEncoding {
    pub color_space: ColorSpace,
    pub white_point: WhitePoint,
    pub primaries: Primaries,
    pub transfer_function: TransferFunction,
    pub rendering_intent: RenderingIntent,
}

impl ColorEncoding {
    /// Linear-light grayscale, D65, sRGB primaries, perceptual intent.
    pub const LINEAR_GRAY: Self = Self {
        color_space: ColorSpace::Gray,
        white_point: WhitePoint::D65,
        primaries: Primaries::Srgb,
        transfer_function: TransferFunction::Linear,
        rendering_intent: RenderingIntent::Perceptual,
    };
}

/// Per-frame encoder settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOption {
    /// Speed/size trade-off, 1 (fastest) to 10.
    Effort(u32),
    Lossless(bool),
    /// Butteraugli distance for lossy frames.
    Distance(f32),
    /// Downsampling factor: 1, 2, 4 or 8.
    Resampling(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Native,
    Little,
    Big,
}

/// Memory layout of the submitted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    pub num_channels: u32,
    pub data_type: DataType,
    pub endianness: Endianness,
    /// Row alignment in bytes; 0 means tightly packed.
    pub align: usize,
}

/// Result of one [`JxlBackend::process_output`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: CodecStatus,
    /// Bytes written into the provided slice.
    pub written: usize,
}

/// A JPEG XL encoder instance, used for exactly one image.
///
/// Configuration calls return the rejecting status on failure.
pub trait JxlBackend {
    fn set_basic_info(&mut self, info: &BasicInfo) -> Result<(), CodecStatus>;

    fn set_color_encoding(&mut self, encoding: &ColorEncoding) -> Result<(), CodecStatus>;

    fn set_frame_option(&mut self, option: FrameOption) -> Result<(), CodecStatus>;

    /// Submit a whole frame. `samples` holds `xsize * ysize * num_channels` values.
    fn add_image_frame(
        &mut self,
        format: &PixelFormat,
        samples: &[f32],
    ) -> Result<(), CodecStatus>;

    /// No further frames follow.
    fn close_input(&mut self);

    /// Write as much encoded output as fits into `out`.
    ///
    /// Returns [`CodecStatus::NeedMoreOutput`] while output remains,
    /// [`CodecStatus::Success`] once everything has been written.
    fn process_output(&mut self, out: &mut [u8]) -> ProcessOutput;
}

impl<B: JxlBackend + ?Sized> JxlBackend for &mut B {
    fn set_basic_info(&mut self, info: &BasicInfo) -> Result<(), CodecStatus> {
        (**self).set_basic_info(info)
    }

    fn set_color_encoding(&mut self, encoding: &ColorEncoding) -> Result<(), CodecStatus> {
        (**self).set_color_encoding(encoding)
    }

    fn set_frame_option(&mut self, option: FrameOption) -> Result<(), CodecStatus> {
        (**self).set_frame_option(option)
    }

    fn add_image_frame(
        &mut self,
        format: &PixelFormat,
        samples: &[f32],
    ) -> Result<(), CodecStatus> {
        (**self).add_image_frame(format, samples)
    }

    fn close_input(&mut self) {
        (**self).close_input()
    }

    fn process_output(&mut self, out: &mut [u8]) -> ProcessOutput {
        (**self).process_output(out)
    }
}
