//! [`JxlBackend`] over libjxl via `jpegxl-rs`.
//!
//! `jpegxl-rs` encodes a whole frame in one call, so configuration is
//! collected first, the frame is compressed in `add_image_frame`, and
//! `process_output` hands the finished codestream out in whatever pieces
//! the caller has room for.

use jpegxl_rs::ThreadsRunner;
use jpegxl_rs::encode::{EncoderFrame, EncoderResult, EncoderSpeed, encoder_builder};
use log::{debug, warn};

use super::backend::{
    BasicInfo, CodecStatus, ColorEncoding, ColorSpace, DataType, FrameOption, JxlBackend,
    PixelFormat, ProcessOutput, TransferFunction,
};
use crate::error::PfmError;

/// libjxl encoder with its own worker pool, for one image.
pub struct LibJxlBackend {
    runner: ThreadsRunner<'static>,
    info: Option<BasicInfo>,
    effort: u32,
    lossless: bool,
    distance: f32,
    encoded: Option<Vec<u8>>,
    sent: usize,
    closed: bool,
}

impl LibJxlBackend {
    /// Create an encoder backed by a thread pool sized to the machine.
    pub fn new() -> Result<Self, PfmError> {
        let runner = ThreadsRunner::new(None, None)
            .ok_or_else(|| PfmError::codec(CodecStatus::Error))?;
        Ok(Self {
            runner,
            info: None,
            effort: super::EFFORT,
            lossless: false,
            distance: 1.0,
            encoded: None,
            sent: 0,
            closed: false,
        })
    }
}

fn speed_for_effort(effort: u32) -> Option<EncoderSpeed> {
    Some(match effort {
        1 => EncoderSpeed::Lightning,
        2 => EncoderSpeed::Thunder,
        3 => EncoderSpeed::Falcon,
        4 => EncoderSpeed::Cheetah,
        5 => EncoderSpeed::Hare,
        6 => EncoderSpeed::Wombat,
        7 => EncoderSpeed::Squirrel,
        8 => EncoderSpeed::Kitten,
        9 => EncoderSpeed::Tortoise,
        10 => EncoderSpeed::Glacier,
        _ => return None,
    })
}

impl JxlBackend for LibJxlBackend {
    fn set_basic_info(&mut self, info: &BasicInfo) -> Result<(), CodecStatus> {
        // jpegxl-rs derives the stored depth from the sample type.
        if info.bits_per_sample != 32 || info.exponent_bits_per_sample != 8 {
            return Err(CodecStatus::NotSupported);
        }
        if info.num_color_channels != 1 || info.num_extra_channels != 0 {
            return Err(CodecStatus::NotSupported);
        }
        if info.xsize == 0 || info.ysize == 0 {
            return Err(CodecStatus::Error);
        }
        self.info = Some(*info);
        Ok(())
    }

    fn set_color_encoding(&mut self, encoding: &ColorEncoding) -> Result<(), CodecStatus> {
        if encoding.color_space != ColorSpace::Gray
            || encoding.transfer_function != TransferFunction::Linear
        {
            return Err(CodecStatus::NotSupported);
        }
        Ok(())
    }

    fn set_frame_option(&mut self, option: FrameOption) -> Result<(), CodecStatus> {
        match option {
            FrameOption::Effort(effort) => {
                speed_for_effort(effort).ok_or(CodecStatus::Error)?;
                self.effort = effort;
            }
            FrameOption::Lossless(lossless) => self.lossless = lossless,
            FrameOption::Distance(distance) => {
                if !(0.0..=25.0).contains(&distance) {
                    return Err(CodecStatus::Error);
                }
                self.distance = distance;
            }
            FrameOption::Resampling(1) => {}
            FrameOption::Resampling(_) => return Err(CodecStatus::NotSupported),
        }
        Ok(())
    }

    fn add_image_frame(
        &mut self,
        format: &PixelFormat,
        samples: &[f32],
    ) -> Result<(), CodecStatus> {
        let info = self.info.ok_or(CodecStatus::Error)?;
        if format.data_type != DataType::Float || format.num_channels != 1 || format.align != 0 {
            return Err(CodecStatus::NotSupported);
        }
        if samples.len() != info.xsize as usize * info.ysize as usize {
            return Err(CodecStatus::Error);
        }
        let speed = speed_for_effort(self.effort).ok_or(CodecStatus::Error)?;

        let mut encoder = encoder_builder()
            .parallel_runner(&self.runner)
            .build()
            .map_err(|e| {
                warn!("libjxl encoder setup failed: {e}");
                CodecStatus::Error
            })?;
        encoder.speed = speed;
        encoder.lossless = self.lossless;
        encoder.quality = if self.lossless { 0.0 } else { self.distance };
        encoder.uses_original_profile = true;
        encoder.color_encoding = jpegxl_rs::encode::ColorEncoding::LinearSrgbLuma;

        let frame = EncoderFrame::new(samples).num_channels(1);
        let result: EncoderResult<f32> = encoder
            .encode_frame(&frame, info.xsize, info.ysize)
            .map_err(|e| {
                warn!("libjxl encode failed: {e}");
                CodecStatus::Error
            })?;
        debug!("libjxl produced {} bytes", result.data.len());
        self.encoded = Some(result.data);
        self.sent = 0;
        Ok(())
    }

    fn close_input(&mut self) {
        self.closed = true;
    }

    fn process_output(&mut self, out: &mut [u8]) -> ProcessOutput {
        let Some(encoded) = self.encoded.as_deref().filter(|_| self.closed) else {
            return ProcessOutput {
                status: CodecStatus::Error,
                written: 0,
            };
        };
        let remaining = &encoded[self.sent..];
        let n = remaining.len().min(out.len());
        out[..n].copy_from_slice(&remaining[..n]);
        self.sent += n;
        let status = if self.sent < encoded.len() {
            CodecStatus::NeedMoreOutput
        } else {
            CodecStatus::Success
        };
        ProcessOutput { status, written: n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effort_range() {
        assert!(speed_for_effort(0).is_none());
        assert!(speed_for_effort(7).is_some());
        assert!(speed_for_effort(11).is_none());
    }

    #[test]
    fn rejects_unsupported_depth_and_resampling() {
        let mut b = LibJxlBackend::new().unwrap();
        let info = BasicInfo {
            xsize: 1,
            ysize: 1,
            num_color_channels: 1,
            num_extra_channels: 0,
            bits_per_sample: 16,
            exponent_bits_per_sample: 5,
            uses_original_profile: true,
        };
        assert_eq!(b.set_basic_info(&info), Err(CodecStatus::NotSupported));
        assert_eq!(
            b.set_frame_option(FrameOption::Resampling(2)),
            Err(CodecStatus::NotSupported)
        );
    }

    #[test]
    fn output_before_frame_is_error() {
        let mut b = LibJxlBackend::new().unwrap();
        let mut out = [0u8; 16];
        assert_eq!(b.process_output(&mut out).status, CodecStatus::Error);
    }
}
