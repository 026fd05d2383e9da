#![allow(dead_code)]

use zenpfm::ByteOrder;
use zenpfm::jxl::{
    BasicInfo, CodecStatus, ColorEncoding, FrameOption, JxlBackend, PixelFormat, ProcessOutput,
};

/// PFM bytes: `header` followed by `samples` in `order`.
pub fn pfm_bytes(header: &str, samples: &[f32], order: ByteOrder) -> Vec<u8> {
    let mut out = header.as_bytes().to_vec();
    for s in samples {
        match order {
            ByteOrder::Little => out.extend_from_slice(&s.to_le_bytes()),
            ByteOrder::Big => out.extend_from_slice(&s.to_be_bytes()),
        }
    }
    out
}

pub fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 * 0.5 - 3.0).collect()
}

/// Codec double that "compresses" by storing sample bits verbatim.
///
/// Output is `b"FAKE"`, width and height as little-endian u32, then every
/// sample's bits. Like libjxl it fills the given space before asking for more.
#[derive(Debug)]
pub struct FakeCodec {
    pub info: Option<BasicInfo>,
    pub color: Option<ColorEncoding>,
    pub options: Vec<FrameOption>,
    pub format: Option<PixelFormat>,
    pub closed: bool,
    pub process_calls: usize,
    pub reject: Option<fn(&FrameOption) -> bool>,
    pub fail_after: Option<usize>,
    pub(crate) stream: Vec<u8>,
    pub(crate) sent: usize,
}

impl Default for FakeCodec {
    fn default() -> Self {
        Self {
            info: None,
            color: None,
            options: Vec::new(),
            format: None,
            closed: false,
            process_calls: 0,
            reject: None,
            fail_after: None,
            stream: Vec::new(),
            sent: 0,
        }
    }
}

impl FakeCodec {
    pub fn stream_len(&self) -> usize {
        self.stream.len()
    }

    pub fn lossless(&self) -> Option<bool> {
        self.options.iter().rev().find_map(|o| match o {
            FrameOption::Lossless(v) => Some(*v),
            _ => None,
        })
    }

    pub fn distance(&self) -> Option<f32> {
        self.options.iter().rev().find_map(|o| match o {
            FrameOption::Distance(v) => Some(*v),
            _ => None,
        })
    }
}

/// Inverse of the fake's output format.
pub fn fake_decode(bytes: &[u8]) -> (u32, u32, Vec<f32>) {
    assert_eq!(&bytes[..4], b"FAKE");
    let w = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let h = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    let samples = bytes[12..]
        .chunks_exact(4)
        .map(|c| f32::from_bits(u32::from_le_bytes(c.try_into().unwrap())))
        .collect();
    (w, h, samples)
}

impl JxlBackend for FakeCodec {
    fn set_basic_info(&mut self, info: &BasicInfo) -> Result<(), CodecStatus> {
        self.info = Some(*info);
        Ok(())
    }

    fn set_color_encoding(&mut self, encoding: &ColorEncoding) -> Result<(), CodecStatus> {
        self.color = Some(*encoding);
        Ok(())
    }

    fn set_frame_option(&mut self, option: FrameOption) -> Result<(), CodecStatus> {
        if self.reject.is_some_and(|reject| reject(&option)) {
            return Err(CodecStatus::Error);
        }
        self.options.push(option);
        Ok(())
    }

    fn add_image_frame(
        &mut self,
        format: &PixelFormat,
        samples: &[f32],
    ) -> Result<(), CodecStatus> {
        let info = self.info.ok_or(CodecStatus::Error)?;
        self.format = Some(*format);
        self.stream.extend_from_slice(b"FAKE");
        self.stream.extend_from_slice(&info.xsize.to_le_bytes());
        self.stream.extend_from_slice(&info.ysize.to_le_bytes());
        for s in samples {
            self.stream.extend_from_slice(&s.to_bits().to_le_bytes());
        }
        Ok(())
    }

    fn close_input(&mut self) {
        self.closed = true;
    }

    fn process_output(&mut self, out: &mut [u8]) -> ProcessOutput {
        self.process_calls += 1;
        if !self.closed {
            return ProcessOutput {
                status: CodecStatus::Error,
                written: 0,
            };
        }
        let n = out.len().min(self.stream.len() - self.sent);
        out[..n].copy_from_slice(&self.stream[self.sent..self.sent + n]);
        self.sent += n;
        if self.fail_after.is_some_and(|limit| self.sent >= limit) {
            return ProcessOutput {
                status: CodecStatus::Error,
                written: n,
            };
        }
        let status = if self.sent < self.stream.len() {
            CodecStatus::NeedMoreOutput
        } else {
            CodecStatus::Success
        };
        ProcessOutput { status, written: n }
    }
}
