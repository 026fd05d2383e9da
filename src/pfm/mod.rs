//! PFM (portable float map): `Pf` grayscale and `PF` RGB, 32-bit float samples.

mod decode;
mod encode;
mod header;

use std::io::Read;

use enough::Stop;

use crate::endian::ByteOrder;
use crate::error::PfmError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::raster::RasterImage;

/// Parsed PFM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PfmHeader {
    pub layout: PixelLayout,
    pub width: u32,
    pub height: u32,
    /// Byte order of the stored samples.
    pub byte_order: ByteOrder,
    /// Header length in bytes; samples start here.
    pub data_offset: usize,
}

impl PfmHeader {
    /// Number of `f32` samples the header promises.
    pub fn sample_count(&self) -> Result<usize, PfmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.layout.channels()))
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or(PfmError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Payload size in bytes.
    pub fn payload_bytes(&self) -> Result<usize, PfmError> {
        Ok(self.sample_count()? * 4)
    }
}

/// Parse the header from a stream positioned at offset 0.
///
/// The stream is left on the first sample byte.
pub fn read_header<R: Read>(reader: &mut R) -> Result<PfmHeader, PfmError> {
    header::parse_header(reader)
}

/// Header, limit checks, then the sample payload.
pub(crate) fn decode<R: Read>(
    reader: &mut R,
    limits: Option<&Limits>,
    available: Option<u64>,
    stop: &dyn Stop,
) -> Result<RasterImage, PfmError> {
    let header = header::parse_header(reader)?;

    if let Some(limits) = limits {
        limits.check_raster(header.width, header.height)?;
    }
    let count = header.sample_count()?;
    if let Some(limits) = limits {
        limits.check_buffer("sample buffer", count * 4)?;
    }
    if let Some(available) = available {
        let remaining = available.saturating_sub(header.data_offset as u64);
        if remaining < (count as u64) * 4 {
            return Err(PfmError::TruncatedPayload {
                expected: count,
                actual: (remaining / 4) as usize,
            });
        }
    }

    stop.check()?;

    let samples = if available.is_some() {
        decode::read_known(reader, count)?
    } else {
        decode::read_streamed(reader, count, stop)?
    };
    decode::finish(&header, samples, stop)
}

/// Serialize a raster as PFM.
pub(crate) fn encode(
    image: &RasterImage,
    order: ByteOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PfmError> {
    encode::encode_pfm(image, order, stop)
}
