//! PFM sample payload reader.

use std::io::{ErrorKind, Read};

use enough::Stop;
use log::{debug, trace};

use super::PfmHeader;
use crate::endian;
use crate::error::PfmError;
use crate::raster::RasterImage;

/// Samples buffered per read when the stream length is unknown.
const CHUNK_SAMPLES: usize = 64 * 1024;

/// Read as many bytes as the stream has, up to `buf.len()`.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, PfmError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read `count` floats in one pass.
///
/// Only for sources whose length was already checked against `count`.
pub(crate) fn read_known<R: Read>(reader: &mut R, count: usize) -> Result<Vec<f32>, PfmError> {
    let mut samples = vec![0f32; count];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut samples);
    let filled = read_fully(reader, bytes)?;
    if filled < bytes.len() {
        return Err(PfmError::TruncatedPayload {
            expected: count,
            actual: filled / 4,
        });
    }
    Ok(samples)
}

/// Read `count` floats, growing the buffer only as data arrives.
pub(crate) fn read_streamed<R: Read>(
    reader: &mut R,
    count: usize,
    stop: &dyn Stop,
) -> Result<Vec<f32>, PfmError> {
    let mut samples = Vec::with_capacity(count.min(CHUNK_SAMPLES));
    while samples.len() < count {
        stop.check()?;
        let start = samples.len();
        samples.resize((start + CHUNK_SAMPLES).min(count), 0.0);
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut samples[start..]);
        let filled = read_fully(reader, bytes)?;
        if filled < bytes.len() {
            return Err(PfmError::TruncatedPayload {
                expected: count,
                actual: start + filled / 4,
            });
        }
        trace!("read {} of {count} samples", samples.len());
    }
    Ok(samples)
}

/// Fix the byte order of raw samples and wrap them in a raster.
pub(crate) fn finish(
    header: &PfmHeader,
    mut samples: Vec<f32>,
    stop: &dyn Stop,
) -> Result<RasterImage, PfmError> {
    stop.check()?;

    if !header.byte_order.is_host() {
        debug!(
            "swapping {} samples from {} to host order",
            samples.len(),
            header.byte_order.name()
        );
        endian::swap_in_place(&mut samples, stop)?;
    }

    Ok(RasterImage {
        width: header.width,
        height: header.height,
        layout: header.layout,
        samples,
    })
}
