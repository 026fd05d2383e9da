//! PFM writer.

use enough::Stop;

use crate::endian::ByteOrder;
use crate::error::PfmError;
use crate::raster::RasterImage;

/// Serialize a raster as PFM with samples in `order`.
///
/// Rows are written in storage order, matching what the decoder reads back.
pub(crate) fn encode_pfm(
    image: &RasterImage,
    order: ByteOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PfmError> {
    let RasterImage {
        width,
        height,
        layout,
        ..
    } = *image;
    let row_len = (width as usize)
        .checked_mul(layout.channels())
        .ok_or(PfmError::DimensionsTooLarge { width, height })?;
    let expected = row_len
        .checked_mul(height as usize)
        .ok_or(PfmError::DimensionsTooLarge { width, height })?;
    if image.samples.len() != expected {
        return Err(PfmError::SampleCountMismatch {
            expected,
            actual: image.samples.len(),
        });
    }

    let scale = match order {
        ByteOrder::Little => "-1.0",
        ByteOrder::Big => "1.0",
    };
    let header = format!("P{}\n{width} {height}\n{scale}\n", layout.pfm_tag() as char);
    let payload = expected
        .checked_mul(4)
        .ok_or(PfmError::DimensionsTooLarge { width, height })?;
    let mut out = Vec::with_capacity(header.len().saturating_add(payload));
    out.extend_from_slice(header.as_bytes());

    for (row_idx, row) in image.samples.chunks(row_len.max(1)).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for s in row {
            match order {
                ByteOrder::Little => out.extend_from_slice(&s.to_le_bytes()),
                ByteOrder::Big => out.extend_from_slice(&s.to_be_bytes()),
            }
        }
    }

    Ok(out)
}
