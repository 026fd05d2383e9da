//! PFM header parser.
//!
//! The header is three newline-terminated records read one byte at a time,
//! so the reader is left positioned exactly on the first sample byte:
//!
//! ```text
//! Pf | PF            type: grayscale or RGB
//! <width> <height>   ASCII decimal, one space
//! <sign><scale>      leading '-' means little-endian samples
//! ```

use std::io::{ErrorKind, Read};

use log::debug;

use super::PfmHeader;
use crate::endian::ByteOrder;
use crate::error::PfmError;
use crate::pixel::PixelLayout;

const NEWLINE: u8 = 0x0a;
const SPACE: u8 = 0x20;

fn malformed(msg: impl Into<String>) -> PfmError {
    PfmError::MalformedHeader(msg.into())
}

/// Byte-at-a-time reader that counts what it consumed.
struct HeaderReader<'r, R: Read> {
    inner: &'r mut R,
    consumed: usize,
}

impl<'r, R: Read> HeaderReader<'r, R> {
    fn new(inner: &'r mut R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Next byte; end of stream is a header violation, not an I/O error.
    fn next(&mut self, field: &str) -> Result<u8, PfmError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Err(malformed(format!("unexpected end of stream in {field}"))),
                Ok(_) => {
                    self.consumed += 1;
                    return Ok(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// `P` then `f`/`F` then newline.
    fn read_kind(&mut self) -> Result<PixelLayout, PfmError> {
        let magic = self.next("type")?;
        if magic != b'P' {
            return Err(malformed(format!("expected 'P', found 0x{magic:02x}")));
        }
        let tag = self.next("type")?;
        let layout = PixelLayout::from_pfm_tag(tag)
            .ok_or_else(|| malformed(format!("unknown type byte 0x{tag:02x}")))?;
        let nl = self.next("type")?;
        if nl != NEWLINE {
            return Err(malformed(format!(
                "expected newline after type, found 0x{nl:02x}"
            )));
        }
        Ok(layout)
    }

    /// One non-empty run of decimal digits ended by `terminator`.
    fn read_decimal(&mut self, terminator: u8, field: &str) -> Result<u32, PfmError> {
        let mut value: u32 = 0;
        let mut digits = 0usize;
        loop {
            let c = self.next(field)?;
            match c {
                b'0'..=b'9' => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(c - b'0')))
                        .ok_or_else(|| malformed(format!("{field} does not fit in u32")))?;
                    digits += 1;
                }
                _ if c == terminator => break,
                _ => {
                    return Err(malformed(format!("unexpected byte 0x{c:02x} in {field}")));
                }
            }
        }
        if digits == 0 {
            return Err(malformed(format!("missing {field}")));
        }
        Ok(value)
    }

    fn read_dimensions(&mut self) -> Result<(u32, u32), PfmError> {
        let width = self.read_decimal(SPACE, "width")?;
        let height = self.read_decimal(NEWLINE, "height")?;
        Ok((width, height))
    }

    /// The first byte of the scale record picks the byte order, then
    /// everything up to and including the next newline is skipped.
    ///
    /// The first byte is consumed before the skip, so a newline there does
    /// not end the record.
    fn read_byte_order(&mut self) -> Result<ByteOrder, PfmError> {
        let first = self.next("scale")?;
        let order = if first == b'-' {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };
        while self.next("scale")? != NEWLINE {}
        Ok(order)
    }
}

/// Parse the header from a stream positioned at offset 0.
///
/// On success the stream is positioned on the first sample byte.
pub(crate) fn parse_header<R: Read>(reader: &mut R) -> Result<PfmHeader, PfmError> {
    let mut hr = HeaderReader::new(reader);
    let layout = hr.read_kind()?;
    let (width, height) = hr.read_dimensions()?;
    let byte_order = hr.read_byte_order()?;

    debug!(
        "PFM header: {width}x{height} {layout:?}, {} samples, {} header bytes",
        byte_order.name(),
        hr.consumed
    );

    Ok(PfmHeader {
        layout,
        width,
        height,
        byte_order,
        data_offset: hr.consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(bytes: &[u8]) -> Result<PfmHeader, PfmError> {
        parse_header(&mut Cursor::new(bytes))
    }

    fn assert_malformed(bytes: &[u8]) {
        match parse(bytes) {
            Err(PfmError::MalformedHeader(_)) => {}
            other => panic!("expected MalformedHeader for {bytes:?}, got {other:?}"),
        }
    }

    #[test]
    fn gray_little_endian() {
        let h = parse(b"Pf\n4 2\n-1.0\n").unwrap();
        assert_eq!(h.layout, PixelLayout::GrayF32);
        assert_eq!((h.width, h.height), (4, 2));
        assert_eq!(h.byte_order, ByteOrder::Little);
        assert_eq!(h.data_offset, 12);
    }

    #[test]
    fn rgb_big_endian() {
        let h = parse(b"PF\n640 480\n1.0\n").unwrap();
        assert_eq!(h.layout, PixelLayout::RgbF32);
        assert_eq!((h.width, h.height), (640, 480));
        assert_eq!(h.byte_order, ByteOrder::Big);
    }

    #[test]
    fn scale_magnitude_is_not_validated() {
        let h = parse(b"Pf\n1 1\n-0.003921 trailing junk\n").unwrap();
        assert_eq!(h.byte_order, ByteOrder::Little);
        let h = parse(b"Pf\n1 1\nxyz\n").unwrap();
        assert_eq!(h.byte_order, ByteOrder::Big);
    }

    #[test]
    fn leaves_stream_on_payload() {
        let mut cur = Cursor::new(&b"Pf\n1 1\n-1.0\nABCD"[..]);
        let h = parse_header(&mut cur).unwrap();
        assert_eq!(cur.position() as usize, h.data_offset);
        let mut rest = Vec::new();
        cur.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"ABCD");
    }

    #[test]
    fn leading_zeros_accepted() {
        let h = parse(b"Pf\n007 0010\n-1\n").unwrap();
        assert_eq!((h.width, h.height), (7, 10));
    }

    #[test]
    fn bad_magic() {
        assert_malformed(b"Qf\n1 1\n-1\n");
        assert_malformed(b"P6\n1 1\n255\n");
        assert_malformed(b"Pg\n1 1\n-1\n");
    }

    #[test]
    fn missing_newline_after_type() {
        assert_malformed(b"Pf 1 1\n-1\n");
        assert_malformed(b"Pf\r\n1 1\n-1\n");
    }

    #[test]
    fn bad_dimension_bytes() {
        assert_malformed(b"Pf\n1  1\n-1\n");
        assert_malformed(b"Pf\n1\t1\n-1\n");
        assert_malformed(b"Pf\n-1 1\n-1\n");
        assert_malformed(b"Pf\n1 1 \n-1\n");
        assert_malformed(b"Pf\n1 1\r\n-1\n");
    }

    // Stricter than plain digit accumulation, which reads an empty run as 0.
    #[test]
    fn empty_digit_runs() {
        assert_malformed(b"Pf\n 1\n-1\n");
        assert_malformed(b"Pf\n1 \n-1\n");
    }

    #[test]
    fn dimension_overflow_rejected() {
        assert!(parse(b"Pf\n4294967295 1\n-1\n").is_ok());
        assert_malformed(b"Pf\n4294967296 1\n-1\n");
        assert_malformed(b"Pf\n1 99999999999999999999\n-1\n");
    }

    #[test]
    fn newline_as_first_scale_byte_is_skipped() {
        let h = parse(b"Pf\n1 1\n\n-1\n").unwrap();
        assert_eq!(h.byte_order, ByteOrder::Big);
        assert_eq!(h.data_offset, 11);
        assert_malformed(b"Pf\n1 1\n\n");
    }

    #[test]
    fn truncation_at_every_offset() {
        let full = b"Pf\n12 34\n-1.0\n";
        for end in 0..full.len() {
            assert_malformed(&full[..end]);
        }
        assert!(parse(full).is_ok());
    }

    #[test]
    fn io_errors_are_not_header_errors() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }
        assert!(matches!(parse_header(&mut Failing), Err(PfmError::Io(_))));
    }
}
