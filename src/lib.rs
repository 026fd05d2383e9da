//! # zenpfm
//!
//! PFM (portable float map) decoder and JPEG XL encode pipeline for
//! single-channel floating-point images.
//!
//! ## Decoding
//!
//! The header is parsed strictly, one byte at a time:
//! - `Pf` (grayscale) or `PF` (RGB), newline
//! - `<width> <height>`, ASCII decimal with a single space, newline
//! - scale line: a leading `-` marks little-endian samples, anything else big-endian
//!
//! Samples follow immediately and are read in one pass, then byte-swapped
//! in place only when the file's byte order differs from the host's.
//!
//! ## Encoding
//!
//! [`jxl::EncodeRequest`] drives any [`jxl::JxlBackend`]: it declares a
//! linear grayscale float image, picks lossless or lossy from
//! [`jxl::EncodeOptions::distance`], submits a single frame and drains the
//! codestream into a buffer that doubles until the backend is done. The
//! `jpegxl` feature provides [`jxl::LibJxlBackend`] on top of libjxl.
//!
//! ## Non-Goals
//!
//! - Encoding RGB inputs (they decode, but are rejected by the encoder)
//! - Recovering anything from a malformed header
//!
//! ## Usage
//!
//! ```no_run
//! use zenpfm::{DecodeRequest, Unstoppable};
//!
//! let image = DecodeRequest::new().decode_file("input.pfm", Unstoppable)?;
//! for bad in image.non_finite() {
//!     eprintln!("{:?} at ({}, {})", bad.kind, bad.x, bad.y);
//! }
//! # Ok::<(), zenpfm::PfmError>(())
//! ```

#![forbid(unsafe_code)]

mod container;
mod decode;
mod endian;
mod error;
mod limits;
mod pixel;
mod raster;

pub mod jxl;
pub mod pfm;

// Re-exports
pub use container::write_container;
pub use decode::{DecodeRequest, decode_file, probe_file};
pub use endian::{ByteOrder, swap_f32};
pub use enough::{Stop, Unstoppable};
pub use error::PfmError;
pub use limits::Limits;
pub use pfm::PfmHeader;
pub use pixel::PixelLayout;
pub use raster::{NonFinite, NonFiniteKind, RasterImage};

/// Serialize a raster as PFM with samples in `order`.
///
/// Rows are written in storage order, so decoding the result yields an
/// identical [`RasterImage`].
pub fn encode_pfm(
    image: &RasterImage,
    order: ByteOrder,
    stop: impl Stop,
) -> Result<Vec<u8>, PfmError> {
    pfm::encode(image, order, &stop)
}
