use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use enough::Stop;

use crate::error::PfmError;
use crate::limits::Limits;
use crate::pfm::{self, PfmHeader};
use crate::raster::RasterImage;

/// Builder for a PFM decode.
///
/// ```no_run
/// use zenpfm::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(64 << 20), ..Default::default() };
/// let image = DecodeRequest::new()
///     .with_limits(&limits)
///     .decode_file("input.pfm", Unstoppable)?;
/// println!("{}x{} {:?}", image.width, image.height, image.layout);
/// # Ok::<(), zenpfm::PfmError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode a PFM file.
    ///
    /// For regular files the length is checked against the header before
    /// the sample buffer is allocated. Pipes and devices have no usable
    /// length and are read like any other stream. The file is closed on
    /// every return path.
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<RasterImage, PfmError> {
        let file = File::open(path.as_ref())?;
        let metadata = file.metadata()?;
        let available = metadata.is_file().then_some(metadata.len());
        let mut reader = BufReader::new(file);
        pfm::decode(&mut reader, self.limits, available, &stop)
    }

    /// Decode PFM from any byte stream positioned at the start of the header.
    ///
    /// The payload length is unknown up front, so samples are buffered as
    /// they arrive rather than allocated from the header's promise.
    pub fn decode_reader<R: Read>(
        &self,
        mut reader: R,
        stop: impl Stop,
    ) -> Result<RasterImage, PfmError> {
        pfm::decode(&mut reader, self.limits, None, &stop)
    }
}

/// Decode a PFM file with no limits.
pub fn decode_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<RasterImage, PfmError> {
    DecodeRequest::new().decode_file(path, stop)
}

/// Read only the header of a PFM file.
pub fn probe_file(path: impl AsRef<Path>) -> Result<PfmHeader, PfmError> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    pfm::read_header(&mut reader)
}
