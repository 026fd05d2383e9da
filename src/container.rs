//! Output container persistence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::error::PfmError;

/// Write an encoded container to `path`, replacing any existing file.
///
/// Not atomic: a failed write can leave a partial file behind.
pub fn write_container(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), PfmError> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
