//! RAM image backend.
//!
//! Serves memory reads from a file holding a dump of the chip's RAM, where
//! file offset N is chip address N. The file is reopened on every read, so a
//! dump that another tool keeps refreshing is observed live.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::access::ChipAccess;
use crate::error::{AccessError, AccessResult};
use crate::types::{Address, Region, RegisterSnapshot};

/// Chip RAM backed by an image file
///
/// Reads past the end of the file come back short or empty, exactly like a
/// chip that is not ready. Firmware procedure calls are not possible.
///
/// ## Example
///
/// ```rust,no_run
/// use msprobe_core::access::ChipAccess;
/// use msprobe_core::image::MemoryImage;
/// use msprobe_core::types::Address;
///
/// let mut image = MemoryImage::open("ram.bin")?;
/// let flag = image.read_byte(Address::new(0xf6e9))?;
/// # Ok::<(), msprobe_core::error::AccessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryImage
{
    path: PathBuf,
}

impl MemoryImage
{
    /// Use the image at `path`
    ///
    /// ## Errors
    ///
    /// - `Io`: The path does not exist or cannot be inspected
    /// - `Unsupported`: The path is not a regular file
    pub fn open(path: impl AsRef<Path>) -> AccessResult<Self>
    {
        let path = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(AccessError::Unsupported(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        debug!(path = %path.display(), bytes = metadata.len(), "using RAM image");
        Ok(MemoryImage { path })
    }
}

impl ChipAccess for MemoryImage
{
    fn read_memory(&mut self, region: &Region) -> AccessResult<Vec<u8>>
    {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(u64::from(region.address)))?;

        let mut buf = Vec::with_capacity(region.size());
        file.take(u64::from(region.len)).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn call_procedure(&mut self, entry: Address) -> AccessResult<RegisterSnapshot>
    {
        Err(AccessError::Unsupported(format!(
            "a RAM image cannot execute firmware code at {entry}"
        )))
    }
}
