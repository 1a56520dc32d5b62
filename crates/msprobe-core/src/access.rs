//! # Chip Access
//!
//! The interface decoders use to talk to the capture chip.
//!
//! The chip has no status API. Everything msprobe knows comes from two
//! primitives offered by the vendor control protocol:
//!
//! - **Memory reads**: copy a window of on-chip RAM
//! - **Procedure calls**: run a patched firmware function and read back the
//!   8051 registers it leaves behind
//!
//! Transports implement [`ChipAccess`]; decoders only ever see
//! `&mut dyn ChipAccess`, so a RAM image, a real device and a scripted test
//! double are interchangeable.

use tracing::trace;

use crate::error::{AccessError, AccessResult};
use crate::types::{Address, Region, RegisterSnapshot};

/// Low-level access to a capture chip
///
/// ## Failure semantics
///
/// An empty buffer from [`ChipAccess::read_memory`] is not an error at this
/// level: the firmware answers that way while it is busy. Callers that need
/// the bytes should go through [`ChipAccess::read_exact`], which turns empty
/// and short answers into [`AccessError`]s.
///
/// ## Thread Safety
///
/// Implementations are used from a single thread. Each call may block on the
/// device and some regions can destabilize it, so calls are never issued
/// concurrently.
pub trait ChipAccess
{
    /// Read `region.len` bytes starting at `region.address`
    ///
    /// May return fewer bytes than requested, including none.
    ///
    /// ## Errors
    ///
    /// - `NoDevice`: Nothing is connected
    /// - `Io`: The transport failed
    fn read_memory(&mut self, region: &Region) -> AccessResult<Vec<u8>>;

    /// Invoke the firmware function at `entry` and return the registers it
    /// leaves behind
    ///
    /// ## Errors
    ///
    /// - `ProcedureFailed`: The call did not complete
    /// - `Unsupported`: The backend cannot execute firmware code
    /// - `NoDevice`: Nothing is connected
    fn call_procedure(&mut self, entry: Address) -> AccessResult<RegisterSnapshot>;

    /// Read a region and insist on getting all of it
    ///
    /// Extra trailing bytes are dropped.
    ///
    /// ## Errors
    ///
    /// - `Empty`: The read returned no bytes
    /// - `ShortRead`: The read returned fewer bytes than `region.len`
    /// - Anything [`ChipAccess::read_memory`] returns
    fn read_exact(&mut self, region: &Region) -> AccessResult<Vec<u8>>
    {
        let mut buf = self.read_memory(region)?;
        trace!(%region, got = buf.len(), "memory read");

        if buf.is_empty() {
            return Err(AccessError::Empty { region: *region });
        }
        if buf.len() < region.size() {
            return Err(AccessError::ShortRead {
                region: *region,
                got: buf.len(),
            });
        }

        buf.truncate(region.size());
        Ok(buf)
    }

    /// Read a single byte of RAM
    ///
    /// ## Errors
    ///
    /// Same as [`ChipAccess::read_exact`].
    fn read_byte(&mut self, address: Address) -> AccessResult<u8>
    {
        let buf = self.read_exact(&Region::ram(address, 1))?;
        Ok(buf[0])
    }
}

/// Read a region into a fixed-size array
///
/// `N` is the number of bytes the caller decodes; `region.len` must be at
/// least that large.
///
/// ## Errors
///
/// Same as [`ChipAccess::read_exact`].
pub fn read_array<const N: usize>(chip: &mut dyn ChipAccess, region: &Region) -> AccessResult<[u8; N]>
{
    let buf = chip.read_exact(region)?;
    buf.get(..N)
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or(AccessError::ShortRead {
            region: *region,
            got: buf.len(),
        })
}

/// Backend used when no device or image is configured
///
/// Every access fails with [`AccessError::NoDevice`]. Decoders that never
/// touch the chip still work, which is handy for checking the output
/// pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl ChipAccess for Detached
{
    fn read_memory(&mut self, _region: &Region) -> AccessResult<Vec<u8>>
    {
        Err(AccessError::NoDevice)
    }

    fn call_procedure(&mut self, _entry: Address) -> AccessResult<RegisterSnapshot>
    {
        Err(AccessError::NoDevice)
    }
}
