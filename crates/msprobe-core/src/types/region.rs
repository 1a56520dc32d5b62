//! Memory region descriptors.

use std::fmt;

use super::Address;

/// Address space a region lives in
///
/// The chips expose several spaces through their vendor protocol; every status
/// window found so far sits in on-chip RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemorySpace
{
    /// On-chip RAM (8051 XDATA)
    Ram,
}

impl MemorySpace
{
    /// Name used by the vendor tooling for this space
    pub const fn name(self) -> &'static str
    {
        match self {
            MemorySpace::Ram => "RAM",
        }
    }
}

impl fmt::Display for MemorySpace
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

/// A fixed window of chip memory read as raw bytes
///
/// Regions are compile-time constants owned by the decoder that reads them.
///
/// ## Example
///
/// ```rust
/// use msprobe_core::types::{Address, MemorySpace, Region};
///
/// const DIMENSIONS: Region = Region::ram(Address::new(0xf660), 4);
///
/// assert_eq!(DIMENSIONS.space, MemorySpace::Ram);
/// assert_eq!(DIMENSIONS.to_string(), "RAM[0xf660..+4]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region
{
    /// Address space holding the window
    pub space: MemorySpace,
    /// First byte of the window
    pub address: Address,
    /// Window length in bytes
    pub len: u16,
}

impl Region
{
    /// Describe a window in on-chip RAM
    pub const fn ram(address: Address, len: u16) -> Self
    {
        Region {
            space: MemorySpace::Ram,
            address,
            len,
        }
    }

    /// Window length as a `usize`, for buffer sizing
    pub const fn size(&self) -> usize
    {
        self.len as usize
    }
}

impl fmt::Display for Region
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}[{}..+{}]", self.space, self.address, self.len)
    }
}
