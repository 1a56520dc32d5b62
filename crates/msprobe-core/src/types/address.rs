//! Chip memory address type.

use std::fmt;

/// Strongly typed address in the chip's 16-bit data space
///
/// The capture chips are 8051 derivatives: their RAM (XDATA) and firmware
/// entry points live in a 64 KiB address space, so every address fits in a
/// `u16`. The newtype keeps addresses from being mixed up with lengths or
/// register values.
///
/// ## Example
///
/// ```rust
/// use msprobe_core::types::Address;
///
/// let addr = Address::new(0xf660);
/// assert_eq!(addr.value(), 0xf660);
/// assert_eq!(addr.to_string(), "0xf660");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u16);

impl Address
{
    /// The null address (0x0000)
    pub const ZERO: Self = Address(0);

    /// Create a new address, usable in const contexts
    pub const fn new(value: u16) -> Self
    {
        Address(value)
    }

    /// Get the raw `u16` value of this address
    pub const fn value(self) -> u16
    {
        self.0
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        u64::from(address.0)
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:04x}", self.0)
    }
}
