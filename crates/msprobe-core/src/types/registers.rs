//! Register snapshot returned by a firmware procedure call.

/// Register values read back after a patched firmware function returns
///
/// A procedure call yields exactly one snapshot; it is never cached or
/// reused across calls. Multi-byte results are split across working
/// registers, high byte first.
///
/// ## Example
///
/// ```rust
/// use msprobe_core::types::RegisterSnapshot;
///
/// let regs = RegisterSnapshot::new(7, [0, 0, 0x80, 0x07, 0x38, 0x04, 0, 0]);
/// assert_eq!(regs.a, 7);
/// assert_eq!(u16::from_be_bytes([regs.r[3], regs.r[2]]), 1920);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSnapshot
{
    /// Accumulator
    pub a: u8,
    /// Working registers R0-R7 of the active bank
    pub r: [u8; 8],
}

impl RegisterSnapshot
{
    /// Create a snapshot from the accumulator and the eight working registers
    pub const fn new(a: u8, r: [u8; 8]) -> Self
    {
        RegisterSnapshot { a, r }
    }
}
