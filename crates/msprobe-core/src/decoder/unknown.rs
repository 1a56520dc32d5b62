//! Second copy of the input timing, at RAM 0xf606.
//!
//! Looks like the flaky window with a different layout. It has not been
//! checked against a known source, so only width, height and the shared
//! signal flag are decoded.

use crate::access::{read_array, ChipAccess};
use crate::decoder::{flaky, Decoder, SafetyTier};
use crate::error::AccessResult;
use crate::types::{Address, Region, Signal, VideoStatus};

/// Timing window: width at 0..2, height at 6..8, both little endian
pub const TIMING: Region = Region::ram(Address::new(0xf606), 8);

/// Split the timing window into `(width, height)`
pub fn decode_timing(bytes: &[u8; 8]) -> (u32, u32)
{
    (
        u32::from(u16::from_le_bytes([bytes[0], bytes[1]])),
        u32::from(u16::from_le_bytes([bytes[6], bytes[7]])),
    )
}

/// Reads the alternate timing window; safe, accuracy unverified
#[derive(Debug, Clone, Copy, Default)]
pub struct Unknown;

impl Decoder for Unknown
{
    fn name(&self) -> &'static str
    {
        "unknown"
    }

    fn safety(&self) -> SafetyTier
    {
        SafetyTier::Unverified
    }

    fn decode(&self, chip: &mut dyn ChipAccess) -> AccessResult<VideoStatus>
    {
        let timing: [u8; 8] = read_array(chip, &TIMING)?;
        let (width, height) = decode_timing(&timing);
        let signal = Signal::from_flag(chip.read_byte(flaky::SIGNAL_FLAG)?);

        Ok(VideoStatus {
            width,
            height,
            signal: Some(signal),
            ..VideoStatus::default()
        })
    }
}
