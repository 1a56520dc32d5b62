//! Signal-detect block at RAM 0xe180.
//!
//! This is the block the firmware's own mode detection writes, so it is
//! always right. Reading it while the firmware updates it can lock the chip
//! up, which is where the name comes from.
//!
//! Layout (16 bytes):
//!
//! | Offset | Meaning |
//! |---|---|
//! | 0 | signal mode code |
//! | 4..6 | active width, little endian |
//! | 12..14 | active height, little endian (per field when interlaced) |

use crate::access::{read_array, ChipAccess};
use crate::decoder::{Decoder, SafetyTier};
use crate::error::AccessResult;
use crate::types::{Address, Region, Signal, VideoStatus};

/// The 16-byte signal-detect block
pub const BLOCK: Region = Region::ram(Address::new(0xe180), 16);

/// Signal mode code found in byte 0 of the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode
{
    /// `0x00`: nothing connected since power-up
    NoSignal,
    /// `0x08`: signal lost after a progressive source
    NoSignalAfterProgressive,
    /// `0x07`: progressive source locked
    Progressive,
    /// `0x0f`: interlaced source locked; the height field counts one field
    Interlaced,
    /// Any other code
    Other(u8),
}

impl SignalMode
{
    /// Classify a raw mode byte
    pub const fn from_code(code: u8) -> Self
    {
        match code {
            0x00 => SignalMode::NoSignal,
            0x08 => SignalMode::NoSignalAfterProgressive,
            0x07 => SignalMode::Progressive,
            0x0f => SignalMode::Interlaced,
            other => SignalMode::Other(other),
        }
    }

    /// Whether this code means a source is present
    pub const fn has_signal(self) -> bool
    {
        !matches!(self, SignalMode::NoSignal | SignalMode::NoSignalAfterProgressive)
    }
}

/// Decode a raw block
///
/// ```rust
/// use msprobe_core::decoder::murderous::decode_block;
///
/// let mut block = [0u8; 16];
/// block[0] = 0x0f;
/// block[4..6].copy_from_slice(&1920u16.to_le_bytes());
/// block[12..14].copy_from_slice(&540u16.to_le_bytes());
///
/// let status = decode_block(&block);
/// assert_eq!((status.width, status.height), (1920, 1080));
/// ```
pub fn decode_block(block: &[u8; 16]) -> VideoStatus
{
    let mode = SignalMode::from_code(block[0]);
    let width = u32::from(u16::from_le_bytes([block[4], block[5]]));
    let raw_height = u32::from(u16::from_le_bytes([block[12], block[13]]));

    let height = if mode == SignalMode::Interlaced {
        raw_height * 2
    } else {
        raw_height
    };

    VideoStatus {
        width,
        height,
        signal: Some(Signal::from(mode.has_signal())),
        ..VideoStatus::default()
    }
}

/// Reads the signal-detect block; accurate, but may crash the device
#[derive(Debug, Clone, Copy, Default)]
pub struct Murderous;

impl Decoder for Murderous
{
    fn name(&self) -> &'static str
    {
        "murderous"
    }

    fn safety(&self) -> SafetyTier
    {
        SafetyTier::Unsafe
    }

    fn decode(&self, chip: &mut dyn ChipAccess) -> AccessResult<VideoStatus>
    {
        let block: [u8; 16] = read_array(chip, &BLOCK)?;
        Ok(decode_block(&block))
    }
}
