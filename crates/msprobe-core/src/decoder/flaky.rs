//! Scaler input registers mirrored in RAM.
//!
//! These windows are safe to read at any time but are only refreshed on some
//! mode changes, so they can lag behind the real input.

use crate::access::{read_array, ChipAccess};
use crate::decoder::{Decoder, SafetyTier};
use crate::error::AccessResult;
use crate::types::{Address, Colorspace, InputFormat, Region, Signal, VideoStatus};

/// Width and height, two little-endian `u16`s
pub const DIMENSIONS: Region = Region::ram(Address::new(0xf660), 4);

/// "No signal" flag; zero while a source is locked
pub const SIGNAL_FLAG: Address = Address::new(0xf6e9);

/// Input colourspace code
pub const COLORSPACE: Address = Address::new(0x1c3a);

/// Input link format code
pub const FORMAT: Address = Address::new(0x1c41);

/// Split the dimensions window into `(width, height)`
///
/// ```rust
/// use msprobe_core::decoder::flaky::decode_dimensions;
///
/// assert_eq!(decode_dimensions([0x80, 0x07, 0x38, 0x04]), (1920, 1080));
/// ```
pub fn decode_dimensions(bytes: [u8; 4]) -> (u32, u32)
{
    (
        u32::from(u16::from_le_bytes([bytes[0], bytes[1]])),
        u32::from(u16::from_le_bytes([bytes[2], bytes[3]])),
    )
}

/// Map a colourspace code; anything past 1 reads as 4:4:4
pub const fn decode_colorspace(code: u8) -> Colorspace
{
    match code {
        0 => Colorspace::Rgb,
        1 => Colorspace::Y422,
        _ => Colorspace::Y444,
    }
}

/// Map a link format code, leaving unknown codes unset
pub const fn decode_format(code: u8) -> Option<InputFormat>
{
    match code {
        0 => Some(InputFormat::Dvi),
        2 => Some(InputFormat::Hdmi),
        _ => None,
    }
}

/// Reads the mirrored scaler input registers; safe but sometimes stale
#[derive(Debug, Clone, Copy, Default)]
pub struct Flaky;

impl Decoder for Flaky
{
    fn name(&self) -> &'static str
    {
        "flaky"
    }

    fn safety(&self) -> SafetyTier
    {
        SafetyTier::Safe
    }

    fn decode(&self, chip: &mut dyn ChipAccess) -> AccessResult<VideoStatus>
    {
        let (width, height) = decode_dimensions(read_array(chip, &DIMENSIONS)?);
        let signal = Signal::from_flag(chip.read_byte(SIGNAL_FLAG)?);
        let colorspace = decode_colorspace(chip.read_byte(COLORSPACE)?);
        let format = decode_format(chip.read_byte(FORMAT)?);

        Ok(VideoStatus {
            width,
            height,
            signal: Some(signal),
            colorspace: Some(colorspace),
            format,
            ..VideoStatus::default()
        })
    }
}
