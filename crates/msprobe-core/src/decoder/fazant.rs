//! Diagnostic decoder that never touches the chip.

use crate::access::ChipAccess;
use crate::decoder::{Decoder, SafetyTier};
use crate::error::AccessResult;
use crate::types::{Signal, VideoStatus};

/// The status `fazant` always reports
pub const FAZANT_STATUS: VideoStatus = VideoStatus {
    width: 42,
    height: 42,
    signal: Some(Signal::Diagnostic),
    frame_id: 0,
    colorspace: None,
    format: None,
};

/// Always succeeds with [`FAZANT_STATUS`]; for exercising the output path
#[derive(Debug, Clone, Copy, Default)]
pub struct Fazant;

impl Decoder for Fazant
{
    fn name(&self) -> &'static str
    {
        "fazant"
    }

    fn safety(&self) -> SafetyTier
    {
        SafetyTier::Diagnostic
    }

    fn decode(&self, _chip: &mut dyn ChipAccess) -> AccessResult<VideoStatus>
    {
        Ok(FAZANT_STATUS)
    }
}
