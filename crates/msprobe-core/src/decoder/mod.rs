//! # Decoders
//!
//! The [`Decoder`] trait and one implementation per known status layout.
//!
//! The chip's memory map was worked out by poking at live devices, and the
//! windows that carry video status disagree with each other in layout and
//! reliability. Each decoder therefore owns its regions and byte rules
//! outright; none shares a layout with another, and adding one only means
//! adding an entry to [`REGISTRY`].
//!
//! | Name | Source | Safety |
//! |---|---|---|
//! | `murderous` | RAM 0xe180, 16 bytes | can crash the device, always accurate |
//! | `flaky` | four RAM windows | safe, not always accurate (default) |
//! | `unknown` | two RAM windows | safe, accuracy unverified |
//! | `bertold` / `bertold_scaler` | firmware procedure call | procedure-call safety |
//! | `fazant` | none | diagnostic fixed values |

pub mod bertold;
pub mod fazant;
pub mod flaky;
pub mod murderous;
pub mod unknown;

use std::fmt;

pub use bertold::Bertold;
pub use fazant::Fazant;
pub use flaky::Flaky;
pub use murderous::Murderous;
pub use unknown::Unknown;

use crate::access::ChipAccess;
use crate::error::AccessResult;
use crate::types::VideoStatus;

/// How risky a decoder's reads are for the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyTier
{
    /// Reads can hang or crash the chip
    Unsafe,
    /// Reads are harmless; results may be stale or wrong
    Safe,
    /// Reads are harmless; results have not been checked against known input
    Unverified,
    /// Runs firmware code; as safe as the patched call path
    ProcedureCall,
    /// Does not touch the chip
    Diagnostic,
}

impl SafetyTier
{
    /// One-line description for listings
    pub const fn description(self) -> &'static str
    {
        match self {
            SafetyTier::Unsafe => "may crash the device on read, accurate when it succeeds",
            SafetyTier::Safe => "safe to read, not always accurate",
            SafetyTier::Unverified => "safe to read, accuracy unverified",
            SafetyTier::ProcedureCall => "runs a patched firmware function",
            SafetyTier::Diagnostic => "fixed values, does not touch the device",
        }
    }
}

impl fmt::Display for SafetyTier
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.description())
    }
}

/// A strategy for turning chip state into a [`VideoStatus`]
///
/// Decoders hold no state between calls. They either return a complete
/// status or fail; a failure never leaks a partly filled status.
pub trait Decoder: Send + Sync
{
    /// Name used to select this decoder
    fn name(&self) -> &'static str;

    /// Risk class of the accesses this decoder performs
    fn safety(&self) -> SafetyTier;

    /// Read the chip and decode its current video status
    ///
    /// ## Errors
    ///
    /// Returns the first [`crate::error::AccessError`] hit by a required read
    /// or procedure call.
    fn decode(&self, chip: &mut dyn ChipAccess) -> AccessResult<VideoStatus>;
}

impl fmt::Debug for dyn Decoder
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Decoder").field("name", &self.name()).finish()
    }
}

/// Decoder used when none is selected or the selection is not recognized
pub const DEFAULT_DECODER: &dyn Decoder = &Flaky;

/// Every available decoder, in listing order
pub static REGISTRY: &[&dyn Decoder] = &[
    &Murderous,
    &Flaky,
    &Unknown,
    &Fazant,
    &Bertold::BEFORE_SCALER,
    &Bertold::AFTER_SCALER,
];

/// Look up a decoder by exact name
///
/// ```rust
/// use msprobe_core::decoder;
///
/// assert_eq!(decoder::find("murderous").map(|d| d.name()), Some("murderous"));
/// assert!(decoder::find("Murderous").is_none());
/// ```
pub fn find(name: &str) -> Option<&'static dyn Decoder>
{
    REGISTRY.iter().copied().find(|decoder| decoder.name() == name)
}

/// Names of all registered decoders
pub fn names() -> impl Iterator<Item = &'static str>
{
    REGISTRY.iter().map(|decoder| decoder.name())
}
