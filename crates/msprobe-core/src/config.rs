//! Resolving user-facing settings into a poll setup.

use std::path::PathBuf;

use tracing::warn;

use crate::decoder::{self, Decoder, DEFAULT_DECODER};
use crate::format::OutputFormat;
use crate::poller::{PollMode, Poller};

/// Everything needed to run a status poll
#[derive(Debug)]
pub struct StatusConfig
{
    /// Decoder to poll
    pub decoder: &'static dyn Decoder,
    /// Single shot or loop
    pub mode: PollMode,
    /// Text or JSON
    pub format: OutputFormat,
    /// Output file; `None` writes to stdout
    pub destination: Option<PathBuf>,
}

impl StatusConfig
{
    /// Resolve raw settings
    ///
    /// `region` selects the decoder by name. A missing or unrecognized name
    /// falls back to [`DEFAULT_DECODER`]; the latter is logged.
    ///
    /// ```rust
    /// use msprobe_core::config::StatusConfig;
    ///
    /// let config = StatusConfig::resolve(Some("nonsense"), false, 0, None);
    /// assert_eq!(config.decoder.name(), "flaky");
    /// ```
    pub fn resolve(region: Option<&str>, json: bool, loop_interval_ms: u64, destination: Option<PathBuf>) -> Self
    {
        StatusConfig {
            decoder: resolve_decoder(region),
            mode: PollMode::from_millis(loop_interval_ms),
            format: OutputFormat::from_json_flag(json),
            destination,
        }
    }

    /// Build the poller for this configuration
    pub fn poller(&self) -> Poller
    {
        Poller::new(self.decoder, self.mode, self.format)
    }
}

/// Pick a decoder by name, falling back to the default
pub fn resolve_decoder(region: Option<&str>) -> &'static dyn Decoder
{
    match region {
        None => DEFAULT_DECODER,
        Some(name) => decoder::find(name).unwrap_or_else(|| {
            warn!(
                region = name,
                default = DEFAULT_DECODER.name(),
                known = ?decoder::names().collect::<Vec<_>>(),
                "unknown region, using the default decoder"
            );
            DEFAULT_DECODER
        }),
    }
}
