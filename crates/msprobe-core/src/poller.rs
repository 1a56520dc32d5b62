//! # Poller
//!
//! Runs one decoder once or on a fixed cadence and hands each successful
//! snapshot to a [`Sink`].
//!
//! ## States
//!
//! ```text
//!            success / failure, loop mode (sleep)
//!              ┌─────────┐
//!              ▼         │
//!  start ──► Reading ────┘
//!              │
//!              │ single shot: success, failure (error),
//!              │ or shutdown at a sleep boundary
//!              ▼
//!             Done
//! ```
//!
//! Failed reads in loop mode are retried on the next cycle and only show up
//! in debug logs: the chip routinely answers with nothing while busy, and a
//! consumer watching the output cadence is expected to notice a gap.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::access::ChipAccess;
use crate::decoder::Decoder;
use crate::error::{AccessError, ProbeError, ProbeResult};
use crate::format::OutputFormat;
use crate::shutdown::Shutdown;
use crate::sink::Sink;
use crate::types::StatusSnapshot;

/// Single shot or fixed-interval polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode
{
    /// Read once and stop
    Once,
    /// Read, then sleep this long, forever; the sleep follows failed cycles too
    Every(Duration),
}

impl PollMode
{
    /// Interpret a loop interval in milliseconds; zero means single shot
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use msprobe_core::poller::PollMode;
    ///
    /// assert_eq!(PollMode::from_millis(0), PollMode::Once);
    /// assert_eq!(PollMode::from_millis(50), PollMode::Every(Duration::from_millis(50)));
    /// ```
    pub const fn from_millis(interval: u64) -> Self
    {
        if interval == 0 {
            PollMode::Once
        } else {
            PollMode::Every(Duration::from_millis(interval))
        }
    }
}

/// Result of one read attempt
#[derive(Debug)]
pub enum Cycle
{
    /// A snapshot was decoded and written
    Reported(StatusSnapshot),
    /// The decoder got no data
    NoData(AccessError),
}

/// Why [`Poller::run`] returned normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit
{
    /// Single-shot read succeeded
    Completed,
    /// Loop stopped through the shutdown token
    Cancelled,
}

/// Drives a decoder and reports what it finds
#[derive(Debug)]
pub struct Poller
{
    decoder: &'static dyn Decoder,
    mode: PollMode,
    format: OutputFormat,
}

impl Poller
{
    /// Create a poller for `decoder`
    pub fn new(decoder: &'static dyn Decoder, mode: PollMode, format: OutputFormat) -> Self
    {
        Poller { decoder, mode, format }
    }

    /// Whether another cycle follows the current one
    pub fn should_continue(&self) -> bool
    {
        matches!(self.mode, PollMode::Every(_))
    }

    /// Stamp, decode, render and write one snapshot
    ///
    /// Decoder failures come back as [`Cycle::NoData`], not as errors.
    ///
    /// ## Errors
    ///
    /// Returns an error only if rendering or writing a decoded snapshot fails.
    pub fn cycle(&self, chip: &mut dyn ChipAccess, sink: &mut dyn Sink) -> ProbeResult<Cycle>
    {
        let timestamp = Utc::now().timestamp_millis();

        let status = match self.decoder.decode(chip) {
            Ok(status) => status,
            Err(err) => return Ok(Cycle::NoData(err)),
        };

        let snapshot = StatusSnapshot::new(timestamp, status);
        sink.write(&self.format.render(&snapshot)?)?;
        Ok(Cycle::Reported(snapshot))
    }

    /// Poll until done
    ///
    /// - Single shot: returns after the first cycle.
    /// - Loop: cycles until `shutdown` fires. The token is checked before
    ///   every sleep and interrupts a sleep in progress.
    ///
    /// ## Errors
    ///
    /// - `NoData`: single-shot read failed
    /// - `Render`/`Sink`: single-shot output failed (loop mode logs these and
    ///   keeps going)
    pub async fn run(
        &self,
        chip: &mut dyn ChipAccess,
        sink: &mut dyn Sink,
        shutdown: &mut Shutdown,
    ) -> ProbeResult<PollExit>
    {
        info!(decoder = self.decoder.name(), mode = ?self.mode, "polling started");

        loop {
            let outcome = self.cycle(chip, sink);

            let interval = match self.mode {
                PollMode::Once => {
                    return match outcome? {
                        Cycle::Reported(_) => Ok(PollExit::Completed),
                        Cycle::NoData(source) => Err(ProbeError::NoData {
                            decoder: self.decoder.name(),
                            source,
                        }),
                    };
                }
                PollMode::Every(interval) => interval,
            };

            match outcome {
                Ok(Cycle::Reported(snapshot)) => {
                    debug!(time = snapshot.timestamp, "snapshot reported");
                }
                Ok(Cycle::NoData(err)) => {
                    debug!(decoder = self.decoder.name(), error = %err, "no data, retrying");
                }
                Err(err) => {
                    warn!(error = %err, "failed to report snapshot");
                }
            }

            if !self.should_continue() || shutdown.is_triggered() {
                break;
            }

            tokio::select! {
                () = tokio::time::sleep(interval) => {}
                () = shutdown.triggered() => break,
            }
        }

        info!(decoder = self.decoder.name(), "polling stopped");
        Ok(PollExit::Cancelled)
    }
}
