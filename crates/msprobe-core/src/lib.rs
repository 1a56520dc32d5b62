//! # msprobe-core
//!
//! Video-signal status for MacroSilicon USB capture chips.
//!
//! The chips publish no status interface. What they are receiving (resolution,
//! interlacing, signal lock, colour space, link format) has to be dug out of
//! on-chip RAM or out of the registers left behind by a firmware routine.
//! This crate provides:
//! - The [`ChipAccess`] seam over memory reads and procedure calls
//! - One [`Decoder`] per known status layout
//! - A [`Poller`] that reads once or on a cadence and tolerates failures
//! - Text/JSON rendering and stdout/atomic-file sinks
//!
//! ## Example
//!
//! ```rust
//! use msprobe_core::access::Detached;
//! use msprobe_core::config::StatusConfig;
//!
//! let config = StatusConfig::resolve(Some("fazant"), true, 0, None);
//! let status = config.decoder.decode(&mut Detached)?;
//! assert_eq!(status.width, 42);
//! # Ok::<(), msprobe_core::error::AccessError>(())
//! ```

pub mod access;
pub mod config;
pub mod decoder;
pub mod error;
pub mod format;
pub mod image;
pub mod poller;
pub mod shutdown;
pub mod sink;
pub mod types;

pub use access::ChipAccess;
pub use decoder::Decoder;
// Re-export commonly used types
pub use error::{AccessError, ProbeError, ProbeResult};
pub use poller::{PollExit, PollMode, Poller};
pub use types::{StatusSnapshot, VideoStatus};
