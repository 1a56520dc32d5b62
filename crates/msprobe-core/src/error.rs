//! # Error Types
//!
//! Error handling for chip access and status polling.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Address, Region};

/// Failure of a single memory read or procedure call
///
/// Decoders propagate these unchanged. The poller does not distinguish
/// between variants: any of them means "no data this cycle". They exist so
/// logs can say what happened.
#[derive(Error, Debug)]
pub enum AccessError
{
    /// The read completed but returned no bytes
    ///
    /// The chip answers this way while its firmware is still busy, so this
    /// usually means "not ready yet" rather than a hard fault.
    #[error("Read of {region} returned no data")]
    Empty
    {
        /// Region that was requested
        region: Region,
    },

    /// The read returned fewer bytes than the window needs
    #[error("Short read of {region}: got {got} bytes")]
    ShortRead
    {
        /// Region that was requested
        region: Region,
        /// Bytes actually returned
        got: usize,
    },

    /// The firmware procedure call failed or did not return
    #[error("Procedure call at {entry} failed: {details}")]
    ProcedureFailed
    {
        /// Entry point that was invoked
        entry: Address,
        /// Additional error details
        details: String,
    },

    /// The backend cannot perform this kind of access
    ///
    /// For example a RAM image can serve memory reads but cannot execute
    /// firmware code.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// No device or image is connected
    #[error("No device connected")]
    NoDevice,

    /// I/O error from the underlying transport or image file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main error type for polling and reporting
#[derive(Error, Debug)]
pub enum ProbeError
{
    /// A single-shot poll could not read any data
    ///
    /// The binary turns this into exit status 1.
    #[error("Read nothing from the device using the {decoder} decoder: {source}")]
    NoData
    {
        /// Name of the decoder that was used
        decoder: &'static str,
        /// Why the read failed
        #[source]
        source: AccessError,
    },

    /// Serializing a snapshot failed
    #[error("Failed to render status: {0}")]
    Render(#[from] serde_json::Error),

    /// Writing rendered output failed
    #[error("Failed to write status to {destination}: {source}")]
    Sink
    {
        /// `stdout` or the destination path
        destination: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A backend could not be opened
    #[error("Failed to open {path}: {source}")]
    Backend
    {
        /// Path of the device or image
        path: PathBuf,
        /// Underlying access error
        #[source]
        source: AccessError,
    },

    /// The async runtime driving the poll loop could not be started
    #[error("Failed to start the runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Convenience type alias for `Result<T, AccessError>`
pub type AccessResult<T> = std::result::Result<T, AccessError>;

/// Convenience type alias for `Result<T, ProbeError>`
///
/// ```rust
/// use msprobe_core::error::ProbeResult;
/// fn foo() -> ProbeResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
