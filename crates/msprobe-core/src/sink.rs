//! Where rendered snapshots go.
//!
//! Snapshots are written either to stdout or to a file that is replaced
//! atomically, so a reader polling the file never sees a half-written report.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::{ProbeError, ProbeResult};

/// Destination for rendered snapshots
pub trait Sink
{
    /// Write one rendered snapshot
    ///
    /// ## Errors
    ///
    /// Returns [`ProbeError::Sink`] when the write fails.
    fn write(&mut self, rendered: &str) -> ProbeResult<()>;
}

/// Writes to standard output
///
/// Each report is terminated with a newline if it does not already end in
/// one, so JSON reports in loop mode come out one per line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink
{
    fn write(&mut self, rendered: &str) -> ProbeResult<()>
    {
        let mut stdout = io::stdout().lock();
        write_terminated(&mut stdout, rendered)
            .and_then(|()| stdout.flush())
            .map_err(|source| ProbeError::Sink {
                destination: "stdout".to_string(),
                source,
            })
    }
}

fn write_terminated(out: &mut impl Write, rendered: &str) -> io::Result<()>
{
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Replaces a file with each report
///
/// The report is written to a temporary file in the same directory, synced,
/// and renamed over the destination. The file content is exactly the
/// rendered report.
#[derive(Debug, Clone)]
pub struct AtomicFileSink
{
    path: PathBuf,
}

impl AtomicFileSink
{
    /// Mode given to report files on Unix
    pub const FILE_MODE: u32 = 0o644;

    /// Write reports to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        AtomicFileSink { path: path.into() }
    }

    fn replace(&self, rendered: &str) -> io::Result<()>
    {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.as_file().sync_all()?;
        set_report_permissions(tmp.as_file())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_report_permissions(file: &std::fs::File) -> io::Result<()>
{
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(AtomicFileSink::FILE_MODE))
}

#[cfg(not(unix))]
fn set_report_permissions(_file: &std::fs::File) -> io::Result<()>
{
    Ok(())
}

impl Sink for AtomicFileSink
{
    fn write(&mut self, rendered: &str) -> ProbeResult<()>
    {
        self.replace(rendered).map_err(|source| ProbeError::Sink {
            destination: self.path.display().to_string(),
            source,
        })?;
        trace!(path = %self.path.display(), bytes = rendered.len(), "report written");
        Ok(())
    }
}

/// Open the sink for an optional destination path; `None` means stdout
pub fn open(destination: Option<&Path>) -> Box<dyn Sink>
{
    match destination {
        Some(path) => Box::new(AtomicFileSink::new(path)),
        None => Box::new(StdoutSink),
    }
}
