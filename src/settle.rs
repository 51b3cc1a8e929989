//! Bounded wait for in-flight browser downloads to finish.
//!
//! The browser gives no completion callback, so the workflow polls the
//! output directory until no `.part` markers remain. The wait is bounded:
//! a stalled transfer turns into [`SettleError::TimedOut`] instead of
//! spinning forever.

use crate::outdir;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};

/// Failure while waiting for the output directory to settle.
#[derive(Debug, Error)]
pub enum SettleError {
    /// At least one partial-download marker remained when the deadline hit.
    #[error("downloads did not settle within {timeout:?}: partial file(s) remain in {}", .dir.display())]
    TimedOut { dir: PathBuf, timeout: Duration },
    /// The output directory could not be scanned.
    #[error("scan {}: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Poll `dir` every `poll_interval` until no partial-download markers remain.
/// Returns immediately if the directory is already quiet.
pub async fn wait_for_downloads_to_settle(
    dir: &Path,
    poll_interval: Duration,
    timeout: Duration,
) -> Result<(), SettleError> {
    let started = Instant::now();
    loop {
        let pending = outdir::has_partial_downloads(dir).map_err(|source| SettleError::Scan {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !pending {
            return Ok(());
        }
        if started.elapsed() >= timeout {
            return Err(SettleError::TimedOut {
                dir: dir.to_path_buf(),
                timeout,
            });
        }
        sleep(poll_interval).await;
    }
}
