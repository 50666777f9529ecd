//! Spool file dispatch
//!
//! Persists a command stream to a transient spool file, hands it to the
//! spooler in raw mode and removes the file again on every exit path.

use crate::error::{PrintError, PrintResult};
use crate::spooler::Spooler;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Spool file name prefix; the full name is `receipt_<unix-millis>_<random>.bin`
pub const SPOOL_FILE_PREFIX: &str = "receipt_";

pub const SPOOL_FILE_SUFFIX: &str = ".bin";

/// Writes print data to spool files and submits them
#[derive(Debug, Clone)]
pub struct SpoolDispatcher {
    spool_dir: PathBuf,
}

impl SpoolDispatcher {
    pub fn new(spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            spool_dir: spool_dir.into(),
        }
    }

    /// Send `data` to `target` through the spooler.
    ///
    /// The spool file is gone by the time this returns, whether the print
    /// command succeeded or not.
    #[instrument(skip(self, spooler, data), fields(data_len = data.len()))]
    pub async fn send<S: Spooler>(&self, spooler: &S, target: &str, data: &[u8]) -> PrintResult<()> {
        // Millisecond timestamps collide under concurrent jobs; tempfile adds a random part
        let prefix = format!(
            "{}{}_",
            SPOOL_FILE_PREFIX,
            chrono::Utc::now().timestamp_millis()
        );
        let spool_file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(SPOOL_FILE_SUFFIX)
            .tempfile_in(&self.spool_dir)?;

        // Dropping `spool_file` on an early return removes it
        tokio::fs::write(spool_file.path(), data).await?;

        info!(path = %spool_file.path().display(), "Spool file written");

        let result = spooler.print_raw(target, spool_file.path()).await;

        let path = spool_file.path().to_path_buf();
        if let Err(e) = spool_file.close() {
            warn!(path = %path.display(), error = %e, "Failed to remove spool file");
        }

        match result {
            Ok(()) => {
                info!("Print job sent successfully");
                Ok(())
            }
            Err(PrintError::Dispatch(reason)) => Err(PrintError::Dispatch(reason)),
            Err(e) => Err(PrintError::Dispatch(e.to_string())),
        }
    }
}

impl Default for SpoolDispatcher {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}
