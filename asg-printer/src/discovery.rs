//! Printer discovery
//!
//! Asks the spooler for its destinations and keeps the ones whose name
//! carries the receipt printer marker.

use crate::error::PrintResult;
use crate::spooler::Spooler;
use tracing::{info, instrument};

/// Marker substring identifying receipt printers (case-sensitive)
pub const DEFAULT_PRINTER_MARKER: &str = "POS";

/// Filters spooler destinations down to receipt printer candidates
#[derive(Debug, Clone)]
pub struct PrinterDiscovery {
    marker: String,
}

impl PrinterDiscovery {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Query the spooler and return matching destinations in spooler order.
    ///
    /// An empty result is not an error here; the caller decides whether
    /// "nothing attached" is fatal. A failing query is surfaced as
    /// [`PrintError::Discovery`](crate::PrintError::Discovery) without retry.
    #[instrument(skip(self, spooler), fields(marker = %self.marker))]
    pub async fn list_candidates<S: Spooler>(&self, spooler: &S) -> PrintResult<Vec<String>> {
        let all = spooler.list_printers().await?;
        let candidates = self.filter(all);
        info!(?candidates, "Found POS printers");
        Ok(candidates)
    }

    /// Keep names containing the marker, preserving order
    pub fn filter(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| !name.trim().is_empty() && name.contains(&self.marker))
            .collect()
    }
}

impl Default for PrinterDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_PRINTER_MARKER)
    }
}
