//! Receipt printing
//!
//! - [`ReceiptRenderer`] - Sale → ESC/POS bytes
//! - [`PrinterSession`] - bound printer + print pipeline

pub mod renderer;
pub mod session;

pub use renderer::{ReceiptRenderer, STORE_NAME};
pub use session::PrinterSession;

use crate::core::Config;
use asg_printer::{LpSpooler, PrintResult, PrinterDiscovery, SpoolDispatcher};

/// Build the production session from configuration
pub fn session_from_config(config: &Config) -> PrintResult<PrinterSession<LpSpooler>> {
    let spooler =
        LpSpooler::from_command_lines(&config.spooler_list_cmd, &config.spooler_print_cmd)?;
    let session = PrinterSession::new(
        spooler,
        PrinterDiscovery::new(config.printer_marker.clone()),
        SpoolDispatcher::new(config.spool_dir.clone()),
        ReceiptRenderer::new(config.receipt_columns, config.timezone),
    );

    Ok(match &config.printer_name {
        Some(name) => session.with_target(name.clone()),
        None => session,
    })
}
