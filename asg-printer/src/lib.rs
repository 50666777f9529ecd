//! # asg-printer
//!
//! ESC/POS receipt printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command table (fixed sequences and generators)
//! - Fluent command stream builder
//! - QR code dialects with ordered fallback
//! - Print spooler access (CUPS `lpstat` / `lp -o raw`)
//! - Printer discovery and spool-file dispatch
//!
//! Business logic (WHAT to print) stays in application code:
//! - Receipt layout → asg-till
//!
//! ## Example
//!
//! ```ignore
//! use asg_printer::{EscPosBuilder, LpSpooler, SpoolDispatcher, DEFAULT_QR_DIALECTS};
//!
//! let mut builder = EscPosBuilder::new(32);
//! builder.center();
//! builder.bold();
//! builder.line("ASG SHOP");
//! builder.bold_off();
//! builder.qr_code("1700000000000", &DEFAULT_QR_DIALECTS)?;
//! builder.cut();
//!
//! let spooler = LpSpooler::default();
//! let dispatcher = SpoolDispatcher::new(std::env::temp_dir());
//! dispatcher.send(&spooler, "POS-58", &builder.build()).await?;
//! ```

pub mod commands;
mod discovery;
mod dispatch;
mod error;
mod escpos;
pub mod qr;
mod spooler;

// Re-exports
pub use commands::{FONT_A_COLUMNS, FONT_B_COLUMNS};
pub use discovery::{DEFAULT_PRINTER_MARKER, PrinterDiscovery};
pub use dispatch::{SPOOL_FILE_PREFIX, SPOOL_FILE_SUFFIX, SpoolDispatcher};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use qr::{DEFAULT_QR_DIALECTS, QrDialect, QrEncodeError, encode_qr};
pub use spooler::{LpSpooler, Spooler};
