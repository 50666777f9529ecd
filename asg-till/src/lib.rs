//! ASG Till - point-of-sale receipt printing
//!
//! # Module structure
//!
//! ```text
//! asg-till/src/
//! ├── core/          # configuration
//! ├── common/        # logging
//! ├── catalog.rs     # product catalog
//! ├── commands.rs    # UI boundary commands
//! └── printing/      # receipt renderer, printer session
//! ```

pub mod catalog;
pub mod commands;
pub mod common;
pub mod core;
pub mod printing;

pub use core::Config;
pub use printing::{PrinterSession, ReceiptRenderer, session_from_config};

/// Print the startup banner
pub fn print_banner() {
    eprintln!(
        r#"
    ___   _____ ______   _______ ____    __
   /   | / ___// ____/  /_  __(_) / /
  / /| | \__ \/ / __     / / / / / /
 / ___ |___/ / /_/ /    / / / / / /
/_/  |_/____/\____/    /_/ /_/_/_/
    "#
    );
}
