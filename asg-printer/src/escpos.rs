//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data on top of the
//! [`commands`](crate::commands) table.

use crate::commands;
use crate::error::PrintResult;
use crate::qr::{QrDialect, encode_qr};

/// ESC/POS command builder
///
/// Accumulates command fragments in call order. The order is the contract:
/// the printer interprets the stream sequentially, so fragments must never
/// be reordered.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper, font A: 32 characters
    /// - 58mm paper, font B: 42 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(commands::INIT);
        Self { buf, width }
    }

    // === Text Output ===

    /// Write raw text (UTF-8 bytes, untranslated)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Print and feed one line (LF)
    pub fn newline(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::FEED_LINE);
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&commands::feed_lines(lines));
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::ALIGN_CENTER);
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::ALIGN_LEFT);
        self
    }

    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::ALIGN_RIGHT);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::BOLD_ON);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::BOLD_OFF);
        self
    }

    /// Enable double-strike emphasis
    pub fn double(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::DOUBLE_ON);
        self
    }

    /// Disable double-strike emphasis
    pub fn double_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::DOUBLE_OFF);
        self
    }

    /// Select font A (wider glyphs, fewer columns)
    pub fn font_a(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::FONT_A);
        self
    }

    /// Select font B (narrow glyphs)
    pub fn font_b(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::FONT_B);
        self
    }

    // === Separators ===

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(commands::CUT_FULL);
        self
    }

    // === QR Code ===

    /// Print a QR code using the first dialect that can encode `data`
    ///
    /// Nothing is written when every dialect fails.
    pub fn qr_code(&mut self, data: &str, dialects: &[QrDialect]) -> PrintResult<&mut Self> {
        let bytes = encode_qr(data, dialects)?;
        self.buf.extend_from_slice(&bytes);
        Ok(self)
    }

    // === Build ===

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(commands::FONT_A_COLUMNS)
    }
}
