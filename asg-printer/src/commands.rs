//! ESC/POS command table
//!
//! Byte-exact control sequences for ESC/POS compatible receipt printers.
//! Fixed sequences are `&[u8]` constants, parametrized ones are generator
//! functions. The two QR code dialects live in [`qr_model1`] and [`qr_model2`].
//!
//! Length-prefixed generators return `Result`: a prefix that does not match
//! the payload size corrupts the printer's parser without any error on the
//! host side, so those payloads are rejected instead of framed.

use crate::qr::QrEncodeError;

/// Characters per line with font A on 58mm paper (48mm / 1.5mm per char)
pub const FONT_A_COLUMNS: usize = 32;

/// Characters per line with font B on 58mm paper (48mm / 1.1mm per char)
pub const FONT_B_COLUMNS: usize = 42;

// === Initialization ===

/// ESC @ - Initialize printer
pub const INIT: &[u8] = &[0x1B, 0x40];

// === Character Font ===

/// ESC M 0 - Select font A
pub const FONT_A: &[u8] = &[0x1B, 0x4D, 0x00];
/// ESC M 1 - Select font B
pub const FONT_B: &[u8] = &[0x1B, 0x4D, 0x01];

// === Alignment ===

/// ESC a 0
pub const ALIGN_LEFT: &[u8] = &[0x1B, 0x61, 0x00];
/// ESC a 1
pub const ALIGN_CENTER: &[u8] = &[0x1B, 0x61, 0x01];
/// ESC a 2
pub const ALIGN_RIGHT: &[u8] = &[0x1B, 0x61, 0x02];

// === Emphasis ===

/// ESC E 1
pub const BOLD_ON: &[u8] = &[0x1B, 0x45, 0x01];
/// ESC E 0
pub const BOLD_OFF: &[u8] = &[0x1B, 0x45, 0x00];
/// ESC - 1
pub const UNDERLINE_ON: &[u8] = &[0x1B, 0x2D, 0x01];
/// ESC - 0
pub const UNDERLINE_OFF: &[u8] = &[0x1B, 0x2D, 0x00];
/// ESC G 1 - Double-strike on (header emphasis)
pub const DOUBLE_ON: &[u8] = &[0x1B, 0x47, 0x01];
/// ESC G 0
pub const DOUBLE_OFF: &[u8] = &[0x1B, 0x47, 0x00];

// === Line Spacing ===

/// ESC 2 - Default line spacing
pub const LINE_SPACE_DEFAULT: &[u8] = &[0x1B, 0x32];

/// ESC 3 n - Line spacing of n motion units
pub fn line_space(n: u8) -> [u8; 3] {
    [0x1B, 0x33, n]
}

// === Feed ===

/// LF - Print and feed one line
pub const FEED_LINE: &[u8] = &[0x0A];

/// ESC d n - Print and feed n lines
pub fn feed_lines(n: u8) -> [u8; 3] {
    [0x1B, 0x64, n]
}

/// ESC J n - Print and feed n motion units
pub fn feed_units(n: u8) -> [u8; 3] {
    [0x1B, 0x4A, n]
}

// === Paper Cut ===

/// ESC m - Partial cut
pub const CUT_PARTIAL: &[u8] = &[0x1B, 0x6D];
/// ESC i - Full cut
pub const CUT_FULL: &[u8] = &[0x1B, 0x69];

/// Split a length into the little-endian `(pL, pH)` pair used by ESC/POS
/// length-prefixed commands.
fn le16(len: usize) -> Option<[u8; 2]> {
    u16::try_from(len).ok().map(u16::to_le_bytes)
}

/// QR code dialect A ("model 1"): `GS ( k` function set.
pub mod qr_model1 {
    use super::{QrEncodeError, le16};

    /// Bytes between the length prefix and the payload (cn fn m)
    pub const STORE_SUB_HEADER_LEN: usize = 3;

    /// Largest payload the 2-byte length prefix can describe
    pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize - STORE_SUB_HEADER_LEN;

    /// Function 165: select model
    pub const SELECT_MODEL: &[u8] = &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00];

    /// Function 181: print the stored symbol
    pub const PRINT: &[u8] = &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30];

    /// Function 167: module size in dots
    pub fn set_size(n: u8) -> [u8; 8] {
        [0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, n]
    }

    /// Function 169: error correction level (0x30 = L .. 0x33 = H)
    pub fn set_error_correction(level: u8) -> [u8; 8] {
        [0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, level]
    }

    /// Function 180: store symbol data.
    ///
    /// The length field counts the payload plus the 3 sub-header bytes.
    pub fn store_data(payload: &[u8]) -> Result<Vec<u8>, QrEncodeError> {
        let [p_l, p_h] =
            le16(payload.len() + STORE_SUB_HEADER_LEN).ok_or(QrEncodeError::PayloadTooLong {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            })?;

        let mut out = Vec::with_capacity(8 + payload.len());
        out.extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        out.extend_from_slice(payload);
        Ok(out)
    }
}

/// QR code dialect B ("model 2"): fixed header, size byte, length-prefixed data.
pub mod qr_model2 {
    use super::{QrEncodeError, le16};

    /// Largest payload the 2-byte length prefix can describe
    pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

    pub const HEADER: &[u8] = &[0x1D, 0x5A, 0x02, 0x1B, 0x5A];

    pub fn size(n: u8) -> [u8; 1] {
        [n]
    }

    /// Length prefix (exactly the payload length) followed by the raw payload
    pub fn print(payload: &[u8]) -> Result<Vec<u8>, QrEncodeError> {
        let [p_l, p_h] = le16(payload.len()).ok_or(QrEncodeError::PayloadTooLong {
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        })?;

        let mut out = Vec::with_capacity(2 + payload.len());
        out.extend_from_slice(&[p_l, p_h]);
        out.extend_from_slice(payload);
        Ok(out)
    }
}
