//! QR code dialects
//!
//! Printers disagree on how QR codes are requested. Each [`QrDialect`] is one
//! encoding strategy; [`encode_qr`] tries a list of them in priority order and
//! returns the first stream that could be built.
//!
//! There is no capability negotiation with the device: the chosen dialect is
//! a static, best-effort pick and the printer either understands it or not.

use crate::commands::{qr_model1, qr_model2};
use crate::error::{PrintError, PrintResult};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a dialect could not encode a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrEncodeError {
    #[error("payload is empty")]
    EmptyPayload,

    #[error("payload of {len} bytes exceeds the {max} byte limit")]
    PayloadTooLong { len: usize, max: usize },

    #[error("module size {0} outside 1..=16")]
    InvalidModuleSize(u8),

    #[error("error correction level {0:#04x} outside 0x30..=0x33")]
    InvalidErrorCorrection(u8),
}

/// QR code command dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrDialect {
    /// `GS ( k` function set: select model, size, error correction, store, print
    Model1 { module_size: u8, error_correction: u8 },
    /// Fixed header, size byte, length-prefixed data
    Model2 { module_size: u8 },
}

/// Error correction level M
pub const ERROR_CORRECTION_M: u8 = 0x31;

/// Receipt QR strategy: model 1 at size 6 / level M, falling back to model 2 at size 3
pub const DEFAULT_QR_DIALECTS: [QrDialect; 2] = [
    QrDialect::Model1 {
        module_size: 6,
        error_correction: ERROR_CORRECTION_M,
    },
    QrDialect::Model2 { module_size: 3 },
];

impl QrDialect {
    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            QrDialect::Model1 { .. } => "model1",
            QrDialect::Model2 { .. } => "model2",
        }
    }

    /// Build the complete command sequence for `payload` in this dialect
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, QrEncodeError> {
        if payload.is_empty() {
            return Err(QrEncodeError::EmptyPayload);
        }

        match *self {
            QrDialect::Model1 {
                module_size,
                error_correction,
            } => {
                if !(1..=16).contains(&module_size) {
                    return Err(QrEncodeError::InvalidModuleSize(module_size));
                }
                if !(0x30..=0x33).contains(&error_correction) {
                    return Err(QrEncodeError::InvalidErrorCorrection(error_correction));
                }

                let store = qr_model1::store_data(payload)?;
                let mut out = Vec::with_capacity(store.len() + 40);
                out.extend_from_slice(qr_model1::SELECT_MODEL);
                out.extend_from_slice(&qr_model1::set_size(module_size));
                out.extend_from_slice(&qr_model1::set_error_correction(error_correction));
                out.extend_from_slice(&store);
                out.extend_from_slice(qr_model1::PRINT);
                Ok(out)
            }
            QrDialect::Model2 { module_size } => {
                let data = qr_model2::print(payload)?;
                let mut out = Vec::with_capacity(data.len() + 6);
                out.extend_from_slice(qr_model2::HEADER);
                out.extend_from_slice(&qr_model2::size(module_size));
                out.extend_from_slice(&data);
                Ok(out)
            }
        }
    }
}

/// Encode `payload` with the first dialect in `dialects` that accepts it.
///
/// Fails with [`PrintError::EncodingFallbackExhausted`] when every dialect
/// rejects the payload (or the list is empty).
pub fn encode_qr(payload: &str, dialects: &[QrDialect]) -> PrintResult<Vec<u8>> {
    let mut failures = Vec::with_capacity(dialects.len());

    for dialect in dialects {
        match dialect.encode(payload.as_bytes()) {
            Ok(bytes) => {
                debug!(dialect = dialect.name(), bytes = bytes.len(), "QR encoded");
                return Ok(bytes);
            }
            Err(e) => {
                warn!(dialect = dialect.name(), error = %e, "QR dialect failed, trying next");
                failures.push(format!("{}: {}", dialect.name(), e));
            }
        }
    }

    if failures.is_empty() {
        return Err(PrintError::EncodingFallbackExhausted(
            "no QR dialect configured".to_string(),
        ));
    }
    Err(PrintError::EncodingFallbackExhausted(failures.join("; ")))
}
