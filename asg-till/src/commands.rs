//! UI boundary commands
//!
//! Every command returns an [`ApiResponse`] envelope; failures are logged
//! here and reported once, never retried.

use crate::catalog::{self, CatalogError};
use crate::printing::PrinterSession;
use asg_printer::{PrintError, Spooler};
use chrono::Utc;
use shared::models::{PaymentMethod, Product, Sale, SaleError};
use shared::{ApiResponse, ErrorCode};
use tracing::{error, info, warn};

/// Product catalog
pub fn get_products() -> Vec<Product> {
    catalog::products()
}

/// Receipt printers currently visible to the spooler
///
/// An empty list is a successful answer.
pub async fn list_printers<S: Spooler>(session: &PrinterSession<S>) -> ApiResponse<Vec<String>> {
    match session.list_printers().await {
        Ok(printers) => ApiResponse::success(printers),
        Err(e) => {
            error!(error = %e, "Failed to list printers");
            failure(print_error_code(&e), &e)
        }
    }
}

/// Print the receipt for a completed sale
pub async fn print_receipt<S: Spooler>(
    session: &PrinterSession<S>,
    sale: &Sale,
) -> ApiResponse<()> {
    if !sale.totals_consistent() {
        warn!(order_id = sale.order_id, "Sale totals do not add up, printing as given");
    }

    match session.print_receipt(sale).await {
        Ok(()) => {
            info!(order_id = sale.order_id, "Receipt printed");
            ApiResponse::ok()
        }
        Err(e) => {
            error!(order_id = sale.order_id, error = %e, "Failed to print receipt");
            failure(print_error_code(&e), &e)
        }
    }
}

/// Close a cart given as `(product id, quantity)` selections into a sale
pub fn checkout(selections: &[(i64, u32)], payment_method: PaymentMethod) -> ApiResponse<Sale> {
    let lines = match catalog::cart_lines(selections) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "Checkout rejected");
            return failure(catalog_error_code(&e), &e);
        }
    };

    match Sale::checkout(lines, payment_method, Utc::now()) {
        Ok(sale) => {
            info!(order_id = sale.order_id, total = %sale.total, "Sale completed");
            ApiResponse::success(sale)
        }
        Err(e) => {
            warn!(error = %e, "Checkout rejected");
            failure(sale_error_code(&e), &e)
        }
    }
}

/// Map a printing failure to its UI error code
pub fn print_error_code(err: &PrintError) -> ErrorCode {
    match err {
        PrintError::Discovery(_) => ErrorCode::PrinterDiscoveryFailed,
        PrintError::NoPrinterFound(_) => ErrorCode::PrinterNotAvailable,
        PrintError::Dispatch(_) | PrintError::Io(_) => ErrorCode::PrintFailed,
        PrintError::EncodingFallbackExhausted(_) => ErrorCode::QrEncodingFailed,
        PrintError::InvalidConfig(_) => ErrorCode::ConfigError,
    }
}

fn catalog_error_code(err: &CatalogError) -> ErrorCode {
    match err {
        CatalogError::ProductNotFound(_) => ErrorCode::ProductNotFound,
        CatalogError::QuantityOverflow(_) => ErrorCode::ValidationFailed,
    }
}

fn sale_error_code(err: &SaleError) -> ErrorCode {
    match err {
        SaleError::EmptyCart => ErrorCode::CartEmpty,
        SaleError::InvalidQuantity { .. } | SaleError::NegativePrice { .. } => {
            ErrorCode::ValidationFailed
        }
    }
}

/// Error response whose text is the code's message followed by the cause
fn failure<T>(code: ErrorCode, cause: &dyn std::fmt::Display) -> ApiResponse<T> {
    ApiResponse::error_with_code(code, format!("{}: {}", code.message(), cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::ReceiptRenderer;
    use asg_printer::{PrintResult, PrinterDiscovery, SpoolDispatcher};
    use std::path::Path;

    /// Spooler returning canned answers
    struct StubSpooler {
        printers: Result<Vec<String>, String>,
        print_error: Option<String>,
    }

    impl Spooler for StubSpooler {
        async fn list_printers(&self) -> PrintResult<Vec<String>> {
            match &self.printers {
                Ok(names) => Ok(names.clone()),
                Err(reason) => Err(PrintError::Discovery(reason.clone())),
            }
        }

        async fn print_raw(&self, _target: &str, _path: &Path) -> PrintResult<()> {
            match &self.print_error {
                Some(reason) => Err(PrintError::Dispatch(reason.clone())),
                None => Ok(()),
            }
        }
    }

    fn session(spooler: StubSpooler, dir: &Path) -> PrinterSession<StubSpooler> {
        PrinterSession::new(
            spooler,
            PrinterDiscovery::default(),
            SpoolDispatcher::new(dir),
            ReceiptRenderer::default(),
        )
    }

    fn stub(printers: &[&str]) -> StubSpooler {
        StubSpooler {
            printers: Ok(printers.iter().map(|p| p.to_string()).collect()),
            print_error: None,
        }
    }

    fn sale() -> Sale {
        let resp = checkout(&[(1, 1), (5, 2)], PaymentMethod::Mobile);
        resp.data.unwrap()
    }

    #[test]
    fn test_get_products() {
        let products = get_products();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].name, "Burger");
    }

    #[test]
    fn test_error_code_mapping() {
        use std::io;

        let cases = [
            (PrintError::Discovery("x".into()), ErrorCode::PrinterDiscoveryFailed),
            (PrintError::NoPrinterFound("POS".into()), ErrorCode::PrinterNotAvailable),
            (PrintError::Dispatch("x".into()), ErrorCode::PrintFailed),
            (
                PrintError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
                ErrorCode::PrintFailed,
            ),
            (
                PrintError::EncodingFallbackExhausted("x".into()),
                ErrorCode::QrEncodingFailed,
            ),
            (PrintError::InvalidConfig("x".into()), ErrorCode::ConfigError),
        ];
        for (err, code) in cases {
            assert_eq!(print_error_code(&err), code, "{err}");
        }
    }

    #[test]
    fn test_checkout() {
        let resp = checkout(&[(1, 2), (4, 3)], PaymentMethod::Cash);
        assert!(resp.is_success());
        let sale = resp.data.unwrap();
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.total.to_string(), "19.75");
    }

    #[test]
    fn test_checkout_errors() {
        let resp = checkout(&[], PaymentMethod::Cash);
        assert_eq!(resp.code, ErrorCode::CartEmpty);

        let resp = checkout(&[(99, 1)], PaymentMethod::Cash);
        assert_eq!(resp.code, ErrorCode::ProductNotFound);

        let resp = checkout(&[(2, 0)], PaymentMethod::Cash);
        assert_eq!(resp.code, ErrorCode::ValidationFailed);
        assert!(resp.data.is_none());

        let resp = checkout(&[(1, u32::MAX), (1, 1)], PaymentMethod::Cash);
        assert_eq!(resp.code, ErrorCode::ValidationFailed);
        assert_eq!(
            resp.error.as_deref(),
            Some("Validation failed: Quantity for product 1 is too large")
        );
    }

    #[tokio::test]
    async fn test_list_printers_empty_is_success() {
        let tmp = tempfile::tempdir().unwrap();
        let resp = list_printers(&session(stub(&["Laser"]), tmp.path())).await;
        assert!(resp.is_success());
        assert_eq!(resp.data, Some(vec![]));
    }

    #[tokio::test]
    async fn test_list_printers_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let spooler = StubSpooler {
            printers: Err("lpstat: scheduler not running".into()),
            print_error: None,
        };
        let resp = list_printers(&session(spooler, tmp.path())).await;
        assert!(!resp.is_success());
        assert_eq!(resp.code, ErrorCode::PrinterDiscoveryFailed);
        assert!(resp.error.unwrap().contains("scheduler not running"));
    }

    #[tokio::test]
    async fn test_print_receipt_success() {
        let tmp = tempfile::tempdir().unwrap();
        let session = session(stub(&["POS-58"]), tmp.path());

        let resp = print_receipt(&session, &sale()).await;
        assert!(resp.is_success());
        assert_eq!(resp.code, ErrorCode::Success);
    }

    #[tokio::test]
    async fn test_print_receipt_no_printer() {
        let tmp = tempfile::tempdir().unwrap();
        let session = session(stub(&[]), tmp.path());

        let resp = print_receipt(&session, &sale()).await;
        assert_eq!(resp.code, ErrorCode::PrinterNotAvailable);
        assert_eq!(
            resp.error.as_deref(),
            Some("Printer not available: No printer matching 'POS' found")
        );
    }

    #[tokio::test]
    async fn test_print_receipt_dispatch_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let spooler = StubSpooler {
            print_error: Some("lp: Unable to connect".into()),
            ..stub(&["POS-58"])
        };
        let session = session(spooler, tmp.path());

        let resp = print_receipt(&session, &sale()).await;
        assert_eq!(resp.code, ErrorCode::PrintFailed);
        assert!(resp.error.unwrap().contains("Unable to connect"));
    }
}
