//! Customer receipt renderer
//!
//! Renders a [`Sale`] into the ESC/POS byte stream for a 58mm thermal printer.

use asg_printer::{DEFAULT_QR_DIALECTS, EscPosBuilder, FONT_A_COLUMNS, PrintResult, QrDialect};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{CartLine, Sale};
use shared::money::format_money;

/// Store name printed at the top of every receipt
pub const STORE_NAME: &str = "ASG SHOP";

/// Receipt renderer
///
/// Pure: the same sale always yields the same bytes, and nothing touches the
/// printer until the whole stream is built.
#[derive(Debug, Clone)]
pub struct ReceiptRenderer {
    width: usize,
    timezone: Tz,
    qr_dialects: Vec<QrDialect>,
}

impl ReceiptRenderer {
    /// Create a renderer with the paper width (font A columns) and the time
    /// zone used for the date line
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self {
            width,
            timezone,
            qr_dialects: DEFAULT_QR_DIALECTS.to_vec(),
        }
    }

    /// Replace the QR dialect priority list
    pub fn with_qr_dialects(mut self, dialects: Vec<QrDialect>) -> Self {
        self.qr_dialects = dialects;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Render a sale to ESC/POS bytes
    ///
    /// Fails only when no QR dialect can encode the order id.
    pub fn render(&self, sale: &Sale) -> PrintResult<Vec<u8>> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, sale);
        self.render_items(&mut b, &sale.items);
        self.render_totals(&mut b, sale);
        self.render_verification(&mut b, sale)?;
        self.render_footer(&mut b);

        Ok(b.build())
    }

    /// Store name, order number and date
    fn render_header(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.center();
        b.double();
        b.bold();
        b.line(STORE_NAME);
        b.bold_off();
        b.double_off();

        b.font_a();
        b.line(&format!("Order #: {}", sale.order_id));
        b.line(&format!(
            "Date: {}",
            format_timestamp(sale.timestamp, self.timezone)
        ));
        b.sep_single();
    }

    /// One name line and one quantity line per cart line
    fn render_items(&self, b: &mut EscPosBuilder, items: &[CartLine]) {
        b.left();
        for item in items {
            b.line(&item.name);
            b.line(&format!(
                "{} x ${} = ${}",
                item.quantity,
                format_money(item.price),
                format_money(item.line_total())
            ));
        }
    }

    fn render_totals(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.sep_single();
        b.right();
        b.line(&format!("Subtotal: ${}", format_money(sale.subtotal)));
        b.line(&format!("Tax: ${}", format_money(sale.tax)));
        b.bold();
        b.line(&format!("TOTAL: ${}", format_money(sale.total)));
        b.bold_off();
    }

    /// QR code carrying the order id
    fn render_verification(&self, b: &mut EscPosBuilder, sale: &Sale) -> PrintResult<()> {
        b.center();
        b.text("\nScan to verify order:\n");
        b.newline();
        b.qr_code(&sale.order_id.to_string(), &self.qr_dialects)?;
        b.newline();
        Ok(())
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.font_b();
        b.line("Thank you for shopping!");
        b.line("Please come again");

        // Feed and cut
        b.feed(3);
        b.cut();
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(FONT_A_COLUMNS, chrono_tz::UTC)
    }
}

/// Format a timestamp as `M/D/YYYY, h:mm:ss AM` in the given timezone
fn format_timestamp(ts: DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asg_printer::PrintError;
    use asg_printer::commands::{self, qr_model1, qr_model2};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shared::models::{PaymentMethod, Product};

    const ORDER_ID: &str = "1705933935000";

    fn timestamp() -> DateTime<Utc> {
        // 2024-01-22 14:32:15 UTC
        Utc.with_ymd_and_hms(2024, 1, 22, 14, 32, 15).unwrap()
    }

    fn create_test_sale() -> Sale {
        let burger = Product::new(1, "Burger", Decimal::new(599, 2), "Food");
        let coke = Product::new(4, "Coke", Decimal::new(199, 2), "Drinks");
        Sale::checkout(
            vec![
                CartLine::from_product(&burger, 2),
                CartLine::from_product(&coke, 1),
            ],
            PaymentMethod::Cash,
            timestamp(),
        )
        .unwrap()
    }

    fn empty_sale() -> Sale {
        Sale {
            order_id: timestamp().timestamp_millis(),
            items: vec![],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            timestamp: timestamp(),
        }
    }

    fn concat(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(timestamp(), chrono_tz::UTC),
            "1/22/2024, 2:32:15 PM"
        );
        assert_eq!(
            format_timestamp(timestamp(), chrono_tz::Europe::Madrid),
            "1/22/2024, 3:32:15 PM"
        );
    }

    #[test]
    fn test_render_full_stream() {
        let data = ReceiptRenderer::default().render(&create_test_sale()).unwrap();

        let qr = concat(&[
            qr_model1::SELECT_MODEL,
            &qr_model1::set_size(6),
            &qr_model1::set_error_correction(0x31),
            // 13 payload bytes + 3 = 0x10
            &[0x1D, 0x28, 0x6B, 0x10, 0x00, 0x31, 0x50, 0x30],
            ORDER_ID.as_bytes(),
            qr_model1::PRINT,
        ]);
        let separator = format!("{}\n", "-".repeat(32));

        let expected = concat(&[
            commands::INIT,
            commands::ALIGN_CENTER,
            commands::DOUBLE_ON,
            commands::BOLD_ON,
            b"ASG SHOP\n",
            commands::BOLD_OFF,
            commands::DOUBLE_OFF,
            commands::FONT_A,
            b"Order #: 1705933935000\n",
            b"Date: 1/22/2024, 2:32:15 PM\n",
            separator.as_bytes(),
            commands::ALIGN_LEFT,
            b"Burger\n",
            b"2 x $5.99 = $11.98\n",
            b"Coke\n",
            b"1 x $1.99 = $1.99\n",
            separator.as_bytes(),
            commands::ALIGN_RIGHT,
            b"Subtotal: $13.97\n",
            b"Tax: $1.40\n",
            commands::BOLD_ON,
            b"TOTAL: $15.37\n",
            commands::BOLD_OFF,
            commands::ALIGN_CENTER,
            b"\nScan to verify order:\n",
            commands::FEED_LINE,
            &qr,
            commands::FEED_LINE,
            commands::FONT_B,
            b"Thank you for shopping!\n",
            b"Please come again\n",
            &commands::feed_lines(3),
            commands::CUT_FULL,
        ]);

        assert_eq!(data, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = ReceiptRenderer::new(32, chrono_tz::Europe::Madrid);
        let sale = create_test_sale();
        assert_eq!(renderer.render(&sale).unwrap(), renderer.render(&sale).unwrap());
    }

    /// Payload between the model 1 store header and the print command
    fn qr_payload(data: &[u8]) -> &[u8] {
        let qr = find(data, qr_model1::SELECT_MODEL).expect("QR select model");
        let start = qr + find(&data[qr..], &[0x31, 0x50, 0x30]).expect("QR store command") + 3;
        let end = start + find(&data[start..], qr_model1::PRINT).expect("QR print command");
        &data[start..end]
    }

    fn many_line_sale() -> Sale {
        let lines = crate::catalog::products()
            .iter()
            .cycle()
            .take(25)
            .enumerate()
            .map(|(i, p)| CartLine::from_product(p, i as u32 + 1))
            .collect();
        let mut sale = Sale::checkout(lines, PaymentMethod::Card, timestamp()).unwrap();
        sale.order_id = 1705933999123;
        sale
    }

    #[test]
    fn test_qr_payload_is_order_id() {
        let renderer = ReceiptRenderer::default();

        let data = renderer.render(&create_test_sale()).unwrap();
        let store_header = [0x1D, 0x28, 0x6B, 0x10, 0x00, 0x31, 0x50, 0x30];
        assert!(find(&data, &store_header).is_some());
        assert_eq!(qr_payload(&data), ORDER_ID.as_bytes());

        let data = renderer.render(&empty_sale()).unwrap();
        assert_eq!(qr_payload(&data), ORDER_ID.as_bytes());

        let sale = many_line_sale();
        let data = renderer.render(&sale).unwrap();
        assert_eq!(qr_payload(&data), b"1705933999123");
    }

    #[test]
    fn test_render_empty_sale() {
        let data = ReceiptRenderer::default().render(&empty_sale()).unwrap();

        assert!(data.starts_with(commands::INIT));
        assert!(data.ends_with(&concat(&[&commands::feed_lines(3), commands::CUT_FULL])));
        assert!(find(&data, b"ASG SHOP\n").is_some());
        assert!(find(&data, b"Subtotal: $0.00\n").is_some());
        assert!(find(&data, b"TOTAL: $0.00\n").is_some());
        assert!(find(&data, b"Thank you for shopping!\n").is_some());
        assert!(find(&data, b" x $").is_none());
    }

    #[test]
    fn test_separator_follows_width() {
        let data = ReceiptRenderer::new(42, chrono_tz::UTC)
            .render(&create_test_sale())
            .unwrap();
        let separator = format!("{}\n", "-".repeat(42));
        assert!(find(&data, separator.as_bytes()).is_some());
    }

    #[test]
    fn test_qr_falls_back_to_model2() {
        let renderer = ReceiptRenderer::default().with_qr_dialects(vec![
            QrDialect::Model1 {
                module_size: 0,
                error_correction: 0x31,
            },
            QrDialect::Model2 { module_size: 3 },
        ]);
        let data = renderer.render(&create_test_sale()).unwrap();

        let model2 = concat(&[qr_model2::HEADER, &[3, 13, 0], ORDER_ID.as_bytes()]);
        assert!(find(&data, &model2).is_some());
        assert!(find(&data, qr_model1::SELECT_MODEL).is_none());
    }

    #[test]
    fn test_qr_fallback_exhausted() {
        let renderer = ReceiptRenderer::default().with_qr_dialects(vec![QrDialect::Model1 {
            module_size: 0,
            error_correction: 0x31,
        }]);
        let err = renderer.render(&create_test_sale()).unwrap_err();
        assert!(matches!(err, PrintError::EncodingFallbackExhausted(_)));
    }
}
