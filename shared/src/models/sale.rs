//! Sale Model
//!
//! A sale is created once at checkout, handed to the receipt printer and then
//! discarded. Nothing here is persisted.

use super::product::Product;
use crate::money::{round2, tax_for};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Checkout validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid quantity for product {product_id}: must be at least 1")]
    InvalidQuantity { product_id: i64 },

    #[error("Negative price for product {product_id}")]
    NegativePrice { product_id: i64 },
}

/// One product line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product reference (the UI sends the product's `id`)
    #[serde(alias = "id")]
    pub product_id: i64,
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Always >= 1; a line at 0 is removed from the cart
    pub quantity: u32,
}

impl CartLine {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "mobile" => Ok(PaymentMethod::Mobile),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// Completed sale
///
/// Invariants (established by [`Sale::checkout`]):
/// - `subtotal = Σ(price × quantity)`
/// - `tax = round2(subtotal × 0.10)`
/// - `total = subtotal + tax`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unix milliseconds at creation, monotonic per till
    pub order_id: i64,
    /// Cart lines in the order they were added
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    /// Close the cart into a sale at `now`.
    ///
    /// Rejects an empty cart: the receipt printer accepts one, but checkout
    /// must not produce it.
    pub fn checkout(
        items: Vec<CartLine>,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Self, SaleError> {
        if items.is_empty() {
            return Err(SaleError::EmptyCart);
        }
        for item in &items {
            if item.quantity == 0 {
                return Err(SaleError::InvalidQuantity {
                    product_id: item.product_id,
                });
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(SaleError::NegativePrice {
                    product_id: item.product_id,
                });
            }
        }

        let subtotal = Self::subtotal_of(&items);
        let tax = tax_for(subtotal);

        Ok(Self {
            order_id: now.timestamp_millis(),
            items,
            subtotal,
            tax,
            total: subtotal + tax,
            payment_method,
            timestamp: now,
        })
    }

    /// Σ(price × quantity) over `items`
    pub fn subtotal_of(items: &[CartLine]) -> Decimal {
        items.iter().map(CartLine::line_total).sum()
    }

    /// Check the totals invariants on a sale received from outside
    pub fn totals_consistent(&self) -> bool {
        let subtotal = Self::subtotal_of(&self.items);
        round2(self.subtotal) == round2(subtotal)
            && round2(self.tax) == tax_for(subtotal)
            && round2(self.total) == round2(self.subtotal + self.tax)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
