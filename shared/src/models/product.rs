//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Part of the immutable reference catalog built at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price, non-negative
    pub price: Decimal,
    pub category: String,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}
