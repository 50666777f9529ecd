//! Product catalog
//!
//! Fixed reference catalog served to the UI. Built on each call; callers
//! never mutate it.

use rust_decimal::Decimal;
use shared::models::{CartLine, Product};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Quantity for product {0} is too large")]
    QuantityOverflow(i64),
}

/// All products, in display order
pub fn products() -> Vec<Product> {
    vec![
        Product::new(1, "Burger", Decimal::new(599, 2), "Food"),
        Product::new(2, "Pizza", Decimal::new(899, 2), "Food"),
        Product::new(3, "Fries", Decimal::new(299, 2), "Sides"),
        Product::new(4, "Coke", Decimal::new(199, 2), "Drinks"),
        Product::new(5, "Coffee", Decimal::new(249, 2), "Drinks"),
        Product::new(6, "Sandwich", Decimal::new(499, 2), "Food"),
        Product::new(7, "Salad", Decimal::new(699, 2), "Food"),
        Product::new(8, "Ice Cream", Decimal::new(399, 2), "Desserts"),
        Product::new(9, "Water", Decimal::new(99, 2), "Drinks"),
        Product::new(10, "Cake", Decimal::new(499, 2), "Desserts"),
    ]
}

pub fn find(id: i64) -> Option<Product> {
    products().into_iter().find(|p| p.id == id)
}

/// Build cart lines from `(product id, quantity)` selections
///
/// Repeated ids are merged into one line, keeping first-seen order.
pub fn cart_lines(selections: &[(i64, u32)]) -> Result<Vec<CartLine>, CatalogError> {
    let catalog = products();
    let mut lines: Vec<CartLine> = Vec::with_capacity(selections.len());

    for &(id, quantity) in selections {
        if let Some(line) = lines.iter_mut().find(|l| l.product_id == id) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CatalogError::QuantityOverflow(id))?;
            continue;
        }
        let product = catalog
            .iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        lines.push(CartLine::from_product(product, quantity));
    }

    Ok(lines)
}
