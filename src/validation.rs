//! Request validation rules for catalog writes and cart additions.
//!
//! Every rule is checked and all violations are returned together, so a
//! client sees the full list in one response.

use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{AddToCartRequest, NewCategory, NewProduct};
use crate::store::Catalog;

pub const MAX_LINE_QUANTITY: u32 = 100;

/// Largest accepted money amount; its cent value times any `u32` quantity
/// still fits in an `i64`.
pub const MAX_AMOUNT: f64 = 1e7;

/// Converts a money amount to whole cents.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn valid_amount(amount: f64) -> bool {
    amount.is_finite() && (0.0..=MAX_AMOUNT).contains(&amount)
}

fn amount_rule(field: &str) -> String {
    format!("{} must be a number between 0 and {}", field, MAX_AMOUNT)
}

pub fn validate_new_category(new: &NewCategory) -> Vec<String> {
    let mut errors = Vec::new();
    if new.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    errors
}

pub fn validate_new_product(new: &NewProduct, catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();
    if new.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if !valid_amount(new.price) {
        errors.push(amount_rule("price"));
    }
    if let Some(category_id) = new.category_id {
        if catalog.category(category_id).is_none() {
            errors.push(format!("categoryId {} does not exist", category_id));
        }
    }
    errors
}

pub fn validate_add_to_cart(request: &AddToCartRequest, catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();

    if request.items.is_empty() {
        errors.push("cart must contain at least one item".to_string());
    }

    let mut requested: HashMap<Uuid, u32> = HashMap::new();
    let mut sum_cents: Option<i64> = Some(0);

    for (i, item) in request.items.iter().enumerate() {
        if item.quantity == 0 || item.quantity > MAX_LINE_QUANTITY {
            errors.push(format!(
                "items[{}].quantity must be between 1 and {}",
                i, MAX_LINE_QUANTITY
            ));
        }

        if !valid_amount(item.price) {
            errors.push(amount_rule(&format!("items[{}].price", i)));
        } else {
            sum_cents = sum_cents.and_then(|sum| {
                to_cents(item.price)
                    .checked_mul(i64::from(item.quantity))
                    .and_then(|line| sum.checked_add(line))
            });
        }

        let Some(product) = catalog.product(item.product_id) else {
            errors.push(format!(
                "items[{}].productId {} does not exist",
                i, item.product_id
            ));
            continue;
        };

        if valid_amount(item.price) && to_cents(item.price) != to_cents(product.price) {
            errors.push(format!(
                "items[{}].price {:.2} does not match catalog price {:.2}",
                i, item.price, product.price
            ));
        }

        let total = requested.entry(product.id).or_insert(0);
        *total = total.saturating_add(item.quantity);
        let wanted = total.saturating_add(catalog.cart_quantity(product.id));
        if wanted > product.stock {
            errors.push(format!(
                "items[{}].quantity exceeds available stock ({})",
                i, product.stock
            ));
        }
    }

    match sum_cents {
        _ if !valid_amount(request.total_amount) => errors.push(amount_rule("totalAmount")),
        None => errors.push("item sum is too large".to_string()),
        Some(sum) if (to_cents(request.total_amount) - sum).abs() > 1 => {
            errors.push(format!(
                "totalAmount {:.2} does not match item sum {:.2}",
                request.total_amount,
                from_cents(sum)
            ))
        }
        Some(_) => {}
    }

    errors
}
