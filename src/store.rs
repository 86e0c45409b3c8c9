use anyhow::{Result, anyhow};
use chrono::Utc;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    AddToCartRequest, CartLine, CartResponse, Category, NewCategory, NewProduct, Product,
};
use crate::validation::{self, from_cents, to_cents};

/// In-memory catalog and cart.
///
/// Collections are kept in insertion order so listings are stable.
#[derive(Debug, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    cart: Vec<CartLine>,
}

impl Catalog {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn add_category(&mut self, new: NewCategory) -> Result<Category, ApiError> {
        let errors = validation::validate_new_category(&new);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let name = new.name.trim().to_string();
        if self
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&name))
        {
            return Err(ApiError::Conflict(format!("category '{}' already exists", name)));
        }

        let category = Category {
            id: Uuid::new_v4(),
            name,
            description: new.description,
            created_at: Utc::now(),
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn products(&self, category_id: Option<Uuid>) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| category_id.is_none() || p.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn add_product(&mut self, new: NewProduct) -> Result<Product, ApiError> {
        let errors = validation::validate_new_product(&new, self);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            description: new.description,
            price: new.price,
            stock: new.stock,
            category_id: new.category_id,
            created_at: Utc::now(),
        };
        self.products.push(product.clone());
        Ok(product)
    }

    /// Removes a product and any cart lines that reference it.
    pub fn remove_product(&mut self, id: Uuid) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        self.cart.retain(|line| line.product_id != id);
        Some(self.products.remove(index))
    }

    pub fn cart_quantity(&self, product_id: Uuid) -> u32 {
        self.cart
            .iter()
            .filter(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }

    pub fn cart(&self) -> CartResponse {
        // add_to_cart never stores a cart whose total overflows
        let total_cents = cart_total_cents(&self.cart).unwrap_or(i64::MAX);
        CartResponse {
            items: self.cart.clone(),
            total_amount: from_cents(total_cents),
        }
    }

    /// Validates the request and merges its items into the cart.
    ///
    /// Changes are staged on a copy so a rejected request leaves the cart as it was.
    pub fn add_to_cart(&mut self, request: AddToCartRequest) -> Result<CartResponse, ApiError> {
        let errors = validation::validate_add_to_cart(&request, self);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let mut cart = self.cart.clone();
        for item in request.items {
            let product = self
                .product(item.product_id)
                .ok_or(ApiError::ProductNotFound(item.product_id))?;

            let index = match cart.iter().position(|l| l.product_id == product.id) {
                Some(index) => index,
                None => {
                    cart.push(CartLine {
                        product_id: product.id,
                        name: product.name.clone(),
                        unit_price: product.price,
                        quantity: 0,
                        line_total: 0.0,
                    });
                    cart.len() - 1
                }
            };

            let line = &mut cart[index];
            line.quantity = line
                .quantity
                .checked_add(item.quantity)
                .ok_or_else(cart_too_large)?;
            let line_cents = to_cents(product.price)
                .checked_mul(i64::from(line.quantity))
                .ok_or_else(cart_too_large)?;
            line.line_total = from_cents(line_cents);
        }

        if cart_total_cents(&cart).is_none() {
            return Err(cart_too_large());
        }

        self.cart = cart;
        Ok(self.cart())
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Fills an empty catalog with a few sample entries.
    pub fn seed_demo(&mut self) -> Result<(), ApiError> {
        let lighting = self.add_category(NewCategory {
            name: "Lighting".to_string(),
            description: Some("Lamps and bulbs".to_string()),
        })?;
        self.add_product(NewProduct {
            name: "Desk lamp".to_string(),
            description: Some("Adjustable LED desk lamp".to_string()),
            price: 99.99,
            stock: 25,
            category_id: Some(lighting.id),
        })?;
        self.add_product(NewProduct {
            name: "Bulb pack".to_string(),
            description: None,
            price: 12.5,
            stock: 200,
            category_id: Some(lighting.id),
        })?;
        Ok(())
    }
}

fn cart_total_cents(lines: &[CartLine]) -> Option<i64> {
    lines.iter().try_fold(0i64, |sum, line| {
        to_cents(line.unit_price)
            .checked_mul(i64::from(line.quantity))
            .and_then(|cents| sum.checked_add(cents))
    })
}

fn cart_too_large() -> ApiError {
    ApiError::Validation(vec!["cart total is too large".to_string()])
}

/// Shared handle to the catalog.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Catalog>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<T>(&self, f: impl FnOnce(&Catalog) -> T) -> Result<T> {
        let guard = self
            .inner
            .read()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(f(&guard))
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> Result<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(f(&mut guard))
    }

    pub fn health_check(&self) -> Result<()> {
        self.read(|_| ())
    }
}
