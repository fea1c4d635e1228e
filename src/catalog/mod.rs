//! Immutable product catalog: the read-only reference set the advisor
//! recommends from. Loaded once at startup, never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stock catalog shipped with the crate, embedded at compile time.
const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Closed set of categories carried by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Laptop,
    Tablet,
    Smartphone,
    Headphones,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Laptop => "Laptop",
            Category::Tablet => "Tablet",
            Category::Smartphone => "Smartphone",
            Category::Headphones => "Headphones",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single purchasable product.
///
/// Specifications use a `BTreeMap` so the serialized catalog dump has a
/// stable key order; the prompt builder relies on that determinism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub description: String,
    pub rating: f32,
    pub reviews: u32,
}

/// Read-only, in-memory product list.
///
/// Ownership: constructed once, shared behind an `Arc` by everything that
/// reads it. There is no write interface.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The stock ten-product catalog.
    pub fn builtin() -> Self {
        let products =
            serde_json::from_str(BUILTIN_CATALOG).expect("embedded catalog is valid JSON");
        Self::new(products)
    }

    /// Exact-id lookup. Ids are unique, so at most one product matches.
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
