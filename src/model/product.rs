use crate::model::ItemNumber;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Represents a physical product stocked in the [`Warehouse`](crate::warehouse::Warehouse).
///
/// Products are immutable value identities: equality, hashing and ordering only look at
/// the item number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    item_number: ItemNumber,
    name: String,
    price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `item_number` - Catalog number, the product's identity
    /// * `name` - Product name, used as its description
    /// * `price` - Unit price
    pub fn new(item_number: impl Into<ItemNumber>, name: impl Into<String>, price: f64) -> Self {
        Self {
            item_number: item_number.into(),
            name: name.into(),
            price,
        }
    }

    pub fn item_number(&self) -> ItemNumber {
        self.item_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.item_number == other.item_number
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_number.hash(state);
    }
}

impl PartialOrd for Product {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Product {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item_number.cmp(&other.item_number)
    }
}
