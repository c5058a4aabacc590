//! The sellable-item capability shared by products and services.

use crate::model::{Product, Service};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Type-safe catalog number for products and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemNumber(pub u32);

impl From<u32> for ItemNumber {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Discriminant of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Product,
    Service,
}

/// Anything the business sells.
///
/// Identity is the pair (variant, item number): a product and a service may share
/// a number without being equal, and two products with the same number are equal
/// regardless of name or price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Product(Product),
    Service(Service),
}

impl Item {
    pub fn item_number(&self) -> ItemNumber {
        match self {
            Item::Product(p) => p.item_number(),
            Item::Service(s) => s.item_number(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Item::Product(p) => p.name(),
            Item::Service(s) => s.description(),
        }
    }

    /// Unit price. For services this is `price_per_hour * number_of_hours`.
    pub fn price(&self) -> f64 {
        match self {
            Item::Product(p) => p.price(),
            Item::Service(s) => s.price(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Product(_) => ItemKind::Product,
            Item::Service(_) => ItemKind::Service,
        }
    }

    fn key(&self) -> (ItemKind, ItemNumber) {
        (self.kind(), self.item_number())
    }
}

impl From<Product> for Item {
    fn from(product: Product) -> Self {
        Item::Product(product)
    }
}

impl From<Service> for Item {
    fn from(service: Service) -> Self {
        Item::Service(service)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
