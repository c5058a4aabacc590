//! # Warehouse
//!
//! Owns product stock levels and the restock policy.
//!
//! Every registered product carries two levels: the *actual* stock, which orders draw
//! down, and the *default* stock, the level a restock brings it back to. A product can be
//! marked do-not-restock; from then on its remaining units are still sellable but it is
//! never replenished, and it can never be registered (again).
//!
//! ```rust
//! use order_fulfillment::model::{ItemNumber, Product};
//! use order_fulfillment::warehouse::Warehouse;
//!
//! let mut warehouse = Warehouse::new();
//! warehouse.add_new_product(Product::new(1, "apples", 1.0), 5).unwrap();
//!
//! warehouse.fulfill(ItemNumber(1), 4).unwrap();
//! assert_eq!(warehouse.stock_level(ItemNumber(1)), 1);
//!
//! warehouse.restock(ItemNumber(1), 2).unwrap();
//! assert_eq!(warehouse.stock_level(ItemNumber(1)), 5);
//! ```

pub mod error;

pub use error::*;

use crate::model::{ItemNumber, Product};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct StockEntry {
    product: Product,
    actual: u32,
    default: u32,
}

/// Product stock keyed by item number.
///
/// Actual and default levels live in the same entry, so a product is known to both or
/// to neither.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    stock: BTreeMap<ItemNumber, StockEntry>,
    do_not_restock: BTreeSet<ItemNumber>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `product` with `desired_stock_level` as both its current and default stock.
    ///
    /// # Errors
    /// [`WarehouseError::DuplicateProduct`] if the product is already registered or is in
    /// the do-not-restock set, whether or not it was ever registered.
    pub fn add_new_product(&mut self, product: Product, desired_stock_level: u32) -> Result<(), WarehouseError> {
        let item = product.item_number();
        if self.stock.contains_key(&item) || self.do_not_restock.contains(&item) {
            return Err(WarehouseError::DuplicateProduct(item));
        }
        info!(%item, stock = desired_stock_level, "Product registered");
        self.stock.insert(
            item,
            StockEntry {
                product,
                actual: desired_stock_level,
                default: desired_stock_level,
            },
        );
        Ok(())
    }

    /// Raises the current stock to `max(minimum, default)` unless it already meets both.
    ///
    /// Never lowers stock. Returns the stock level after the call.
    ///
    /// # Errors
    /// [`WarehouseError::NotFoundOrBlocked`] if the item is unknown or do-not-restock.
    pub fn restock(&mut self, item: ItemNumber, minimum: u32) -> Result<u32, WarehouseError> {
        let entry = self.restockable_entry(item)?;
        if entry.actual >= minimum && entry.actual >= entry.default {
            return Ok(entry.actual);
        }
        let previous = entry.actual;
        entry.actual = minimum.max(entry.default);
        debug!(%item, previous, current = entry.actual, "Restocked");
        Ok(entry.actual)
    }

    /// Replaces the default stock level and returns the previous one.
    ///
    /// # Errors
    /// [`WarehouseError::NotFoundOrBlocked`] if the item is unknown or do-not-restock.
    pub fn set_default_stock_level(&mut self, item: ItemNumber, quantity: u32) -> Result<u32, WarehouseError> {
        let entry = self.restockable_entry(item)?;
        Ok(std::mem::replace(&mut entry.default, quantity))
    }

    /// Current stock, or zero for an unknown item.
    pub fn stock_level(&self, item: ItemNumber) -> u32 {
        self.stock.get(&item).map_or(0, |entry| entry.actual)
    }

    pub fn default_stock_level(&self, item: ItemNumber) -> Option<u32> {
        self.stock.get(&item).map(|entry| entry.default)
    }

    pub fn is_in_catalog(&self, item: ItemNumber) -> bool {
        self.stock.contains_key(&item)
    }

    /// False if the item is unknown or do-not-restock.
    pub fn is_restockable(&self, item: ItemNumber) -> bool {
        self.is_in_catalog(item) && !self.do_not_restock.contains(&item)
    }

    /// Permanently excludes `item` from restocking and registration.
    ///
    /// Stock on hand is kept and stays sellable. Returns the current stock level (zero if
    /// the item was never registered).
    pub fn mark_do_not_restock(&mut self, item: ItemNumber) -> u32 {
        if self.do_not_restock.insert(item) {
            info!(%item, "Marked do-not-restock");
        }
        self.stock_level(item)
    }

    /// True iff the item is known and has at least `quantity` units in stock.
    pub fn can_fulfill(&self, item: ItemNumber, quantity: u32) -> bool {
        self.stock.get(&item).is_some_and(|entry| entry.actual >= quantity)
    }

    /// Takes `quantity` units out of stock. Does not restock.
    ///
    /// # Errors
    /// [`WarehouseError::InsufficientStock`] if [`Warehouse::can_fulfill`] is false; stock is
    /// left untouched.
    pub fn fulfill(&mut self, item: ItemNumber, quantity: u32) -> Result<(), WarehouseError> {
        match self.stock.get_mut(&item) {
            Some(entry) if entry.actual >= quantity => {
                entry.actual -= quantity;
                debug!(%item, quantity, remaining = entry.actual, "Fulfilled");
                Ok(())
            }
            entry => Err(WarehouseError::InsufficientStock {
                item,
                requested: quantity,
                available: entry.map_or(0, |entry| entry.actual),
            }),
        }
    }

    /// Every registered product, regardless of its stock level.
    pub fn catalog(&self) -> BTreeSet<Product> {
        self.stock.values().map(|entry| entry.product.clone()).collect()
    }

    /// Registered products with at least one unit in stock.
    pub fn products_in_stock(&self) -> BTreeSet<Product> {
        self.stock
            .values()
            .filter(|entry| entry.actual > 0)
            .map(|entry| entry.product.clone())
            .collect()
    }

    fn restockable_entry(&mut self, item: ItemNumber) -> Result<&mut StockEntry, WarehouseError> {
        if self.do_not_restock.contains(&item) {
            return Err(WarehouseError::NotFoundOrBlocked(item));
        }
        self.stock
            .get_mut(&item)
            .ok_or(WarehouseError::NotFoundOrBlocked(item))
    }
}
