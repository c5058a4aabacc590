//! Error types for the Warehouse.

use crate::model::ItemNumber;
use thiserror::Error;

/// Errors that can occur during warehouse operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WarehouseError {
    /// The product is already registered, or was marked do-not-restock.
    #[error("Product already registered or blocked: {0}")]
    DuplicateProduct(ItemNumber),

    /// The product is unknown, or was marked do-not-restock.
    #[error("Product not found or blocked: {0}")]
    NotFoundOrBlocked(ItemNumber),

    /// The requested quantity exceeds the current stock.
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: ItemNumber,
        requested: u32,
        available: u32,
    },
}
