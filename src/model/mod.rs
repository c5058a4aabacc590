//! Pure value types: sellable items and customer orders.

pub mod item;
pub mod order;
pub mod product;
pub mod service;

pub use item::*;
pub use order::*;
pub use product::*;
pub use service::*;
