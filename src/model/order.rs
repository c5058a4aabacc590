//! Customer orders.

use crate::model::{Item, Product, Service};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by [`Order`] mutators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order was already placed and can no longer change.
    #[error("Order already completed")]
    AlreadyCompleted,
}

/// Represents a customer order: a bag of (item, quantity) entries.
///
/// An order is filled in by its creator through [`Order::add_to_order`] and then handed to
/// [`OrderManagementSystem::place_order`](crate::fulfillment::OrderManagementSystem::place_order).
/// Once the system completes it the order is frozen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    entries: BTreeMap<Item, u32>,
    completed: bool,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity for `item`, replacing any quantity previously recorded for the
    /// same item identity.
    ///
    /// Returns the replaced quantity, if any.
    ///
    /// # Errors
    /// [`OrderError::AlreadyCompleted`] if the order has been placed.
    pub fn add_to_order(&mut self, item: impl Into<Item>, quantity: u32) -> Result<Option<u32>, OrderError> {
        if self.completed {
            return Err(OrderError::AlreadyCompleted);
        }
        Ok(self.entries.insert(item.into(), quantity))
    }

    /// Quantity ordered for `item`, or zero if the order does not contain it.
    pub fn quantity(&self, item: &Item) -> u32 {
        self.entries.get(item).copied().unwrap_or(0)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Item, u32)> {
        self.entries.iter().map(|(item, quantity)| (item, *quantity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Product entries, in ascending item number order.
    pub fn products(&self) -> impl Iterator<Item = (&Product, u32)> {
        self.entries.iter().filter_map(|(item, quantity)| match item {
            Item::Product(product) => Some((product, *quantity)),
            Item::Service(_) => None,
        })
    }

    /// Service entries, in ascending item number order.
    pub fn services(&self) -> impl Iterator<Item = (&Service, u32)> {
        self.entries.iter().filter_map(|(item, quantity)| match item {
            Item::Service(service) => Some((service, *quantity)),
            Item::Product(_) => None,
        })
    }

    pub fn products_total(&self) -> f64 {
        self.products()
            .map(|(product, quantity)| product.price() * f64::from(quantity))
            .sum()
    }

    pub fn services_total(&self) -> f64 {
        self.services()
            .map(|(service, quantity)| service.price() * f64::from(quantity))
            .sum()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// One-way: there is no way to un-complete an order.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
