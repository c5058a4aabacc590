use super::FulfillmentError;
use serde::{Deserialize, Serialize};

/// Stock level given to a product registered without a per-product override.
pub const DEFAULT_STOCK_LEVEL: u32 = 5;

/// Completed orders after which a busy provider is released.
pub const DEFAULT_RELEASE_AFTER_ORDERS: u32 = 4;

/// Mailbox capacity of the fulfillment actor.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Tunables for an [`OrderManagementSystem`](crate::fulfillment::OrderManagementSystem)
/// and the actor serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentConfig {
    /// System-wide default product stock level.
    pub default_stock_level: u32,
    /// Busy providers are released once this many completed orders have been counted
    /// against their engagement, the assigning order included.
    pub release_after_orders: u32,
    pub mailbox_capacity: usize,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            default_stock_level: DEFAULT_STOCK_LEVEL,
            release_after_orders: DEFAULT_RELEASE_AFTER_ORDERS,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl FulfillmentConfig {
    /// Defaults, with the given system-wide stock level.
    pub fn with_default_stock_level(default_stock_level: u32) -> Self {
        Self {
            default_stock_level,
            ..Self::default()
        }
    }

    /// # Errors
    /// [`FulfillmentError::InvalidConfig`] if `release_after_orders` or `mailbox_capacity`
    /// is zero.
    pub fn validate(&self) -> Result<(), FulfillmentError> {
        if self.release_after_orders == 0 {
            return Err(FulfillmentError::InvalidConfig(
                "release_after_orders must be at least 1".to_string(),
            ));
        }
        if self.mailbox_capacity == 0 {
            return Err(FulfillmentError::InvalidConfig(
                "mailbox_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
