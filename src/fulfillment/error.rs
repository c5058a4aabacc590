//! Error types for order fulfillment.

use crate::framework::FrameworkError;
use crate::model::ItemNumber;
use crate::provider::ProviderError;
use crate::warehouse::WarehouseError;
use thiserror::Error;

/// Errors that can occur while placing orders or changing the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FulfillmentError {
    /// The service is not offered, or not enough idle providers can deliver it.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(ItemNumber),

    /// The product is neither in stock in the requested quantity nor restockable.
    #[error("Product unavailable: {0}")]
    ProductUnavailable(ItemNumber),

    /// A [`FulfillmentConfig`](crate::fulfillment::FulfillmentConfig) value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The order was already placed once.
    #[error("Order already completed")]
    OrderAlreadyCompleted,

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The actor answered with the reply of a different command.
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    /// An error occurred while communicating with the fulfillment actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
