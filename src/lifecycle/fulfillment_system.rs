use crate::clients::FulfillmentClient;
use crate::framework::ResourceActor;
use crate::fulfillment::{FulfillmentConfig, FulfillmentError, OrderManagementSystem};
use crate::model::Product;
use crate::provider::ServiceProvider;
use crate::warehouse::Warehouse;
use tracing::{error, info};

/// Runs an [`OrderManagementSystem`] inside its own actor task.
///
/// Every call made through [`FulfillmentSystem::client`] (or any clone of it) becomes one
/// command processed to completion before the next, so concurrent callers can never
/// interleave the phases of two orders.
///
/// # Example
///
/// ```ignore
/// let system = FulfillmentSystem::new(oms, 32);
///
/// let placed = system.client.place_order(order).await?;
///
/// // Gracefully shut down and take the final state back
/// let oms = system.shutdown().await?;
/// ```
pub struct FulfillmentSystem {
    /// Client for interacting with the fulfillment actor
    pub client: FulfillmentClient,

    handle: tokio::task::JoinHandle<OrderManagementSystem>,
}

impl FulfillmentSystem {
    /// Spawns the actor around `oms` with a mailbox of `mailbox_capacity` commands.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(oms: OrderManagementSystem, mailbox_capacity: usize) -> Self {
        let (actor, inner) = ResourceActor::new(mailbox_capacity, oms);
        let handle = tokio::spawn(actor.run());
        info!(mailbox_capacity, "Fulfillment actor spawned");

        Self {
            client: FulfillmentClient::new(inner),
            handle,
        }
    }

    /// Builds the system from `config` and spawns it.
    ///
    /// # Errors
    /// - [`FulfillmentError::InvalidConfig`] if `config` does not validate, e.g. a zero
    ///   `mailbox_capacity`.
    /// - [`FulfillmentError::Warehouse`] if `products` contains the same item number twice.
    pub fn from_config(
        config: FulfillmentConfig,
        products: impl IntoIterator<Item = Product>,
        providers: impl IntoIterator<Item = ServiceProvider>,
    ) -> Result<Self, FulfillmentError> {
        let mailbox_capacity = config.mailbox_capacity;
        let oms = OrderManagementSystem::from_config(config, products, providers, Warehouse::new())?;
        Ok(Self::new(oms, mailbox_capacity))
    }

    /// Gracefully shuts down the actor and returns the system's final state.
    ///
    /// Dropping our client closes the channel once every clone handed out is gone too. The
    /// actor then finishes the commands already queued and exits its loop.
    ///
    /// # Errors
    /// `Err(String)` if the actor task panicked or was cancelled.
    pub async fn shutdown(self) -> Result<OrderManagementSystem, String> {
        info!("Shutting down fulfillment system...");
        drop(self.client);

        match self.handle.await {
            Ok(oms) => {
                info!(orders_completed = oms.orders_completed(), "Fulfillment system shutdown complete.");
                Ok(oms)
            }
            Err(e) => {
                error!("Actor task failed: {:?}", e);
                Err(format!("Actor task failed: {:?}", e))
            }
        }
    }
}
