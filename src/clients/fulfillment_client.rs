use crate::clients::actor_client::ActorClient;
use crate::framework::ResourceClient;
use crate::fulfillment::{FulfillmentCommand, FulfillmentError, FulfillmentReply, OrderManagementSystem};
use crate::model::{Item, ItemNumber, Order, Product, Service};
use crate::provider::{ProviderId, ServiceProvider};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Client for interacting with the fulfillment actor.
///
/// Cheap to clone. Every method is one command, run to completion by the actor before the
/// next command from any clone starts.
#[derive(Clone)]
pub struct FulfillmentClient {
    inner: ResourceClient<OrderManagementSystem>,
}

#[async_trait]
impl ActorClient<OrderManagementSystem> for FulfillmentClient {
    type Error = FulfillmentError;

    fn inner(&self) -> &ResourceClient<OrderManagementSystem> {
        &self.inner
    }
}

fn unexpected(reply: FulfillmentReply) -> FulfillmentError {
    FulfillmentError::UnexpectedReply(format!("{reply:?}"))
}

impl FulfillmentClient {
    pub fn new(inner: ResourceClient<OrderManagementSystem>) -> Self {
        Self { inner }
    }

    /// Places `order` and returns it marked completed.
    #[instrument(skip(self, order), fields(entries = order.len()))]
    pub async fn place_order(&self, order: Order) -> Result<Order, FulfillmentError> {
        debug!(?order, "place_order called");
        info!("Sending place_order to actor");
        match self.inner.execute(FulfillmentCommand::PlaceOrder(order)).await? {
            FulfillmentReply::PlaceOrder(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, products))]
    pub async fn add_new_products(
        &self,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<BTreeSet<Product>, FulfillmentError> {
        let products: Vec<Product> = products.into_iter().collect();
        debug!(count = products.len(), "Sending request");
        match self.inner.execute(FulfillmentCommand::AddNewProducts(products)).await? {
            FulfillmentReply::AddNewProducts(added) => Ok(added),
            other => Err(unexpected(other)),
        }
    }

    /// Returns false if a provider with the same id is already registered.
    #[instrument(skip(self, provider), fields(provider_id = %provider.id()))]
    pub async fn add_service_provider(&self, provider: ServiceProvider) -> Result<bool, FulfillmentError> {
        debug!("Sending request");
        match self.inner.execute(FulfillmentCommand::AddServiceProvider(provider)).await? {
            FulfillmentReply::AddServiceProvider(added) => Ok(added),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, item))]
    pub async fn discontinue_item(&self, item: impl Into<Item>) -> Result<(), FulfillmentError> {
        let item = item.into();
        debug!(item = %item.item_number(), "Sending request");
        match self.inner.execute(FulfillmentCommand::DiscontinueItem(item)).await? {
            FulfillmentReply::DiscontinueItem(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, product), fields(item = %product.item_number()))]
    pub async fn set_default_product_stock_level(&self, product: Product, level: u32) -> Result<(), FulfillmentError> {
        debug!("Sending request");
        let command = FulfillmentCommand::SetDefaultProductStockLevel { product, level };
        match self.inner.execute(command).await? {
            FulfillmentReply::SetDefaultProductStockLevel(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn product_catalog(&self) -> Result<BTreeSet<Product>, FulfillmentError> {
        debug!("Sending request");
        match self.inner.execute(FulfillmentCommand::ProductCatalog).await? {
            FulfillmentReply::ProductCatalog(catalog) => Ok(catalog),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn offered_services(&self) -> Result<BTreeSet<Service>, FulfillmentError> {
        debug!("Sending request");
        match self.inner.execute(FulfillmentCommand::OfferedServices).await? {
            FulfillmentReply::OfferedServices(services) => Ok(services),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(item = %item))]
    pub async fn stock_level(&self, item: ItemNumber) -> Result<u32, FulfillmentError> {
        debug!("Sending request");
        match self.inner.execute(FulfillmentCommand::StockLevel(item)).await? {
            FulfillmentReply::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(provider_id = %id))]
    pub async fn provider(&self, id: ProviderId) -> Result<Option<ServiceProvider>, FulfillmentError> {
        debug!("Sending request");
        match self.inner.execute(FulfillmentCommand::Provider(id)).await? {
            FulfillmentReply::Provider(provider) => Ok(provider),
            other => Err(unexpected(other)),
        }
    }
}
