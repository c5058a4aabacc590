//! Commands accepted by the fulfillment actor.
//!
//! Each [`FulfillmentCommand`] maps to one [`OrderManagementSystem`] operation and is
//! answered by the [`FulfillmentReply`] variant of the same name.

use super::{FulfillmentError, OrderManagementSystem};
use crate::framework::ActorEntity;
use crate::model::{Item, ItemNumber, Order, Product, Service};
use crate::provider::{ProviderId, ServiceProvider};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub enum FulfillmentCommand {
    /// Places the order; the completed order comes back in the reply.
    PlaceOrder(Order),
    AddNewProducts(Vec<Product>),
    AddServiceProvider(ServiceProvider),
    DiscontinueItem(Item),
    SetDefaultProductStockLevel { product: Product, level: u32 },
    ProductCatalog,
    OfferedServices,
    StockLevel(ItemNumber),
    /// A copy of the provider's current state.
    Provider(ProviderId),
}

/// Results of [`FulfillmentCommand`]s - variants match 1:1 with the commands.
#[derive(Debug, Clone)]
pub enum FulfillmentReply {
    PlaceOrder(Order),
    AddNewProducts(BTreeSet<Product>),
    AddServiceProvider(bool),
    DiscontinueItem(()),
    SetDefaultProductStockLevel(()),
    ProductCatalog(BTreeSet<Product>),
    OfferedServices(BTreeSet<Service>),
    StockLevel(u32),
    Provider(Option<ServiceProvider>),
}

/// Read-only view of an [`OrderManagementSystem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemSnapshot {
    pub stock_levels: BTreeMap<ItemNumber, u32>,
    pub offered_services: BTreeSet<ItemNumber>,
    /// Busy providers and the completed orders counted against their engagement.
    pub busy_providers: BTreeMap<ProviderId, u32>,
    pub orders_completed: u64,
}

impl ActorEntity for OrderManagementSystem {
    type Command = FulfillmentCommand;
    type Reply = FulfillmentReply;
    type Snapshot = SystemSnapshot;
    type Error = FulfillmentError;

    fn handle_command(&mut self, command: FulfillmentCommand) -> Result<FulfillmentReply, FulfillmentError> {
        match command {
            FulfillmentCommand::PlaceOrder(mut order) => {
                self.place_order(&mut order)?;
                Ok(FulfillmentReply::PlaceOrder(order))
            }
            FulfillmentCommand::AddNewProducts(products) => {
                Ok(FulfillmentReply::AddNewProducts(self.add_new_products(products)))
            }
            FulfillmentCommand::AddServiceProvider(provider) => {
                Ok(FulfillmentReply::AddServiceProvider(self.add_service_provider(provider)))
            }
            FulfillmentCommand::DiscontinueItem(item) => {
                self.discontinue_item(&item);
                Ok(FulfillmentReply::DiscontinueItem(()))
            }
            FulfillmentCommand::SetDefaultProductStockLevel { product, level } => {
                self.set_default_product_stock_level(&product, level);
                Ok(FulfillmentReply::SetDefaultProductStockLevel(()))
            }
            FulfillmentCommand::ProductCatalog => Ok(FulfillmentReply::ProductCatalog(self.product_catalog())),
            FulfillmentCommand::OfferedServices => Ok(FulfillmentReply::OfferedServices(self.offered_services())),
            FulfillmentCommand::StockLevel(item) => {
                Ok(FulfillmentReply::StockLevel(self.warehouse().stock_level(item)))
            }
            FulfillmentCommand::Provider(id) => Ok(FulfillmentReply::Provider(self.provider(id).cloned())),
        }
    }

    fn snapshot(&self) -> SystemSnapshot {
        let warehouse = self.warehouse();
        SystemSnapshot {
            stock_levels: warehouse
                .catalog()
                .iter()
                .map(|product| {
                    let item = product.item_number();
                    (item, warehouse.stock_level(item))
                })
                .collect(),
            offered_services: self.offered_services.keys().copied().collect(),
            busy_providers: self
                .providers()
                .filter(|provider| provider.is_busy())
                .map(|provider| (provider.id(), provider.orders_since_busy()))
                .collect(),
            orders_completed: self.orders_completed(),
        }
    }
}
