//! # Order Fulfillment
//!
//! The [`OrderManagementSystem`] owns the [`Warehouse`] and every registered
//! [`ServiceProvider`], and turns customer [`Order`]s into stock withdrawals and provider
//! assignments.
//!
//! ## Placing an order
//!
//! [`OrderManagementSystem::place_order`] runs these phases in order and stops at the first
//! failure:
//!
//! 1. validate services: every requested service must be offered, with enough distinct idle
//!    providers for all services of the order at once
//! 2. commit services: assign the planned providers
//! 3. validate products: every product must be in stock or restockable
//! 4. commit products: restock where needed, then withdraw
//! 5. advance the engagement counter of every busy provider, releasing the ones that reached
//!    [`FulfillmentConfig::release_after_orders`]
//! 6. mark the order completed
//!
//! Services assigned in phase 2 stay assigned when phase 3 rejects a product.
//!
//! The system is plain synchronous code with a single owner. Concurrent callers go through
//! the actor described in [`command`].

pub mod command;
pub mod config;
pub mod error;
pub mod validation;

pub use command::*;
pub use config::*;
pub use error::*;
pub use validation::ServicePlan;

use crate::model::{Item, ItemNumber, Order, Product, Service};
use crate::provider::{ProviderId, ServiceProvider};
use crate::warehouse::Warehouse;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct OrderManagementSystem {
    config: FulfillmentConfig,
    warehouse: Warehouse,
    providers: BTreeMap<ProviderId, ServiceProvider>,
    offered_services: BTreeMap<ItemNumber, Service>,
    /// Offered service -> every registered provider able to deliver it.
    service_pairing: BTreeMap<ItemNumber, BTreeSet<ProviderId>>,
    discontinued_services: BTreeSet<ItemNumber>,
    stock_overrides: BTreeMap<ItemNumber, u32>,
    orders_completed: u64,
}

impl OrderManagementSystem {
    /// Builds a system with an empty warehouse.
    ///
    /// # Errors
    /// [`FulfillmentError::Warehouse`] if `products` contains the same item number twice.
    pub fn new(
        products: impl IntoIterator<Item = Product>,
        default_stock_level: u32,
        providers: impl IntoIterator<Item = ServiceProvider>,
    ) -> Result<Self, FulfillmentError> {
        Self::with_warehouse(products, default_stock_level, providers, Warehouse::new())
    }

    /// Builds a system around an existing warehouse. `products` are registered on top of
    /// whatever it already holds.
    pub fn with_warehouse(
        products: impl IntoIterator<Item = Product>,
        default_stock_level: u32,
        providers: impl IntoIterator<Item = ServiceProvider>,
        warehouse: Warehouse,
    ) -> Result<Self, FulfillmentError> {
        Self::from_config(
            FulfillmentConfig::with_default_stock_level(default_stock_level),
            products,
            providers,
            warehouse,
        )
    }

    /// # Errors
    /// [`FulfillmentError::InvalidConfig`] if `config` does not validate, or
    /// [`FulfillmentError::Warehouse`] on a duplicate product.
    pub fn from_config(
        config: FulfillmentConfig,
        products: impl IntoIterator<Item = Product>,
        providers: impl IntoIterator<Item = ServiceProvider>,
        warehouse: Warehouse,
    ) -> Result<Self, FulfillmentError> {
        config.validate()?;
        let mut system = Self {
            config,
            warehouse,
            providers: BTreeMap::new(),
            offered_services: BTreeMap::new(),
            service_pairing: BTreeMap::new(),
            discontinued_services: BTreeSet::new(),
            stock_overrides: BTreeMap::new(),
            orders_completed: 0,
        };

        for product in products {
            system
                .warehouse
                .add_new_product(product, system.config.default_stock_level)?;
        }
        for provider in providers {
            system.register_provider(provider);
        }
        system.rebuild_service_pairing();

        info!(
            products = system.warehouse.catalog().len(),
            providers = system.providers.len(),
            services = system.offered_services.len(),
            "Order management system ready"
        );
        Ok(system)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fulfills `order` and marks it completed.
    ///
    /// # Errors
    /// - [`FulfillmentError::OrderAlreadyCompleted`] if the order was placed before.
    /// - [`FulfillmentError::ServiceUnavailable`] with the first service that cannot be
    ///   staffed. Nothing has changed.
    /// - [`FulfillmentError::ProductUnavailable`] with the first product that cannot be
    ///   delivered. Services of the order are already assigned at this point.
    pub fn place_order(&mut self, order: &mut Order) -> Result<(), FulfillmentError> {
        if order.is_completed() {
            warn!("Rejected an order that was already completed");
            return Err(FulfillmentError::OrderAlreadyCompleted);
        }
        debug!(?order, "place_order");

        let plan = self.plan_services(order).map_err(|item| {
            warn!(%item, "Service validation failed");
            FulfillmentError::ServiceUnavailable(item)
        })?;
        self.commit_services(&plan)?;

        if let Some(item) = self.validate_products(order) {
            warn!(%item, assigned = plan.provider_count(), "Product validation failed");
            return Err(FulfillmentError::ProductUnavailable(item));
        }
        self.commit_products(order)?;

        self.advance_engagements()?;
        order.mark_completed();
        self.orders_completed += 1;

        info!(
            entries = order.len(),
            assigned = plan.provider_count(),
            orders_completed = self.orders_completed,
            "Order placed"
        );
        Ok(())
    }

    fn commit_services(&mut self, plan: &ServicePlan) -> Result<(), FulfillmentError> {
        for (service, provider_ids) in plan.assignments() {
            for id in provider_ids {
                let provider = self
                    .providers
                    .get_mut(id)
                    .ok_or(FulfillmentError::ServiceUnavailable(service))?;
                provider
                    .assign_to_customer()
                    .map_err(|_| FulfillmentError::ServiceUnavailable(service))?;
                info!(%service, provider_id = %id, "Provider assigned");
            }
        }
        Ok(())
    }

    fn commit_products(&mut self, order: &Order) -> Result<(), FulfillmentError> {
        for (product, quantity) in order.products() {
            let item = product.item_number();
            if !self.warehouse.can_fulfill(item, quantity) {
                self.warehouse
                    .restock(item, quantity)
                    .map_err(|_| FulfillmentError::ProductUnavailable(item))?;
            }
            self.warehouse
                .fulfill(item, quantity)
                .map_err(|_| FulfillmentError::ProductUnavailable(item))?;
        }
        Ok(())
    }

    /// Counts the order just completed against every busy provider in the system.
    fn advance_engagements(&mut self) -> Result<(), FulfillmentError> {
        let release_after = self.config.release_after_orders;
        for provider in self.providers.values_mut() {
            if provider
                .record_completed_order()
                .is_some_and(|elapsed| elapsed >= release_after)
            {
                provider.end_engagement()?;
                info!(provider_id = %provider.id(), "Provider released");
            }
        }
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Registers every product that is neither already known nor blocked, and returns the
    /// ones that were added.
    pub fn add_new_products(&mut self, products: impl IntoIterator<Item = Product>) -> BTreeSet<Product> {
        let mut added = BTreeSet::new();
        for product in products {
            let item = product.item_number();
            let level = self
                .stock_overrides
                .get(&item)
                .copied()
                .unwrap_or(self.config.default_stock_level);
            match self.warehouse.add_new_product(product.clone(), level) {
                Ok(()) => {
                    added.insert(product);
                }
                Err(e) => warn!(%item, error = %e, "Skipped product"),
            }
        }
        info!(added = added.len(), "Products added");
        added
    }

    /// Registers `provider` and pairs it with every offered service it can deliver.
    ///
    /// Returns `false`, leaving the system unchanged, if a provider with the same id is
    /// already registered.
    pub fn add_service_provider(&mut self, provider: ServiceProvider) -> bool {
        let id = provider.id();
        if !self.register_provider(provider) {
            return false;
        }
        self.rebuild_service_pairing();
        info!(provider_id = %id, services = self.offered_services.len(), "Provider added");
        true
    }

    /// Stops restocking a product, or withdraws a service for good.
    ///
    /// Stock already on hand for a discontinued product can still be sold. A discontinued
    /// service is never offered again, whoever provides it.
    pub fn discontinue_item(&mut self, item: &Item) {
        let number = item.item_number();
        match item {
            Item::Product(_) => {
                let remaining = self.warehouse.mark_do_not_restock(number);
                info!(item = %number, remaining, "Product discontinued");
            }
            Item::Service(_) => {
                self.offered_services.remove(&number);
                self.service_pairing.remove(&number);
                self.discontinued_services.insert(number);
                info!(item = %number, "Service discontinued");
            }
        }
    }

    /// Sets the stock level the product is restocked to. The level also applies if the
    /// product is registered later through [`add_new_products`](Self::add_new_products).
    pub fn set_default_product_stock_level(&mut self, product: &Product, level: u32) {
        let item = product.item_number();
        self.stock_overrides.insert(item, level);
        if self.warehouse.is_restockable(item) {
            if let Ok(previous) = self.warehouse.set_default_stock_level(item, level) {
                info!(%item, previous, level, "Default stock level changed");
                return;
            }
        }
        debug!(%item, level, "Stock level override recorded");
    }

    /// Every product ever registered, in stock or not.
    pub fn product_catalog(&self) -> BTreeSet<Product> {
        self.warehouse.catalog()
    }

    pub fn offered_services(&self) -> BTreeSet<Service> {
        self.offered_services.values().cloned().collect()
    }

    /// Ids of the providers able to deliver `service`, busy or not. Empty if the service is
    /// not offered.
    pub fn providers_for(&self, service: &Service) -> BTreeSet<ProviderId> {
        self.service_pairing
            .get(&service.item_number())
            .cloned()
            .unwrap_or_default()
    }

    pub fn provider(&self, id: ProviderId) -> Option<&ServiceProvider> {
        self.providers.get(&id)
    }

    pub fn providers(&self) -> impl Iterator<Item = &ServiceProvider> {
        self.providers.values()
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn config(&self) -> &FulfillmentConfig {
        &self.config
    }

    pub fn orders_completed(&self) -> u64 {
        self.orders_completed
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn register_provider(&mut self, provider: ServiceProvider) -> bool {
        let id = provider.id();
        if self.providers.contains_key(&id) {
            warn!(provider_id = %id, "Provider already registered");
            return false;
        }
        for service in provider.services() {
            let item = service.item_number();
            if !self.discontinued_services.contains(&item) {
                self.offered_services.entry(item).or_insert(service);
            }
        }
        self.providers.insert(id, provider);
        true
    }

    fn rebuild_service_pairing(&mut self) {
        self.service_pairing = self
            .offered_services
            .iter()
            .map(|(item, service)| {
                let qualified = self
                    .providers
                    .values()
                    .filter(|provider| provider.offers(service))
                    .map(ServiceProvider::id)
                    .collect();
                (*item, qualified)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderState;

    fn shoe() -> Product {
        Product::new(1, "shoe", 2.5)
    }

    fn hat() -> Product {
        Product::new(2, "hat", 10.0)
    }

    fn cooking() -> Service {
        Service::new(10, "cooking", 20.0, 2)
    }

    fn cleaning() -> Service {
        Service::new(11, "cleaning", 15.0, 3)
    }

    fn system() -> OrderManagementSystem {
        OrderManagementSystem::new(
            [shoe(), hat()],
            5,
            [
                ServiceProvider::new(1, "Noam", [cooking()]),
                ServiceProvider::new(2, "Meir", [cooking(), cleaning()]),
            ],
        )
        .unwrap()
    }

    fn order(entries: &[(Item, u32)]) -> Order {
        let mut order = Order::new();
        for (item, quantity) in entries {
            order.add_to_order(item.clone(), *quantity).unwrap();
        }
        order
    }

    #[test]
    fn test_construction_pairs_services_with_providers() {
        let oms = system();

        assert_eq!(oms.offered_services(), BTreeSet::from([cooking(), cleaning()]));
        assert_eq!(oms.providers_for(&cooking()), BTreeSet::from([ProviderId(1), ProviderId(2)]));
        assert_eq!(oms.providers_for(&cleaning()), BTreeSet::from([ProviderId(2)]));
        assert_eq!(oms.warehouse().stock_level(shoe().item_number()), 5);
    }

    #[test]
    fn test_duplicate_initial_product_is_propagated() {
        let result = OrderManagementSystem::new([shoe(), Product::new(1, "boot", 1.0)], 5, []);

        assert!(matches!(
            result,
            Err(FulfillmentError::Warehouse(crate::warehouse::WarehouseError::DuplicateProduct(
                ItemNumber(1)
            )))
        ));
    }

    #[test]
    fn test_place_order_assigns_providers_and_withdraws_stock() {
        let mut oms = system();
        let mut order = order(&[(shoe().into(), 3), (cleaning().into(), 1)]);

        oms.place_order(&mut order).unwrap();

        assert!(order.is_completed());
        assert_eq!(oms.warehouse().stock_level(shoe().item_number()), 2);
        assert_eq!(
            oms.provider(ProviderId(2)).unwrap().state(),
            ProviderState::Busy { orders_since_busy: 1 }
        );
        assert!(!oms.provider(ProviderId(1)).unwrap().is_busy());
        assert_eq!(oms.orders_completed(), 1);
    }

    #[test]
    fn test_providers_are_not_shared_between_services_of_one_order() {
        let mut oms = system();
        // Cooking is claimed first and needs both providers, so provider 2 is no longer
        // available for cleaning.
        let mut order = order(&[(cooking().into(), 2), (cleaning().into(), 1)]);

        assert_eq!(oms.validate_services(&order), Some(cleaning().item_number()));
        assert_eq!(
            oms.place_order(&mut order),
            Err(FulfillmentError::ServiceUnavailable(cleaning().item_number()))
        );
        assert!(oms.providers().all(|p| !p.is_busy()));
    }

    #[test]
    fn test_one_provider_per_service_when_both_are_needed() {
        let mut oms = system();
        let mut order = order(&[(cooking().into(), 1), (cleaning().into(), 1)]);

        oms.place_order(&mut order).unwrap();

        assert!(oms.providers().all(|p| p.is_busy()));
    }

    #[test]
    fn test_versatile_provider_kept_for_the_service_only_it_offers() {
        // Provider 1 is the lower id but the only one who can clean.
        let mut oms = OrderManagementSystem::new(
            [],
            5,
            [
                ServiceProvider::new(1, "Noam", [cooking(), cleaning()]),
                ServiceProvider::new(2, "Meir", [cooking()]),
            ],
        )
        .unwrap();
        let mut order = order(&[(cooking().into(), 1), (cleaning().into(), 1)]);

        assert_eq!(oms.validate_services(&order), None);
        oms.place_order(&mut order).unwrap();

        assert!(oms.provider(ProviderId(1)).unwrap().is_busy());
        assert!(oms.provider(ProviderId(2)).unwrap().is_busy());
    }

    #[test]
    fn test_restock_on_shortage() {
        let mut oms = system();
        let mut order = order(&[(hat().into(), 8)]);

        oms.place_order(&mut order).unwrap();

        // Restocked to max(8, 5) = 8, then 8 withdrawn.
        assert_eq!(oms.warehouse().stock_level(hat().item_number()), 0);
    }

    #[test]
    fn test_product_failure_keeps_assigned_services() {
        let mut oms = system();
        let unknown = Product::new(99, "ghost", 1.0);
        let mut order = order(&[(unknown.clone().into(), 1), (cleaning().into(), 1)]);

        assert_eq!(
            oms.place_order(&mut order),
            Err(FulfillmentError::ProductUnavailable(unknown.item_number()))
        );
        assert!(!order.is_completed());
        assert!(oms.provider(ProviderId(2)).unwrap().is_busy());
        assert_eq!(oms.provider(ProviderId(2)).unwrap().orders_since_busy(), 0);
        assert_eq!(oms.orders_completed(), 0);
    }

    #[test]
    fn test_completed_order_cannot_be_placed_again() {
        let mut oms = system();
        let mut order = order(&[(shoe().into(), 1)]);
        oms.place_order(&mut order).unwrap();

        assert_eq!(oms.place_order(&mut order), Err(FulfillmentError::OrderAlreadyCompleted));
        assert_eq!(oms.warehouse().stock_level(shoe().item_number()), 4);
    }

    #[test]
    fn test_provider_released_after_configured_orders() {
        let mut oms = system();
        oms.place_order(&mut order(&[(cleaning().into(), 1)])).unwrap();

        for _ in 0..2 {
            oms.place_order(&mut order(&[(shoe().into(), 1)])).unwrap();
            assert!(oms.provider(ProviderId(2)).unwrap().is_busy());
        }
        oms.place_order(&mut order(&[(shoe().into(), 1)])).unwrap();

        assert!(!oms.provider(ProviderId(2)).unwrap().is_busy());
    }

    #[test]
    fn test_add_new_products_skips_known_and_blocked() {
        let mut oms = system();
        let scarf = Product::new(3, "scarf", 7.0);
        let sock = Product::new(4, "sock", 1.0);
        oms.discontinue_item(&sock.clone().into());

        let added = oms.add_new_products([shoe(), scarf.clone(), sock]);

        assert_eq!(added, BTreeSet::from([scarf.clone()]));
        assert_eq!(oms.warehouse().stock_level(scarf.item_number()), 5);
    }

    #[test]
    fn test_stock_override_applies_to_later_registration() {
        let mut oms = system();
        let scarf = Product::new(3, "scarf", 7.0);

        oms.set_default_product_stock_level(&scarf, 12);
        oms.add_new_products([scarf.clone()]);

        assert_eq!(oms.warehouse().stock_level(scarf.item_number()), 12);
    }

    #[test]
    fn test_stock_override_updates_registered_product() {
        let mut oms = system();
        oms.set_default_product_stock_level(&hat(), 9);

        assert_eq!(oms.warehouse().default_stock_level(hat().item_number()), Some(9));
        assert_eq!(oms.warehouse().stock_level(hat().item_number()), 5);
    }

    #[test]
    fn test_discontinued_service_is_never_offered_again() {
        let mut oms = system();
        oms.discontinue_item(&cleaning().into());

        assert!(oms.providers_for(&cleaning()).is_empty());
        assert!(oms.add_service_provider(ServiceProvider::new(3, "Joseph", [cleaning(), cooking()])));

        assert_eq!(oms.offered_services(), BTreeSet::from([cooking()]));
        assert_eq!(
            oms.providers_for(&cooking()),
            BTreeSet::from([ProviderId(1), ProviderId(2), ProviderId(3)])
        );
        assert_eq!(
            oms.validate_services(&order(&[(cleaning().into(), 1)])),
            Some(cleaning().item_number())
        );
    }

    #[test]
    fn test_duplicate_provider_id_is_ignored() {
        let mut oms = system();

        assert!(!oms.add_service_provider(ServiceProvider::new(1, "Impostor", [cleaning()])));
        assert_eq!(oms.provider(ProviderId(1)).unwrap().name(), "Noam");
        assert_eq!(oms.providers_for(&cleaning()), BTreeSet::from([ProviderId(2)]));
    }

    #[test]
    fn test_discontinued_product_sells_remaining_stock_only() {
        let mut oms = system();
        oms.discontinue_item(&shoe().into());

        assert_eq!(oms.validate_products(&order(&[(shoe().into(), 5)])), None);
        assert_eq!(
            oms.validate_products(&order(&[(shoe().into(), 6)])),
            Some(shoe().item_number())
        );
    }
}
