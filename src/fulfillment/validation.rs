//! Read-only feasibility checks for an order.
//!
//! Service validation produces a [`ServicePlan`]: the exact providers that will be assigned
//! if the order goes through. Committing the plan afterwards cannot pick a different set.

use super::OrderManagementSystem;
use crate::model::{ItemNumber, Order};
use crate::provider::ProviderId;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Providers chosen for each requested service, in ascending service item number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePlan {
    assignments: Vec<(ItemNumber, Vec<ProviderId>)>,
}

impl ServicePlan {
    pub fn assignments(&self) -> impl Iterator<Item = (ItemNumber, &[ProviderId])> {
        self.assignments
            .iter()
            .map(|(service, providers)| (*service, providers.as_slice()))
    }

    /// Total number of providers the plan assigns.
    pub fn provider_count(&self) -> usize {
        self.assignments.iter().map(|(_, providers)| providers.len()).sum()
    }
}

/// Idle providers not yet claimed by an earlier service of the same order.
///
/// Built fresh for every validation; claiming never touches the providers themselves.
struct ProviderPool {
    available: BTreeSet<ProviderId>,
    /// How many of the order's services each provider could deliver. Missing means one.
    demand: BTreeMap<ProviderId, usize>,
}

impl ProviderPool {
    /// Takes `quantity` candidates still available, or nothing if there are not enough of
    /// them.
    ///
    /// Candidates wanted by the fewest services of the order go first, then lower ids. This
    /// keeps a versatile provider free for a service only it can deliver, but it is still a
    /// single greedy pass: a mix of services whose candidate sets overlap in a chain can be
    /// rejected even though some assignment exists.
    fn claim(&mut self, candidates: &BTreeSet<ProviderId>, quantity: u32) -> Option<Vec<ProviderId>> {
        let mut ranked: Vec<ProviderId> = candidates
            .iter()
            .filter(|id| self.available.contains(*id))
            .copied()
            .collect();
        ranked.sort_by_key(|id| (self.demand.get(id).copied().unwrap_or(1), *id));
        let chosen: Vec<ProviderId> = ranked.into_iter().take(quantity as usize).collect();
        if chosen.len() < quantity as usize {
            return None;
        }
        for id in &chosen {
            self.available.remove(id);
        }
        Some(chosen)
    }
}

impl OrderManagementSystem {
    /// Returns the first service (by item number) the order cannot get, or `None` if every
    /// requested service can be staffed at once.
    pub fn validate_services(&self, order: &Order) -> Option<ItemNumber> {
        self.plan_services(order).err()
    }

    /// Returns the first product (by item number) that cannot be delivered, or `None` if
    /// every product is either in stock or restockable.
    pub fn validate_products(&self, order: &Order) -> Option<ItemNumber> {
        order
            .products()
            .map(|(product, quantity)| (product.item_number(), quantity))
            .find(|&(item, quantity)| {
                !self.warehouse.can_fulfill(item, quantity) && !self.warehouse.is_restockable(item)
            })
            .map(|(item, _)| item)
    }

    /// Picks distinct idle providers for every service in the order.
    ///
    /// Services are staffed in ascending item number and each provider serves at most one
    /// of them. Fails with the first service that is not offered or cannot be fully staffed.
    pub(super) fn plan_services(&self, order: &Order) -> Result<ServicePlan, ItemNumber> {
        let mut demand = BTreeMap::new();
        for (service, _) in order.services() {
            for id in self.service_pairing.get(&service.item_number()).into_iter().flatten() {
                *demand.entry(*id).or_insert(0) += 1;
            }
        }
        let mut pool = ProviderPool {
            available: self
                .service_pairing
                .values()
                .flatten()
                .copied()
                .filter(|id| self.providers.get(id).is_some_and(|p| !p.is_busy()))
                .collect(),
            demand,
        };

        let mut plan = ServicePlan::default();
        for (service, quantity) in order.services() {
            let item = service.item_number();
            let Some(candidates) = self.service_pairing.get(&item) else {
                debug!(%item, "Service not offered");
                return Err(item);
            };
            let Some(chosen) = pool.claim(candidates, quantity) else {
                debug!(%item, quantity, "Not enough idle providers");
                return Err(item);
            };
            plan.assignments.push((item, chosen));
        }
        Ok(plan)
    }
}
