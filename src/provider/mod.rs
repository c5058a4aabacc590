//! # Service Providers
//!
//! A [`ServiceProvider`] is a staffable resource: it knows which services it can deliver
//! and works for one customer at a time.
//!
//! ## Lifecycle
//!
//! ```text
//!            assign_to_customer()
//!   Idle ───────────────────────────▶ Busy { orders_since_busy }
//!    ▲                                   │
//!    └───────────────────────────────────┘
//!               end_engagement()
//! ```
//!
//! The `orders_since_busy` counter only exists while busy; it starts at zero on every
//! assignment and is discarded when the engagement ends. The
//! [`OrderManagementSystem`](crate::fulfillment::OrderManagementSystem) advances it once per
//! completed order and ends the engagement when it reaches the configured threshold.

pub mod error;

pub use error::*;

use crate::model::Service;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::debug;

/// Type-safe identifier for service providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(pub u32);

impl From<u32> for ProviderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "provider_{}", self.0)
    }
}

/// Busy/idle state of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProviderState {
    #[default]
    Idle,
    Busy { orders_since_busy: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProvider {
    id: ProviderId,
    name: String,
    services: BTreeSet<Service>,
    state: ProviderState,
}

impl ServiceProvider {
    /// Creates an idle provider able to deliver `services`.
    pub fn new(
        id: impl Into<ProviderId>,
        name: impl Into<String>,
        services: impl IntoIterator<Item = Service>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            services: services.into_iter().collect(),
            state: ProviderState::Idle,
        }
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ProviderState::Busy { .. })
    }

    /// Completed orders since this provider was assigned; zero while idle.
    pub fn orders_since_busy(&self) -> u32 {
        match self.state {
            ProviderState::Busy { orders_since_busy } => orders_since_busy,
            ProviderState::Idle => 0,
        }
    }

    /// A copy of the capability set. Changing it does not affect the provider.
    pub fn services(&self) -> BTreeSet<Service> {
        self.services.clone()
    }

    pub fn offers(&self, service: &Service) -> bool {
        self.services.contains(service)
    }

    /// Returns true if the service was not offered before.
    pub fn add_service(&mut self, service: Service) -> bool {
        self.services.insert(service)
    }

    /// Returns true if the service was offered before.
    pub fn remove_service(&mut self, service: &Service) -> bool {
        self.services.remove(service)
    }

    /// Idle -> Busy, with a fresh counter.
    ///
    /// # Errors
    /// [`ProviderError::AlreadyBusy`] if the provider is already assigned.
    pub fn assign_to_customer(&mut self) -> Result<(), ProviderError> {
        if self.is_busy() {
            return Err(ProviderError::AlreadyBusy(self.id));
        }
        self.state = ProviderState::Busy { orders_since_busy: 0 };
        debug!(provider_id = %self.id, "Assigned");
        Ok(())
    }

    /// Busy -> Idle.
    ///
    /// # Errors
    /// [`ProviderError::NotBusy`] if the provider is idle.
    pub fn end_engagement(&mut self) -> Result<(), ProviderError> {
        if !self.is_busy() {
            return Err(ProviderError::NotBusy(self.id));
        }
        self.state = ProviderState::Idle;
        debug!(provider_id = %self.id, "Engagement ended");
        Ok(())
    }

    /// Counts one more completed order against the current engagement and returns the new
    /// count, or `None` if the provider is idle.
    pub fn record_completed_order(&mut self) -> Option<u32> {
        match &mut self.state {
            ProviderState::Busy { orders_since_busy } => {
                *orders_since_busy += 1;
                Some(*orders_since_busy)
            }
            ProviderState::Idle => None,
        }
    }
}

// Identity is the provider id.
impl PartialEq for ServiceProvider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceProvider {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cooking() -> Service {
        Service::new(1, "cooking", 1.0, 1)
    }

    fn cleaning() -> Service {
        Service::new(2, "cleaning", 2.0, 2)
    }

    #[test]
    fn test_double_assignment_fails() {
        let mut provider = ServiceProvider::new(1, "Noam", [cooking()]);
        provider.assign_to_customer().unwrap();

        assert_eq!(
            provider.assign_to_customer(),
            Err(ProviderError::AlreadyBusy(ProviderId(1)))
        );
        assert!(provider.is_busy());
    }

    #[test]
    fn test_double_end_engagement_fails() {
        let mut provider = ServiceProvider::new(2, "Meir", [cooking()]);
        provider.assign_to_customer().unwrap();
        provider.end_engagement().unwrap();

        assert_eq!(provider.end_engagement(), Err(ProviderError::NotBusy(ProviderId(2))));
        assert_eq!(provider.state(), ProviderState::Idle);
    }

    #[test]
    fn test_counter_resets_on_every_transition() {
        let mut provider = ServiceProvider::new(3, "Joseph", [cooking()]);
        assert_eq!(provider.record_completed_order(), None);

        provider.assign_to_customer().unwrap();
        assert_eq!(provider.record_completed_order(), Some(1));
        assert_eq!(provider.record_completed_order(), Some(2));

        provider.end_engagement().unwrap();
        assert_eq!(provider.orders_since_busy(), 0);

        provider.assign_to_customer().unwrap();
        assert_eq!(provider.orders_since_busy(), 0);
    }

    #[test]
    fn test_services_returns_defensive_copy() {
        let provider = ServiceProvider::new(1, "Noam", [cooking()]);

        let mut copy = provider.services();
        copy.insert(cleaning());
        copy.remove(&cooking());

        assert!(provider.offers(&cooking()));
        assert!(!provider.offers(&cleaning()));
    }

    #[test]
    fn test_add_and_remove_service_report_changes() {
        let mut provider = ServiceProvider::new(1, "Noam", [cooking()]);

        assert!(!provider.add_service(cooking()));
        assert!(provider.add_service(cleaning()));
        assert!(provider.remove_service(&cleaning()));
        assert!(!provider.remove_service(&cleaning()));
        assert_eq!(provider.services().len(), 1);
    }
}
