//! Error types for service providers.

use crate::provider::ProviderId;
use thiserror::Error;

/// Illegal busy/idle transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// The provider is already assigned to a customer.
    #[error("Provider already busy: {0}")]
    AlreadyBusy(ProviderId),

    /// The provider is not assigned to any customer.
    #[error("Provider not busy: {0}")]
    NotBusy(ProviderId),
}
