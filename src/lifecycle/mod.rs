//! Runtime orchestration and lifecycle management.
//!
//! - [`FulfillmentSystem`] - spawns the fulfillment actor and hands back the final state on
//!   shutdown
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod fulfillment_system;
pub mod tracing;

pub use fulfillment_system::*;
pub use tracing::*;
