//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod fulfillment_client;

pub use actor_client::*;
pub use fulfillment_client::*;
