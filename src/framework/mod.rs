//! Generic actor framework for owned aggregates.
//!
//! This module provides the building blocks for serving a synchronous aggregate from its
//! own Tokio task, so concurrent callers are serialized through a mailbox.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that an aggregate implements to be served by an actor
//! - [`ResourceActor`] - Generic actor that owns the aggregate
//! - [`ResourceClient`] - Typed, cloneable handle for sending commands
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
