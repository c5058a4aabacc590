//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole crate.
//!
//! ## Configuration
//!
//! Log lines use the compact format and hide the module prefix (`with_target(false)`).
//! Verbosity comes from the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo test
//! RUST_LOG=debug cargo test
//! RUST_LOG=order_fulfillment::fulfillment=debug cargo test
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start and shutdown, with the number of requests handled
//! - **State changes** (`info`): products registered, providers assigned and released,
//!   orders placed, items discontinued
//! - **Rejections** (`warn`): failed validations, skipped products, duplicate providers
//! - **Payloads** (`debug`): logged once at the entry point
//!
//! With `RUST_LOG=debug`, placing an order that needs one provider and one restock reads
//! roughly like this:
//!
//! ```text
//! DEBUG place_order:place_order called order=Order { .. }
//! INFO place_order:Sending place_order to actor
//! DEBUG Execute entity_type="OrderManagementSystem" command=PlaceOrder(..)
//! INFO Provider assigned service=item_10 provider_id=provider_2
//! DEBUG Restocked item=item_2 previous=5 current=8
//! DEBUG Fulfilled item=item_2 quantity=8 remaining=0
//! INFO Order placed entries=2 assigned=1 orders_completed=1
//! ```

/// Initializes the tracing subscriber.
///
/// Returns `false` if a global subscriber was already installed, in which case nothing
/// changes. Safe to call from every test.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_tracing_is_idempotent() {
        setup_tracing();
        assert!(!setup_tracing());
    }
}
