//! # Order Fulfillment
//!
//! > **An order-fulfillment engine for a shop that sells products and staffs services.**
//!
//! Customers put [`Product`](model::Product)s and [`Service`](model::Service)s into an
//! [`Order`](model::Order). The [`OrderManagementSystem`](fulfillment::OrderManagementSystem)
//! checks the order against the [`Warehouse`](warehouse::Warehouse) and the pool of
//! [`ServiceProvider`](provider::ServiceProvider)s, then assigns providers, withdraws stock
//! (restocking where allowed), and marks the order completed.
//!
//! ## Core Concepts
//!
//! ### One owner, one critical section
//! The order management system is plain synchronous code that owns all of its state. To use
//! it from many tasks, it is served by a generic [`ResourceActor`](framework::ResourceActor):
//! commands arrive over a bounded channel and are applied one at a time, so placing an order
//! is a single critical section without any lock.
//!
//! ### Provider engagements
//! A provider assigned to an order stays busy while later orders complete. Every completed
//! order advances the counter of every busy provider; once it reaches
//! [`release_after_orders`](fulfillment::FulfillmentConfig::release_after_orders) the
//! provider becomes idle again.
//!
//! ### Mocking
//! Clients can be tested without an actor through [`framework::mock`].
//!
//! ## Module Tour
//!
//! ### 1. The Domain ([`model`], [`warehouse`], [`provider`])
//! Value types, stock keeping, and the busy/idle provider state machine.
//!
//! ### 2. The Engine ([`fulfillment`])
//! [`OrderManagementSystem`](fulfillment::OrderManagementSystem) and its order algorithm,
//! plus the commands it accepts when served by an actor.
//!
//! ### 3. The Plumbing ([`framework`])
//! The generic `ResourceActor<T>` / `ResourceClient<T>` pair.
//!
//! ### 4. The Interface ([`clients`])
//! [`FulfillmentClient`](clients::FulfillmentClient) turns commands into typed async methods.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`FulfillmentSystem`](lifecycle::FulfillmentSystem) spawns the actor and returns the final
//! state on [`shutdown`](lifecycle::FulfillmentSystem::shutdown);
//! [`setup_tracing`](lifecycle::setup_tracing) installs logging.
//!
//! ## Quick Start
//!
//! ```
//! use order_fulfillment::fulfillment::OrderManagementSystem;
//! use order_fulfillment::model::{Order, Product, Service};
//! use order_fulfillment::provider::ServiceProvider;
//!
//! let shoe = Product::new(1, "shoe", 2.5);
//! let cooking = Service::new(10, "cooking", 20.0, 2);
//! let mut oms = OrderManagementSystem::new(
//!     [shoe.clone()],
//!     5,
//!     [ServiceProvider::new(1, "Noam", [cooking.clone()])],
//! )?;
//!
//! let mut order = Order::new();
//! order.add_to_order(shoe.clone(), 2)?;
//! order.add_to_order(cooking, 1)?;
//! oms.place_order(&mut order)?;
//!
//! assert!(order.is_completed());
//! assert_eq!(oms.warehouse().stock_level(shoe.item_number()), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod clients;
pub mod framework;
pub mod fulfillment;
pub mod lifecycle;
pub mod model;
pub mod provider;
pub mod warehouse;
