//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_execute`] or [`expect_snapshot`] to assert behavior.
//! [`MockClient`] offers the same thing as a queue of canned replies.

use crate::framework::{ActorEntity, ResourceClient, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Execute { response: Result<T::Reply, T::Error> },
    Snapshot { response: T::Snapshot },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<OrderManagementSystem>::new();
/// mock.expect_execute().return_ok(FulfillmentReply::StockLevel(4));
///
/// let client = FulfillmentClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Execute { respond_to, .. }, Some(Expectation::Execute { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects an `execute` operation.
    pub fn expect_execute(&mut self) -> ExecuteExpectationBuilder<T> {
        ExecuteExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` operation and answers it with `snapshot`.
    pub fn expect_snapshot(&mut self, snapshot: T::Snapshot) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: snapshot });
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `execute` expectations.
pub struct ExecuteExpectationBuilder<T: ActorEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> ExecuteExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, reply: T::Reply) {
        self.push(Ok(reply));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: T::Error) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Reply, T::Error>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute { response });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing *client* logic we don't want to spin up a full [`ResourceActor`](crate::framework::ResourceActor).
/// This client sends messages to a channel we control (`receiver`); the test inspects
/// each message and answers it, simulating the actor deterministically.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Execute request
pub async fn expect_execute<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Command, Response<T::Reply, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Execute { command, respond_to }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<T::Snapshot>> {
    match receiver.recv().await {
        Some(ResourceRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
