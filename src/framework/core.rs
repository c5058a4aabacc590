//! # Core Actor Framework
//!
//! This module defines the generic building blocks for serving one owned aggregate from
//! its own task.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that an owned aggregate implements.
//! - [`ResourceActor`]: The generic actor that owns the aggregate and runs its commands.
//! - [`ResourceClient`]: The generic, cloneable client for communicating with the actor.
//! - [`FrameworkError`]: Channel-level failures (actor closed, reply dropped).

use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that an aggregate must implement to be served by a [`ResourceActor`].
///
/// # Architecture Note
/// The aggregate itself stays plain synchronous code. The actor gives it exclusive
/// ownership inside one task, so every command runs to completion before the next one
/// starts: a command is a critical section without any lock.
///
/// Associated types keep the protocol typed end to end. A client can only send the
/// aggregate's own `Command`s, and receives its own `Reply` or `Error`.
pub trait ActorEntity: Send + 'static {
    /// Enum of the operations the aggregate accepts.
    type Command: Send + Debug;

    /// Enum of successful outcomes, matching `Command` 1:1.
    type Reply: Send + Debug;

    /// A read-only view of the aggregate's state.
    type Snapshot: Send + Debug;

    /// The aggregate's error type. Channel failures are folded into it so that clients
    /// deal with a single error type.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Apply one command.
    fn handle_command(&mut self, command: Self::Command) -> Result<Self::Reply, Self::Error>;

    /// Capture the current state.
    fn snapshot(&self) -> Self::Snapshot;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Internal message type sent to the actor.
pub enum ResourceRequest<T: ActorEntity> {
    Execute {
        command: T::Command,
        respond_to: Response<T::Reply, T::Error>,
    },
    Snapshot {
        respond_to: oneshot::Sender<T::Snapshot>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns an aggregate.
///
/// This struct is the "Server" half of the actor. It owns the state (`entity`) and the
/// receiver end of the channel, and processes requests sequentially.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    entity: T,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor around `entity` and a client connected to it.
    ///
    /// `buffer_size` bounds the mailbox; callers wait when it is full. A size of zero is
    /// raised to one.
    pub fn new(buffer_size: usize, entity: T) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self { receiver, entity };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client is dropped, then hands the
    /// aggregate back.
    pub async fn run(mut self) -> T {
        // Extract just the type name (e.g., "OrderManagementSystem")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                ResourceRequest::Execute { command, respond_to } => {
                    debug!(entity_type, ?command, "Execute");
                    let result = self.entity.handle_command(command);
                    match &result {
                        Ok(_) => debug!(entity_type, "Command ok"),
                        Err(e) => warn!(entity_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Snapshot { respond_to } => {
                    debug!(entity_type, "Snapshot");
                    let _ = respond_to.send(self.entity.snapshot());
                }
            }
        }

        info!(entity_type, handled, "Shutdown");
        self.entity
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`ResourceActor`].
///
/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn execute(&self, command: T::Command) -> Result<T::Reply, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Execute { command, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Debug, Default)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    enum CounterCommand {
        Add(u32),
        Take(u32),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum CounterError {
        #[error("Not enough: {0}")]
        NotEnough(u32),
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    impl ActorEntity for Counter {
        type Command = CounterCommand;
        type Reply = u32;
        type Snapshot = u32;
        type Error = CounterError;

        fn handle_command(&mut self, command: CounterCommand) -> Result<u32, CounterError> {
            match command {
                CounterCommand::Add(n) => self.value += n,
                CounterCommand::Take(n) if n > self.value => return Err(CounterError::NotEnough(self.value)),
                CounterCommand::Take(n) => self.value -= n,
            }
            Ok(self.value)
        }

        fn snapshot(&self) -> u32 {
            self.value
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_runs_commands_in_order() {
        let (actor, client) = ResourceActor::new(10, Counter::default());
        let handle = tokio::spawn(actor.run());

        assert_eq!(client.execute(CounterCommand::Add(5)).await, Ok(5));
        assert_eq!(client.execute(CounterCommand::Take(2)).await, Ok(3));
        assert_eq!(
            client.execute(CounterCommand::Take(4)).await,
            Err(CounterError::NotEnough(3))
        );
        assert_eq!(client.snapshot().await, Ok(3));

        // Dropping the last client stops the loop and returns the aggregate.
        drop(client);
        let counter = handle.await.unwrap();
        assert_eq!(counter.value, 3);
    }

    #[tokio::test]
    async fn test_zero_buffer_size_still_serves_requests() {
        let (actor, client) = ResourceActor::new(0, Counter::default());
        let handle = tokio::spawn(actor.run());

        assert_eq!(client.execute(CounterCommand::Add(2)).await, Ok(2));

        drop(client);
        assert_eq!(handle.await.unwrap().value, 2);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_framework_error() {
        let (actor, client) = ResourceActor::new(1, Counter::default());
        drop(actor);

        assert_eq!(
            client.execute(CounterCommand::Add(1)).await,
            Err(CounterError::Framework(FrameworkError::ActorClosed))
        );
        assert_eq!(client.snapshot().await, Err(FrameworkError::ActorClosed));
    }
}
