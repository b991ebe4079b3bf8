// crates/virtual-cards-sdk/src/interfaces.rs
// ============================================================================
// Module: Virtual Cards Interfaces
// Description: Contracts for the GraphQL transport, session, and watcher.
// Purpose: Keep transport, authentication, and websocket handling external.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! The SDK depends on three collaborators it does not implement:
//! - [`GraphQlClient`] executes queries and mutations (caching, retries, and
//!   networking live behind it).
//! - [`UserSession`] reports whether a user is signed in and who they are.
//! - [`Watcher`] runs GraphQL subscriptions and pushes [`WatchEvent`] values
//!   into a [`WatchSink`] until its [`WatchHandle`] is cancelled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::ConnectionState;
use crate::graphql::GraphQlRequest;
use crate::graphql::GraphQlResponse;

// ============================================================================
// SECTION: GraphQL Client
// ============================================================================

/// Transport-level failures raised by a [`GraphQlClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Network unreachable or request timed out.
    #[error("network error: {0}")]
    Network(String),
    /// Backend rejected the request before executing it.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// GraphQL transport.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Executes a query honoring `request.fetch_policy`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request could not be executed.
    /// Backend GraphQL errors are returned in [`GraphQlResponse::errors`].
    async fn query(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError>;

    /// Executes a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request could not be executed.
    async fn mutate(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError>;

    /// Drops any locally cached results.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the cache cannot be cleared.
    async fn clear_cache(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: User Session
// ============================================================================

/// Session lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session error: {0}")]
pub struct SessionError(pub String);

/// Authentication state of the current user.
#[async_trait]
pub trait UserSession: Send + Sync {
    /// Returns true when a user is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when session state cannot be read.
    async fn is_signed_in(&self) -> Result<bool, SessionError>;

    /// Returns the signed-in user's subject, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when session state cannot be read.
    async fn subject(&self) -> Result<Option<String>, SessionError>;
}

// ============================================================================
// SECTION: Watcher
// ============================================================================

/// Subscription transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// No watcher was configured on the client.
    #[error("subscriptions are not available: no watcher configured")]
    Unavailable,
    /// The watcher could not start or lost its stream.
    #[error("subscription transport error: {0}")]
    Transport(String),
    /// Internal subscription state was poisoned by a panicking subscriber.
    #[error("subscription state unavailable")]
    Poisoned,
}

/// Event pushed by a watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A subscription payload.
    Data(GraphQlResponse),
    /// A stream error; the watcher may keep running.
    Error(WatchError),
    /// Transport connectivity change.
    ConnectionState(ConnectionState),
}

/// Callback receiving watcher events. May be invoked from any thread.
pub type WatchSink = Arc<dyn Fn(WatchEvent) + Send + Sync>;

/// Handle to a running subscription.
pub trait WatchHandle: Send {
    /// Stops the subscription. Further events are not delivered.
    fn cancel(&mut self);
}

/// GraphQL subscription runner.
pub trait Watcher: Send + Sync {
    /// Starts a subscription delivering events into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`] when the subscription cannot be started.
    fn watch(
        &self,
        request: GraphQlRequest,
        sink: WatchSink,
    ) -> Result<Box<dyn WatchHandle>, WatchError>;
}
