// crates/virtual-cards-sdk/src/subscriptions/subscriber.rs
// ============================================================================
// Module: Funding Source Subscribers
// Description: Subscriber contract plus callback and channel implementations.
// Purpose: Deliver funding source change notifications to client code.
// Dependencies: thiserror, tokio
// ============================================================================

//! ## Overview
//! A [`FundingSourceSubscriber`] receives each transformed funding source
//! update and, optionally, connection state changes. [`CallbackSubscriber`]
//! invokes closures; [`ChannelSubscriber`] enqueues
//! [`FundingSourceNotification`] values on a Tokio mpsc channel without
//! blocking the watcher thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::Sender;

use crate::entities::ConnectionState;
use crate::entities::FundingSource;

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Subscriber delivery failure. Logged, never propagated to other subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subscriber delivery failed: {0}")]
pub struct SubscriberError(pub String);

/// Receiver of funding source change notifications.
pub trait FundingSourceSubscriber: Send + Sync {
    /// Called once per funding source update.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriberError`] when the notification could not be handled.
    fn funding_source_changed(&self, funding_source: &FundingSource) -> Result<(), SubscriberError>;

    /// Called when the subscription transport connects or disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriberError`] when the notification could not be handled.
    fn connection_state_changed(&self, _state: ConnectionState) -> Result<(), SubscriberError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Callback Subscriber
// ============================================================================

/// Handler invoked with each funding source update.
type ChangeHandler = dyn Fn(&FundingSource) -> Result<(), SubscriberError> + Send + Sync;
/// Handler invoked with each connection state change.
type ConnectionHandler = dyn Fn(ConnectionState) + Send + Sync;

/// Closure-backed subscriber.
#[derive(Clone)]
pub struct CallbackSubscriber {
    /// Update handler.
    on_change: Arc<ChangeHandler>,
    /// Optional connection state handler.
    on_connection: Option<Arc<ConnectionHandler>>,
}

impl CallbackSubscriber {
    /// Creates a subscriber from an update handler.
    pub fn new<F>(on_change: F) -> Self
    where
        F: Fn(&FundingSource) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        Self {
            on_change: Arc::new(on_change),
            on_connection: None,
        }
    }

    /// Adds a connection state handler.
    #[must_use]
    pub fn with_connection_handler<F>(mut self, on_connection: F) -> Self
    where
        F: Fn(ConnectionState) + Send + Sync + 'static,
    {
        self.on_connection = Some(Arc::new(on_connection));
        self
    }
}

impl FundingSourceSubscriber for CallbackSubscriber {
    fn funding_source_changed(&self, funding_source: &FundingSource) -> Result<(), SubscriberError> {
        (self.on_change)(funding_source)
    }

    fn connection_state_changed(&self, state: ConnectionState) -> Result<(), SubscriberError> {
        if let Some(handler) = &self.on_connection {
            handler(state);
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Channel Subscriber
// ============================================================================

/// Message enqueued by [`ChannelSubscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingSourceNotification {
    /// A funding source changed.
    Changed(FundingSource),
    /// The subscription transport connected or disconnected.
    ConnectionState(ConnectionState),
}

/// Channel-backed subscriber.
///
/// # Invariants
/// - Each successful delivery enqueues exactly one notification.
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    /// Sender used to enqueue notifications.
    sender: Sender<FundingSourceNotification>,
}

impl ChannelSubscriber {
    /// Creates a channel subscriber.
    #[must_use]
    pub const fn new(sender: Sender<FundingSourceNotification>) -> Self {
        Self {
            sender,
        }
    }
}

impl FundingSourceSubscriber for ChannelSubscriber {
    fn funding_source_changed(&self, funding_source: &FundingSource) -> Result<(), SubscriberError> {
        self.sender
            .try_send(FundingSourceNotification::Changed(funding_source.clone()))
            .map_err(|err| SubscriberError(err.to_string()))
    }

    fn connection_state_changed(&self, state: ConnectionState) -> Result<(), SubscriberError> {
        self.sender
            .try_send(FundingSourceNotification::ConnectionState(state))
            .map_err(|err| SubscriberError(err.to_string()))
    }
}
