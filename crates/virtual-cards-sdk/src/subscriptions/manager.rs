// crates/virtual-cards-sdk/src/subscriptions/manager.rs
// ============================================================================
// Module: Funding Source Subscription Manager
// Description: Fan-out of one watcher stream to many keyed subscribers.
// Purpose: Run a single backend subscription while any subscriber is present.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`SubscriptionManager`] owns at most one running watcher, scoped to the
//! owner it was started for. The first subscriber starts it and the last one
//! to leave cancels it. Subscribing for a different owner cancels the running
//! watcher, drops the previous owner's subscribers, and starts a new one.
//! Each update is transformed once and delivered to every subscriber in id
//! order.
//! Invariants:
//! - Lock order is lifecycle then subscribers; the watcher sink only takes
//!   the subscribers lock and releases it before delivering.
//! - Undecodable updates, backend errors, and subscriber failures are
//!   recorded on the audit sink and never delivered.
//! - Events from a stopped watcher are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde_json::Value;
use serde_json::json;

use crate::audit::SdkAuditSink;
use crate::audit::SubscriptionAuditEvent;
use crate::audit::SubscriptionAuditEventParams;
use crate::entities::ConnectionState;
use crate::entities::FundingSource;
use crate::errors::VirtualCardsError;
use crate::errors::map_graphql_error;
use crate::graphql::GraphQlResponse;
use crate::graphql::documents::ON_FUNDING_SOURCE_UPDATE;
use crate::graphql::wire::FundingSourceWire;
use crate::identifiers::SubscriptionId;
use crate::interfaces::WatchError;
use crate::interfaces::WatchEvent;
use crate::interfaces::WatchHandle;
use crate::interfaces::WatchSink;
use crate::interfaces::Watcher;
use crate::subscriptions::subscriber::FundingSourceSubscriber;
use crate::transformers;

// ============================================================================
// SECTION: State
// ============================================================================

/// Registered subscribers and the last observed connection state.
#[derive(Default)]
struct SubscriberState {
    /// Subscribers keyed by id.
    subscribers: BTreeMap<SubscriptionId, Arc<dyn FundingSourceSubscriber>>,
    /// Last connection state reported by the watcher.
    connection: ConnectionState,
}

impl SubscriberState {
    /// Clones the subscriber list in id order.
    fn snapshot(&self) -> Vec<(SubscriptionId, Arc<dyn FundingSourceSubscriber>)> {
        self.subscribers.iter().map(|(id, subscriber)| (id.clone(), Arc::clone(subscriber))).collect()
    }
}

/// Watcher started for one owner.
struct RunningWatch {
    /// Owner the watcher was started for.
    owner: String,
    /// Cancellation handle.
    handle: Box<dyn WatchHandle>,
    /// Cleared on stop so a late event from this watcher is ignored.
    active: Arc<AtomicBool>,
}

// ============================================================================
// SECTION: Manager
// ============================================================================

/// Keyed funding source subscription registry.
pub struct SubscriptionManager {
    /// Subscription transport, absent when subscriptions are unsupported.
    watcher: Option<Arc<dyn Watcher>>,
    /// Audit sink for dropped notifications.
    audit: Arc<dyn SdkAuditSink>,
    /// Running watcher, if any.
    lifecycle: Mutex<Option<RunningWatch>>,
    /// Subscribers shared with the watcher sink.
    state: Arc<Mutex<SubscriberState>>,
}

impl SubscriptionManager {
    /// Creates a manager.
    #[must_use]
    pub fn new(watcher: Option<Arc<dyn Watcher>>, audit: Arc<dyn SdkAuditSink>) -> Self {
        Self {
            watcher,
            audit,
            lifecycle: Mutex::new(None),
            state: Arc::new(Mutex::new(SubscriberState::default())),
        }
    }

    /// Registers `subscriber` under `id`, replacing any subscriber with the
    /// same id, and starts the watcher for `owner` if it is not running.
    ///
    /// A watcher running for another owner is cancelled first and its
    /// subscribers are dropped with an `owner_changed` audit record each.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Unavailable`] without a watcher, or the watcher's
    /// start error. A failed start leaves no subscriber registered.
    pub fn subscribe(
        &self,
        id: SubscriptionId,
        owner: &str,
        subscriber: Arc<dyn FundingSourceSubscriber>,
    ) -> Result<(), WatchError> {
        let watcher = self.watcher.as_ref().ok_or(WatchError::Unavailable)?;
        let mut running = self.lifecycle.lock().map_err(|_| WatchError::Poisoned)?;
        if running.as_ref().is_some_and(|current| current.owner == owner) {
            self.state
                .lock()
                .map_err(|_| WatchError::Poisoned)?
                .subscribers
                .insert(id, subscriber);
            return Ok(());
        }
        if let Some(previous) = running.as_ref().map(|current| current.owner.clone()) {
            self.stop(&mut running)?;
            let dropped = {
                let mut state = self.state.lock().map_err(|_| WatchError::Poisoned)?;
                std::mem::take(&mut state.subscribers)
            };
            for dropped_id in dropped.keys() {
                record(
                    self.audit.as_ref(),
                    Some(dropped_id),
                    "owner_changed",
                    format!("watcher restarted for another owner; previous owner {previous}"),
                );
            }
        }
        self.state
            .lock()
            .map_err(|_| WatchError::Poisoned)?
            .subscribers
            .insert(id.clone(), subscriber);
        let request = ON_FUNDING_SOURCE_UPDATE.request(json!({ "owner": owner }));
        let active = Arc::new(AtomicBool::new(true));
        match watcher.watch(request, self.sink(Arc::clone(&active))) {
            Ok(handle) => {
                *running = Some(RunningWatch {
                    owner: owner.to_string(),
                    handle,
                    active,
                });
                Ok(())
            }
            Err(err) => {
                if let Ok(mut state) = self.state.lock() {
                    state.subscribers.remove(&id);
                }
                Err(err)
            }
        }
    }

    /// Removes the subscriber registered under `id`, cancelling the watcher
    /// when none remain. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Poisoned`] when internal state is unavailable.
    pub fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), WatchError> {
        let mut running = self.lifecycle.lock().map_err(|_| WatchError::Poisoned)?;
        let empty = {
            let mut state = self.state.lock().map_err(|_| WatchError::Poisoned)?;
            state.subscribers.remove(id);
            state.subscribers.is_empty()
        };
        if empty {
            self.stop(&mut running)?;
        }
        Ok(())
    }

    /// Removes every subscriber and cancels the watcher.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Poisoned`] when internal state is unavailable.
    pub fn unsubscribe_all(&self) -> Result<(), WatchError> {
        let mut running = self.lifecycle.lock().map_err(|_| WatchError::Poisoned)?;
        self.state.lock().map_err(|_| WatchError::Poisoned)?.subscribers.clear();
        self.stop(&mut running)
    }

    /// Returns the number of registered subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Poisoned`] when internal state is unavailable.
    pub fn subscriber_count(&self) -> Result<usize, WatchError> {
        Ok(self.state.lock().map_err(|_| WatchError::Poisoned)?.subscribers.len())
    }

    /// Returns the last connection state reported by the watcher.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Poisoned`] when internal state is unavailable.
    pub fn connection_state(&self) -> Result<ConnectionState, WatchError> {
        Ok(self.state.lock().map_err(|_| WatchError::Poisoned)?.connection)
    }

    /// Cancels the running watcher and resets the connection state.
    fn stop(&self, running: &mut Option<RunningWatch>) -> Result<(), WatchError> {
        if let Some(mut current) = running.take() {
            current.active.store(false, Ordering::SeqCst);
            current.handle.cancel();
        }
        self.state.lock().map_err(|_| WatchError::Poisoned)?.connection =
            ConnectionState::Disconnected;
        Ok(())
    }

    /// Builds the sink handed to the watcher.
    fn sink(&self, active: Arc<AtomicBool>) -> WatchSink {
        let state = Arc::clone(&self.state);
        let audit = Arc::clone(&self.audit);
        Arc::new(move |event| {
            if active.load(Ordering::SeqCst) {
                dispatch(&state, audit.as_ref(), event);
            }
        })
    }
}

impl Drop for SubscriptionManager {
    fn drop(&mut self) {
        if let Ok(mut running) = self.lifecycle.lock()
            && let Some(mut current) = running.take()
        {
            current.active.store(false, Ordering::SeqCst);
            current.handle.cancel();
        }
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Routes one watcher event to subscribers or the audit sink.
fn dispatch(state: &Mutex<SubscriberState>, audit: &dyn SdkAuditSink, event: WatchEvent) {
    match event {
        WatchEvent::Data(response) => match funding_source_update(response) {
            Ok(funding_source) => deliver(state, audit, &funding_source),
            Err(err) => record(audit, None, "update_dropped", err.to_string()),
        },
        WatchEvent::Error(err) => record(audit, None, "watch_error", err.to_string()),
        WatchEvent::ConnectionState(connection) => {
            let subscribers = match state.lock() {
                Ok(mut guard) => {
                    guard.connection = connection;
                    guard.snapshot()
                }
                Err(_) => return,
            };
            for (id, subscriber) in subscribers {
                if let Err(err) = subscriber.connection_state_changed(connection) {
                    record(audit, Some(&id), "subscriber_failed", err.to_string());
                }
            }
        }
    }
}

/// Delivers one update to every subscriber in id order.
fn deliver(state: &Mutex<SubscriberState>, audit: &dyn SdkAuditSink, funding_source: &FundingSource) {
    let Ok(subscribers) = state.lock().map(|guard| guard.snapshot()) else {
        return;
    };
    for (id, subscriber) in subscribers {
        if let Err(err) = subscriber.funding_source_changed(funding_source) {
            record(audit, Some(&id), "subscriber_failed", err.to_string());
        }
    }
}

/// Extracts and transforms the funding source carried by an update.
fn funding_source_update(response: GraphQlResponse) -> Result<FundingSource, VirtualCardsError> {
    if let Some(error) = response.errors.first() {
        return Err(map_graphql_error(error));
    }
    let payload = response
        .data
        .and_then(|mut data| data.get_mut(ON_FUNDING_SOURCE_UPDATE.field).map(Value::take))
        .filter(|payload| !payload.is_null())
        .ok_or_else(|| {
            VirtualCardsError::UnexpectedResponse(format!(
                "{} update carried no funding source",
                ON_FUNDING_SOURCE_UPDATE.field
            ))
        })?;
    let wire: FundingSourceWire = serde_json::from_value(payload).map_err(|err| {
        VirtualCardsError::UnexpectedResponse(format!("{}: {err}", ON_FUNDING_SOURCE_UPDATE.field))
    })?;
    transformers::funding_source(wire)
}

/// Records a dropped notification.
fn record(audit: &dyn SdkAuditSink, id: Option<&SubscriptionId>, reason: &'static str, detail: String) {
    audit.record_subscription(&SubscriptionAuditEvent::new(SubscriptionAuditEventParams {
        subscription_id: id.map(ToString::to_string),
        reason,
        detail,
    }));
}
