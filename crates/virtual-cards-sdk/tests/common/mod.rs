// crates/virtual-cards-sdk/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared fakes and fixtures for virtual-cards-sdk tests.
// Purpose: Drive the client against scripted transport and session doubles.
// Dependencies: virtual-cards-sdk, async-trait, serde_json
// ============================================================================

//! ## Overview
//! [`FakeGraphQlClient`] answers each operation from a per-name queue and
//! records every request. [`FakeSession`] and [`FakeWatcher`] stand in for
//! authentication and the subscription transport.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;
use virtual_cards_sdk::GraphQlClient;
use virtual_cards_sdk::MemoryAuditSink;
use virtual_cards_sdk::SessionError;
use virtual_cards_sdk::TransportError;
use virtual_cards_sdk::UserSession;
use virtual_cards_sdk::VirtualCardsClient;
use virtual_cards_sdk::VirtualCardsClientBuilder;
use virtual_cards_sdk::WatchError;
use virtual_cards_sdk::WatchEvent;
use virtual_cards_sdk::WatchHandle;
use virtual_cards_sdk::WatchSink;
use virtual_cards_sdk::Watcher;
use virtual_cards_sdk::graphql::GraphQlRequest;
use virtual_cards_sdk::graphql::GraphQlResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Creation time used by fixtures (2023-11-14T22:13:20Z).
pub const CREATED_MS: f64 = 1_700_000_000_000.0;

// ============================================================================
// SECTION: GraphQL Client
// ============================================================================

/// Scripted GraphQL transport.
#[derive(Default)]
pub struct FakeGraphQlClient {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<GraphQlResponse, TransportError>>>>,
    requests: Mutex<Vec<GraphQlRequest>>,
    cache_clears: AtomicUsize,
}

impl FakeGraphQlClient {
    /// Queues `data` as the next result of `operation`.
    pub fn respond(&self, operation: &'static str, data: Value) {
        self.push(operation, Ok(GraphQlResponse::data(data)));
    }

    /// Queues an arbitrary response for `operation`.
    pub fn push(&self, operation: &'static str, response: Result<GraphQlResponse, TransportError>) {
        self.responses.lock().unwrap().entry(operation).or_default().push_back(response);
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the only request received so far.
    pub fn single_request(&self) -> GraphQlRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }

    /// Returns how many times the cache was cleared.
    pub fn cache_clears(&self) -> usize {
        self.cache_clears.load(Ordering::SeqCst)
    }

    fn answer(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let operation = request.operation;
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Rejected(format!("no response for {operation}"))))
    }
}

#[async_trait]
impl GraphQlClient for FakeGraphQlClient {
    async fn query(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        self.answer(request)
    }

    async fn mutate(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        self.answer(request)
    }

    async fn clear_cache(&self) -> Result<(), TransportError> {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Toggleable user session.
pub struct FakeSession {
    signed_in: AtomicBool,
    subject: Mutex<Option<String>>,
}

impl FakeSession {
    /// Session for a signed-in user.
    pub fn signed_in(subject: &str) -> Self {
        Self {
            signed_in: AtomicBool::new(true),
            subject: Mutex::new(Some(subject.to_string())),
        }
    }

    /// Session with nobody signed in.
    pub fn signed_out() -> Self {
        Self {
            signed_in: AtomicBool::new(false),
            subject: Mutex::new(None),
        }
    }

    /// Signs the user out.
    pub fn sign_out(&self) {
        self.signed_in.store(false, Ordering::SeqCst);
        *self.subject.lock().unwrap() = None;
    }
}

#[async_trait]
impl UserSession for FakeSession {
    async fn is_signed_in(&self) -> Result<bool, SessionError> {
        Ok(self.signed_in.load(Ordering::SeqCst))
    }

    async fn subject(&self) -> Result<Option<String>, SessionError> {
        Ok(self.subject.lock().unwrap().clone())
    }
}

// ============================================================================
// SECTION: Watcher
// ============================================================================

/// Watcher that records requests and lets tests push events.
#[derive(Default)]
pub struct FakeWatcher {
    requests: Mutex<Vec<GraphQlRequest>>,
    sinks: Mutex<Vec<WatchSink>>,
    cancelled: Arc<AtomicUsize>,
}

impl FakeWatcher {
    /// Pushes an event into every started sink.
    pub fn emit(&self, event: &WatchEvent) {
        let sinks = self.sinks.lock().unwrap().clone();
        for sink in sinks {
            sink(event.clone());
        }
    }

    /// Returns every subscription request received.
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many handles were cancelled.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct FakeHandle {
    cancelled: Arc<AtomicUsize>,
}

impl WatchHandle for FakeHandle {
    fn cancel(&mut self) {
        self.cancelled.fetch_add(1, Ordering::SeqCst);
    }
}

impl Watcher for FakeWatcher {
    fn watch(
        &self,
        request: GraphQlRequest,
        sink: WatchSink,
    ) -> Result<Box<dyn WatchHandle>, WatchError> {
        self.requests.lock().unwrap().push(request);
        self.sinks.lock().unwrap().push(sink);
        Ok(Box::new(FakeHandle {
            cancelled: Arc::clone(&self.cancelled),
        }))
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Client wired to fakes.
pub struct Harness {
    pub client: VirtualCardsClient,
    pub graphql: Arc<FakeGraphQlClient>,
    pub session: Arc<FakeSession>,
    pub watcher: Arc<FakeWatcher>,
    pub audit: Arc<MemoryAuditSink>,
}

impl Harness {
    /// Builds a client for a signed-in `owner-1`.
    pub fn signed_in() -> Self {
        Self::with_session(FakeSession::signed_in("owner-1"))
    }

    /// Builds a client with nobody signed in.
    pub fn signed_out() -> Self {
        Self::with_session(FakeSession::signed_out())
    }

    fn with_session(session: FakeSession) -> Self {
        let graphql = Arc::new(FakeGraphQlClient::default());
        let session = Arc::new(session);
        let watcher = Arc::new(FakeWatcher::default());
        let audit = Arc::new(MemoryAuditSink::new());
        let client = VirtualCardsClientBuilder::new(
            Arc::clone(&graphql) as Arc<dyn GraphQlClient>,
            Arc::clone(&session) as Arc<dyn UserSession>,
        )
        .watcher(Arc::clone(&watcher) as Arc<dyn Watcher>)
        .audit_sink(Arc::clone(&audit) as Arc<dyn virtual_cards_sdk::SdkAuditSink>)
        .build()
        .expect("default config builds");
        Self {
            client,
            graphql,
            session,
            watcher,
            audit,
        }
    }

    /// Returns `(operation, error_kind)` for every recorded audit event.
    pub fn audited(&self) -> Vec<(&'static str, Option<&'static str>)> {
        self.audit.events().into_iter().map(|event| (event.operation, event.error_kind)).collect()
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Credit card funding source record.
pub fn credit_card_json(id: &str, state: &str) -> Value {
    json!({
        "__typename": "CreditCardFundingSource",
        "id": id,
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "state": state,
        "flags": [],
        "currency": "USD",
        "last4": "4242",
        "network": "VISA",
        "cardType": "CREDIT"
    })
}

/// Transaction record.
pub fn transaction_json(id: &str) -> Value {
    json!({
        "id": id,
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "cardId": "card-1",
        "sequenceId": "seq-1",
        "type": "PENDING",
        "billedAmount": {"currency": "USD", "amount": 500},
        "transactedAmount": {"currency": "USD", "amount": 500},
        "description": "Bakery",
        "transactedAtEpochMs": CREATED_MS,
        "detail": []
    })
}

/// Card record.
pub fn card_json(id: &str, state: &str) -> Value {
    json!({
        "id": id,
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "owners": [{"id": "sudo-1", "issuer": "sudoplatform.sudoservice"}],
        "fundingSourceId": "fs-1",
        "currency": "USD",
        "state": state,
        "activatedAtEpochMs": CREATED_MS,
        "last4": "1111",
        "cardHolder": "Jo Citizen",
        "pan": "4111111111111111",
        "csc": "123",
        "expiry": {"mm": "01", "yyyy": "2030"}
    })
}

/// Wraps `value` under the root `field`.
pub fn rooted(field: &str, value: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), value);
    Value::Object(data)
}

/// List page record.
pub fn page(items: Vec<Value>, next_token: Option<&str>) -> Value {
    json!({ "items": items, "nextToken": next_token })
}
