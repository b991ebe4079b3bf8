// crates/virtual-cards-sdk/src/audit.rs
// ============================================================================
// Module: SDK Audit Logging
// Description: Structured audit events for client operations and subscriptions.
// Purpose: Emit JSON-line audit records without a logging framework dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every client operation records one [`SdkAuditEvent`]. The subscription
//! manager records a [`SubscriptionAuditEvent`] whenever a notification is
//! dropped or a subscriber fails. Events carry labels and error kinds only;
//! card numbers, security codes, and provider secrets are never recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Operation outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Client operation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation name.
    pub operation: &'static str,
    /// Operation outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

/// Subscription notification audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Subscriber identifier, when the failure is subscriber-specific.
    pub subscription_id: Option<String>,
    /// Failure reason label.
    pub reason: &'static str,
    /// Failure detail.
    pub detail: String,
}

/// Inputs required to construct an operation audit event.
pub struct SdkAuditEventParams {
    /// Operation name.
    pub operation: &'static str,
    /// Operation outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

/// Inputs required to construct a subscription audit event.
pub struct SubscriptionAuditEventParams {
    /// Subscriber identifier.
    pub subscription_id: Option<String>,
    /// Failure reason label.
    pub reason: &'static str,
    /// Failure detail.
    pub detail: String,
}

/// Current time in epoch milliseconds.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

impl SdkAuditEvent {
    /// Creates a new operation audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: SdkAuditEventParams) -> Self {
        Self {
            event: "sdk_operation",
            timestamp_ms: now_ms(),
            operation: params.operation,
            outcome: params.outcome,
            error_kind: params.error_kind,
        }
    }
}

impl SubscriptionAuditEvent {
    /// Creates a new subscription audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: SubscriptionAuditEventParams) -> Self {
        Self {
            event: "subscription_notification",
            timestamp_ms: now_ms(),
            subscription_id: params.subscription_id,
            reason: params.reason,
            detail: params.detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for SDK events.
pub trait SdkAuditSink: Send + Sync {
    /// Record an operation audit event.
    fn record(&self, event: &SdkAuditEvent);

    /// Record a subscription audit event.
    fn record_subscription(&self, _event: &SubscriptionAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl SdkAuditSink for StderrAuditSink {
    fn record(&self, event: &SdkAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_subscription(&self, event: &SubscriptionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized line.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl SdkAuditSink for FileAuditSink {
    fn record(&self, event: &SdkAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_subscription(&self, event: &SubscriptionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl SdkAuditSink for NoopAuditSink {
    fn record(&self, _event: &SdkAuditEvent) {}
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded operation events.
    events: Mutex<Vec<SdkAuditEvent>>,
    /// Recorded subscription events.
    subscription_events: Mutex<Vec<SubscriptionAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded operation events.
    #[must_use]
    pub fn events(&self) -> Vec<SdkAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded subscription events.
    #[must_use]
    pub fn subscription_events(&self) -> Vec<SubscriptionAuditEvent> {
        self.subscription_events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl SdkAuditSink for MemoryAuditSink {
    fn record(&self, event: &SdkAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn record_subscription(&self, event: &SubscriptionAuditEvent) {
        if let Ok(mut events) = self.subscription_events.lock() {
            events.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
