// crates/virtual-cards-sdk/src/graphql/mod.rs
// ============================================================================
// Module: GraphQL Wire Layer
// Description: Request, response, and error envelopes exchanged with the backend.
// Purpose: Describe GraphQL operations independently of the transport.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The SDK never speaks HTTP itself. It builds [`GraphQlRequest`] values from
//! static [`Operation`] descriptors and hands them to a
//! [`crate::interfaces::GraphQlClient`], which returns a [`GraphQlResponse`].
//! Invariants:
//! - Every operation has exactly one document and one root field.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod documents;
pub mod wire;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::entities::CachePolicy;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// GraphQL operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Read-only query.
    Query,
    /// Mutation.
    Mutation,
    /// Long-lived subscription.
    Subscription,
}

/// Static descriptor of a backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name as declared in the document.
    pub name: &'static str,
    /// Root field holding the result in `data`.
    pub field: &'static str,
    /// Operation kind.
    pub kind: OperationKind,
    /// Full GraphQL document including fragments.
    pub document: &'static str,
}

impl Operation {
    /// Builds a request for this operation.
    #[must_use]
    pub fn request(&self, variables: Value) -> GraphQlRequest {
        GraphQlRequest {
            operation: self.name,
            document: self.document,
            variables,
            fetch_policy: None,
        }
    }
}

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// Request handed to the GraphQL client.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    /// Operation name.
    pub operation: &'static str,
    /// GraphQL document.
    pub document: &'static str,
    /// Operation variables.
    pub variables: Value,
    /// Cache policy for queries; `None` for mutations and subscriptions.
    pub fetch_policy: Option<CachePolicy>,
}

impl GraphQlRequest {
    /// Sets the cache policy.
    #[must_use]
    pub fn with_fetch_policy(mut self, policy: CachePolicy) -> Self {
        self.fetch_policy = Some(policy);
        self
    }
}

/// Response returned by the GraphQL client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    /// Result data keyed by root field.
    #[serde(default)]
    pub data: Option<Value>,
    /// Errors reported by the backend.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Builds a successful response.
    #[must_use]
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Builds a response carrying a single error.
    #[must_use]
    pub fn error(error: GraphQlError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }
}

/// Backend-reported GraphQL error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
    /// Backend error classification (for example
    /// `sudoplatform.virtual-cards.CardNotFoundError`).
    #[serde(default)]
    pub error_type: Option<String>,
    /// Structured error details.
    #[serde(default)]
    pub error_info: Option<Value>,
}

impl GraphQlError {
    /// Creates an error with a type and no details.
    #[must_use]
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: Some(error_type.into()),
            error_info: None,
        }
    }

    /// Attaches structured error details.
    #[must_use]
    pub fn with_info(mut self, info: Value) -> Self {
        self.error_info = Some(info);
        self
    }
}
