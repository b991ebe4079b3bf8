// crates/virtual-cards-sdk/src/entities/common.rs
// ============================================================================
// Module: Common Entities
// Description: Shared value types used across funding sources and cards.
// Purpose: Amounts, owners, pagination, cache policy, and connection state.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Small value types shared by the other entity modules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::OwnerId;

// ============================================================================
// SECTION: Values
// ============================================================================

/// Monetary amount in minor units of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Amount in minor units (cents for USD).
    pub amount: i64,
}

impl CurrencyAmount {
    /// Creates a currency amount.
    #[must_use]
    pub fn new(currency: impl Into<String>, amount: i64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }
}

/// Secondary owner of a resource, scoped by issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    /// Owner identifier.
    pub id: OwnerId,
    /// Issuer of the owner identity.
    pub issuer: String,
}

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Where a query may be answered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Answer only from the GraphQL client's local cache.
    CacheOnly,
    /// Always ask the backend.
    #[default]
    RemoteOnly,
}

impl CachePolicy {
    /// Returns the GraphQL client fetch policy string.
    #[must_use]
    pub const fn fetch_policy(self) -> &'static str {
        match self {
            Self::CacheOnly => "cache-only",
            Self::RemoteOnly => "network-only",
        }
    }
}

/// Pagination and cache settings for `list_*` operations.
///
/// A `None` limit is replaced by the configured default before the request
/// is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListInput {
    /// Cache policy for the query.
    pub cache_policy: CachePolicy,
    /// Maximum number of items per page.
    pub limit: Option<u32>,
    /// Token returned by the previous page.
    pub next_token: Option<String>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutput<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Token for the next page, absent on the last page.
    pub next_token: Option<String>,
}

impl<T> ListOutput<T> {
    /// Returns an empty last page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_token: None,
        }
    }
}

// ============================================================================
// SECTION: Subscriptions
// ============================================================================

/// State of the subscription transport as reported by the watcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Receiving notifications.
    Connected,
    /// Not receiving notifications.
    #[default]
    Disconnected,
}
