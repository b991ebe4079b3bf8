// crates/virtual-cards-sdk/src/lib.rs
// ============================================================================
// Module: Virtual Cards SDK Library
// Description: Client for funding sources, virtual cards, and transactions.
// Purpose: Expose typed operations over an injected GraphQL transport.
// Dependencies: async-trait, serde, serde_json, thiserror, time, tokio, toml,
//               url, virtual-cards-codec
// ============================================================================

//! ## Overview
//! [`VirtualCardsClient`] wraps a caller-supplied [`GraphQlClient`],
//! [`UserSession`], and optional [`Watcher`]. Operations are split across
//! the [`services`] traits, which the client's builder can replace, and every
//! call is gated on sign-in and recorded on an [`audit::SdkAuditSink`].
//! Provider payloads are decoded by [`virtual_cards_codec`].
//!
//! Security posture: backend responses are untrusted; every enum, timestamp,
//! and provider blob is validated during transformation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod audit;
pub mod client;
pub mod config;
pub mod entities;
pub mod errors;
pub mod graphql;
pub mod identifiers;
pub mod interfaces;
pub mod services;
pub mod subscriptions;
pub mod transformers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::MemoryAuditSink;
pub use audit::SdkAuditSink;
pub use client::VirtualCardsClient;
pub use client::VirtualCardsClientBuilder;
pub use config::ConfigError;
pub use config::SdkConfig;
pub use errors::VirtualCardsError;
pub use identifiers::FundingSourceId;
pub use identifiers::OwnerId;
pub use identifiers::SubscriptionId;
pub use identifiers::TransactionId;
pub use identifiers::VirtualCardId;
pub use interfaces::GraphQlClient;
pub use interfaces::SessionError;
pub use interfaces::TransportError;
pub use interfaces::UserSession;
pub use interfaces::WatchError;
pub use interfaces::WatchEvent;
pub use interfaces::WatchHandle;
pub use interfaces::WatchSink;
pub use interfaces::Watcher;
pub use subscriptions::CallbackSubscriber;
pub use subscriptions::ChannelSubscriber;
pub use subscriptions::FundingSourceNotification;
pub use subscriptions::FundingSourceSubscriber;
pub use subscriptions::SubscriberError;
pub use virtual_cards_codec as codec;
