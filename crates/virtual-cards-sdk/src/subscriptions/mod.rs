// crates/virtual-cards-sdk/src/subscriptions/mod.rs
// ============================================================================
// Module: Funding Source Subscriptions
// Description: Subscriber contract and the keyed subscription manager.
// Purpose: Notify client code when a funding source changes on the backend.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! Subscribers implement [`FundingSourceSubscriber`] and register with the
//! [`SubscriptionManager`] under a [`crate::identifiers::SubscriptionId`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod manager;
pub mod subscriber;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use manager::SubscriptionManager;
pub use subscriber::CallbackSubscriber;
pub use subscriber::ChannelSubscriber;
pub use subscriber::FundingSourceNotification;
pub use subscriber::FundingSourceSubscriber;
pub use subscriber::SubscriberError;

// ============================================================================
// SECTION: Tests
// ============================================================================
