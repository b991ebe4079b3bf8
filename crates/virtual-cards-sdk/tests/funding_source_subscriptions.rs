// crates/virtual-cards-sdk/tests/funding_source_subscriptions.rs
// ============================================================================
// Module: Funding Source Subscription Tests
// Description: Client-level subscribe, notify, and unsubscribe flows.
// Purpose: Pin owner scoping, fan-out, and teardown through the public API.
// Dependencies: virtual-cards-sdk, serde_json, tokio
// ============================================================================

//! ## Overview
//! Subscribes through [`virtual_cards_sdk::VirtualCardsClient`] and pushes
//! events through the fake watcher.

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

mod common;

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;
use tokio::sync::mpsc;
use virtual_cards_sdk::CallbackSubscriber;
use virtual_cards_sdk::ChannelSubscriber;
use virtual_cards_sdk::FundingSourceNotification;
use virtual_cards_sdk::SubscriptionId;
use virtual_cards_sdk::VirtualCardsError;
use virtual_cards_sdk::WatchEvent;
use virtual_cards_sdk::entities::ConnectionState;
use virtual_cards_sdk::entities::FundingSourceState;
use virtual_cards_sdk::graphql::GraphQlResponse;

use crate::common::Harness;
use crate::common::credit_card_json;
use crate::common::rooted;

fn update(id: &str, state: &str) -> WatchEvent {
    WatchEvent::Data(GraphQlResponse::data(rooted(
        "onFundingSourceUpdate",
        credit_card_json(id, state),
    )))
}

/// Tests subscribing scopes the watcher to the signed-in owner.
#[tokio::test]
async fn subscribe_watches_signed_in_owner() {
    let harness = Harness::signed_in();
    let (tx, mut rx) = mpsc::channel(4);
    harness
        .client
        .subscribe_to_funding_source_changes(
            SubscriptionId::new("sub-1"),
            Arc::new(ChannelSubscriber::new(tx)),
        )
        .await
        .unwrap();

    let requests = harness.watcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation, "OnFundingSourceUpdate");
    assert_eq!(requests[0].variables, json!({ "owner": "owner-1" }));

    harness.watcher.emit(&WatchEvent::ConnectionState(ConnectionState::Connected));
    harness.watcher.emit(&update("fs-1", "INACTIVE"));
    assert_eq!(
        rx.recv().await.unwrap(),
        FundingSourceNotification::ConnectionState(ConnectionState::Connected)
    );
    let FundingSourceNotification::Changed(source) = rx.recv().await.unwrap() else {
        panic!("expected funding source change");
    };
    assert_eq!(source.state(), FundingSourceState::Inactive);
    assert_eq!(harness.client.connection_state().unwrap(), ConnectionState::Connected);
}

/// Tests subscribing while signed out is rejected.
#[tokio::test]
async fn subscribe_requires_sign_in() {
    let harness = Harness::signed_out();
    let err = harness
        .client
        .subscribe_to_funding_source_changes(
            SubscriptionId::new("sub-1"),
            Arc::new(CallbackSubscriber::new(|_| Ok(()))),
        )
        .await
        .unwrap_err();
    assert_eq!(err, VirtualCardsError::NotSignedIn);
    assert!(harness.watcher.requests().is_empty());
}

/// Tests every subscriber sees each update and teardown cancels the stream.
#[tokio::test]
async fn subscribers_share_one_stream_until_last_leaves() {
    let harness = Harness::signed_in();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for name in ["sub-a", "sub-b"] {
        let seen = Arc::clone(&seen);
        let subscriber = CallbackSubscriber::new(move |source| {
            seen.lock().unwrap().push((name, source.id().as_str().to_string()));
            Ok(())
        });
        harness
            .client
            .subscribe_to_funding_source_changes(SubscriptionId::new(name), Arc::new(subscriber))
            .await
            .unwrap();
    }
    assert_eq!(harness.watcher.requests().len(), 1);

    harness.watcher.emit(&update("fs-7", "ACTIVE"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("sub-a", "fs-7".to_string()), ("sub-b", "fs-7".to_string())]
    );

    harness.client.unsubscribe_from_funding_source_changes(&SubscriptionId::new("sub-a")).unwrap();
    assert_eq!(harness.watcher.cancelled(), 0);
    harness.client.unsubscribe_from_funding_source_changes(&SubscriptionId::new("sub-b")).unwrap();
    assert_eq!(harness.watcher.cancelled(), 1);
    assert_eq!(harness.client.connection_state().unwrap(), ConnectionState::Disconnected);
}

/// Tests reset removes every subscriber and cancels the stream.
#[tokio::test]
async fn reset_drops_subscriptions() {
    let harness = Harness::signed_in();
    harness
        .client
        .subscribe_to_funding_source_changes(
            SubscriptionId::new("sub-1"),
            Arc::new(CallbackSubscriber::new(|_| Ok(()))),
        )
        .await
        .unwrap();
    harness.client.reset().await.unwrap();
    assert_eq!(harness.watcher.cancelled(), 1);
    assert_eq!(harness.graphql.cache_clears(), 1);
}
