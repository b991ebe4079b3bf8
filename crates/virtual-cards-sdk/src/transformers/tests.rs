// crates/virtual-cards-sdk/src/transformers/tests.rs
// ============================================================================
// Module: Wire Transformer Tests
// Description: Unit tests for wire-to-entity conversions.
// Purpose: Pin timestamp, enum, and provider payload handling.
// Dependencies: virtual-cards-sdk, serde_json, time
// ============================================================================

//! ## Overview
//! Builds wire records from JSON the way the backend returns them and checks
//! the resulting entities.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::use_debug,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use virtual_cards_codec::CompletionData;
use virtual_cards_codec::DecodeStage;
use virtual_cards_codec::FundingSourceClientConfiguration;
use virtual_cards_codec::FundingSourceType;
use virtual_cards_codec::ProvisioningData;
use virtual_cards_codec::SetupData;
use virtual_cards_codec::encode_client_configuration;

use super::complete_request;
use super::date_range;
use super::funding_source;
use super::list;
use super::provisional_funding_source;
use super::setup_request;
use super::timestamp_from_epoch_ms;
use super::transaction;
use super::virtual_card;
use super::virtual_cards_config;
use crate::entities::BankAccountType;
use crate::entities::CardState;
use crate::entities::ChargeState;
use crate::entities::CompleteFundingSourceInput;
use crate::entities::CreditCardNetwork;
use crate::entities::DateRange;
use crate::entities::FundingSource;
use crate::entities::FundingSourceFlag;
use crate::entities::FundingSourceState;
use crate::entities::ProvisionalFundingSourceState;
use crate::entities::SetupFundingSourceInput;
use crate::entities::TransactionType;
use crate::errors::VirtualCardsError;
use crate::graphql::wire::CardWire;
use crate::graphql::wire::FundingSourceWire;
use crate::graphql::wire::ListWire;
use crate::graphql::wire::ProvisionalFundingSourceWire;
use crate::graphql::wire::TransactionWire;
use crate::graphql::wire::VirtualCardsConfigWire;
use crate::identifiers::FundingSourceId;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const CREATED_MS: f64 = 1_700_000_000_000.0;

fn credit_card_json(state: &str) -> Value {
    json!({
        "__typename": "CreditCardFundingSource",
        "id": "fs-1",
        "owner": "owner-1",
        "version": 2,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS + 1000.0,
        "state": state,
        "flags": [],
        "currency": "USD",
        "last4": "4242",
        "network": "VISA",
        "cardType": "CREDIT"
    })
}

fn transaction_json() -> Value {
    json!({
        "id": "tx-1",
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "cardId": "card-1",
        "sequenceId": "seq-1",
        "type": "COMPLETE",
        "billedAmount": {"currency": "USD", "amount": 1250},
        "transactedAmount": {"currency": "USD", "amount": 1250},
        "description": "Coffee",
        "transactedAtEpochMs": CREATED_MS,
        "settledAtEpochMs": CREATED_MS + 86_400_000.0,
        "detail": [{
            "virtualCardAmount": {"currency": "USD", "amount": 1250},
            "markup": {"percent": 2990, "flat": 31, "minCharge": 50},
            "markupAmount": {"currency": "USD", "amount": 68},
            "fundingSourceAmount": {"currency": "USD", "amount": 1318},
            "fundingSourceId": "fs-1",
            "description": "Coffee",
            "state": "CLEARED"
        }]
    })
}

fn stripe_provisioning() -> ProvisioningData {
    ProvisioningData::StripeCard {
        client_secret: "seti_secret".to_string(),
        intent: "seti_1".to_string(),
    }
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn epoch_milliseconds_become_utc_timestamps() {
    let timestamp = timestamp_from_epoch_ms(CREATED_MS + 500.0).unwrap();
    assert_eq!(timestamp.unix_timestamp(), 1_700_000_000);
    assert_eq!(timestamp.millisecond(), 500);
}

#[test]
fn non_finite_epoch_is_unexpected_response() {
    let err = timestamp_from_epoch_ms(f64::NAN).unwrap_err();
    assert_eq!(err.kind(), "unexpected_response");
}

#[test]
fn date_range_renders_epoch_bounds() {
    let start = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let end = OffsetDateTime::from_unix_timestamp(1_700_086_400).unwrap();
    let input = date_range(DateRange {
        start,
        end,
    });
    assert!((input.start_date_epoch_ms - CREATED_MS).abs() < 1.0);
    assert!((input.end_date_epoch_ms - (CREATED_MS + 86_400_000.0)).abs() < 1.0);
}

// ============================================================================
// SECTION: Funding Sources
// ============================================================================

#[test]
fn credit_card_funding_source_is_parsed() {
    let wire: FundingSourceWire = serde_json::from_value(credit_card_json("ACTIVE")).unwrap();
    let FundingSource::CreditCard(source) = funding_source(wire).unwrap() else {
        panic!("expected credit card funding source");
    };
    assert_eq!(source.id, FundingSourceId::new("fs-1"));
    assert_eq!(source.state, FundingSourceState::Active);
    assert_eq!(source.network, CreditCardNetwork::Visa);
    assert_eq!(source.updated_at.unix_timestamp(), 1_700_000_001);
}

#[test]
fn bank_account_funding_source_is_parsed() {
    let wire: FundingSourceWire = serde_json::from_value(json!({
        "__typename": "BankAccountFundingSource",
        "id": "fs-2",
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "state": "ACTIVE",
        "flags": ["UNFUNDED"],
        "currency": "USD",
        "bankAccountType": "CHECKING",
        "last4": "6789",
        "institutionName": "First Bank",
        "unfundedAmount": {"currency": "USD", "amount": 1500}
    }))
    .unwrap();
    let source = funding_source(wire).unwrap();
    assert_eq!(source.flags(), &[FundingSourceFlag::Unfunded]);
    assert_eq!(source.funding_source_type(), FundingSourceType::BankAccount);
    let FundingSource::BankAccount(account) = source else {
        panic!("expected bank account funding source");
    };
    assert_eq!(account.bank_account_type, BankAccountType::Checking);
    assert_eq!(account.unfunded_amount.map(|amount| amount.amount), Some(1500));
}

#[test]
fn unknown_state_is_unexpected_response() {
    let wire: FundingSourceWire = serde_json::from_value(credit_card_json("DORMANT")).unwrap();
    assert_eq!(
        funding_source(wire).unwrap_err(),
        VirtualCardsError::UnexpectedResponse(
            "unknown funding source state value: DORMANT".to_string()
        )
    );
}

#[test]
fn provisional_funding_source_decodes_provisioning_data() {
    let wire: ProvisionalFundingSourceWire = serde_json::from_value(json!({
        "id": "pfs-1",
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "type": "CREDIT_CARD",
        "provisioningData": stripe_provisioning().encode(),
        "state": "PROVISIONING"
    }))
    .unwrap();
    let provisional = provisional_funding_source(wire).unwrap();
    assert_eq!(provisional.state, ProvisionalFundingSourceState::Provisioning);
    assert_eq!(provisional.provisioning_data, stripe_provisioning());
    assert_eq!(provisional.last4, None);
}

#[test]
fn provisional_funding_source_with_bad_payload_is_decode_error() {
    let wire: ProvisionalFundingSourceWire = serde_json::from_value(json!({
        "id": "pfs-1",
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "type": "CREDIT_CARD",
        "provisioningData": "%%%",
        "state": "PROVISIONING"
    }))
    .unwrap();
    let VirtualCardsError::Decode(err) = provisional_funding_source(wire).unwrap_err() else {
        panic!("expected decode error");
    };
    assert_eq!(err.stage(), DecodeStage::Base64);
}

#[test]
fn list_preserves_next_token() {
    let wire = ListWire {
        items: vec![
            serde_json::from_value::<FundingSourceWire>(credit_card_json("ACTIVE")).unwrap(),
            serde_json::from_value::<FundingSourceWire>(credit_card_json("INACTIVE")).unwrap(),
        ],
        next_token: Some("page-2".to_string()),
    };
    let output = list(wire, funding_source).unwrap();
    assert_eq!(output.items.len(), 2);
    assert_eq!(output.items[1].state(), FundingSourceState::Inactive);
    assert_eq!(output.next_token.as_deref(), Some("page-2"));
}

// ============================================================================
// SECTION: Cards and Transactions
// ============================================================================

#[test]
fn transaction_details_are_parsed() {
    let wire: TransactionWire = serde_json::from_value(transaction_json()).unwrap();
    let parsed = transaction(wire).unwrap();
    assert_eq!(parsed.transaction_type, TransactionType::Complete);
    assert_eq!(parsed.details.len(), 1);
    assert_eq!(parsed.details[0].state, Some(ChargeState::Cleared));
    assert_eq!(parsed.details[0].markup.minimum_charge, Some(50));
    assert!(parsed.settled_at.is_some());
}

#[test]
fn card_embeds_last_transaction() {
    let wire: CardWire = serde_json::from_value(json!({
        "id": "card-1",
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "owners": [{"id": "sudo-1", "issuer": "sudoplatform.sudoservice"}],
        "fundingSourceId": "fs-1",
        "currency": "USD",
        "state": "ISSUED",
        "activatedAtEpochMs": CREATED_MS,
        "last4": "1111",
        "cardHolder": "Jo Citizen",
        "pan": "4111111111111111",
        "csc": "123",
        "expiry": {"mm": "01", "yyyy": "2030"},
        "lastTransaction": transaction_json()
    }))
    .unwrap();
    let card = virtual_card(wire).unwrap();
    assert_eq!(card.state, CardState::Issued);
    assert_eq!(card.owners[0].issuer, "sudoplatform.sudoservice");
    assert_eq!(card.cancelled_at, None);
    assert_eq!(card.last_transaction.map(|tx| tx.sequence_id), Some("seq-1".to_string()));
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

#[test]
fn config_decodes_client_configuration_blob() {
    let entries = vec![FundingSourceClientConfiguration {
        provider: "stripe".to_string(),
        version: 1,
        funding_source_type: FundingSourceType::CreditCard,
        api_key: "pk_test".to_string(),
    }];
    let wire: VirtualCardsConfigWire = serde_json::from_value(json!({
        "virtualCardCurrencies": ["USD"],
        "fundingSourceSupportInfo": [{
            "providerType": "stripe",
            "fundingSourceType": "CREDIT_CARD",
            "network": "VISA",
            "detail": [{"cardType": "DEBIT"}]
        }],
        "fundingSourceClientConfiguration": {"data": encode_client_configuration(&entries)}
    }))
    .unwrap();
    let config = virtual_cards_config(wire).unwrap();
    assert_eq!(config.virtual_card_currencies, vec!["USD".to_string()]);
    assert_eq!(config.funding_source_support_info[0].funding_source_type, FundingSourceType::CreditCard);
    assert_eq!(config.funding_source_client_configuration, entries);
    assert!(!config.bank_account_funding_source_expendable_enabled);
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

#[test]
fn setup_request_encodes_setup_data() {
    let request = setup_request(SetupFundingSourceInput {
        funding_source_type: FundingSourceType::CreditCard,
        currency: "USD".to_string(),
        supported_providers: None,
        setup_data: Some(SetupData {
            application_name: "wallet".to_string(),
        }),
    });
    let rendered = serde_json::to_value(&request).unwrap();
    assert_eq!(rendered["type"], json!("CREDIT_CARD"));
    assert_eq!(
        rendered["setupData"],
        json!(SetupData {
            application_name: "wallet".to_string(),
        }
        .encode())
    );
    assert!(rendered.get("supportedProviders").is_none());
}

#[test]
fn complete_request_encodes_completion_data() {
    let completion = CompletionData::StripeCard {
        payment_method: "pm_1".to_string(),
    };
    let request = complete_request(CompleteFundingSourceInput {
        id: FundingSourceId::new("pfs-1"),
        completion_data: completion.clone(),
        update_card_funding_source: Some(true),
    });
    assert_eq!(request.id, "pfs-1");
    assert_eq!(request.completion_data, completion.encode());
    assert_eq!(request.update_card_funding_source, Some(true));
}
