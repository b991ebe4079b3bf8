// crates/virtual-cards-sdk/src/errors/tests.rs
// ============================================================================
// Module: Virtual Cards Error Mapping Tests
// Description: Unit tests for backend error type mapping.
// Purpose: Ensure each backend error type lands on its typed variant.
// Dependencies: virtual-cards-sdk, serde_json
// ============================================================================

//! ## Overview
//! Covers the error type table, interaction data decoding, and the fallback
//! for unknown or untyped errors.

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

use serde_json::json;
use virtual_cards_codec::DecodeStage;
use virtual_cards_codec::InteractionData;

use super::VirtualCardsError;
use super::map_graphql_error;
use crate::graphql::GraphQlError;

// ============================================================================
// SECTION: Table Tests
// ============================================================================

#[test]
fn maps_virtual_cards_error_types() {
    let cases = [
        ("sudoplatform.virtual-cards.FundingSourceNotFoundError", "funding_source_not_found"),
        ("sudoplatform.virtual-cards.FundingSourceStateError", "funding_source_state"),
        (
            "sudoplatform.virtual-cards.FundingSourceCompletionDataInvalidError",
            "funding_source_completion_data_invalid",
        ),
        ("sudoplatform.virtual-cards.FundingSourceNotSetupErrorCode", "funding_source_not_setup"),
        (
            "sudoplatform.virtual-cards.ProvisionalFundingSourceNotFoundError",
            "provisional_funding_source_not_found",
        ),
        ("sudoplatform.virtual-cards.UnacceptableFundingSourceError", "unacceptable_funding_source"),
        ("sudoplatform.virtual-cards.DuplicateFundingSourceError", "duplicate_funding_source"),
        ("sudoplatform.virtual-cards.UnsupportedCurrencyError", "unsupported_currency"),
        ("sudoplatform.virtual-cards.VelocityExceededError", "velocity_exceeded"),
        ("sudoplatform.virtual-cards.EntitlementExceededError", "entitlement_exceeded"),
        ("sudoplatform.virtual-cards.CardNotFoundError", "card_not_found"),
        ("sudoplatform.virtual-cards.CardStateError", "card_state"),
        (
            "sudoplatform.virtual-cards.IdentityVerificationNotVerifiedError",
            "identity_verification_not_verified",
        ),
        ("sudoplatform.virtual-cards.AccountLockedError", "account_locked"),
        ("sudoplatform.InsufficientEntitlementsError", "insufficient_entitlements"),
        ("sudoplatform.InvalidArgumentError", "invalid_argument"),
        ("sudoplatform.LimitExceededError", "limit_exceeded"),
        ("sudoplatform.NotAuthorizedError", "not_authorized"),
        ("sudoplatform.ServiceError", "service_error"),
    ];
    for (error_type, kind) in cases {
        let mapped = map_graphql_error(&GraphQlError::new(error_type, "boom"));
        assert_eq!(mapped.kind(), kind, "{error_type}");
        assert!(mapped.to_string().ends_with("boom"), "{error_type}");
    }
}

#[test]
fn unknown_types_keep_type_and_message() {
    let mapped = map_graphql_error(&GraphQlError::new("sudoplatform.virtual-cards.NewError", "x"));
    assert_eq!(
        mapped,
        VirtualCardsError::Unknown {
            error_type: Some("sudoplatform.virtual-cards.NewError".to_string()),
            message: "x".to_string(),
        }
    );
    assert_eq!(mapped.to_string(), "unknown error (sudoplatform.virtual-cards.NewError): x");
}

#[test]
fn untyped_errors_are_unknown() {
    let error = GraphQlError {
        message: "plain".to_string(),
        error_type: None,
        error_info: None,
    };
    assert_eq!(map_graphql_error(&error).to_string(), "unknown error (untyped): plain");
}

// ============================================================================
// SECTION: Interaction Tests
// ============================================================================

#[test]
fn interaction_error_decodes_error_info() {
    let interaction = InteractionData::CheckoutCard {
        redirect_url: "https://3ds.example.com".to_string(),
    };
    let error = GraphQlError::new(
        "sudoplatform.virtual-cards.FundingSourceRequiresUserInteractionError",
        "interaction required",
    )
    .with_info(interaction.to_error_info());
    assert_eq!(
        map_graphql_error(&error),
        VirtualCardsError::FundingSourceRequiresUserInteraction {
            interaction_data: interaction,
        }
    );
}

#[test]
fn interaction_error_without_info_is_decode_error() {
    let error = GraphQlError::new(
        "sudoplatform.virtual-cards.FundingSourceRequiresUserInteractionError",
        "interaction required",
    );
    let VirtualCardsError::Decode(err) = map_graphql_error(&error) else {
        panic!("expected decode error");
    };
    assert_eq!(err.stage(), DecodeStage::Precheck);
}

#[test]
fn interaction_error_with_bad_payload_is_decode_error() {
    let error = GraphQlError::new(
        "sudoplatform.virtual-cards.FundingSourceRequiresUserInteractionError",
        "interaction required",
    )
    .with_info(json!({"provisioningData": "%%%"}));
    let VirtualCardsError::Decode(err) = map_graphql_error(&error) else {
        panic!("expected decode error");
    };
    assert_eq!(err.stage(), DecodeStage::Base64);
}
