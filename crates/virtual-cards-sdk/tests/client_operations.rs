// crates/virtual-cards-sdk/tests/client_operations.rs
// ============================================================================
// Module: Client Operation Tests
// Description: End-to-end client calls against a scripted GraphQL transport.
// Purpose: Pin sign-in gating, request shapes, error mapping, and auditing.
// Dependencies: virtual-cards-sdk, serde_json, tokio
// ============================================================================

//! ## Overview
//! Each test queues backend responses by operation name, calls the public
//! client, and checks both the returned entity and the request that was sent.

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

use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use virtual_cards_sdk::FundingSourceId;
use virtual_cards_sdk::TransactionId;
use virtual_cards_sdk::TransportError;
use virtual_cards_sdk::VirtualCardId;
use virtual_cards_sdk::VirtualCardsError;
use virtual_cards_sdk::codec::CompletionData;
use virtual_cards_sdk::codec::DecodeStage;
use virtual_cards_sdk::codec::FundingSourceClientConfiguration;
use virtual_cards_sdk::codec::FundingSourceType;
use virtual_cards_sdk::codec::InteractionData;
use virtual_cards_sdk::codec::ProvisioningData;
use virtual_cards_sdk::codec::RefreshData;
use virtual_cards_sdk::codec::encode_client_configuration;
use virtual_cards_sdk::entities::CachePolicy;
use virtual_cards_sdk::entities::CardState;
use virtual_cards_sdk::entities::CompleteFundingSourceInput;
use virtual_cards_sdk::entities::DateRange;
use virtual_cards_sdk::entities::FundingSourceState;
use virtual_cards_sdk::entities::ListInput;
use virtual_cards_sdk::entities::ListTransactionsInput;
use virtual_cards_sdk::entities::ProvisionVirtualCardInput;
use virtual_cards_sdk::entities::ProvisionalFundingSourceState;
use virtual_cards_sdk::entities::ProvisioningState;
use virtual_cards_sdk::entities::RefreshFundingSourceInput;
use virtual_cards_sdk::entities::SetupFundingSourceInput;
use virtual_cards_sdk::entities::SortOrder;
use virtual_cards_sdk::entities::UpdateVirtualCardInput;
use virtual_cards_sdk::graphql::GraphQlError;
use virtual_cards_sdk::graphql::GraphQlResponse;

use crate::common::CREATED_MS;
use crate::common::Harness;
use crate::common::card_json;
use crate::common::credit_card_json;
use crate::common::page;
use crate::common::rooted;
use crate::common::transaction_json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn provisional_funding_source_json(id: &str, state: &str, data: &ProvisioningData) -> Value {
    json!({
        "id": id,
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "type": data.funding_source_type().as_str(),
        "provisioningData": data.encode(),
        "state": state
    })
}

fn provisional_card_json(id: &str, state: &str, card: Option<Value>) -> Value {
    let mut record = json!({
        "id": id,
        "owner": "owner-1",
        "version": 1,
        "createdAtEpochMs": CREATED_MS,
        "updatedAtEpochMs": CREATED_MS,
        "clientRefs": "ref-1",
        "provisioningState": state
    });
    if let Some(card) = card {
        record["card"] = card;
    }
    record
}

// ============================================================================
// SECTION: Sign-In Gate
// ============================================================================

/// Tests signed-out calls fail before reaching the backend.
#[tokio::test]
async fn signed_out_calls_fail_without_requests() {
    let harness = Harness::signed_out();
    let err = harness
        .client
        .get_funding_source(&FundingSourceId::new("fs-1"), CachePolicy::RemoteOnly)
        .await
        .unwrap_err();
    assert_eq!(err, VirtualCardsError::NotSignedIn);
    assert!(harness.graphql.requests().is_empty());
    assert_eq!(harness.audited(), vec![("get_funding_source", Some("not_signed_in"))]);
}

/// Tests signing out mid-session gates later calls.
#[tokio::test]
async fn sign_out_gates_subsequent_calls() {
    let harness = Harness::signed_in();
    harness.graphql.respond("ListCards", rooted("listCards", page(vec![], None)));
    let cards = harness.client.list_cards(ListInput::default()).await.unwrap();
    assert!(cards.items.is_empty());

    harness.session.sign_out();
    let err = harness.client.list_cards(ListInput::default()).await.unwrap_err();
    assert_eq!(err, VirtualCardsError::NotSignedIn);
    assert_eq!(harness.graphql.requests().len(), 1);
}

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Tests a null root field is an absent entity, not an error.
#[tokio::test]
async fn get_returns_none_for_null_record() {
    let harness = Harness::signed_in();
    harness.graphql.respond("GetFundingSource", json!({ "getFundingSource": null }));
    let found = harness
        .client
        .get_funding_source(&FundingSourceId::new("fs-1"), CachePolicy::CacheOnly)
        .await
        .unwrap();
    assert_eq!(found, None);

    let request = harness.graphql.single_request();
    assert_eq!(request.variables, json!({ "id": "fs-1" }));
    assert_eq!(request.fetch_policy, Some(CachePolicy::CacheOnly));
    assert_eq!(harness.audited(), vec![("get_funding_source", None)]);
}

/// Tests funding source records are transformed.
#[tokio::test]
async fn get_funding_source_transforms_record() {
    let harness = Harness::signed_in();
    harness
        .graphql
        .respond("GetFundingSource", rooted("getFundingSource", credit_card_json("fs-1", "ACTIVE")));
    let source = harness
        .client
        .get_funding_source(&FundingSourceId::new("fs-1"), CachePolicy::RemoteOnly)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.id().as_str(), "fs-1");
    assert_eq!(source.state(), FundingSourceState::Active);
    assert_eq!(source.funding_source_type(), FundingSourceType::CreditCard);
}

/// Tests list calls without a limit send the configured default.
#[tokio::test]
async fn list_applies_default_limit() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ListFundingSources",
        rooted(
            "listFundingSources",
            page(
                vec![credit_card_json("fs-1", "ACTIVE"), credit_card_json("fs-2", "INACTIVE")],
                Some("page-2"),
            ),
        ),
    );
    let output = harness.client.list_funding_sources(ListInput::default()).await.unwrap();
    let ids: Vec<&str> = output.items.iter().map(|source| source.id().as_str()).collect();
    assert_eq!(ids, vec!["fs-1", "fs-2"]);
    assert_eq!(output.next_token.as_deref(), Some("page-2"));

    let request = harness.graphql.single_request();
    assert_eq!(request.variables["limit"], json!(10));
    assert_eq!(request.variables["nextToken"], json!(null));
}

/// Tests an explicit limit and token are forwarded unchanged.
#[tokio::test]
async fn list_forwards_explicit_paging() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ListCards",
        rooted("listCards", page(vec![card_json("card-1", "ISSUED")], None)),
    );
    let output = harness
        .client
        .list_cards(ListInput {
            cache_policy: CachePolicy::RemoteOnly,
            limit: Some(3),
            next_token: Some("page-4".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(output.items[0].state, CardState::Issued);
    assert_eq!(output.next_token, None);

    let request = harness.graphql.single_request();
    assert_eq!(request.variables, json!({ "limit": 3, "nextToken": "page-4" }));
}

/// Tests card transactions send the card id, sort order, and default limit.
#[tokio::test]
async fn list_transactions_by_card_id_sends_filters() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ListTransactionsByCardId",
        rooted("listTransactionsByCardId", page(vec![transaction_json("tx-1")], None)),
    );
    let output = harness
        .client
        .list_transactions_by_card_id(
            &VirtualCardId::new("card-1"),
            ListTransactionsInput {
                sort_order: SortOrder::Asc,
                ..ListTransactionsInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(output.items[0].id, TransactionId::new("tx-1"));

    let request = harness.graphql.single_request();
    assert_eq!(request.variables["cardId"], json!("card-1"));
    assert_eq!(request.variables["sortOrder"], json!("ASC"));
    assert_eq!(request.variables["limit"], json!(10));
}

/// Tests a provisional funding source decodes its provisioning data.
#[tokio::test]
async fn get_provisional_funding_source_decodes_provisioning_data() {
    let harness = Harness::signed_in();
    let provisioning = ProvisioningData::CheckoutBankAccount;
    harness.graphql.respond(
        "GetProvisionalFundingSource",
        rooted(
            "getProvisionalFundingSource",
            provisional_funding_source_json("pfs-1", "PENDING", &provisioning),
        ),
    );
    let provisional = harness
        .client
        .get_provisional_funding_source(&FundingSourceId::new("pfs-1"), CachePolicy::RemoteOnly)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(provisional.id, FundingSourceId::new("pfs-1"));
    assert_eq!(provisional.state, ProvisionalFundingSourceState::Pending);
    assert_eq!(provisional.funding_source_type, FundingSourceType::BankAccount);
    assert_eq!(provisional.provisioning_data, provisioning);

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "GetProvisionalFundingSource");
    assert_eq!(request.variables, json!({ "id": "pfs-1" }));
    assert_eq!(request.fetch_policy, Some(CachePolicy::RemoteOnly));
    assert_eq!(harness.audited(), vec![("get_provisional_funding_source", None)]);
}

/// Tests undecodable provisioning data fails the whole record.
#[tokio::test]
async fn get_provisional_funding_source_rejects_bad_provisioning_data() {
    let harness = Harness::signed_in();
    let mut record =
        provisional_funding_source_json("pfs-1", "PROVISIONING", &ProvisioningData::CheckoutCard);
    record["provisioningData"] = json!("not*base64");
    harness
        .graphql
        .respond("GetProvisionalFundingSource", rooted("getProvisionalFundingSource", record));
    let err = harness
        .client
        .get_provisional_funding_source(&FundingSourceId::new("pfs-1"), CachePolicy::RemoteOnly)
        .await
        .unwrap_err();
    let VirtualCardsError::Decode(decode) = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert_eq!(decode.stage(), DecodeStage::Base64);
    assert_eq!(harness.audited(), vec![("get_provisional_funding_source", Some("decode"))]);
}

/// Tests provisional funding source listings decode each item.
#[tokio::test]
async fn list_provisional_funding_sources_decodes_items() {
    let harness = Harness::signed_in();
    let stripe = ProvisioningData::StripeCard {
        client_secret: "seti_secret".to_string(),
        intent: "seti_1".to_string(),
    };
    harness.graphql.respond(
        "ListProvisionalFundingSources",
        rooted(
            "listProvisionalFundingSources",
            page(
                vec![
                    provisional_funding_source_json("pfs-1", "PROVISIONING", &stripe),
                    provisional_funding_source_json(
                        "pfs-2",
                        "FAILED",
                        &ProvisioningData::CheckoutCard,
                    ),
                ],
                Some("page-2"),
            ),
        ),
    );
    let output =
        harness.client.list_provisional_funding_sources(ListInput::default()).await.unwrap();
    assert_eq!(output.items.len(), 2);
    assert_eq!(output.items[0].provisioning_data, stripe);
    assert_eq!(output.items[1].provisioning_data, ProvisioningData::CheckoutCard);
    assert_eq!(output.items[1].state, ProvisionalFundingSourceState::Failed);
    assert_eq!(output.next_token.as_deref(), Some("page-2"));

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "ListProvisionalFundingSources");
    assert_eq!(request.variables, json!({ "limit": 10, "nextToken": null }));
}

/// Tests a provisional card carries its card once provisioning completes.
#[tokio::test]
async fn get_provisional_card_transforms_record() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "GetProvisionalCard",
        rooted(
            "getProvisionalCard",
            provisional_card_json("pc-1", "COMPLETED", Some(card_json("card-1", "ISSUED"))),
        ),
    );
    let provisional = harness
        .client
        .get_provisional_card(&VirtualCardId::new("pc-1"), CachePolicy::CacheOnly)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(provisional.id, VirtualCardId::new("pc-1"));
    assert_eq!(provisional.client_refs, "ref-1");
    assert_eq!(provisional.provisioning_state, ProvisioningState::Completed);
    assert_eq!(provisional.card.map(|card| card.state), Some(CardState::Issued));

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "GetProvisionalCard");
    assert_eq!(request.variables, json!({ "id": "pc-1" }));
    assert_eq!(request.fetch_policy, Some(CachePolicy::CacheOnly));
}

/// Tests a missing provisional card is absent, not an error.
#[tokio::test]
async fn get_provisional_card_returns_none_for_null_record() {
    let harness = Harness::signed_in();
    harness.graphql.respond("GetProvisionalCard", json!({ "getProvisionalCard": null }));
    let found = harness
        .client
        .get_provisional_card(&VirtualCardId::new("pc-9"), CachePolicy::RemoteOnly)
        .await
        .unwrap();
    assert_eq!(found, None);
}

/// Tests provisional card listings keep in-flight cards without a card.
#[tokio::test]
async fn list_provisional_cards_decodes_items() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ListProvisionalCards",
        rooted(
            "listProvisionalCards",
            page(
                vec![
                    provisional_card_json("pc-1", "PROVISIONING", None),
                    provisional_card_json("pc-2", "COMPLETED", Some(card_json("card-2", "ISSUED"))),
                ],
                None,
            ),
        ),
    );
    let output = harness
        .client
        .list_provisional_cards(ListInput {
            limit: Some(2),
            ..ListInput::default()
        })
        .await
        .unwrap();
    assert_eq!(output.items[0].provisioning_state, ProvisioningState::Provisioning);
    assert_eq!(output.items[0].card, None);
    assert_eq!(
        output.items[1].card.as_ref().map(|card| card.id.clone()),
        Some(VirtualCardId::new("card-2"))
    );
    assert_eq!(output.next_token, None);

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "ListProvisionalCards");
    assert_eq!(request.variables, json!({ "limit": 2, "nextToken": null }));
}

/// Tests client configuration is decoded from its opaque blob.
#[tokio::test]
async fn client_configuration_is_decoded() {
    let harness = Harness::signed_in();
    let entries = vec![FundingSourceClientConfiguration {
        provider: "stripe".to_string(),
        version: 1,
        funding_source_type: FundingSourceType::CreditCard,
        api_key: "pk_test".to_string(),
    }];
    harness.graphql.respond(
        "GetFundingSourceClientConfiguration",
        rooted(
            "getFundingSourceClientConfiguration",
            json!({ "data": encode_client_configuration(&entries) }),
        ),
    );
    let decoded = harness.client.get_funding_source_client_configuration().await.unwrap();
    assert_eq!(decoded, entries);
}

// ============================================================================
// SECTION: Mutations
// ============================================================================

/// Tests setup sends the funding source type and decodes provisioning data.
#[tokio::test]
async fn setup_funding_source_decodes_provisioning_data() {
    let harness = Harness::signed_in();
    let provisioning = ProvisioningData::StripeCard {
        client_secret: "seti_secret".to_string(),
        intent: "seti_1".to_string(),
    };
    harness.graphql.respond(
        "SetupFundingSource",
        rooted(
            "setupFundingSource",
            json!({
                "id": "pfs-1",
                "owner": "owner-1",
                "version": 1,
                "createdAtEpochMs": CREATED_MS,
                "updatedAtEpochMs": CREATED_MS,
                "type": "CREDIT_CARD",
                "provisioningData": provisioning.encode(),
                "state": "PROVISIONING"
            }),
        ),
    );
    let provisional = harness
        .client
        .setup_funding_source(SetupFundingSourceInput {
            funding_source_type: FundingSourceType::CreditCard,
            currency: "USD".to_string(),
            supported_providers: Some(vec!["stripe".to_string()]),
            setup_data: None,
        })
        .await
        .unwrap();
    assert_eq!(provisional.state, ProvisionalFundingSourceState::Provisioning);
    assert_eq!(provisional.provisioning_data, provisioning);

    let request = harness.graphql.single_request();
    assert_eq!(request.fetch_policy, None);
    assert_eq!(request.variables["input"]["type"], json!("CREDIT_CARD"));
    assert_eq!(request.variables["input"]["supportedProviders"], json!(["stripe"]));
}

/// Tests refresh sends encoded refresh data and returns the funding source.
#[tokio::test]
async fn refresh_funding_source_sends_encoded_refresh_data() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "RefreshFundingSource",
        rooted("refreshFundingSource", credit_card_json("fs-1", "ACTIVE")),
    );
    let refresh_data = RefreshData::CheckoutBankAccount {
        application_name: "Wallet".to_string(),
        account_id: Some("acct-2".to_string()),
        authorization_text: None,
    };
    let source = harness
        .client
        .refresh_funding_source(RefreshFundingSourceInput {
            id: FundingSourceId::new("fs-1"),
            refresh_data: refresh_data.clone(),
            language: Some("en-US".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(source.id().as_str(), "fs-1");
    assert_eq!(source.state(), FundingSourceState::Active);

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "RefreshFundingSource");
    assert_eq!(request.fetch_policy, None);
    assert_eq!(
        request.variables,
        json!({
            "input": {
                "id": "fs-1",
                "refreshData": refresh_data.encode(),
                "language": "en-US"
            }
        })
    );
    assert_eq!(harness.audited(), vec![("refresh_funding_source", None)]);
}

/// Tests refresh omits the language when none is requested.
#[tokio::test]
async fn refresh_funding_source_omits_unset_language() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "RefreshFundingSource",
        rooted("refreshFundingSource", credit_card_json("fs-1", "ACTIVE")),
    );
    harness
        .client
        .refresh_funding_source(RefreshFundingSourceInput {
            id: FundingSourceId::new("fs-1"),
            refresh_data: RefreshData::CheckoutBankAccount {
                application_name: "Wallet".to_string(),
                account_id: None,
                authorization_text: None,
            },
            language: None,
        })
        .await
        .unwrap();
    let input = &harness.graphql.single_request().variables["input"];
    assert!(input.get("language").is_none());
}

/// Tests cancelling a provisional funding source returns the updated record.
#[tokio::test]
async fn cancel_provisional_funding_source_returns_record() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "CancelProvisionalFundingSource",
        rooted(
            "cancelProvisionalFundingSource",
            provisional_funding_source_json("pfs-1", "FAILED", &ProvisioningData::CheckoutCard),
        ),
    );
    let provisional = harness
        .client
        .cancel_provisional_funding_source(&FundingSourceId::new("pfs-1"))
        .await
        .unwrap();
    assert_eq!(provisional.state, ProvisionalFundingSourceState::Failed);
    assert_eq!(provisional.provisioning_data, ProvisioningData::CheckoutCard);

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "CancelProvisionalFundingSource");
    assert_eq!(request.variables, json!({ "input": { "id": "pfs-1" } }));
    assert_eq!(harness.audited(), vec![("cancel_provisional_funding_source", None)]);
}

/// Tests reviewing an unfunded funding source sends its id.
#[tokio::test]
async fn review_unfunded_funding_source_returns_funding_source() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ReviewUnfundedFundingSource",
        rooted("reviewUnfundedFundingSource", credit_card_json("fs-3", "ACTIVE")),
    );
    let source = harness
        .client
        .review_unfunded_funding_source(&FundingSourceId::new("fs-3"))
        .await
        .unwrap();
    assert_eq!(source.id().as_str(), "fs-3");

    let request = harness.graphql.single_request();
    assert_eq!(request.operation, "ReviewUnfundedFundingSource");
    assert_eq!(request.variables, json!({ "input": { "id": "fs-3" } }));
}

/// Tests a typed backend error from review is mapped.
#[tokio::test]
async fn review_unfunded_funding_source_maps_not_found() {
    let harness = Harness::signed_in();
    harness.graphql.push(
        "ReviewUnfundedFundingSource",
        Ok(GraphQlResponse::error(GraphQlError::new(
            "sudoplatform.virtual-cards.FundingSourceNotFoundError",
            "missing",
        ))),
    );
    let err = harness
        .client
        .review_unfunded_funding_source(&FundingSourceId::new("fs-3"))
        .await
        .unwrap_err();
    assert_eq!(err, VirtualCardsError::FundingSourceNotFound("missing".to_string()));
}

/// Tests a user-interaction error carries decoded interaction data.
#[tokio::test]
async fn complete_funding_source_surfaces_interaction() {
    let harness = Harness::signed_in();
    let interaction = InteractionData::CheckoutCard {
        redirect_url: "https://3ds.example.com/challenge".to_string(),
    };
    harness.graphql.push(
        "CompleteFundingSource",
        Ok(GraphQlResponse::error(
            GraphQlError::new(
                "sudoplatform.virtual-cards.FundingSourceRequiresUserInteractionError",
                "interaction required",
            )
            .with_info(interaction.to_error_info()),
        )),
    );
    let err = harness
        .client
        .complete_funding_source(CompleteFundingSourceInput {
            id: FundingSourceId::new("pfs-1"),
            completion_data: CompletionData::CheckoutCard {
                payment_token: "tok_1".to_string(),
            },
            update_card_funding_source: None,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        VirtualCardsError::FundingSourceRequiresUserInteraction {
            interaction_data: interaction,
        }
    );
    assert_eq!(
        harness.audited(),
        vec![("complete_funding_source", Some("funding_source_requires_user_interaction"))]
    );
}

/// Tests typed backend errors are mapped and audited.
#[tokio::test]
async fn backend_errors_are_mapped() {
    let harness = Harness::signed_in();
    harness.graphql.push(
        "CancelCard",
        Ok(GraphQlResponse::error(GraphQlError::new(
            "sudoplatform.virtual-cards.CardNotFoundError",
            "no such card",
        ))),
    );
    let err = harness.client.cancel_card(&VirtualCardId::new("card-9")).await.unwrap_err();
    assert_eq!(err, VirtualCardsError::CardNotFound("no such card".to_string()));
    assert_eq!(harness.audited(), vec![("cancel_card", Some("card_not_found"))]);
}

/// Tests transport failures surface as transport errors.
#[tokio::test]
async fn transport_failures_are_reported() {
    let harness = Harness::signed_in();
    harness
        .graphql
        .push("GetTransaction", Err(TransportError::Network("timed out".to_string())));
    let err = harness
        .client
        .get_transaction(&TransactionId::new("tx-1"), CachePolicy::RemoteOnly)
        .await
        .unwrap_err();
    assert_eq!(err, VirtualCardsError::Transport("network error: timed out".to_string()));
    assert_eq!(harness.audited(), vec![("get_transaction", Some("transport"))]);
}

/// Tests a mutation answered with null data is an unexpected response.
#[tokio::test]
async fn null_mutation_result_is_unexpected() {
    let harness = Harness::signed_in();
    harness.graphql.respond("CancelFundingSource", json!({ "cancelFundingSource": null }));
    let err = harness
        .client
        .cancel_funding_source(&FundingSourceId::new("fs-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, VirtualCardsError::UnexpectedResponse(_)));
}

/// Tests card provisioning sends the request and parses the provisional card.
#[tokio::test]
async fn provision_virtual_card_returns_provisional_card() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ProvisionVirtualCard",
        rooted(
            "cardProvision",
            json!({
                "id": "pc-1",
                "owner": "owner-1",
                "version": 1,
                "createdAtEpochMs": CREATED_MS,
                "updatedAtEpochMs": CREATED_MS,
                "clientRefs": "ref-1",
                "provisioningState": "COMPLETED",
                "card": card_json("card-1", "ISSUED")
            }),
        ),
    );
    let provisional = harness
        .client
        .provision_virtual_card(ProvisionVirtualCardInput {
            client_refs: "ref-1".to_string(),
            owner_proofs: vec!["proof-1".to_string()],
            funding_source_id: FundingSourceId::new("fs-1"),
            cardholder: "Jo Citizen".to_string(),
            currency: "USD".to_string(),
            billing_address: None,
            metadata: Some(json!({ "alias": "groceries" })),
        })
        .await
        .unwrap();
    assert_eq!(provisional.provisioning_state, ProvisioningState::Completed);
    assert_eq!(provisional.card.map(|card| card.id), Some(VirtualCardId::new("card-1")));

    let input = &harness.graphql.single_request().variables["input"];
    assert_eq!(input["clientRefs"], json!("ref-1"));
    assert_eq!(input["ownerProofs"], json!(["proof-1"]));
    assert_eq!(input["cardHolder"], json!("Jo Citizen"));
    assert_eq!(input["metadata"], json!({ "alias": "groceries" }));
    assert!(input.get("billingAddress").is_none());
}

/// Tests card updates send only the fields being changed.
#[tokio::test]
async fn update_card_omits_unchanged_fields() {
    let harness = Harness::signed_in();
    harness.graphql.respond("UpdateCard", rooted("updateCard", card_json("card-1", "SUSPENDED")));
    let card = harness
        .client
        .update_card(UpdateVirtualCardInput {
            id: VirtualCardId::new("card-1"),
            expected_version: Some(4),
            cardholder: Some("J. Citizen".to_string()),
            billing_address: None,
            metadata: None,
        })
        .await
        .unwrap();
    assert_eq!(card.state, CardState::Suspended);

    let request = harness.graphql.single_request();
    assert_eq!(
        request.variables,
        json!({ "input": { "id": "card-1", "expectedVersion": 4, "cardHolder": "J. Citizen" } })
    );
}

/// Tests transaction listings send the date range as epoch milliseconds.
#[tokio::test]
async fn list_transactions_sends_date_range() {
    let harness = Harness::signed_in();
    harness.graphql.respond(
        "ListTransactions",
        rooted("listTransactions", page(vec![transaction_json("tx-2")], Some("next"))),
    );
    let start = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let end = OffsetDateTime::from_unix_timestamp(1_700_086_400).unwrap();
    let output = harness
        .client
        .list_transactions(ListTransactionsInput {
            limit: Some(50),
            date_range: Some(DateRange {
                start,
                end,
            }),
            ..ListTransactionsInput::default()
        })
        .await
        .unwrap();
    assert_eq!(output.next_token.as_deref(), Some("next"));

    let request = harness.graphql.single_request();
    assert_eq!(request.variables["limit"], json!(50));
    assert_eq!(request.variables["sortOrder"], json!("DESC"));
    assert_eq!(request.variables["dateRange"]["startDateEpochMs"], json!(1_700_000_000_000.0));
    assert_eq!(request.variables["dateRange"]["endDateEpochMs"], json!(1_700_086_400_000.0));
}

// ============================================================================
// SECTION: Reset
// ============================================================================

/// Tests reset clears the transport cache even when signed out.
#[tokio::test]
async fn reset_clears_cache() {
    let harness = Harness::signed_out();
    harness.client.reset().await.unwrap();
    assert_eq!(harness.graphql.cache_clears(), 1);
    assert_eq!(harness.audited(), vec![("reset", None)]);
}
