// crates/virtual-cards-sdk/src/api.rs
// ============================================================================
// Module: Virtual Cards API Client
// Description: One method per backend operation over a GraphQL client.
// Purpose: Execute operations and return typed wire records.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`ApiClient`] builds variables, executes the operation on the injected
//! [`GraphQlClient`], maps the first backend error through
//! [`map_graphql_error`], and deserializes the operation's root field.
//! Invariants:
//! - A `null` or absent root field is `Ok(None)` for `get_*` operations and
//!   [`VirtualCardsError::UnexpectedResponse`] for everything else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;

use crate::entities::CachePolicy;
use crate::errors::VirtualCardsError;
use crate::errors::map_graphql_error;
use crate::graphql::Operation;
use crate::graphql::OperationKind;
use crate::graphql::documents;
use crate::graphql::wire::CardProvisionRequest;
use crate::graphql::wire::CardUpdateRequest;
use crate::graphql::wire::CardWire;
use crate::graphql::wire::ClientConfigurationWire;
use crate::graphql::wire::CompleteFundingSourceRequest;
use crate::graphql::wire::DateRangeInput;
use crate::graphql::wire::FundingSourceWire;
use crate::graphql::wire::IdInput;
use crate::graphql::wire::ListWire;
use crate::graphql::wire::ProvisionalCardWire;
use crate::graphql::wire::ProvisionalFundingSourceWire;
use crate::graphql::wire::RefreshFundingSourceRequest;
use crate::graphql::wire::SetupFundingSourceRequest;
use crate::graphql::wire::TransactionWire;
use crate::graphql::wire::VirtualCardsConfigWire;
use crate::interfaces::GraphQlClient;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Page request passed to list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Page size.
    pub limit: Option<u32>,
    /// Continuation token.
    pub next_token: Option<String>,
    /// Cache policy.
    pub cache_policy: CachePolicy,
}

impl PageRequest {
    /// Renders `limit` and `nextToken` variables.
    fn variables(&self) -> Value {
        json!({
            "limit": self.limit,
            "nextToken": self.next_token,
        })
    }
}

/// Filters for transaction list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionFilter {
    /// Time window.
    pub date_range: Option<DateRangeInput>,
    /// Wire sort order (`ASC` or `DESC`).
    pub sort_order: Option<&'static str>,
}

// ============================================================================
// SECTION: API Client
// ============================================================================

/// GraphQL pass-through client.
#[derive(Clone)]
pub struct ApiClient {
    /// Injected transport.
    client: Arc<dyn GraphQlClient>,
}

impl ApiClient {
    /// Creates an API client over a GraphQL transport.
    #[must_use]
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self {
            client,
        }
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Fetches service limits and provider support.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_virtual_cards_config(
        &self,
        policy: CachePolicy,
    ) -> Result<VirtualCardsConfigWire, VirtualCardsError> {
        let op = &documents::GET_VIRTUAL_CARDS_CONFIG;
        required(op, self.execute(op, json!({}), Some(policy)).await?)
    }

    /// Fetches the provider client configuration blob.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_funding_source_client_configuration(
        &self,
    ) -> Result<ClientConfigurationWire, VirtualCardsError> {
        let op = &documents::GET_FUNDING_SOURCE_CLIENT_CONFIGURATION;
        required(op, self.execute(op, json!({}), Some(CachePolicy::RemoteOnly)).await?)
    }

    // ------------------------------------------------------------------------
    // Funding Sources
    // ------------------------------------------------------------------------

    /// Starts funding source setup.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn setup_funding_source(
        &self,
        input: &SetupFundingSourceRequest,
    ) -> Result<ProvisionalFundingSourceWire, VirtualCardsError> {
        let op = &documents::SETUP_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Completes a provisional funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn complete_funding_source(
        &self,
        input: &CompleteFundingSourceRequest,
    ) -> Result<FundingSourceWire, VirtualCardsError> {
        let op = &documents::COMPLETE_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Refreshes a funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn refresh_funding_source(
        &self,
        input: &RefreshFundingSourceRequest,
    ) -> Result<FundingSourceWire, VirtualCardsError> {
        let op = &documents::REFRESH_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Cancels a funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn cancel_funding_source(
        &self,
        input: &IdInput,
    ) -> Result<FundingSourceWire, VirtualCardsError> {
        let op = &documents::CANCEL_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Cancels a provisional funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn cancel_provisional_funding_source(
        &self,
        input: &IdInput,
    ) -> Result<ProvisionalFundingSourceWire, VirtualCardsError> {
        let op = &documents::CANCEL_PROVISIONAL_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Acknowledges an unfunded balance.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn review_unfunded_funding_source(
        &self,
        input: &IdInput,
    ) -> Result<FundingSourceWire, VirtualCardsError> {
        let op = &documents::REVIEW_UNFUNDED_FUNDING_SOURCE;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Fetches a funding source by id.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_funding_source(
        &self,
        id: &str,
        policy: CachePolicy,
    ) -> Result<Option<FundingSourceWire>, VirtualCardsError> {
        let op = &documents::GET_FUNDING_SOURCE;
        self.execute(op, json!({ "id": id }), Some(policy)).await
    }

    /// Lists funding sources.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_funding_sources(
        &self,
        page: &PageRequest,
    ) -> Result<ListWire<FundingSourceWire>, VirtualCardsError> {
        let op = &documents::LIST_FUNDING_SOURCES;
        required(op, self.execute(op, page.variables(), Some(page.cache_policy)).await?)
    }

    /// Fetches a provisional funding source by id.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_provisional_funding_source(
        &self,
        id: &str,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalFundingSourceWire>, VirtualCardsError> {
        let op = &documents::GET_PROVISIONAL_FUNDING_SOURCE;
        self.execute(op, json!({ "id": id }), Some(policy)).await
    }

    /// Lists provisional funding sources.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_provisional_funding_sources(
        &self,
        page: &PageRequest,
    ) -> Result<ListWire<ProvisionalFundingSourceWire>, VirtualCardsError> {
        let op = &documents::LIST_PROVISIONAL_FUNDING_SOURCES;
        required(op, self.execute(op, page.variables(), Some(page.cache_policy)).await?)
    }

    // ------------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------------

    /// Provisions a virtual card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn provision_virtual_card(
        &self,
        input: &CardProvisionRequest,
    ) -> Result<ProvisionalCardWire, VirtualCardsError> {
        let op = &documents::PROVISION_VIRTUAL_CARD;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Fetches a provisional card by id.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_provisional_card(
        &self,
        id: &str,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalCardWire>, VirtualCardsError> {
        let op = &documents::GET_PROVISIONAL_CARD;
        self.execute(op, json!({ "id": id }), Some(policy)).await
    }

    /// Lists provisional cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_provisional_cards(
        &self,
        page: &PageRequest,
    ) -> Result<ListWire<ProvisionalCardWire>, VirtualCardsError> {
        let op = &documents::LIST_PROVISIONAL_CARDS;
        required(op, self.execute(op, page.variables(), Some(page.cache_policy)).await?)
    }

    /// Fetches a card by id.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_card(
        &self,
        id: &str,
        policy: CachePolicy,
    ) -> Result<Option<CardWire>, VirtualCardsError> {
        let op = &documents::GET_CARD;
        self.execute(op, json!({ "id": id }), Some(policy)).await
    }

    /// Lists cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_cards(
        &self,
        page: &PageRequest,
    ) -> Result<ListWire<CardWire>, VirtualCardsError> {
        let op = &documents::LIST_CARDS;
        required(op, self.execute(op, page.variables(), Some(page.cache_policy)).await?)
    }

    /// Updates a card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn update_card(
        &self,
        input: &CardUpdateRequest,
    ) -> Result<CardWire, VirtualCardsError> {
        let op = &documents::UPDATE_CARD;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    /// Cancels a card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn cancel_card(&self, input: &IdInput) -> Result<CardWire, VirtualCardsError> {
        let op = &documents::CANCEL_CARD;
        required(op, self.execute(op, input_variables(input)?, None).await?)
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    /// Fetches a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn get_transaction(
        &self,
        id: &str,
        policy: CachePolicy,
    ) -> Result<Option<TransactionWire>, VirtualCardsError> {
        let op = &documents::GET_TRANSACTION;
        self.execute(op, json!({ "id": id }), Some(policy)).await
    }

    /// Lists transactions for one card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_transactions_by_card_id(
        &self,
        card_id: &str,
        page: &PageRequest,
        filter: TransactionFilter,
    ) -> Result<ListWire<TransactionWire>, VirtualCardsError> {
        let op = &documents::LIST_TRANSACTIONS_BY_CARD_ID;
        let mut variables = transaction_variables(page, filter);
        if let Value::Object(map) = &mut variables {
            map.insert("cardId".to_string(), Value::String(card_id.to_string()));
        }
        required(op, self.execute(op, variables, Some(page.cache_policy)).await?)
    }

    /// Lists transactions across all cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] on transport, backend, or shape failures.
    pub async fn list_transactions(
        &self,
        page: &PageRequest,
        filter: TransactionFilter,
    ) -> Result<ListWire<TransactionWire>, VirtualCardsError> {
        let op = &documents::LIST_TRANSACTIONS;
        let variables = transaction_variables(page, filter);
        required(op, self.execute(op, variables, Some(page.cache_policy)).await?)
    }

    // ------------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------------

    /// Executes an operation and deserializes its root field.
    async fn execute<T: DeserializeOwned>(
        &self,
        op: &Operation,
        variables: Value,
        policy: Option<CachePolicy>,
    ) -> Result<Option<T>, VirtualCardsError> {
        let mut request = op.request(variables);
        if let Some(policy) = policy {
            request = request.with_fetch_policy(policy);
        }
        let response = match op.kind {
            OperationKind::Query => self.client.query(request).await?,
            OperationKind::Mutation => self.client.mutate(request).await?,
            OperationKind::Subscription => {
                return Err(VirtualCardsError::UnexpectedResponse(format!(
                    "{} is a subscription and cannot be executed",
                    op.name
                )));
            }
        };
        if let Some(error) = response.errors.first() {
            return Err(map_graphql_error(error));
        }
        let mut data = response.data.ok_or_else(|| {
            VirtualCardsError::UnexpectedResponse(format!("{} returned no data", op.name))
        })?;
        match data.get_mut(op.field).map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|err| {
                VirtualCardsError::UnexpectedResponse(format!("{}: {err}", op.field))
            }),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Requires a non-null result.
fn required<T>(op: &Operation, value: Option<T>) -> Result<T, VirtualCardsError> {
    value.ok_or_else(|| VirtualCardsError::UnexpectedResponse(format!("{} returned null", op.field)))
}

/// Wraps a serializable input as `{ "input": ... }`.
fn input_variables<T: serde::Serialize>(input: &T) -> Result<Value, VirtualCardsError> {
    let input = serde_json::to_value(input)
        .map_err(|err| VirtualCardsError::InvalidArgument(err.to_string()))?;
    Ok(json!({ "input": input }))
}

/// Renders transaction list variables, omitting unset filters.
fn transaction_variables(page: &PageRequest, filter: TransactionFilter) -> Value {
    let mut variables = page.variables();
    if let Value::Object(map) = &mut variables {
        if let Some(range) = filter.date_range {
            map.insert(
                "dateRange".to_string(),
                json!({
                    "startDateEpochMs": range.start_date_epoch_ms,
                    "endDateEpochMs": range.end_date_epoch_ms,
                }),
            );
        }
        if let Some(order) = filter.sort_order {
            map.insert("sortOrder".to_string(), Value::String(order.to_string()));
        }
    }
    variables
}
