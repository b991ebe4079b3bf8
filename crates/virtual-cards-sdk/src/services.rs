// crates/virtual-cards-sdk/src/services.rs
// ============================================================================
// Module: Virtual Cards Services
// Description: Entity-level service traits and their API-backed defaults.
// Purpose: Pair each API call with its wire transformer.
// Dependencies: async-trait
// ============================================================================

//! ## Overview
//! Services sit between the client facade and [`ApiClient`]. The default
//! implementations are stateless pass-throughs; alternate implementations can
//! be injected for testing or caching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use virtual_cards_codec::FundingSourceClientConfiguration;

use crate::api::ApiClient;
use crate::api::PageRequest;
use crate::api::TransactionFilter;
use crate::entities::CachePolicy;
use crate::entities::CompleteFundingSourceInput;
use crate::entities::FundingSource;
use crate::entities::ListInput;
use crate::entities::ListOutput;
use crate::entities::ListTransactionsInput;
use crate::entities::ProvisionVirtualCardInput;
use crate::entities::ProvisionalFundingSource;
use crate::entities::ProvisionalVirtualCard;
use crate::entities::RefreshFundingSourceInput;
use crate::entities::SetupFundingSourceInput;
use crate::entities::Transaction;
use crate::entities::UpdateVirtualCardInput;
use crate::entities::VirtualCard;
use crate::entities::VirtualCardsConfig;
use crate::errors::VirtualCardsError;
use crate::graphql::wire::IdInput;
use crate::identifiers::FundingSourceId;
use crate::identifiers::TransactionId;
use crate::identifiers::VirtualCardId;
use crate::transformers;

// ============================================================================
// SECTION: Service Traits
// ============================================================================

/// Funding source lifecycle operations.
#[async_trait]
pub trait FundingSourceService: Send + Sync {
    /// Starts setup and returns provider provisioning data.
    async fn setup_funding_source(
        &self,
        input: SetupFundingSourceInput,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError>;

    /// Completes setup with provider completion data.
    async fn complete_funding_source(
        &self,
        input: CompleteFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError>;

    /// Refreshes a funding source that needs re-linking.
    async fn refresh_funding_source(
        &self,
        input: RefreshFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError>;

    /// Cancels a funding source.
    async fn cancel_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError>;

    /// Cancels a provisional funding source.
    async fn cancel_provisional_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError>;

    /// Acknowledges an unfunded balance.
    async fn review_unfunded_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError>;

    /// Fetches one funding source.
    async fn get_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<FundingSource>, VirtualCardsError>;

    /// Lists funding sources.
    async fn list_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<FundingSource>, VirtualCardsError>;

    /// Fetches one provisional funding source.
    async fn get_provisional_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalFundingSource>, VirtualCardsError>;

    /// Lists provisional funding sources.
    async fn list_provisional_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalFundingSource>, VirtualCardsError>;
}

/// Virtual card operations.
#[async_trait]
pub trait VirtualCardService: Send + Sync {
    /// Requests a new card.
    async fn provision_virtual_card(
        &self,
        input: ProvisionVirtualCardInput,
    ) -> Result<ProvisionalVirtualCard, VirtualCardsError>;

    /// Fetches one provisional card.
    async fn get_provisional_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalVirtualCard>, VirtualCardsError>;

    /// Lists provisional cards.
    async fn list_provisional_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalVirtualCard>, VirtualCardsError>;

    /// Fetches one card.
    async fn get_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<VirtualCard>, VirtualCardsError>;

    /// Lists cards.
    async fn list_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<VirtualCard>, VirtualCardsError>;

    /// Updates cardholder, billing address, or metadata.
    async fn update_card(
        &self,
        input: UpdateVirtualCardInput,
    ) -> Result<VirtualCard, VirtualCardsError>;

    /// Cancels a card.
    async fn cancel_card(&self, id: &VirtualCardId) -> Result<VirtualCard, VirtualCardsError>;
}

/// Transaction queries.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Fetches one transaction.
    async fn get_transaction(
        &self,
        id: &TransactionId,
        policy: CachePolicy,
    ) -> Result<Option<Transaction>, VirtualCardsError>;

    /// Lists transactions for one card.
    async fn list_transactions_by_card_id(
        &self,
        card_id: &VirtualCardId,
        input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError>;

    /// Lists transactions across all cards.
    async fn list_transactions(
        &self,
        input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError>;
}

/// Service configuration queries.
#[async_trait]
pub trait ConfigurationService: Send + Sync {
    /// Fetches limits and provider support.
    async fn get_virtual_cards_config(
        &self,
        policy: CachePolicy,
    ) -> Result<VirtualCardsConfig, VirtualCardsError>;

    /// Fetches publishable provider keys.
    async fn get_funding_source_client_configuration(
        &self,
    ) -> Result<Vec<FundingSourceClientConfiguration>, VirtualCardsError>;
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a list input into a page request.
fn page(input: ListInput) -> PageRequest {
    PageRequest {
        limit: input.limit,
        next_token: input.next_token,
        cache_policy: input.cache_policy,
    }
}

/// Splits a transaction list input into page and filter.
fn transaction_page(input: ListTransactionsInput) -> (PageRequest, TransactionFilter) {
    let filter = TransactionFilter {
        date_range: input.date_range.map(transformers::date_range),
        sort_order: Some(input.sort_order.as_str()),
    };
    let page = PageRequest {
        limit: input.limit,
        next_token: input.next_token,
        cache_policy: input.cache_policy,
    };
    (page, filter)
}

/// Builds an id input.
fn id_input(id: &str) -> IdInput {
    IdInput {
        id: id.to_string(),
    }
}

// ============================================================================
// SECTION: Default Implementations
// ============================================================================

/// Funding source service backed by [`ApiClient`].
#[derive(Clone)]
pub struct DefaultFundingSourceService {
    /// API client.
    api: Arc<ApiClient>,
}

impl DefaultFundingSourceService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
        }
    }
}

#[async_trait]
impl FundingSourceService for DefaultFundingSourceService {
    async fn setup_funding_source(
        &self,
        input: SetupFundingSourceInput,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError> {
        let wire = self.api.setup_funding_source(&transformers::setup_request(input)).await?;
        transformers::provisional_funding_source(wire)
    }

    async fn complete_funding_source(
        &self,
        input: CompleteFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError> {
        let wire = self.api.complete_funding_source(&transformers::complete_request(input)).await?;
        transformers::funding_source(wire)
    }

    async fn refresh_funding_source(
        &self,
        input: RefreshFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError> {
        let wire = self.api.refresh_funding_source(&transformers::refresh_request(input)).await?;
        transformers::funding_source(wire)
    }

    async fn cancel_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError> {
        let wire = self.api.cancel_funding_source(&id_input(id.as_str())).await?;
        transformers::funding_source(wire)
    }

    async fn cancel_provisional_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError> {
        let wire = self.api.cancel_provisional_funding_source(&id_input(id.as_str())).await?;
        transformers::provisional_funding_source(wire)
    }

    async fn review_unfunded_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError> {
        let wire = self.api.review_unfunded_funding_source(&id_input(id.as_str())).await?;
        transformers::funding_source(wire)
    }

    async fn get_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<FundingSource>, VirtualCardsError> {
        self.api
            .get_funding_source(id.as_str(), policy)
            .await?
            .map(transformers::funding_source)
            .transpose()
    }

    async fn list_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<FundingSource>, VirtualCardsError> {
        let wire = self.api.list_funding_sources(&page(input)).await?;
        transformers::list(wire, transformers::funding_source)
    }

    async fn get_provisional_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalFundingSource>, VirtualCardsError> {
        self.api
            .get_provisional_funding_source(id.as_str(), policy)
            .await?
            .map(transformers::provisional_funding_source)
            .transpose()
    }

    async fn list_provisional_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalFundingSource>, VirtualCardsError> {
        let wire = self.api.list_provisional_funding_sources(&page(input)).await?;
        transformers::list(wire, transformers::provisional_funding_source)
    }
}

/// Virtual card service backed by [`ApiClient`].
#[derive(Clone)]
pub struct DefaultVirtualCardService {
    /// API client.
    api: Arc<ApiClient>,
}

impl DefaultVirtualCardService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
        }
    }
}

#[async_trait]
impl VirtualCardService for DefaultVirtualCardService {
    async fn provision_virtual_card(
        &self,
        input: ProvisionVirtualCardInput,
    ) -> Result<ProvisionalVirtualCard, VirtualCardsError> {
        let wire = self.api.provision_virtual_card(&transformers::provision_request(input)).await?;
        transformers::provisional_card(wire)
    }

    async fn get_provisional_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalVirtualCard>, VirtualCardsError> {
        self.api
            .get_provisional_card(id.as_str(), policy)
            .await?
            .map(transformers::provisional_card)
            .transpose()
    }

    async fn list_provisional_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalVirtualCard>, VirtualCardsError> {
        let wire = self.api.list_provisional_cards(&page(input)).await?;
        transformers::list(wire, transformers::provisional_card)
    }

    async fn get_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<VirtualCard>, VirtualCardsError> {
        self.api.get_card(id.as_str(), policy).await?.map(transformers::virtual_card).transpose()
    }

    async fn list_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<VirtualCard>, VirtualCardsError> {
        let wire = self.api.list_cards(&page(input)).await?;
        transformers::list(wire, transformers::virtual_card)
    }

    async fn update_card(
        &self,
        input: UpdateVirtualCardInput,
    ) -> Result<VirtualCard, VirtualCardsError> {
        let wire = self.api.update_card(&transformers::update_request(input)).await?;
        transformers::virtual_card(wire)
    }

    async fn cancel_card(&self, id: &VirtualCardId) -> Result<VirtualCard, VirtualCardsError> {
        let wire = self.api.cancel_card(&id_input(id.as_str())).await?;
        transformers::virtual_card(wire)
    }
}

/// Transaction service backed by [`ApiClient`].
#[derive(Clone)]
pub struct DefaultTransactionService {
    /// API client.
    api: Arc<ApiClient>,
}

impl DefaultTransactionService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
        }
    }
}

#[async_trait]
impl TransactionService for DefaultTransactionService {
    async fn get_transaction(
        &self,
        id: &TransactionId,
        policy: CachePolicy,
    ) -> Result<Option<Transaction>, VirtualCardsError> {
        self.api.get_transaction(id.as_str(), policy).await?.map(transformers::transaction).transpose()
    }

    async fn list_transactions_by_card_id(
        &self,
        card_id: &VirtualCardId,
        input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError> {
        let (page, filter) = transaction_page(input);
        let wire = self.api.list_transactions_by_card_id(card_id.as_str(), &page, filter).await?;
        transformers::list(wire, transformers::transaction)
    }

    async fn list_transactions(
        &self,
        input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError> {
        let (page, filter) = transaction_page(input);
        let wire = self.api.list_transactions(&page, filter).await?;
        transformers::list(wire, transformers::transaction)
    }
}

/// Configuration service backed by [`ApiClient`].
#[derive(Clone)]
pub struct DefaultConfigurationService {
    /// API client.
    api: Arc<ApiClient>,
}

impl DefaultConfigurationService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
        }
    }
}

#[async_trait]
impl ConfigurationService for DefaultConfigurationService {
    async fn get_virtual_cards_config(
        &self,
        policy: CachePolicy,
    ) -> Result<VirtualCardsConfig, VirtualCardsError> {
        let wire = self.api.get_virtual_cards_config(policy).await?;
        transformers::virtual_cards_config(wire)
    }

    async fn get_funding_source_client_configuration(
        &self,
    ) -> Result<Vec<FundingSourceClientConfiguration>, VirtualCardsError> {
        let wire = self.api.get_funding_source_client_configuration().await?;
        transformers::client_configuration(&wire)
    }
}
