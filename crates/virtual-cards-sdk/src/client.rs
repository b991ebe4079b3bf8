// crates/virtual-cards-sdk/src/client.rs
// ============================================================================
// Module: Virtual Cards Client
// Description: Public facade over services, subscriptions, and audit logging.
// Purpose: Gate every operation on sign-in and record one audit event each.
// Dependencies: virtual-cards-codec
// ============================================================================

//! ## Overview
//! [`VirtualCardsClient`] is assembled by [`VirtualCardsClientBuilder`] from
//! the injected transport, session, and optional watcher. Each data operation
//! checks [`UserSession::is_signed_in`] before touching the backend and fails
//! with [`VirtualCardsError::NotSignedIn`] otherwise.
//! Invariants:
//! - Exactly one [`SdkAuditEvent`] is recorded per public operation call.
//! - List operations without a `limit` use `list.default_limit`.
//! - Unsubscribing and [`VirtualCardsClient::reset`] work while signed out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use virtual_cards_codec::FundingSourceClientConfiguration;

use crate::api::ApiClient;
use crate::audit::AuditOutcome;
use crate::audit::SdkAuditEvent;
use crate::audit::SdkAuditEventParams;
use crate::audit::SdkAuditSink;
use crate::config::ConfigError;
use crate::config::SdkConfig;
use crate::entities::CachePolicy;
use crate::entities::CompleteFundingSourceInput;
use crate::entities::ConnectionState;
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
use crate::identifiers::FundingSourceId;
use crate::identifiers::SubscriptionId;
use crate::identifiers::TransactionId;
use crate::identifiers::VirtualCardId;
use crate::interfaces::GraphQlClient;
use crate::interfaces::UserSession;
use crate::interfaces::Watcher;
use crate::services::ConfigurationService;
use crate::services::DefaultConfigurationService;
use crate::services::DefaultFundingSourceService;
use crate::services::DefaultTransactionService;
use crate::services::DefaultVirtualCardService;
use crate::services::FundingSourceService;
use crate::services::TransactionService;
use crate::services::VirtualCardService;
use crate::subscriptions::FundingSourceSubscriber;
use crate::subscriptions::SubscriptionManager;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`VirtualCardsClient`].
pub struct VirtualCardsClientBuilder {
    /// GraphQL transport.
    graphql: Arc<dyn GraphQlClient>,
    /// User session.
    session: Arc<dyn UserSession>,
    /// Subscription transport.
    watcher: Option<Arc<dyn Watcher>>,
    /// SDK configuration.
    config: Option<SdkConfig>,
    /// Audit sink override.
    audit: Option<Arc<dyn SdkAuditSink>>,
    /// Funding source service override.
    funding_sources: Option<Arc<dyn FundingSourceService>>,
    /// Card service override.
    cards: Option<Arc<dyn VirtualCardService>>,
    /// Transaction service override.
    transactions: Option<Arc<dyn TransactionService>>,
    /// Configuration service override.
    configuration: Option<Arc<dyn ConfigurationService>>,
}

impl VirtualCardsClientBuilder {
    /// Starts a builder from the required collaborators.
    #[must_use]
    pub fn new(graphql: Arc<dyn GraphQlClient>, session: Arc<dyn UserSession>) -> Self {
        Self {
            graphql,
            session,
            watcher: None,
            config: None,
            audit: None,
            funding_sources: None,
            cards: None,
            transactions: None,
            configuration: None,
        }
    }

    /// Enables funding source subscriptions.
    #[must_use]
    pub fn watcher(mut self, watcher: Arc<dyn Watcher>) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Sets the SDK configuration. Defaults apply when omitted.
    #[must_use]
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the audit sink selected by `audit.mode`.
    #[must_use]
    pub fn audit_sink(mut self, audit: Arc<dyn SdkAuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Overrides the funding source service.
    #[must_use]
    pub fn funding_source_service(mut self, service: Arc<dyn FundingSourceService>) -> Self {
        self.funding_sources = Some(service);
        self
    }

    /// Overrides the card service.
    #[must_use]
    pub fn virtual_card_service(mut self, service: Arc<dyn VirtualCardService>) -> Self {
        self.cards = Some(service);
        self
    }

    /// Overrides the transaction service.
    #[must_use]
    pub fn transaction_service(mut self, service: Arc<dyn TransactionService>) -> Self {
        self.transactions = Some(service);
        self
    }

    /// Overrides the configuration service.
    #[must_use]
    pub fn configuration_service(mut self, service: Arc<dyn ConfigurationService>) -> Self {
        self.configuration = Some(service);
        self
    }

    /// Validates configuration and assembles the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid or the audit
    /// sink cannot be opened.
    pub fn build(self) -> Result<VirtualCardsClient, ConfigError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let audit = match self.audit {
            Some(audit) => audit,
            None => config.audit.build_sink()?,
        };
        let api = Arc::new(ApiClient::new(Arc::clone(&self.graphql)));
        let funding_sources = self.funding_sources.unwrap_or_else(|| {
            Arc::new(DefaultFundingSourceService::new(Arc::clone(&api)))
        });
        let cards = self
            .cards
            .unwrap_or_else(|| Arc::new(DefaultVirtualCardService::new(Arc::clone(&api))));
        let transactions = self
            .transactions
            .unwrap_or_else(|| Arc::new(DefaultTransactionService::new(Arc::clone(&api))));
        let configuration = self
            .configuration
            .unwrap_or_else(|| Arc::new(DefaultConfigurationService::new(Arc::clone(&api))));
        let subscriptions = SubscriptionManager::new(self.watcher, Arc::clone(&audit));
        Ok(VirtualCardsClient {
            graphql: self.graphql,
            session: self.session,
            config,
            audit,
            funding_sources,
            cards,
            transactions,
            configuration,
            subscriptions,
        })
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Virtual cards SDK client.
pub struct VirtualCardsClient {
    /// GraphQL transport, kept for cache resets.
    graphql: Arc<dyn GraphQlClient>,
    /// User session.
    session: Arc<dyn UserSession>,
    /// Validated configuration.
    config: SdkConfig,
    /// Audit sink.
    audit: Arc<dyn SdkAuditSink>,
    /// Funding source service.
    funding_sources: Arc<dyn FundingSourceService>,
    /// Card service.
    cards: Arc<dyn VirtualCardService>,
    /// Transaction service.
    transactions: Arc<dyn TransactionService>,
    /// Configuration service.
    configuration: Arc<dyn ConfigurationService>,
    /// Funding source subscriptions.
    subscriptions: SubscriptionManager,
}

impl VirtualCardsClient {
    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SdkConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Fetches service limits and provider support.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_virtual_cards_config(
        &self,
        policy: CachePolicy,
    ) -> Result<VirtualCardsConfig, VirtualCardsError> {
        self.run("get_virtual_cards_config", self.configuration.get_virtual_cards_config(policy))
            .await
    }

    /// Fetches publishable provider keys.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_funding_source_client_configuration(
        &self,
    ) -> Result<Vec<FundingSourceClientConfiguration>, VirtualCardsError> {
        self.run(
            "get_funding_source_client_configuration",
            self.configuration.get_funding_source_client_configuration(),
        )
        .await
    }

    // ------------------------------------------------------------------------
    // Funding Sources
    // ------------------------------------------------------------------------

    /// Starts funding source setup.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn setup_funding_source(
        &self,
        input: SetupFundingSourceInput,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError> {
        self.run("setup_funding_source", self.funding_sources.setup_funding_source(input)).await
    }

    /// Completes funding source setup.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails,
    /// including [`VirtualCardsError::FundingSourceRequiresUserInteraction`].
    pub async fn complete_funding_source(
        &self,
        input: CompleteFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError> {
        self.run("complete_funding_source", self.funding_sources.complete_funding_source(input))
            .await
    }

    /// Refreshes a funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn refresh_funding_source(
        &self,
        input: RefreshFundingSourceInput,
    ) -> Result<FundingSource, VirtualCardsError> {
        self.run("refresh_funding_source", self.funding_sources.refresh_funding_source(input))
            .await
    }

    /// Cancels a funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn cancel_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError> {
        self.run("cancel_funding_source", self.funding_sources.cancel_funding_source(id)).await
    }

    /// Cancels a provisional funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn cancel_provisional_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<ProvisionalFundingSource, VirtualCardsError> {
        self.run(
            "cancel_provisional_funding_source",
            self.funding_sources.cancel_provisional_funding_source(id),
        )
        .await
    }

    /// Acknowledges an unfunded balance.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn review_unfunded_funding_source(
        &self,
        id: &FundingSourceId,
    ) -> Result<FundingSource, VirtualCardsError> {
        self.run(
            "review_unfunded_funding_source",
            self.funding_sources.review_unfunded_funding_source(id),
        )
        .await
    }

    /// Fetches one funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<FundingSource>, VirtualCardsError> {
        self.run("get_funding_source", self.funding_sources.get_funding_source(id, policy)).await
    }

    /// Lists funding sources.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<FundingSource>, VirtualCardsError> {
        let input = self.paged(input);
        self.run("list_funding_sources", self.funding_sources.list_funding_sources(input)).await
    }

    /// Fetches one provisional funding source.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_provisional_funding_source(
        &self,
        id: &FundingSourceId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalFundingSource>, VirtualCardsError> {
        self.run(
            "get_provisional_funding_source",
            self.funding_sources.get_provisional_funding_source(id, policy),
        )
        .await
    }

    /// Lists provisional funding sources.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_provisional_funding_sources(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalFundingSource>, VirtualCardsError> {
        let input = self.paged(input);
        self.run(
            "list_provisional_funding_sources",
            self.funding_sources.list_provisional_funding_sources(input),
        )
        .await
    }

    // ------------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------------

    /// Requests a new card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn provision_virtual_card(
        &self,
        input: ProvisionVirtualCardInput,
    ) -> Result<ProvisionalVirtualCard, VirtualCardsError> {
        self.run("provision_virtual_card", self.cards.provision_virtual_card(input)).await
    }

    /// Fetches one provisional card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_provisional_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<ProvisionalVirtualCard>, VirtualCardsError> {
        self.run("get_provisional_card", self.cards.get_provisional_card(id, policy)).await
    }

    /// Lists provisional cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_provisional_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<ProvisionalVirtualCard>, VirtualCardsError> {
        let input = self.paged(input);
        self.run("list_provisional_cards", self.cards.list_provisional_cards(input)).await
    }

    /// Fetches one card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_card(
        &self,
        id: &VirtualCardId,
        policy: CachePolicy,
    ) -> Result<Option<VirtualCard>, VirtualCardsError> {
        self.run("get_card", self.cards.get_card(id, policy)).await
    }

    /// Lists cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_cards(
        &self,
        input: ListInput,
    ) -> Result<ListOutput<VirtualCard>, VirtualCardsError> {
        let input = self.paged(input);
        self.run("list_cards", self.cards.list_cards(input)).await
    }

    /// Updates a card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn update_card(
        &self,
        input: UpdateVirtualCardInput,
    ) -> Result<VirtualCard, VirtualCardsError> {
        self.run("update_card", self.cards.update_card(input)).await
    }

    /// Cancels a card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn cancel_card(&self, id: &VirtualCardId) -> Result<VirtualCard, VirtualCardsError> {
        self.run("cancel_card", self.cards.cancel_card(id)).await
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    /// Fetches one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn get_transaction(
        &self,
        id: &TransactionId,
        policy: CachePolicy,
    ) -> Result<Option<Transaction>, VirtualCardsError> {
        self.run("get_transaction", self.transactions.get_transaction(id, policy)).await
    }

    /// Lists transactions for one card.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_transactions_by_card_id(
        &self,
        card_id: &VirtualCardId,
        mut input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError> {
        input.limit = Some(input.limit.unwrap_or(self.config.list.default_limit));
        self.run(
            "list_transactions_by_card_id",
            self.transactions.list_transactions_by_card_id(card_id, input),
        )
        .await
    }

    /// Lists transactions across all cards.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when signed out or the call fails.
    pub async fn list_transactions(
        &self,
        mut input: ListTransactionsInput,
    ) -> Result<ListOutput<Transaction>, VirtualCardsError> {
        input.limit = Some(input.limit.unwrap_or(self.config.list.default_limit));
        self.run("list_transactions", self.transactions.list_transactions(input)).await
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Registers a funding source subscriber for the signed-in user.
    ///
    /// Registering an existing `id` replaces its subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError::NotSignedIn`] without a user subject and
    /// [`VirtualCardsError::Watch`] when the watcher cannot start.
    pub async fn subscribe_to_funding_source_changes(
        &self,
        id: SubscriptionId,
        subscriber: Arc<dyn FundingSourceSubscriber>,
    ) -> Result<(), VirtualCardsError> {
        self.run("subscribe_to_funding_source_changes", async {
            let owner = self.session.subject().await?.ok_or(VirtualCardsError::NotSignedIn)?;
            self.subscriptions.subscribe(id, &owner, subscriber)?;
            Ok::<(), VirtualCardsError>(())
        })
        .await
    }

    /// Removes a funding source subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError::Watch`] when subscription state is
    /// unavailable.
    pub fn unsubscribe_from_funding_source_changes(
        &self,
        id: &SubscriptionId,
    ) -> Result<(), VirtualCardsError> {
        let result = self.subscriptions.unsubscribe(id).map_err(VirtualCardsError::from);
        self.record("unsubscribe_from_funding_source_changes", &result);
        result
    }

    /// Returns the subscription transport's last reported state.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError::Watch`] when subscription state is
    /// unavailable.
    pub fn connection_state(&self) -> Result<ConnectionState, VirtualCardsError> {
        Ok(self.subscriptions.connection_state()?)
    }

    /// Drops every subscriber and clears the transport cache.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualCardsError`] when subscriptions cannot be cleared or
    /// the cache reset fails.
    pub async fn reset(&self) -> Result<(), VirtualCardsError> {
        let result = match self.subscriptions.unsubscribe_all() {
            Ok(()) => self.graphql.clear_cache().await.map_err(VirtualCardsError::from),
            Err(err) => Err(err.into()),
        };
        self.record("reset", &result);
        result
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Fills the default page size.
    fn paged(&self, mut input: ListInput) -> ListInput {
        input.limit = Some(input.limit.unwrap_or(self.config.list.default_limit));
        input
    }

    /// Fails unless a user is signed in.
    async fn ensure_signed_in(&self) -> Result<(), VirtualCardsError> {
        if self.session.is_signed_in().await? { Ok(()) } else { Err(VirtualCardsError::NotSignedIn) }
    }

    /// Runs an operation behind the sign-in gate and records its outcome.
    async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T, VirtualCardsError>
    where
        F: Future<Output = Result<T, VirtualCardsError>>,
    {
        let result = match self.ensure_signed_in().await {
            Ok(()) => call.await,
            Err(err) => Err(err),
        };
        self.record(operation, &result);
        result
    }

    /// Records one operation audit event.
    fn record<T>(&self, operation: &'static str, result: &Result<T, VirtualCardsError>) {
        let (outcome, error_kind) = match result {
            Ok(_) => (AuditOutcome::Success, None),
            Err(err) => (AuditOutcome::Error, Some(err.kind())),
        };
        self.audit.record(&SdkAuditEvent::new(SdkAuditEventParams {
            operation,
            outcome,
            error_kind,
        }));
    }
}
