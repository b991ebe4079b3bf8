// crates/virtual-cards-sdk/src/graphql/documents.rs
// ============================================================================
// Module: GraphQL Documents
// Description: Static operation documents for the virtual cards backend.
// Purpose: Keep every query, mutation, and subscription text in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each [`Operation`] carries its document with every fragment it spreads, so
//! the GraphQL client needs no fragment registry. Selection sets mirror the
//! structs in [`crate::graphql::wire`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::graphql::Operation;
use crate::graphql::OperationKind;

// ============================================================================
// SECTION: Fragments
// ============================================================================

/// Credit card funding source selection.
macro_rules! credit_card_funding_source_fragment {
    () => {
        "fragment CreditCardFundingSource on CreditCardFundingSource {
  __typename id owner version createdAtEpochMs updatedAtEpochMs state flags currency
  transactionVelocity { maximum velocity }
  last4 network cardType
}
"
    };
}

/// Bank account funding source selection.
macro_rules! bank_account_funding_source_fragment {
    () => {
        "fragment BankAccountFundingSource on BankAccountFundingSource {
  __typename id owner version createdAtEpochMs updatedAtEpochMs state flags currency
  transactionVelocity { maximum velocity }
  bankAccountType last4 institutionName
  unfundedAmount { currency amount }
}
"
    };
}

/// Funding source union selection with its member fragments.
macro_rules! funding_source_fragment {
    () => {
        concat!(
            "fragment FundingSource on FundingSource {
  ... on CreditCardFundingSource { ...CreditCardFundingSource }
  ... on BankAccountFundingSource { ...BankAccountFundingSource }
}
",
            credit_card_funding_source_fragment!(),
            bank_account_funding_source_fragment!()
        )
    };
}

/// Provisional funding source selection.
macro_rules! provisional_funding_source_fragment {
    () => {
        "fragment ProvisionalFundingSource on ProvisionalFundingSource {
  id owner version createdAtEpochMs updatedAtEpochMs type provisioningData state last4
}
"
    };
}

/// Transaction selection.
macro_rules! transaction_fragment {
    () => {
        "fragment Transaction on Transaction {
  id owner version createdAtEpochMs updatedAtEpochMs cardId sequenceId type
  billedAmount { currency amount }
  transactedAmount { currency amount }
  description transactedAtEpochMs settledAtEpochMs declineReason
  detail {
    virtualCardAmount { currency amount }
    markup { percent flat minCharge }
    markupAmount { currency amount }
    fundingSourceAmount { currency amount }
    fundingSourceId description state
  }
}
"
    };
}

/// Card selection with its last transaction.
macro_rules! card_fragment {
    () => {
        concat!(
            "fragment Card on Card {
  id owner version createdAtEpochMs updatedAtEpochMs
  owners { id issuer }
  fundingSourceId currency state activatedAtEpochMs cancelledAtEpochMs
  last4 cardHolder pan csc
  billingAddress { addressLine1 addressLine2 city state postalCode country }
  expiry { mm yyyy }
  metadata
  lastTransaction { ...Transaction }
}
",
            transaction_fragment!()
        )
    };
}

/// Provisional card selection.
macro_rules! provisional_card_fragment {
    () => {
        concat!(
            "fragment ProvisionalCard on ProvisionalCard {
  id owner version createdAtEpochMs updatedAtEpochMs clientRefs provisioningState
  card { ...Card }
}
",
            card_fragment!()
        )
    };
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Service limits and provider support.
pub const GET_VIRTUAL_CARDS_CONFIG: Operation = Operation {
    name: "GetVirtualCardsConfig",
    field: "getVirtualCardsConfig",
    kind: OperationKind::Query,
    document: "query GetVirtualCardsConfig {
  getVirtualCardsConfig {
    maxFundingSourceVelocity maxFundingSourceFailureVelocity maxCardCreationVelocity
    maxTransactionVelocity { currency velocity }
    maxTransactionAmount { currency amount }
    virtualCardCurrencies
    fundingSourceSupportInfo { providerType fundingSourceType network detail { cardType } }
    bankAccountFundingSourceExpendableEnabled
    fundingSourceClientConfiguration { data }
  }
}
",
};

/// Provider client configuration blob.
pub const GET_FUNDING_SOURCE_CLIENT_CONFIGURATION: Operation = Operation {
    name: "GetFundingSourceClientConfiguration",
    field: "getFundingSourceClientConfiguration",
    kind: OperationKind::Query,
    document: "query GetFundingSourceClientConfiguration {
  getFundingSourceClientConfiguration { data }
}
",
};

// ============================================================================
// SECTION: Funding Sources
// ============================================================================

/// Starts funding source setup.
pub const SETUP_FUNDING_SOURCE: Operation = Operation {
    name: "SetupFundingSource",
    field: "setupFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation SetupFundingSource($input: SetupFundingSourceRequest!) {
  setupFundingSource(input: $input) { ...ProvisionalFundingSource }
}
",
        provisional_funding_source_fragment!()
    ),
};

/// Completes a provisional funding source.
pub const COMPLETE_FUNDING_SOURCE: Operation = Operation {
    name: "CompleteFundingSource",
    field: "completeFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CompleteFundingSource($input: CompleteFundingSourceRequest!) {
  completeFundingSource(input: $input) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

/// Refreshes a funding source needing re-authorization.
pub const REFRESH_FUNDING_SOURCE: Operation = Operation {
    name: "RefreshFundingSource",
    field: "refreshFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation RefreshFundingSource($input: RefreshFundingSourceRequest!) {
  refreshFundingSource(input: $input) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

/// Cancels a funding source.
pub const CANCEL_FUNDING_SOURCE: Operation = Operation {
    name: "CancelFundingSource",
    field: "cancelFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CancelFundingSource($input: IdInput!) {
  cancelFundingSource(input: $input) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

/// Cancels a provisional funding source.
pub const CANCEL_PROVISIONAL_FUNDING_SOURCE: Operation = Operation {
    name: "CancelProvisionalFundingSource",
    field: "cancelProvisionalFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CancelProvisionalFundingSource($input: IdInput!) {
  cancelProvisionalFundingSource(input: $input) { ...ProvisionalFundingSource }
}
",
        provisional_funding_source_fragment!()
    ),
};

/// Acknowledges the unfunded balance on a funding source.
pub const REVIEW_UNFUNDED_FUNDING_SOURCE: Operation = Operation {
    name: "ReviewUnfundedFundingSource",
    field: "reviewUnfundedFundingSource",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation ReviewUnfundedFundingSource($input: IdInput!) {
  reviewUnfundedFundingSource(input: $input) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

/// Fetches one funding source.
pub const GET_FUNDING_SOURCE: Operation = Operation {
    name: "GetFundingSource",
    field: "getFundingSource",
    kind: OperationKind::Query,
    document: concat!(
        "query GetFundingSource($id: ID!) {
  getFundingSource(id: $id) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

/// Lists funding sources.
pub const LIST_FUNDING_SOURCES: Operation = Operation {
    name: "ListFundingSources",
    field: "listFundingSources",
    kind: OperationKind::Query,
    document: concat!(
        "query ListFundingSources($limit: Int, $nextToken: String) {
  listFundingSources(limit: $limit, nextToken: $nextToken) {
    items { ...FundingSource }
    nextToken
  }
}
",
        funding_source_fragment!()
    ),
};

/// Fetches one provisional funding source.
pub const GET_PROVISIONAL_FUNDING_SOURCE: Operation = Operation {
    name: "GetProvisionalFundingSource",
    field: "getProvisionalFundingSource",
    kind: OperationKind::Query,
    document: concat!(
        "query GetProvisionalFundingSource($id: ID!) {
  getProvisionalFundingSource(id: $id) { ...ProvisionalFundingSource }
}
",
        provisional_funding_source_fragment!()
    ),
};

/// Lists provisional funding sources.
pub const LIST_PROVISIONAL_FUNDING_SOURCES: Operation = Operation {
    name: "ListProvisionalFundingSources",
    field: "listProvisionalFundingSources",
    kind: OperationKind::Query,
    document: concat!(
        "query ListProvisionalFundingSources($limit: Int, $nextToken: String) {
  listProvisionalFundingSources(limit: $limit, nextToken: $nextToken) {
    items { ...ProvisionalFundingSource }
    nextToken
  }
}
",
        provisional_funding_source_fragment!()
    ),
};

/// Funding source change notifications for one owner.
pub const ON_FUNDING_SOURCE_UPDATE: Operation = Operation {
    name: "OnFundingSourceUpdate",
    field: "onFundingSourceUpdate",
    kind: OperationKind::Subscription,
    document: concat!(
        "subscription OnFundingSourceUpdate($owner: ID!) {
  onFundingSourceUpdate(owner: $owner) { ...FundingSource }
}
",
        funding_source_fragment!()
    ),
};

// ============================================================================
// SECTION: Cards
// ============================================================================

/// Provisions a virtual card.
pub const PROVISION_VIRTUAL_CARD: Operation = Operation {
    name: "ProvisionVirtualCard",
    field: "cardProvision",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation ProvisionVirtualCard($input: CardProvisionRequest!) {
  cardProvision(input: $input) { ...ProvisionalCard }
}
",
        provisional_card_fragment!()
    ),
};

/// Fetches one provisional card.
pub const GET_PROVISIONAL_CARD: Operation = Operation {
    name: "GetProvisionalCard",
    field: "getProvisionalCard",
    kind: OperationKind::Query,
    document: concat!(
        "query GetProvisionalCard($id: ID!) {
  getProvisionalCard(id: $id) { ...ProvisionalCard }
}
",
        provisional_card_fragment!()
    ),
};

/// Lists provisional cards.
pub const LIST_PROVISIONAL_CARDS: Operation = Operation {
    name: "ListProvisionalCards",
    field: "listProvisionalCards",
    kind: OperationKind::Query,
    document: concat!(
        "query ListProvisionalCards($limit: Int, $nextToken: String) {
  listProvisionalCards(limit: $limit, nextToken: $nextToken) {
    items { ...ProvisionalCard }
    nextToken
  }
}
",
        provisional_card_fragment!()
    ),
};

/// Fetches one card.
pub const GET_CARD: Operation = Operation {
    name: "GetCard",
    field: "getCard",
    kind: OperationKind::Query,
    document: concat!(
        "query GetCard($id: ID!) {
  getCard(id: $id) { ...Card }
}
",
        card_fragment!()
    ),
};

/// Lists cards.
pub const LIST_CARDS: Operation = Operation {
    name: "ListCards",
    field: "listCards",
    kind: OperationKind::Query,
    document: concat!(
        "query ListCards($limit: Int, $nextToken: String) {
  listCards(limit: $limit, nextToken: $nextToken) {
    items { ...Card }
    nextToken
  }
}
",
        card_fragment!()
    ),
};

/// Updates cardholder, billing address, or metadata.
pub const UPDATE_CARD: Operation = Operation {
    name: "UpdateCard",
    field: "updateCard",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation UpdateCard($input: CardUpdateRequest!) {
  updateCard(input: $input) { ...Card }
}
",
        card_fragment!()
    ),
};

/// Cancels a card.
pub const CANCEL_CARD: Operation = Operation {
    name: "CancelCard",
    field: "cancelCard",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CancelCard($input: CardCancelRequest!) {
  cancelCard(input: $input) { ...Card }
}
",
        card_fragment!()
    ),
};

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Fetches one transaction.
pub const GET_TRANSACTION: Operation = Operation {
    name: "GetTransaction",
    field: "getTransaction",
    kind: OperationKind::Query,
    document: concat!(
        "query GetTransaction($id: ID!) {
  getTransaction(id: $id) { ...Transaction }
}
",
        transaction_fragment!()
    ),
};

/// Lists transactions for one card.
pub const LIST_TRANSACTIONS_BY_CARD_ID: Operation = Operation {
    name: "ListTransactionsByCardId",
    field: "listTransactionsByCardId",
    kind: OperationKind::Query,
    document: concat!(
        "query ListTransactionsByCardId(
  $cardId: ID!, $limit: Int, $nextToken: String,
  $dateRange: DateRangeInput, $sortOrder: SortOrder
) {
  listTransactionsByCardId(
    cardId: $cardId, limit: $limit, nextToken: $nextToken,
    dateRange: $dateRange, sortOrder: $sortOrder
  ) {
    items { ...Transaction }
    nextToken
  }
}
",
        transaction_fragment!()
    ),
};

/// Lists transactions across all cards.
pub const LIST_TRANSACTIONS: Operation = Operation {
    name: "ListTransactions",
    field: "listTransactions",
    kind: OperationKind::Query,
    document: concat!(
        "query ListTransactions(
  $limit: Int, $nextToken: String, $dateRange: DateRangeInput, $sortOrder: SortOrder
) {
  listTransactions(
    limit: $limit, nextToken: $nextToken, dateRange: $dateRange, sortOrder: $sortOrder
  ) {
    items { ...Transaction }
    nextToken
  }
}
",
        transaction_fragment!()
    ),
};
