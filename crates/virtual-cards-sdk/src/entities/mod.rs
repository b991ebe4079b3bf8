// crates/virtual-cards-sdk/src/entities/mod.rs
// ============================================================================
// Module: Virtual Cards Entities
// Description: Public domain model returned by the virtual cards client.
// Purpose: Provide typed funding sources, cards, transactions, and config.
// Dependencies: time, virtual-cards-codec
// ============================================================================

//! ## Overview
//! Entities are the client-facing shapes produced by
//! [`crate::transformers`] from GraphQL wire records. Timestamps are
//! [`time::OffsetDateTime`], enumerations are closed Rust enums, and opaque
//! provider payloads are already decoded.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod common;
pub mod configuration;
pub mod funding_source;
pub mod transaction;
pub mod virtual_card;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use common::CachePolicy;
pub use common::ConnectionState;
pub use common::CurrencyAmount;
pub use common::ListInput;
pub use common::ListOutput;
pub use common::Owner;
pub use configuration::CurrencyVelocity;
pub use configuration::FundingSourceSupportDetail;
pub use configuration::FundingSourceSupportInfo;
pub use configuration::VirtualCardsConfig;
pub use funding_source::BankAccountFundingSource;
pub use funding_source::BankAccountType;
pub use funding_source::CardType;
pub use funding_source::CompleteFundingSourceInput;
pub use funding_source::CreditCardFundingSource;
pub use funding_source::CreditCardNetwork;
pub use funding_source::FundingSource;
pub use funding_source::FundingSourceFlag;
pub use funding_source::FundingSourceState;
pub use funding_source::ProvisionalFundingSource;
pub use funding_source::ProvisionalFundingSourceState;
pub use funding_source::RefreshFundingSourceInput;
pub use funding_source::SetupFundingSourceInput;
pub use funding_source::TransactionVelocity;
pub use transaction::ChargeState;
pub use transaction::DateRange;
pub use transaction::ListTransactionsInput;
pub use transaction::Markup;
pub use transaction::SortOrder;
pub use transaction::Transaction;
pub use transaction::TransactionDetailCharge;
pub use transaction::TransactionType;
pub use virtual_card::BillingAddress;
pub use virtual_card::CardState;
pub use virtual_card::Expiry;
pub use virtual_card::ProvisionVirtualCardInput;
pub use virtual_card::ProvisionalVirtualCard;
pub use virtual_card::ProvisioningState;
pub use virtual_card::UpdateVirtualCardInput;
pub use virtual_card::VirtualCard;
pub use virtual_cards_codec::FundingSourceType;
