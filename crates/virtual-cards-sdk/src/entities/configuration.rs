// crates/virtual-cards-sdk/src/entities/configuration.rs
// ============================================================================
// Module: Service Configuration Entities
// Description: Limits and provider support reported by the backend.
// Purpose: Let clients size requests and pick providers before calling setup.
// Dependencies: virtual-cards-codec
// ============================================================================

//! ## Overview
//! [`VirtualCardsConfig`] is fetched once per session and describes velocity
//! limits, supported currencies, and which providers back each funding source
//! type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use virtual_cards_codec::FundingSourceClientConfiguration;
use virtual_cards_codec::FundingSourceType;

use crate::entities::common::CurrencyAmount;
use crate::entities::funding_source::CardType;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Velocity rules for one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyVelocity {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Velocity rules in backend notation.
    pub velocity: Vec<String>,
}

/// Card product detail supported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingSourceSupportDetail {
    /// Supported card product type.
    pub card_type: CardType,
}

/// Provider support entry for one funding source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingSourceSupportInfo {
    /// Provider name (for example `stripe`).
    pub provider_type: String,
    /// Funding source type the provider backs.
    pub funding_source_type: FundingSourceType,
    /// Card network or bank rail.
    pub network: String,
    /// Supported product details.
    pub detail: Vec<FundingSourceSupportDetail>,
}

/// Service limits and capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualCardsConfig {
    /// Funding source creation velocity rules.
    pub max_funding_source_velocity: Vec<String>,
    /// Failed funding source creation velocity rules.
    pub max_funding_source_failure_velocity: Vec<String>,
    /// Card creation velocity rules.
    pub max_card_creation_velocity: Vec<String>,
    /// Per-currency transaction velocity rules.
    pub max_transaction_velocity: Vec<CurrencyVelocity>,
    /// Per-currency maximum transaction amount.
    pub max_transaction_amount: Vec<CurrencyAmount>,
    /// Currencies cards may be issued in.
    pub virtual_card_currencies: Vec<String>,
    /// Provider support matrix.
    pub funding_source_support_info: Vec<FundingSourceSupportInfo>,
    /// Whether bank account funding sources may go unfunded.
    pub bank_account_funding_source_expendable_enabled: bool,
    /// Provider client configuration (publishable keys).
    pub funding_source_client_configuration: Vec<FundingSourceClientConfiguration>,
}
