// crates/virtual-cards-codec/src/provider.rs
// ============================================================================
// Module: Virtual Cards Providers
// Description: Provider names and funding source types shared by payloads.
// Purpose: Keep discriminant literals in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Provider payloads are discriminated by `(provider, version, type)`. This
//! module holds the literal values the registries match on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Stripe provider name.
pub const STRIPE_PROVIDER: &str = "stripe";
/// Checkout.com provider name.
pub const CHECKOUT_PROVIDER: &str = "checkout";
/// Only payload version currently understood for any provider.
pub const PAYLOAD_VERSION_1: u32 = 1;

// ============================================================================
// SECTION: Funding Source Types
// ============================================================================

/// Kind of funding source a payload describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingSourceType {
    /// Credit or debit card.
    #[default]
    CreditCard,
    /// Bank account.
    BankAccount,
}

impl FundingSourceType {
    /// Returns the wire string for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::BankAccount => "BANK_ACCOUNT",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREDIT_CARD" => Some(Self::CreditCard),
            "BANK_ACCOUNT" => Some(Self::BankAccount),
            _ => None,
        }
    }
}

impl fmt::Display for FundingSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
