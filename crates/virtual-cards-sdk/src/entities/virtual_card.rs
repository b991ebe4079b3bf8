// crates/virtual-cards-sdk/src/entities/virtual_card.rs
// ============================================================================
// Module: Virtual Card Entities
// Description: Virtual cards, provisional cards, and their inputs.
// Purpose: Model card provisioning, updates, and cancellation.
// Dependencies: serde_json, time
// ============================================================================

//! ## Overview
//! Provisioning a card is asynchronous on the backend: the client receives a
//! [`ProvisionalVirtualCard`] whose `card` is populated once
//! [`ProvisioningState::Completed`] is reached.
//! Card details are delivered already unsealed by the GraphQL client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use time::OffsetDateTime;

use crate::entities::common::Owner;
use crate::entities::transaction::Transaction;
use crate::identifiers::FundingSourceId;
use crate::identifiers::OwnerId;
use crate::identifiers::VirtualCardId;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Lifecycle state of a virtual card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardState {
    /// Card is issued and usable.
    Issued,
    /// Card issuance failed.
    Failed,
    /// Card was cancelled.
    Closed,
    /// Card is temporarily unusable.
    Suspended,
}

impl CardState {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issued => "ISSUED",
            Self::Failed => "FAILED",
            Self::Closed => "CLOSED",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ISSUED" => Some(Self::Issued),
            "FAILED" => Some(Self::Failed),
            "CLOSED" => Some(Self::Closed),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Provisioning progress of a provisional card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisioningState {
    /// Card is being provisioned.
    Provisioning,
    /// Card is provisioned and attached.
    Completed,
    /// Provisioning failed.
    Failed,
}

impl ProvisioningState {
    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PROVISIONING" => Some(Self::Provisioning),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Cards
// ============================================================================

/// Card billing address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingAddress {
    /// First address line.
    pub address_line1: String,
    /// Second address line.
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166 country code.
    pub country: String,
}

/// Card expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    /// Two-digit month.
    pub mm: String,
    /// Four-digit year.
    pub yyyy: String,
}

/// Issued virtual card.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualCard {
    /// Card identifier.
    pub id: VirtualCardId,
    /// Owning user.
    pub owner: OwnerId,
    /// Additional owners.
    pub owners: Vec<Owner>,
    /// Record version, incremented on each update.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Funding source charged for card transactions.
    pub funding_source_id: FundingSourceId,
    /// Card currency.
    pub currency: String,
    /// Lifecycle state.
    pub state: CardState,
    /// Activation time.
    pub activated_at: OffsetDateTime,
    /// Cancellation time, once cancelled.
    pub cancelled_at: Option<OffsetDateTime>,
    /// Last four digits of the PAN.
    pub last4: String,
    /// Name embossed on the card.
    pub cardholder: String,
    /// Full card number.
    pub pan: String,
    /// Card security code.
    pub csc: String,
    /// Billing address, when set.
    pub billing_address: Option<BillingAddress>,
    /// Card expiry.
    pub expiry: Expiry,
    /// Client-defined metadata.
    pub metadata: Option<Value>,
    /// Most recent transaction, when any.
    pub last_transaction: Option<Box<Transaction>>,
}

/// Card in the middle of provisioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalVirtualCard {
    /// Provisional card identifier.
    pub id: VirtualCardId,
    /// Owning user.
    pub owner: OwnerId,
    /// Record version.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Client reference supplied at provisioning time.
    pub client_refs: String,
    /// Provisioning progress.
    pub provisioning_state: ProvisioningState,
    /// Issued card once provisioning completes.
    pub card: Option<VirtualCard>,
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Input for provisioning a virtual card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionVirtualCardInput {
    /// Client reference echoed back on the provisional card.
    pub client_refs: String,
    /// Ownership proofs authorizing the card.
    pub owner_proofs: Vec<String>,
    /// Funding source to charge.
    pub funding_source_id: FundingSourceId,
    /// Name embossed on the card.
    pub cardholder: String,
    /// Card currency.
    pub currency: String,
    /// Optional billing address.
    pub billing_address: Option<BillingAddress>,
    /// Optional client-defined metadata.
    pub metadata: Option<Value>,
}

/// Input for updating a virtual card.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateVirtualCardInput {
    /// Card to update.
    pub id: VirtualCardId,
    /// Optimistic concurrency check against the current version.
    pub expected_version: Option<u32>,
    /// New cardholder name.
    pub cardholder: Option<String>,
    /// New billing address.
    pub billing_address: Option<BillingAddress>,
    /// New client-defined metadata.
    pub metadata: Option<Value>,
}
