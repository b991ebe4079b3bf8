// crates/virtual-cards-sdk/src/entities/transaction.rs
// ============================================================================
// Module: Transaction Entities
// Description: Card transactions and their funding charge breakdown.
// Purpose: Model pending, complete, refund, and decline records.
// Dependencies: time
// ============================================================================

//! ## Overview
//! A card purchase produces one or more [`Transaction`] records sharing a
//! `sequence_id`: a pending authorization, then a complete (or decline)
//! record, and possibly refunds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::entities::common::CachePolicy;
use crate::entities::common::CurrencyAmount;
use crate::identifiers::FundingSourceId;
use crate::identifiers::OwnerId;
use crate::identifiers::TransactionId;
use crate::identifiers::VirtualCardId;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Kind of transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Authorization not yet settled.
    Pending,
    /// Settled charge.
    Complete,
    /// Refund of an earlier charge.
    Refund,
    /// Declined authorization.
    Decline,
}

impl TransactionType {
    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "COMPLETE" => Some(Self::Complete),
            "REFUND" => Some(Self::Refund),
            "DECLINE" => Some(Self::Decline),
            _ => None,
        }
    }
}

/// Collection state of a funding source charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeState {
    /// Charge submitted to the funding source.
    Pending,
    /// Charge collected.
    Cleared,
    /// Funding source lacked funds.
    InsufficientFunds,
    /// Charge failed for another reason.
    Failed,
}

impl ChargeState {
    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "CLEARED" => Some(Self::Cleared),
            "INSUFFICIENT_FUNDS" => Some(Self::InsufficientFunds),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Fee markup applied when charging the funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup {
    /// Percentage in thousandths of a percent.
    pub percent: i64,
    /// Flat fee in minor units.
    pub flat: i64,
    /// Minimum total charge in minor units.
    pub minimum_charge: Option<i64>,
}

/// Breakdown of how a transaction was charged to a funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetailCharge {
    /// Amount in the card's currency.
    pub virtual_card_amount: CurrencyAmount,
    /// Markup rule applied.
    pub markup: Markup,
    /// Markup amount charged.
    pub markup_amount: CurrencyAmount,
    /// Total charged to the funding source.
    pub funding_source_amount: CurrencyAmount,
    /// Funding source charged.
    pub funding_source_id: FundingSourceId,
    /// Statement description.
    pub description: String,
    /// Collection state.
    pub state: Option<ChargeState>,
}

/// Card transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Owning user.
    pub owner: OwnerId,
    /// Record version.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Card the transaction was made with.
    pub card_id: VirtualCardId,
    /// Identifier shared by all records of one purchase.
    pub sequence_id: String,
    /// Kind of record.
    pub transaction_type: TransactionType,
    /// Amount billed in the card currency.
    pub billed_amount: CurrencyAmount,
    /// Amount in the merchant currency.
    pub transacted_amount: CurrencyAmount,
    /// Merchant description.
    pub description: String,
    /// Time the transaction occurred at the merchant.
    pub transacted_at: OffsetDateTime,
    /// Settlement time, once settled.
    pub settled_at: Option<OffsetDateTime>,
    /// Decline reason for declined authorizations.
    pub decline_reason: Option<String>,
    /// Funding charge breakdown.
    pub details: Vec<TransactionDetailCharge>,
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Inclusive time window for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Window start.
    pub start: OffsetDateTime,
    /// Window end.
    pub end: OffsetDateTime,
}

/// Listing options for transaction queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTransactionsInput {
    /// Cache policy for the query.
    pub cache_policy: CachePolicy,
    /// Maximum number of items per page.
    pub limit: Option<u32>,
    /// Token returned by the previous page.
    pub next_token: Option<String>,
    /// Restrict results to a time window.
    pub date_range: Option<DateRange>,
    /// Result ordering.
    pub sort_order: SortOrder,
}
