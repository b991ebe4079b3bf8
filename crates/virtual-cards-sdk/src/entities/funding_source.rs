// crates/virtual-cards-sdk/src/entities/funding_source.rs
// ============================================================================
// Module: Funding Source Entities
// Description: Funding sources, provisional funding sources, and their inputs.
// Purpose: Model the funding source lifecycle from setup to cancellation.
// Dependencies: time, virtual-cards-codec
// ============================================================================

//! ## Overview
//! A funding source starts as a [`ProvisionalFundingSource`] returned by
//! setup, carrying provider [`ProvisioningData`] the client uses to collect
//! payment details. Completing it yields a [`FundingSource`], either a
//! credit card or a bank account.
//! Invariants:
//! - `FundingSource::funding_source_type` always agrees with the variant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use time::OffsetDateTime;
use virtual_cards_codec::CompletionData;
use virtual_cards_codec::FundingSourceType;
use virtual_cards_codec::ProvisioningData;
use virtual_cards_codec::RefreshData;
use virtual_cards_codec::SetupData;

use crate::entities::common::CurrencyAmount;
use crate::identifiers::FundingSourceId;
use crate::identifiers::OwnerId;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Lifecycle state of a funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingSourceState {
    /// Usable for funding card transactions.
    Active,
    /// Cancelled or otherwise unusable.
    Inactive,
    /// Needs a refresh (for example, bank re-authorization) before use.
    Refresh,
}

impl FundingSourceState {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Refresh => "REFRESH",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "REFRESH" => Some(Self::Refresh),
            _ => None,
        }
    }
}

impl fmt::Display for FundingSourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition flags attached to a funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingSourceFlag {
    /// Charges could not be collected; the balance is owed.
    Unfunded,
    /// A refund is pending against the funding source.
    Refund,
}

impl FundingSourceFlag {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unfunded => "UNFUNDED",
            Self::Refund => "REFUND",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UNFUNDED" => Some(Self::Unfunded),
            "REFUND" => Some(Self::Refund),
            _ => None,
        }
    }
}

/// Lifecycle state of a provisional funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionalFundingSourceState {
    /// Setup accepted; waiting for client-side collection.
    Provisioning,
    /// Completion submitted; waiting on the provider.
    Pending,
    /// Converted into a funding source.
    Completed,
    /// Setup or completion failed.
    Failed,
}

impl ProvisionalFundingSourceState {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provisioning => "PROVISIONING",
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PROVISIONING" => Some(Self::Provisioning),
            "PENDING" => Some(Self::Pending),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Card network of a credit card funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditCardNetwork {
    /// American Express.
    Amex,
    /// Diners Club.
    Diners,
    /// Discover.
    Discover,
    /// JCB.
    Jcb,
    /// Mastercard.
    Mastercard,
    /// `UnionPay`.
    Unionpay,
    /// Visa.
    Visa,
    /// Any other network.
    Other,
}

impl CreditCardNetwork {
    /// Parses a wire string; unknown networks are [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "AMEX" => Self::Amex,
            "DINERS" => Self::Diners,
            "DISCOVER" => Self::Discover,
            "JCB" => Self::Jcb,
            "MASTERCARD" => Self::Mastercard,
            "UNIONPAY" => Self::Unionpay,
            "VISA" => Self::Visa,
            _ => Self::Other,
        }
    }
}

/// Card product type of a credit card funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Prepaid card.
    Prepaid,
    /// Unknown product type.
    Other,
}

impl CardType {
    /// Parses a wire string; unknown types are [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "CREDIT" => Self::Credit,
            "DEBIT" => Self::Debit,
            "PREPAID" => Self::Prepaid,
            _ => Self::Other,
        }
    }
}

/// Kind of bank account backing a bank account funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankAccountType {
    /// Savings account.
    Savings,
    /// Checking account.
    Checking,
    /// Unknown account type.
    Other,
}

impl BankAccountType {
    /// Parses a wire string; unknown types are [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "SAVING" | "SAVINGS" => Self::Savings,
            "CHECKING" => Self::Checking,
            _ => Self::Other,
        }
    }
}

// ============================================================================
// SECTION: Funding Sources
// ============================================================================

/// Velocity limits applied to transactions funded by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionVelocity {
    /// Maximum single transaction amount in minor units.
    pub maximum: Option<i64>,
    /// Velocity rules in backend notation (for example `10000/P1D`).
    pub velocity: Vec<String>,
}

/// Credit card funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCardFundingSource {
    /// Funding source identifier.
    pub id: FundingSourceId,
    /// Owning user.
    pub owner: OwnerId,
    /// Record version, incremented on each update.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Lifecycle state.
    pub state: FundingSourceState,
    /// Condition flags.
    pub flags: Vec<FundingSourceFlag>,
    /// Funding currency.
    pub currency: String,
    /// Velocity limits, when configured.
    pub transaction_velocity: Option<TransactionVelocity>,
    /// Last four digits of the card number.
    pub last4: String,
    /// Card network.
    pub network: CreditCardNetwork,
    /// Card product type.
    pub card_type: CardType,
}

/// Bank account funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountFundingSource {
    /// Funding source identifier.
    pub id: FundingSourceId,
    /// Owning user.
    pub owner: OwnerId,
    /// Record version, incremented on each update.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Lifecycle state.
    pub state: FundingSourceState,
    /// Condition flags.
    pub flags: Vec<FundingSourceFlag>,
    /// Funding currency.
    pub currency: String,
    /// Velocity limits, when configured.
    pub transaction_velocity: Option<TransactionVelocity>,
    /// Account type.
    pub bank_account_type: BankAccountType,
    /// Last four digits of the account number.
    pub last4: String,
    /// Institution display name.
    pub institution_name: String,
    /// Amount owed while the source is flagged unfunded.
    pub unfunded_amount: Option<CurrencyAmount>,
}

/// Completed funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingSource {
    /// Card-backed source.
    CreditCard(CreditCardFundingSource),
    /// Bank-account-backed source.
    BankAccount(BankAccountFundingSource),
}

impl FundingSource {
    /// Returns the funding source identifier.
    #[must_use]
    pub const fn id(&self) -> &FundingSourceId {
        match self {
            Self::CreditCard(source) => &source.id,
            Self::BankAccount(source) => &source.id,
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> FundingSourceState {
        match self {
            Self::CreditCard(source) => source.state,
            Self::BankAccount(source) => source.state,
        }
    }

    /// Returns the condition flags.
    #[must_use]
    pub fn flags(&self) -> &[FundingSourceFlag] {
        match self {
            Self::CreditCard(source) => &source.flags,
            Self::BankAccount(source) => &source.flags,
        }
    }

    /// Returns the funding source type matching the variant.
    #[must_use]
    pub const fn funding_source_type(&self) -> FundingSourceType {
        match self {
            Self::CreditCard(_) => FundingSourceType::CreditCard,
            Self::BankAccount(_) => FundingSourceType::BankAccount,
        }
    }
}

/// Funding source in the middle of setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionalFundingSource {
    /// Identifier; becomes the funding source id on completion.
    pub id: FundingSourceId,
    /// Owning user.
    pub owner: OwnerId,
    /// Record version.
    pub version: u32,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last update time.
    pub updated_at: OffsetDateTime,
    /// Kind of funding source being set up.
    pub funding_source_type: FundingSourceType,
    /// Lifecycle state.
    pub state: ProvisionalFundingSourceState,
    /// Decoded provider payload.
    pub provisioning_data: ProvisioningData,
    /// Last four digits, once known.
    pub last4: Option<String>,
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Input for starting funding source setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFundingSourceInput {
    /// Kind of funding source to set up.
    pub funding_source_type: FundingSourceType,
    /// Funding currency.
    pub currency: String,
    /// Providers the client can drive, in preference order.
    pub supported_providers: Option<Vec<String>>,
    /// Client application details forwarded to the provider.
    pub setup_data: Option<SetupData>,
}

/// Input for completing a provisional funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteFundingSourceInput {
    /// Provisional funding source to complete.
    pub id: FundingSourceId,
    /// Provider-collected completion data.
    pub completion_data: CompletionData,
    /// Move existing cards onto the new funding source.
    pub update_card_funding_source: Option<bool>,
}

/// Input for refreshing a funding source in the `Refresh` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFundingSourceInput {
    /// Funding source to refresh.
    pub id: FundingSourceId,
    /// Provider-collected refresh data.
    pub refresh_data: RefreshData,
    /// Language for any returned authorization text.
    pub language: Option<String>,
}
