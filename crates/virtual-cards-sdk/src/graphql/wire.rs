// crates/virtual-cards-sdk/src/graphql/wire.rs
// ============================================================================
// Module: GraphQL Wire Records
// Description: Serde shapes of backend inputs and results.
// Purpose: Deserialize GraphQL results before transformation into entities.
// Dependencies: serde, serde_json, virtual-cards-codec
// ============================================================================

//! ## Overview
//! Wire records mirror the backend schema field for field (`camelCase`,
//! epoch-millisecond floats, enum strings). They carry no behavior;
//! [`crate::transformers`] turns them into entities.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use virtual_cards_codec::FundingSourceType;

// ============================================================================
// SECTION: Shared Records
// ============================================================================

/// Secondary owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerWire {
    /// Owner identifier.
    pub id: String,
    /// Owner issuer.
    pub issuer: String,
}

/// Currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmountWire {
    /// Currency code.
    pub currency: String,
    /// Minor units.
    pub amount: i64,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWire<T> {
    /// Page items.
    pub items: Vec<T>,
    /// Continuation token.
    #[serde(default)]
    pub next_token: Option<String>,
}

// ============================================================================
// SECTION: Funding Sources
// ============================================================================

/// Transaction velocity limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionVelocityWire {
    /// Maximum single transaction amount.
    #[serde(default)]
    pub maximum: Option<i64>,
    /// Velocity rules.
    #[serde(default)]
    pub velocity: Vec<String>,
}

/// Credit card funding source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardFundingSourceWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Lifecycle state string.
    pub state: String,
    /// Flag strings.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Funding currency.
    pub currency: String,
    /// Velocity limits.
    #[serde(default)]
    pub transaction_velocity: Option<TransactionVelocityWire>,
    /// Last four digits.
    pub last4: String,
    /// Network string.
    pub network: String,
    /// Card type string.
    pub card_type: String,
}

/// Bank account funding source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountFundingSourceWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Lifecycle state string.
    pub state: String,
    /// Flag strings.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Funding currency.
    pub currency: String,
    /// Velocity limits.
    #[serde(default)]
    pub transaction_velocity: Option<TransactionVelocityWire>,
    /// Account type string.
    pub bank_account_type: String,
    /// Last four digits.
    pub last4: String,
    /// Institution display name.
    pub institution_name: String,
    /// Outstanding unfunded amount.
    #[serde(default)]
    pub unfunded_amount: Option<CurrencyAmountWire>,
}

/// Funding source union discriminated by `__typename`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum FundingSourceWire {
    /// Credit card member.
    CreditCardFundingSource(CreditCardFundingSourceWire),
    /// Bank account member.
    BankAccountFundingSource(BankAccountFundingSourceWire),
}

/// Provisional funding source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionalFundingSourceWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Funding source type string.
    #[serde(rename = "type")]
    pub funding_source_type: String,
    /// Base64 provider payload.
    pub provisioning_data: String,
    /// Lifecycle state string.
    pub state: String,
    /// Last four digits, once known.
    #[serde(default)]
    pub last4: Option<String>,
}

/// Client configuration blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfigurationWire {
    /// Base64 `{"fundingSourceTypes":[...]}` payload.
    pub data: String,
}

// ============================================================================
// SECTION: Cards
// ============================================================================

/// Billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddressWire {
    /// First line.
    pub address_line1: String,
    /// Second line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country code.
    pub country: String,
}

/// Card expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryWire {
    /// Month.
    pub mm: String,
    /// Year.
    pub yyyy: String,
}

/// Virtual card with unsealed details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Secondary owners.
    #[serde(default)]
    pub owners: Vec<OwnerWire>,
    /// Funding source identifier.
    pub funding_source_id: String,
    /// Card currency.
    pub currency: String,
    /// Card state string.
    pub state: String,
    /// Activation time in epoch milliseconds.
    pub activated_at_epoch_ms: f64,
    /// Cancellation time in epoch milliseconds.
    #[serde(default)]
    pub cancelled_at_epoch_ms: Option<f64>,
    /// Last four digits.
    pub last4: String,
    /// Cardholder name.
    #[serde(rename = "cardHolder")]
    pub cardholder: String,
    /// Card number.
    pub pan: String,
    /// Security code.
    pub csc: String,
    /// Billing address.
    #[serde(default)]
    pub billing_address: Option<BillingAddressWire>,
    /// Expiry.
    pub expiry: ExpiryWire,
    /// Client metadata.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Most recent transaction.
    #[serde(default)]
    pub last_transaction: Option<TransactionWire>,
}

/// Provisional card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionalCardWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Client reference.
    pub client_refs: String,
    /// Provisioning state string.
    pub provisioning_state: String,
    /// Issued card.
    #[serde(default)]
    pub card: Option<CardWire>,
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Charge markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupWire {
    /// Percentage in thousandths.
    pub percent: i64,
    /// Flat fee.
    pub flat: i64,
    /// Minimum charge.
    #[serde(default)]
    pub min_charge: Option<i64>,
}

/// Funding charge breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailChargeWire {
    /// Card currency amount.
    pub virtual_card_amount: CurrencyAmountWire,
    /// Markup rule.
    pub markup: MarkupWire,
    /// Markup amount.
    pub markup_amount: CurrencyAmountWire,
    /// Funding source amount.
    pub funding_source_amount: CurrencyAmountWire,
    /// Funding source identifier.
    pub funding_source_id: String,
    /// Statement description.
    pub description: String,
    /// Charge state string.
    #[serde(default)]
    pub state: Option<String>,
}

/// Transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWire {
    /// Identifier.
    pub id: String,
    /// Owner subject.
    pub owner: String,
    /// Record version.
    pub version: u32,
    /// Creation time in epoch milliseconds.
    pub created_at_epoch_ms: f64,
    /// Update time in epoch milliseconds.
    pub updated_at_epoch_ms: f64,
    /// Card identifier.
    pub card_id: String,
    /// Purchase sequence identifier.
    pub sequence_id: String,
    /// Transaction type string.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Billed amount.
    pub billed_amount: CurrencyAmountWire,
    /// Merchant amount.
    pub transacted_amount: CurrencyAmountWire,
    /// Merchant description.
    pub description: String,
    /// Merchant time in epoch milliseconds.
    pub transacted_at_epoch_ms: f64,
    /// Settlement time in epoch milliseconds.
    #[serde(default)]
    pub settled_at_epoch_ms: Option<f64>,
    /// Decline reason.
    #[serde(default)]
    pub decline_reason: Option<String>,
    /// Charge breakdown.
    #[serde(default)]
    pub detail: Vec<TransactionDetailChargeWire>,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Per-currency velocity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyVelocityWire {
    /// Currency code.
    pub currency: String,
    /// Velocity rules.
    pub velocity: Vec<String>,
}

/// Provider product detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceSupportDetailWire {
    /// Card type string.
    pub card_type: String,
}

/// Provider support entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceSupportInfoWire {
    /// Provider name.
    pub provider_type: String,
    /// Funding source type string.
    pub funding_source_type: String,
    /// Network or rail.
    pub network: String,
    /// Product details.
    #[serde(default)]
    pub detail: Vec<FundingSourceSupportDetailWire>,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualCardsConfigWire {
    /// Funding source velocity rules.
    #[serde(default)]
    pub max_funding_source_velocity: Vec<String>,
    /// Funding source failure velocity rules.
    #[serde(default)]
    pub max_funding_source_failure_velocity: Vec<String>,
    /// Card creation velocity rules.
    #[serde(default)]
    pub max_card_creation_velocity: Vec<String>,
    /// Transaction velocity per currency.
    #[serde(default)]
    pub max_transaction_velocity: Vec<CurrencyVelocityWire>,
    /// Maximum transaction amount per currency.
    #[serde(default)]
    pub max_transaction_amount: Vec<CurrencyAmountWire>,
    /// Card currencies.
    #[serde(default)]
    pub virtual_card_currencies: Vec<String>,
    /// Provider support matrix.
    #[serde(default)]
    pub funding_source_support_info: Vec<FundingSourceSupportInfoWire>,
    /// Bank account expendable flag.
    #[serde(default)]
    pub bank_account_funding_source_expendable_enabled: bool,
    /// Client configuration blob.
    #[serde(default)]
    pub funding_source_client_configuration: Option<ClientConfigurationWire>,
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// `SetupFundingSourceRequest` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFundingSourceRequest {
    /// Funding source type.
    #[serde(rename = "type")]
    pub funding_source_type: FundingSourceType,
    /// Funding currency.
    pub currency: String,
    /// Providers the client supports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_providers: Option<Vec<String>>,
    /// Base64 setup data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_data: Option<String>,
}

/// `CompleteFundingSourceRequest` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFundingSourceRequest {
    /// Provisional funding source identifier.
    pub id: String,
    /// Base64 completion data.
    pub completion_data: String,
    /// Move cards onto the new funding source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_card_funding_source: Option<bool>,
}

/// `RefreshFundingSourceRequest` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshFundingSourceRequest {
    /// Funding source identifier.
    pub id: String,
    /// Base64 refresh data.
    pub refresh_data: String,
    /// Authorization text language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// `IdInput` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdInput {
    /// Target identifier.
    pub id: String,
}

/// `CardProvisionRequest` input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProvisionRequest {
    /// Client reference.
    pub client_refs: String,
    /// Ownership proofs.
    pub owner_proofs: Vec<String>,
    /// Funding source identifier.
    pub funding_source_id: String,
    /// Cardholder name.
    pub card_holder: String,
    /// Card currency.
    pub currency: String,
    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddressWire>,
    /// Client metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// `CardUpdateRequest` input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdateRequest {
    /// Card identifier.
    pub id: String,
    /// Optimistic concurrency version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u32>,
    /// Cardholder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,
    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddressWire>,
    /// Client metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// `DateRangeInput` input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeInput {
    /// Window start in epoch milliseconds.
    pub start_date_epoch_ms: f64,
    /// Window end in epoch milliseconds.
    pub end_date_epoch_ms: f64,
}
