// crates/virtual-cards-sdk/src/transformers.rs
// ============================================================================
// Module: Wire Transformers
// Description: Conversions between GraphQL wire records and entities.
// Purpose: Keep parsing of timestamps, enums, and provider blobs in one place.
// Dependencies: time, virtual-cards-codec
// ============================================================================

//! ## Overview
//! Pure functions. Result records become entities: epoch-millisecond floats
//! become [`OffsetDateTime`], enum strings are parsed, and provider payloads
//! are decoded through the codec. Entity inputs become wire requests with
//! provider payloads encoded as Base64 JSON.
//! Invariants:
//! - An unknown enum string or an out-of-range timestamp is
//!   [`VirtualCardsError::UnexpectedResponse`]; a bad provider payload is
//!   [`VirtualCardsError::Decode`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Duration;
use time::OffsetDateTime;
use virtual_cards_codec::FundingSourceClientConfiguration;
use virtual_cards_codec::FundingSourceType;
use virtual_cards_codec::decode_client_configuration;
use virtual_cards_codec::decode_provisioning_data;

use crate::entities::BankAccountFundingSource;
use crate::entities::BankAccountType;
use crate::entities::BillingAddress;
use crate::entities::CardState;
use crate::entities::CardType;
use crate::entities::ChargeState;
use crate::entities::CompleteFundingSourceInput;
use crate::entities::CreditCardFundingSource;
use crate::entities::CreditCardNetwork;
use crate::entities::CurrencyAmount;
use crate::entities::CurrencyVelocity;
use crate::entities::DateRange;
use crate::entities::Expiry;
use crate::entities::FundingSource;
use crate::entities::FundingSourceFlag;
use crate::entities::FundingSourceState;
use crate::entities::FundingSourceSupportDetail;
use crate::entities::FundingSourceSupportInfo;
use crate::entities::ListOutput;
use crate::entities::Markup;
use crate::entities::Owner;
use crate::entities::ProvisionVirtualCardInput;
use crate::entities::ProvisionalFundingSource;
use crate::entities::ProvisionalFundingSourceState;
use crate::entities::ProvisionalVirtualCard;
use crate::entities::ProvisioningState;
use crate::entities::RefreshFundingSourceInput;
use crate::entities::SetupFundingSourceInput;
use crate::entities::Transaction;
use crate::entities::TransactionDetailCharge;
use crate::entities::TransactionType;
use crate::entities::TransactionVelocity;
use crate::entities::UpdateVirtualCardInput;
use crate::entities::VirtualCard;
use crate::entities::VirtualCardsConfig;
use crate::errors::VirtualCardsError;
use crate::graphql::wire::BankAccountFundingSourceWire;
use crate::graphql::wire::BillingAddressWire;
use crate::graphql::wire::CardProvisionRequest;
use crate::graphql::wire::CardUpdateRequest;
use crate::graphql::wire::CardWire;
use crate::graphql::wire::ClientConfigurationWire;
use crate::graphql::wire::CompleteFundingSourceRequest;
use crate::graphql::wire::CreditCardFundingSourceWire;
use crate::graphql::wire::CurrencyAmountWire;
use crate::graphql::wire::DateRangeInput;
use crate::graphql::wire::FundingSourceWire;
use crate::graphql::wire::ListWire;
use crate::graphql::wire::ProvisionalCardWire;
use crate::graphql::wire::ProvisionalFundingSourceWire;
use crate::graphql::wire::RefreshFundingSourceRequest;
use crate::graphql::wire::SetupFundingSourceRequest;
use crate::graphql::wire::TransactionVelocityWire;
use crate::graphql::wire::TransactionWire;
use crate::graphql::wire::VirtualCardsConfigWire;
use crate::identifiers::FundingSourceId;
use crate::identifiers::OwnerId;
use crate::identifiers::TransactionId;
use crate::identifiers::VirtualCardId;

// ============================================================================
// SECTION: Scalars
// ============================================================================

/// Milliseconds per second.
const MILLIS_PER_SECOND: f64 = 1000.0;

/// Converts epoch milliseconds into a UTC timestamp.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for non-finite or
/// out-of-range values.
pub fn timestamp_from_epoch_ms(epoch_ms: f64) -> Result<OffsetDateTime, VirtualCardsError> {
    Duration::checked_seconds_f64(epoch_ms / MILLIS_PER_SECOND)
        .and_then(|offset| OffsetDateTime::UNIX_EPOCH.checked_add(offset))
        .ok_or_else(|| {
            VirtualCardsError::UnexpectedResponse(format!("invalid epoch milliseconds: {epoch_ms}"))
        })
}

/// Converts a timestamp into epoch milliseconds.
#[must_use]
pub fn epoch_ms_from_timestamp(timestamp: OffsetDateTime) -> f64 {
    (timestamp - OffsetDateTime::UNIX_EPOCH).as_seconds_f64() * MILLIS_PER_SECOND
}

/// Converts an optional epoch-milliseconds value.
fn optional_timestamp(epoch_ms: Option<f64>) -> Result<Option<OffsetDateTime>, VirtualCardsError> {
    epoch_ms.map(timestamp_from_epoch_ms).transpose()
}

/// Parses a closed enum string, naming the field on failure.
fn parse_enum<T>(
    field: &str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, VirtualCardsError> {
    parse(value).ok_or_else(|| {
        VirtualCardsError::UnexpectedResponse(format!("unknown {field} value: {value}"))
    })
}

/// Converts a currency amount.
fn currency_amount(wire: CurrencyAmountWire) -> CurrencyAmount {
    CurrencyAmount::new(wire.currency, wire.amount)
}

/// Converts velocity limits.
fn transaction_velocity(wire: Option<TransactionVelocityWire>) -> Option<TransactionVelocity> {
    wire.map(|velocity| TransactionVelocity {
        maximum: velocity.maximum,
        velocity: velocity.velocity,
    })
}

/// Parses funding source flags.
fn flags(values: &[String]) -> Result<Vec<FundingSourceFlag>, VirtualCardsError> {
    values
        .iter()
        .map(|flag| parse_enum("funding source flag", flag, FundingSourceFlag::parse))
        .collect()
}

/// Converts one page of results.
///
/// # Errors
///
/// Returns the first item conversion error.
pub fn list<W, E>(
    wire: ListWire<W>,
    transform: fn(W) -> Result<E, VirtualCardsError>,
) -> Result<ListOutput<E>, VirtualCardsError> {
    let items = wire.items.into_iter().map(transform).collect::<Result<Vec<_>, _>>()?;
    Ok(ListOutput {
        items,
        next_token: wire.next_token,
    })
}

// ============================================================================
// SECTION: Funding Sources
// ============================================================================

/// Converts a funding source union member.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for unknown states,
/// flags, or timestamps.
pub fn funding_source(wire: FundingSourceWire) -> Result<FundingSource, VirtualCardsError> {
    match wire {
        FundingSourceWire::CreditCardFundingSource(source) => {
            credit_card_funding_source(source).map(FundingSource::CreditCard)
        }
        FundingSourceWire::BankAccountFundingSource(source) => {
            bank_account_funding_source(source).map(FundingSource::BankAccount)
        }
    }
}

/// Converts a credit card funding source.
fn credit_card_funding_source(
    wire: CreditCardFundingSourceWire,
) -> Result<CreditCardFundingSource, VirtualCardsError> {
    Ok(CreditCardFundingSource {
        id: FundingSourceId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        state: parse_enum("funding source state", &wire.state, FundingSourceState::parse)?,
        flags: flags(&wire.flags)?,
        currency: wire.currency,
        transaction_velocity: transaction_velocity(wire.transaction_velocity),
        last4: wire.last4,
        network: CreditCardNetwork::parse(&wire.network),
        card_type: CardType::parse(&wire.card_type),
    })
}

/// Converts a bank account funding source.
fn bank_account_funding_source(
    wire: BankAccountFundingSourceWire,
) -> Result<BankAccountFundingSource, VirtualCardsError> {
    Ok(BankAccountFundingSource {
        id: FundingSourceId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        state: parse_enum("funding source state", &wire.state, FundingSourceState::parse)?,
        flags: flags(&wire.flags)?,
        currency: wire.currency,
        transaction_velocity: transaction_velocity(wire.transaction_velocity),
        bank_account_type: BankAccountType::parse(&wire.bank_account_type),
        last4: wire.last4,
        institution_name: wire.institution_name,
        unfunded_amount: wire.unfunded_amount.map(currency_amount),
    })
}

/// Converts a provisional funding source, decoding its provisioning data.
///
/// # Errors
///
/// Returns [`VirtualCardsError::Decode`] when the provisioning data cannot be
/// decoded and [`VirtualCardsError::UnexpectedResponse`] for unknown enum
/// strings or timestamps.
pub fn provisional_funding_source(
    wire: ProvisionalFundingSourceWire,
) -> Result<ProvisionalFundingSource, VirtualCardsError> {
    Ok(ProvisionalFundingSource {
        id: FundingSourceId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        funding_source_type: parse_enum(
            "funding source type",
            &wire.funding_source_type,
            FundingSourceType::parse,
        )?,
        state: parse_enum(
            "provisional funding source state",
            &wire.state,
            ProvisionalFundingSourceState::parse,
        )?,
        provisioning_data: decode_provisioning_data(&wire.provisioning_data)?,
        last4: wire.last4,
    })
}

// ============================================================================
// SECTION: Cards
// ============================================================================

/// Converts a billing address.
fn billing_address(wire: BillingAddressWire) -> BillingAddress {
    BillingAddress {
        address_line1: wire.address_line1,
        address_line2: wire.address_line2,
        city: wire.city,
        state: wire.state,
        postal_code: wire.postal_code,
        country: wire.country,
    }
}

/// Converts a billing address into its wire form.
fn billing_address_wire(address: BillingAddress) -> BillingAddressWire {
    BillingAddressWire {
        address_line1: address.address_line1,
        address_line2: address.address_line2,
        city: address.city,
        state: address.state,
        postal_code: address.postal_code,
        country: address.country,
    }
}

/// Converts a virtual card.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for unknown states or
/// timestamps, including those of the embedded last transaction.
pub fn virtual_card(wire: CardWire) -> Result<VirtualCard, VirtualCardsError> {
    let last_transaction = wire.last_transaction.map(transaction).transpose()?.map(Box::new);
    Ok(VirtualCard {
        id: VirtualCardId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        owners: wire
            .owners
            .into_iter()
            .map(|owner| Owner {
                id: OwnerId::new(owner.id),
                issuer: owner.issuer,
            })
            .collect(),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        funding_source_id: FundingSourceId::new(wire.funding_source_id),
        currency: wire.currency,
        state: parse_enum("card state", &wire.state, CardState::parse)?,
        activated_at: timestamp_from_epoch_ms(wire.activated_at_epoch_ms)?,
        cancelled_at: optional_timestamp(wire.cancelled_at_epoch_ms)?,
        last4: wire.last4,
        cardholder: wire.cardholder,
        pan: wire.pan,
        csc: wire.csc,
        billing_address: wire.billing_address.map(billing_address),
        expiry: Expiry {
            mm: wire.expiry.mm,
            yyyy: wire.expiry.yyyy,
        },
        metadata: wire.metadata,
        last_transaction,
    })
}

/// Converts a provisional card.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for unknown states or
/// timestamps.
pub fn provisional_card(
    wire: ProvisionalCardWire,
) -> Result<ProvisionalVirtualCard, VirtualCardsError> {
    Ok(ProvisionalVirtualCard {
        id: VirtualCardId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        client_refs: wire.client_refs,
        provisioning_state: parse_enum(
            "provisioning state",
            &wire.provisioning_state,
            ProvisioningState::parse,
        )?,
        card: wire.card.map(virtual_card).transpose()?,
    })
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Converts a transaction.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for unknown types,
/// charge states, or timestamps.
pub fn transaction(wire: TransactionWire) -> Result<Transaction, VirtualCardsError> {
    let details = wire
        .detail
        .into_iter()
        .map(|charge| -> Result<TransactionDetailCharge, VirtualCardsError> {
            let state = charge
                .state
                .as_deref()
                .map(|state| parse_enum("charge state", state, ChargeState::parse))
                .transpose()?;
            Ok(TransactionDetailCharge {
                virtual_card_amount: currency_amount(charge.virtual_card_amount),
                markup: Markup {
                    percent: charge.markup.percent,
                    flat: charge.markup.flat,
                    minimum_charge: charge.markup.min_charge,
                },
                markup_amount: currency_amount(charge.markup_amount),
                funding_source_amount: currency_amount(charge.funding_source_amount),
                funding_source_id: FundingSourceId::new(charge.funding_source_id),
                description: charge.description,
                state,
            })
        })
        .collect::<Result<Vec<_>, VirtualCardsError>>()?;
    Ok(Transaction {
        id: TransactionId::new(wire.id),
        owner: OwnerId::new(wire.owner),
        version: wire.version,
        created_at: timestamp_from_epoch_ms(wire.created_at_epoch_ms)?,
        updated_at: timestamp_from_epoch_ms(wire.updated_at_epoch_ms)?,
        card_id: VirtualCardId::new(wire.card_id),
        sequence_id: wire.sequence_id,
        transaction_type: parse_enum(
            "transaction type",
            &wire.transaction_type,
            TransactionType::parse,
        )?,
        billed_amount: currency_amount(wire.billed_amount),
        transacted_amount: currency_amount(wire.transacted_amount),
        description: wire.description,
        transacted_at: timestamp_from_epoch_ms(wire.transacted_at_epoch_ms)?,
        settled_at: optional_timestamp(wire.settled_at_epoch_ms)?,
        decline_reason: wire.decline_reason,
        details,
    })
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Decodes the provider client configuration blob.
///
/// # Errors
///
/// Returns [`VirtualCardsError::Decode`] when the blob cannot be decoded.
pub fn client_configuration(
    wire: &ClientConfigurationWire,
) -> Result<Vec<FundingSourceClientConfiguration>, VirtualCardsError> {
    Ok(decode_client_configuration(&wire.data)?)
}

/// Converts the service configuration.
///
/// # Errors
///
/// Returns [`VirtualCardsError::UnexpectedResponse`] for unknown funding
/// source types and [`VirtualCardsError::Decode`] for a bad client
/// configuration blob.
pub fn virtual_cards_config(
    wire: VirtualCardsConfigWire,
) -> Result<VirtualCardsConfig, VirtualCardsError> {
    let funding_source_support_info = wire
        .funding_source_support_info
        .into_iter()
        .map(|info| -> Result<FundingSourceSupportInfo, VirtualCardsError> {
            Ok(FundingSourceSupportInfo {
                funding_source_type: parse_enum(
                    "funding source type",
                    &info.funding_source_type,
                    FundingSourceType::parse,
                )?,
                provider_type: info.provider_type,
                network: info.network,
                detail: info
                    .detail
                    .iter()
                    .map(|detail| FundingSourceSupportDetail {
                        card_type: CardType::parse(&detail.card_type),
                    })
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>, VirtualCardsError>>()?;
    let funding_source_client_configuration = match &wire.funding_source_client_configuration {
        Some(blob) => client_configuration(blob)?,
        None => Vec::new(),
    };
    Ok(VirtualCardsConfig {
        max_funding_source_velocity: wire.max_funding_source_velocity,
        max_funding_source_failure_velocity: wire.max_funding_source_failure_velocity,
        max_card_creation_velocity: wire.max_card_creation_velocity,
        max_transaction_velocity: wire
            .max_transaction_velocity
            .into_iter()
            .map(|entry| CurrencyVelocity {
                currency: entry.currency,
                velocity: entry.velocity,
            })
            .collect(),
        max_transaction_amount: wire
            .max_transaction_amount
            .into_iter()
            .map(currency_amount)
            .collect(),
        virtual_card_currencies: wire.virtual_card_currencies,
        funding_source_support_info,
        bank_account_funding_source_expendable_enabled: wire
            .bank_account_funding_source_expendable_enabled,
        funding_source_client_configuration,
    })
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Builds the setup request, encoding setup data.
#[must_use]
pub fn setup_request(input: SetupFundingSourceInput) -> SetupFundingSourceRequest {
    SetupFundingSourceRequest {
        funding_source_type: input.funding_source_type,
        currency: input.currency,
        supported_providers: input.supported_providers,
        setup_data: input.setup_data.map(|data| data.encode()),
    }
}

/// Builds the completion request, encoding completion data.
#[must_use]
pub fn complete_request(input: CompleteFundingSourceInput) -> CompleteFundingSourceRequest {
    CompleteFundingSourceRequest {
        id: input.id.as_str().to_string(),
        completion_data: input.completion_data.encode(),
        update_card_funding_source: input.update_card_funding_source,
    }
}

/// Builds the refresh request, encoding refresh data.
#[must_use]
pub fn refresh_request(input: RefreshFundingSourceInput) -> RefreshFundingSourceRequest {
    RefreshFundingSourceRequest {
        id: input.id.as_str().to_string(),
        refresh_data: input.refresh_data.encode(),
        language: input.language,
    }
}

/// Builds the card provisioning request.
#[must_use]
pub fn provision_request(input: ProvisionVirtualCardInput) -> CardProvisionRequest {
    CardProvisionRequest {
        client_refs: input.client_refs,
        owner_proofs: input.owner_proofs,
        funding_source_id: input.funding_source_id.as_str().to_string(),
        card_holder: input.cardholder,
        currency: input.currency,
        billing_address: input.billing_address.map(billing_address_wire),
        metadata: input.metadata,
    }
}

/// Builds the card update request.
#[must_use]
pub fn update_request(input: UpdateVirtualCardInput) -> CardUpdateRequest {
    CardUpdateRequest {
        id: input.id.as_str().to_string(),
        expected_version: input.expected_version,
        card_holder: input.cardholder,
        billing_address: input.billing_address.map(billing_address_wire),
        metadata: input.metadata,
    }
}

/// Converts a date range into epoch-millisecond bounds.
#[must_use]
pub fn date_range(range: DateRange) -> DateRangeInput {
    DateRangeInput {
        start_date_epoch_ms: epoch_ms_from_timestamp(range.start),
        end_date_epoch_ms: epoch_ms_from_timestamp(range.end),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
