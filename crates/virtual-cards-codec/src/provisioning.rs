// crates/virtual-cards-codec/src/provisioning.rs
// ============================================================================
// Module: Provisioning Data Codec
// Description: Decoder for provisional funding source provisioning data.
// Purpose: Map provider provisioning payloads into typed variants.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Provisional funding sources carry provider-specific setup state as a Base64
//! JSON blob. [`decode_provisioning_data`] runs the envelope decoder, the
//! record guard, and the provisioning [`SchemaRegistry`].
//!
//! | provider | version | type | extra fields |
//! |---|---|---|---|
//! | stripe | 1 | `CREDIT_CARD` (optional) | `client_secret`, `intent` |
//! | checkout | 1 | `CREDIT_CARD` | |
//! | checkout | 1 | `BANK_ACCOUNT` | |

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use serde_json::json;

use crate::envelope::decode_record;
use crate::envelope::encode_envelope;
use crate::error::DecodeError;
use crate::error::DecodeFailure;
use crate::error::PathReport;
use crate::error::Pipeline;
use crate::provider::CHECKOUT_PROVIDER;
use crate::provider::FundingSourceType;
use crate::provider::PAYLOAD_VERSION_1;
use crate::provider::STRIPE_PROVIDER;
use crate::schema::BASE_FIELDS;
use crate::schema::FieldKind;
use crate::schema::FieldRule;
use crate::schema::Record;
use crate::schema::RegisteredVariant;
use crate::schema::Resolution;
use crate::schema::SchemaRegistry;
use crate::schema::VariantSchema;
use crate::schema::string_field;

// ============================================================================
// SECTION: Output Variants
// ============================================================================

/// Decoded provisioning data for a provisional funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningData {
    /// Stripe card setup intent.
    StripeCard {
        /// Client secret of the setup intent.
        client_secret: String,
        /// Setup intent identifier.
        intent: String,
    },
    /// Checkout.com card provisioning.
    CheckoutCard,
    /// Checkout.com bank account provisioning.
    CheckoutBankAccount,
}

impl ProvisioningData {
    /// Returns the provider name.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::StripeCard {
                ..
            } => STRIPE_PROVIDER,
            Self::CheckoutCard | Self::CheckoutBankAccount => CHECKOUT_PROVIDER,
        }
    }

    /// Returns the payload version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        PAYLOAD_VERSION_1
    }

    /// Returns the funding source type being provisioned.
    #[must_use]
    pub const fn funding_source_type(&self) -> FundingSourceType {
        match self {
            Self::StripeCard {
                ..
            }
            | Self::CheckoutCard => FundingSourceType::CreditCard,
            Self::CheckoutBankAccount => FundingSourceType::BankAccount,
        }
    }

    /// Returns the wire record for this variant.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let mut wire = Record::new();
        wire.insert("provider".to_string(), json!(self.provider()));
        wire.insert("version".to_string(), json!(self.version()));
        wire.insert("type".to_string(), json!(self.funding_source_type().as_str()));
        if let Self::StripeCard {
            client_secret,
            intent,
        } = self
        {
            wire.insert("client_secret".to_string(), json!(client_secret));
            wire.insert("intent".to_string(), json!(intent));
        }
        Value::Object(wire)
    }

    /// Encodes the variant as a Base64 JSON envelope.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_envelope(&self.to_wire())
    }
}

/// Serialized output shape of [`ProvisioningData`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProvisioningDataOutput<'a> {
    /// Provider name.
    provider: &'static str,
    /// Payload version.
    version: u32,
    /// Funding source type.
    #[serde(rename = "type")]
    kind: FundingSourceType,
    /// Stripe client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
    /// Stripe setup intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<&'a str>,
}

impl Serialize for ProvisioningData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (client_secret, intent) = match self {
            Self::StripeCard {
                client_secret,
                intent,
            } => (Some(client_secret.as_str()), Some(intent.as_str())),
            Self::CheckoutCard | Self::CheckoutBankAccount => (None, None),
        };
        ProvisioningDataOutput {
            provider: self.provider(),
            version: self.version(),
            kind: self.funding_source_type(),
            client_secret,
            intent,
        }
        .serialize(serializer)
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Stripe card provisioning: `type` is optional but must be `CREDIT_CARD`.
const STRIPE_CARD: VariantSchema = VariantSchema {
    name: "StripeCardProvisioningData",
    fields: &[
        FieldRule::required("provider", FieldKind::LiteralString(STRIPE_PROVIDER)),
        FieldRule::required("version", FieldKind::LiteralNumber(PAYLOAD_VERSION_1)),
        FieldRule::optional("type", FieldKind::LiteralString("CREDIT_CARD")),
        FieldRule::required("client_secret", FieldKind::String),
        FieldRule::required("intent", FieldKind::String),
    ],
};

/// Checkout.com card provisioning.
const CHECKOUT_CARD: VariantSchema = VariantSchema {
    name: "CheckoutCardProvisioningData",
    fields: &[
        FieldRule::required("provider", FieldKind::LiteralString(CHECKOUT_PROVIDER)),
        FieldRule::required("version", FieldKind::LiteralNumber(PAYLOAD_VERSION_1)),
        FieldRule::required("type", FieldKind::LiteralString("CREDIT_CARD")),
    ],
};

/// Checkout.com bank account provisioning.
const CHECKOUT_BANK_ACCOUNT: VariantSchema = VariantSchema {
    name: "CheckoutBankAccountProvisioningData",
    fields: &[
        FieldRule::required("provider", FieldKind::LiteralString(CHECKOUT_PROVIDER)),
        FieldRule::required("version", FieldKind::LiteralNumber(PAYLOAD_VERSION_1)),
        FieldRule::required("type", FieldKind::LiteralString("BANK_ACCOUNT")),
    ],
};

/// Maps a validated Stripe record, renaming `client_secret`.
fn map_stripe_card(record: &Record) -> Option<ProvisioningData> {
    Some(ProvisioningData::StripeCard {
        client_secret: string_field(record, "client_secret")?,
        intent: string_field(record, "intent")?,
    })
}

/// Maps a validated Checkout.com card record.
const fn map_checkout_card(_record: &Record) -> Option<ProvisioningData> {
    Some(ProvisioningData::CheckoutCard)
}

/// Maps a validated Checkout.com bank account record.
const fn map_checkout_bank_account(_record: &Record) -> Option<ProvisioningData> {
    Some(ProvisioningData::CheckoutBankAccount)
}

/// Provisioning variants in precedence order.
const PROVISIONING_VARIANTS: &[RegisteredVariant<ProvisioningData>] = &[
    RegisteredVariant {
        schema: STRIPE_CARD,
        map: map_stripe_card,
    },
    RegisteredVariant {
        schema: CHECKOUT_CARD,
        map: map_checkout_card,
    },
    RegisteredVariant {
        schema: CHECKOUT_BANK_ACCOUNT,
        map: map_checkout_bank_account,
    },
];

/// Closed provisioning data registry.
pub static PROVISIONING_REGISTRY: SchemaRegistry<ProvisioningData> = SchemaRegistry::new(
    PROVISIONING_VARIANTS,
    VariantSchema {
        name: "BaseProvisioningData",
        fields: BASE_FIELDS,
    },
);

// ============================================================================
// SECTION: Decoder
// ============================================================================

/// Decodes Base64 JSON provisioning data into a typed variant.
///
/// # Errors
///
/// Returns [`DecodeError`] for bad Base64, bad JSON, non-record values,
/// records matching no schema, and records of unrecognized variants.
pub fn decode_provisioning_data(raw: &str) -> Result<ProvisioningData, DecodeError> {
    let record = decode_record(Pipeline::Provisioning, raw)?;
    let failure = match PROVISIONING_REGISTRY.resolve(&record) {
        Resolution::Matched(data) => return Ok(data),
        Resolution::Unrecognized(tag) => DecodeFailure::UnrecognizedFundingSourceType(tag),
        Resolution::Mismatch(failures) => DecodeFailure::NotProvisioningData {
            value: Value::Object(record).to_string(),
            report: PathReport(failures),
        },
    };
    Err(DecodeError::new(Pipeline::Provisioning, failure))
}
