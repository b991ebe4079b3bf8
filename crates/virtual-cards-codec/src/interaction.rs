// crates/virtual-cards-codec/src/interaction.rs
// ============================================================================
// Module: Interaction Data Codec
// Description: Decoder for funding source interaction data in error info.
// Purpose: Extract the user interaction a funding source still requires.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! When completing a funding source needs further user interaction, the
//! backend returns error info of the form `{"provisioningData": "<base64>"}`.
//! [`decode_interaction_data`] checks that envelope, then runs the same
//! decode pipeline as provisioning data against the interaction registry.
//! Only `checkout` / `1` / `CREDIT_CARD` (with `redirectUrl`) is recognized.

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
// SECTION: Constants
// ============================================================================

/// Error info field carrying the encoded interaction data.
pub const PROVISIONING_DATA_FIELD: &str = "provisioningData";

// ============================================================================
// SECTION: Output Variants
// ============================================================================

/// Decoded interaction data required to finish a funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionData {
    /// Checkout.com card 3-D Secure redirect.
    CheckoutCard {
        /// URL the user must visit.
        redirect_url: String,
    },
}

impl InteractionData {
    /// Returns the provider name.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::CheckoutCard {
                ..
            } => CHECKOUT_PROVIDER,
        }
    }

    /// Returns the payload version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        PAYLOAD_VERSION_1
    }

    /// Returns the funding source type the interaction belongs to.
    #[must_use]
    pub const fn funding_source_type(&self) -> FundingSourceType {
        match self {
            Self::CheckoutCard {
                ..
            } => FundingSourceType::CreditCard,
        }
    }

    /// Returns the wire record for this variant.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Self::CheckoutCard {
                redirect_url,
            } => json!({
                "provider": self.provider(),
                "version": self.version(),
                "type": self.funding_source_type().as_str(),
                "redirectUrl": redirect_url,
            }),
        }
    }

    /// Encodes the variant as a Base64 JSON envelope.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_envelope(&self.to_wire())
    }

    /// Returns error info carrying this interaction data.
    #[must_use]
    pub fn to_error_info(&self) -> Value {
        json!({ PROVISIONING_DATA_FIELD: self.encode() })
    }
}

impl Serialize for InteractionData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Checkout.com card interaction.
const CHECKOUT_CARD: VariantSchema = VariantSchema {
    name: "CheckoutCardInteractionData",
    fields: &[
        FieldRule::required("provider", FieldKind::LiteralString(CHECKOUT_PROVIDER)),
        FieldRule::required("version", FieldKind::LiteralNumber(PAYLOAD_VERSION_1)),
        FieldRule::required("type", FieldKind::LiteralString("CREDIT_CARD")),
        FieldRule::required("redirectUrl", FieldKind::String),
    ],
};

/// Maps a validated Checkout.com card record.
fn map_checkout_card(record: &Record) -> Option<InteractionData> {
    Some(InteractionData::CheckoutCard {
        redirect_url: string_field(record, "redirectUrl")?,
    })
}

/// Interaction variants in precedence order.
const INTERACTION_VARIANTS: &[RegisteredVariant<InteractionData>] = &[RegisteredVariant {
    schema: CHECKOUT_CARD,
    map: map_checkout_card,
}];

/// Closed interaction data registry.
pub static INTERACTION_REGISTRY: SchemaRegistry<InteractionData> = SchemaRegistry::new(
    INTERACTION_VARIANTS,
    VariantSchema {
        name: "BaseInteractionData",
        fields: BASE_FIELDS,
    },
);

// ============================================================================
// SECTION: Decoder
// ============================================================================

/// Decodes interaction data from backend error info.
///
/// # Errors
///
/// Returns [`DecodeFailure::MissingProvisioningData`] when `error_info` is not
/// a record with a string `provisioningData`, and otherwise the same stage
/// failures as provisioning data.
pub fn decode_interaction_data(error_info: &Value) -> Result<InteractionData, DecodeError> {
    let raw = error_info
        .as_object()
        .and_then(|info| info.get(PROVISIONING_DATA_FIELD))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DecodeError::new(Pipeline::Interaction, DecodeFailure::MissingProvisioningData)
        })?;
    let record = decode_record(Pipeline::Interaction, raw)?;
    let failure = match INTERACTION_REGISTRY.resolve(&record) {
        Resolution::Matched(data) => return Ok(data),
        Resolution::Unrecognized(tag) => DecodeFailure::UnrecognizedInteractionData(tag),
        Resolution::Mismatch(failures) => DecodeFailure::NotInteractionData {
            value: Value::Object(record).to_string(),
            report: PathReport(failures),
        },
    };
    Err(DecodeError::new(Pipeline::Interaction, failure))
}
