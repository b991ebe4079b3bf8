// crates/virtual-cards-codec/src/client_configuration.rs
// ============================================================================
// Module: Funding Source Client Configuration
// Description: Decoder for the per-provider client configuration blob.
// Purpose: Expose provider API keys the client needs to collect card data.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The backend publishes provider client configuration as a Base64 JSON record
//! `{"fundingSourceTypes": [...]}`. Entries without `fundingSourceType` are
//! card configurations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::envelope::decode_record;
use crate::envelope::encode_envelope;
use crate::error::DecodeError;
use crate::error::DecodeFailure;
use crate::error::Pipeline;
use crate::provider::FundingSourceType;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Client configuration for one provider and funding source type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceClientConfiguration {
    /// Provider name.
    #[serde(rename = "type")]
    pub provider: String,
    /// Configuration version.
    pub version: u32,
    /// Funding source type the key applies to.
    #[serde(default)]
    pub funding_source_type: FundingSourceType,
    /// Publishable provider API key.
    pub api_key: String,
}

impl FundingSourceClientConfiguration {
    /// Returns the wire record for this entry.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        json!({
            "type": self.provider,
            "version": self.version,
            "fundingSourceType": self.funding_source_type.as_str(),
            "apiKey": self.api_key,
        })
    }
}

/// Wire record wrapping the configuration list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfigurationRecord {
    /// Configuration entries.
    funding_source_types: Vec<FundingSourceClientConfiguration>,
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Decodes the Base64 client configuration blob.
///
/// # Errors
///
/// Returns [`DecodeError`] when the blob is not Base64 JSON, not a record, or
/// does not have the client configuration shape.
pub fn decode_client_configuration(
    raw: &str,
) -> Result<Vec<FundingSourceClientConfiguration>, DecodeError> {
    let record = Value::Object(decode_record(Pipeline::ClientConfiguration, raw)?);
    let rendered = record.to_string();
    serde_json::from_value::<ClientConfigurationRecord>(record)
        .map(|decoded| decoded.funding_source_types)
        .map_err(|err| {
            DecodeError::new(
                Pipeline::ClientConfiguration,
                DecodeFailure::NotClientConfiguration {
                    value: rendered,
                    reason: err.to_string(),
                },
            )
        })
}

/// Encodes client configuration entries as a Base64 JSON blob.
#[must_use]
pub fn encode_client_configuration(entries: &[FundingSourceClientConfiguration]) -> String {
    let entries: Vec<Value> =
        entries.iter().map(FundingSourceClientConfiguration::to_wire).collect();
    encode_envelope(&json!({ "fundingSourceTypes": entries }))
}
