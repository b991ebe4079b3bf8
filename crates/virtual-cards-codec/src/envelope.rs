// crates/virtual-cards-codec/src/envelope.rs
// ============================================================================
// Module: Virtual Cards Envelope Codec
// Description: Base64 + JSON envelope decoding and record guarding.
// Purpose: Turn opaque provider payload strings into JSON records.
// Dependencies: base64, serde_json
// ============================================================================

//! ## Overview
//! Provider payloads travel as Base64-encoded UTF-8 JSON. [`decode_envelope`]
//! undoes both layers and [`assert_record`] rejects anything that is not a JSON
//! object. [`encode_envelope`] is the inverse used for outbound payloads.
//! Invariants:
//! - Base64 uses the standard alphabet; padding is optional on decode and
//!   always emitted on encode.
//! - Failure messages embed the original input verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::DecodeError;
use crate::error::DecodeFailure;
use crate::error::Pipeline;
use crate::schema::Record;

// ============================================================================
// SECTION: Engines
// ============================================================================

/// Lenient standard-alphabet engine used for inbound payloads.
const INBOUND: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

// ============================================================================
// SECTION: Envelope Codec
// ============================================================================

/// Decodes a Base64 JSON envelope into a JSON value.
///
/// # Errors
///
/// Returns [`DecodeFailure::Base64`] when `raw` is not Base64 and
/// [`DecodeFailure::Json`] when the decoded bytes are not UTF-8 JSON.
pub fn decode_envelope(pipeline: Pipeline, raw: &str) -> Result<Value, DecodeError> {
    let bytes = INBOUND.decode(raw.as_bytes()).map_err(|err| {
        DecodeError::new(
            pipeline,
            DecodeFailure::Base64 {
                raw: raw.to_string(),
                reason: err.to_string(),
            },
        )
    })?;
    let decoded = String::from_utf8(bytes).map_err(|err| {
        DecodeError::new(
            pipeline,
            DecodeFailure::Json {
                decoded: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                reason: err.to_string(),
            },
        )
    })?;
    serde_json::from_str(&decoded).map_err(|err| {
        DecodeError::new(
            pipeline,
            DecodeFailure::Json {
                decoded: decoded.clone(),
                reason: err.to_string(),
            },
        )
    })
}

/// Asserts that a decoded value is a JSON record.
///
/// # Errors
///
/// Returns a shape failure when `value` is an array, scalar, or null.
pub fn assert_record(pipeline: Pipeline, value: Value) -> Result<Record, DecodeError> {
    match value {
        Value::Object(record) => Ok(record),
        other => {
            let value = other.to_string();
            let failure = match pipeline {
                Pipeline::Interaction => DecodeFailure::NotInteractionRecord {
                    value,
                },
                Pipeline::Provisioning | Pipeline::ClientConfiguration => DecodeFailure::NotRecord {
                    value,
                },
            };
            Err(DecodeError::new(pipeline, failure))
        }
    }
}

/// Decodes an envelope and asserts the result is a record.
///
/// # Errors
///
/// Returns [`DecodeError`] from either stage.
pub fn decode_record(pipeline: Pipeline, raw: &str) -> Result<Record, DecodeError> {
    let value = decode_envelope(pipeline, raw)?;
    assert_record(pipeline, value)
}

/// Encodes a JSON value as a padded Base64 envelope.
#[must_use]
pub fn encode_envelope(value: &Value) -> String {
    STANDARD.encode(value.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
