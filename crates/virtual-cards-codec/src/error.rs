// crates/virtual-cards-codec/src/error.rs
// ============================================================================
// Module: Virtual Cards Codec Errors
// Description: Decode failure taxonomy and path-based mismatch reports.
// Purpose: Compose stage-specific decode failures into stable messages.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every decode failure is a [`DecodeError`]: the [`Pipeline`] that produced it
//! plus the stage-specific [`DecodeFailure`]. The rendered message is
//! `"<banner>: <detail>"` and is consumed verbatim by callers, so variant
//! wording is part of the public contract.
//! Invariants:
//! - Messages embed the original input (raw string, decoded text, or record).
//! - Failures are deterministic functions of the input; none are retryable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::schema::Record;

// ============================================================================
// SECTION: Pipelines
// ============================================================================

/// Decode pipeline that produced a failure.
///
/// # Invariants
/// - Each pipeline owns exactly one banner string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Provisional funding source provisioning data.
    Provisioning,
    /// Funding source interaction data carried in error info.
    Interaction,
    /// Funding source client configuration blob.
    ClientConfiguration,
}

impl Pipeline {
    /// Returns the fixed banner prefixed to every failure message.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Provisioning => "provisional funding source provisioning data cannot be decoded",
            Self::Interaction => "error info cannot be decoded as funding source interaction data",
            Self::ClientConfiguration => "funding source client configuration cannot be decoded",
        }
    }
}

/// Stage of the decode pipeline at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    /// Error info did not carry a `provisioningData` string.
    Precheck,
    /// Input was not valid Base64.
    Base64,
    /// Decoded bytes were not valid JSON.
    Json,
    /// JSON value was not a record.
    Shape,
    /// Record matched no registered schema.
    NoMatch,
    /// Record matched only the generic fallback schema.
    UnrecognizedVariant,
}

impl DecodeStage {
    /// Returns a stable label for the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Precheck => "precheck",
            Self::Base64 => "base64",
            Self::Json => "json",
            Self::Shape => "shape",
            Self::NoMatch => "no-match",
            Self::UnrecognizedVariant => "unrecognized-variant",
        }
    }
}

// ============================================================================
// SECTION: Path Reports
// ============================================================================

/// A single field that failed validation against a named schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFailure {
    /// Schema the field belongs to.
    pub schema: &'static str,
    /// Field name within the record.
    pub field: &'static str,
    /// Human-readable expected type or literal.
    pub expected: String,
    /// Rendered actual value, `None` when the field is absent.
    pub actual: Option<String>,
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actual = self.actual.as_deref().unwrap_or("undefined");
        write!(
            f,
            "Invalid value {actual} supplied to : {}/{}: {}",
            self.schema, self.field, self.expected
        )
    }
}

/// Every failed path from a validation attempt, rendered comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathReport(pub Vec<PathFailure>);

impl PathReport {
    /// Returns the individual failures.
    #[must_use]
    pub fn failures(&self) -> &[PathFailure] {
        &self.0
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            failure.fmt(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Variant Tags
// ============================================================================

/// The `(provider, version, type)` triple of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTag {
    /// Provider name.
    pub provider: String,
    /// Numeric payload version.
    pub version: Number,
    /// Funding source type string.
    pub kind: String,
}

impl VariantTag {
    /// Extracts the triple from a record when all three fields are well typed.
    #[must_use]
    pub fn from_record(record: &Record) -> Option<Self> {
        let provider = record.get("provider").and_then(Value::as_str)?;
        let version = match record.get("version")? {
            Value::Number(number) => number.clone(),
            _ => return None,
        };
        let kind = record.get("type").and_then(Value::as_str)?;
        Some(Self {
            provider: provider.to_string(),
            version,
            kind: kind.to_string(),
        })
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.provider)?;
        match self.version.as_f64() {
            Some(version)
                if self.version.is_f64() && version.is_finite() && version.fract() == 0.0 =>
            {
                write!(f, "{version:.0}")?;
            }
            _ => write!(f, "{}", self.version)?,
        }
        write!(f, ":{}", self.kind)
    }
}

// ============================================================================
// SECTION: Decode Failures
// ============================================================================

/// Stage-specific decode failure detail.
///
/// # Invariants
/// - Variant messages are stable and matched verbatim by callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// Error info is not a record with a string `provisioningData` field.
    #[error("error info does not contain a JSON record with provisioningData")]
    MissingProvisioningData,
    /// Input is not valid Base64.
    #[error("Base64 decoding failed: {raw}: {reason}")]
    Base64 {
        /// Original undecoded input.
        raw: String,
        /// Underlying decoder message.
        reason: String,
    },
    /// Decoded text is not valid JSON.
    #[error("JSON parsing failed: {decoded}: {reason}")]
    Json {
        /// Base64-decoded text.
        decoded: String,
        /// Underlying parser message.
        reason: String,
    },
    /// Decoded provisioning or configuration value is not a record.
    #[error("Decoded data is not a JSON record: {value}")]
    NotRecord {
        /// Rendered JSON value.
        value: String,
    },
    /// Decoded interaction value is not a record.
    #[error("Fully decoded interaction data is not a JSON record: {value}")]
    NotInteractionRecord {
        /// Rendered JSON value.
        value: String,
    },
    /// Record matched no provisioning data schema.
    #[error(
        "Decoded JSON record is not a ProvisionalFundingSourceProvisioningData: {value}: {report}"
    )]
    NotProvisioningData {
        /// Rendered JSON record.
        value: String,
        /// Failed paths across every registered schema.
        report: PathReport,
    },
    /// Record matched no interaction data schema.
    #[error(
        "JSON record does not match a recognized provisional funding source interaction data \
         format: {value}"
    )]
    NotInteractionData {
        /// Rendered JSON record.
        value: String,
        /// Failed paths across every registered schema.
        report: PathReport,
    },
    /// Record is a well-formed provisioning payload for an unknown variant.
    #[error("Unrecognized funding source type: {0}")]
    UnrecognizedFundingSourceType(VariantTag),
    /// Record is a well-formed interaction payload for an unknown variant.
    #[error("Unrecognized interaction data: {0}")]
    UnrecognizedInteractionData(VariantTag),
    /// Record does not have the client configuration shape.
    #[error("Decoded JSON record is not a FundingSourceClientConfiguration: {value}: {reason}")]
    NotClientConfiguration {
        /// Rendered JSON record.
        value: String,
        /// Underlying deserialization message.
        reason: String,
    },
}

impl DecodeFailure {
    /// Returns the pipeline stage this failure belongs to.
    #[must_use]
    pub const fn stage(&self) -> DecodeStage {
        match self {
            Self::MissingProvisioningData => DecodeStage::Precheck,
            Self::Base64 {
                ..
            } => DecodeStage::Base64,
            Self::Json {
                ..
            } => DecodeStage::Json,
            Self::NotRecord {
                ..
            }
            | Self::NotInteractionRecord {
                ..
            } => DecodeStage::Shape,
            Self::NotProvisioningData {
                ..
            }
            | Self::NotInteractionData {
                ..
            }
            | Self::NotClientConfiguration {
                ..
            } => DecodeStage::NoMatch,
            Self::UnrecognizedFundingSourceType(_) | Self::UnrecognizedInteractionData(_) => {
                DecodeStage::UnrecognizedVariant
            }
        }
    }
}

/// Decode failure tagged with the pipeline that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {failure}", .pipeline.banner())]
pub struct DecodeError {
    /// Pipeline that was decoding.
    pub pipeline: Pipeline,
    /// Stage-specific failure detail.
    pub failure: DecodeFailure,
}

impl DecodeError {
    /// Creates a decode error for the pipeline.
    #[must_use]
    pub const fn new(pipeline: Pipeline, failure: DecodeFailure) -> Self {
        Self {
            pipeline,
            failure,
        }
    }

    /// Returns the stage at which decoding failed.
    #[must_use]
    pub const fn stage(&self) -> DecodeStage {
        self.failure.stage()
    }
}
