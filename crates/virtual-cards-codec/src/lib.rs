// crates/virtual-cards-codec/src/lib.rs
// ============================================================================
// Module: Virtual Cards Codec Library
// Description: Decoders for opaque funding source provider payloads.
// Purpose: Turn Base64 JSON provider blobs into typed variants and back.
// Dependencies: base64, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Funding source providers exchange state with clients through opaque Base64
//! JSON payloads keyed by `(provider, version, type)`. This crate decodes them
//! in stages: [`envelope`] (Base64 then JSON), the record guard, and a closed
//! [`schema::SchemaRegistry`] per payload family. Every stage fails with a
//! [`DecodeError`] whose message names the stage and embeds the input.
//! Invariants:
//! - Decoding is pure and deterministic; registries are immutable statics.
//! - A record matching only the generic base schema is an unrecognized
//!   variant, never a success.
//! - Encoding a variant and decoding the result yields the same variant.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client_configuration;
pub mod completion;
pub mod envelope;
pub mod error;
pub mod interaction;
pub mod provider;
pub mod provisioning;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client_configuration::FundingSourceClientConfiguration;
pub use client_configuration::decode_client_configuration;
pub use client_configuration::encode_client_configuration;
pub use completion::AuthorizationText;
pub use completion::CompletionData;
pub use completion::RefreshData;
pub use completion::SetupData;
pub use envelope::decode_envelope;
pub use envelope::encode_envelope;
pub use error::DecodeError;
pub use error::DecodeFailure;
pub use error::DecodeStage;
pub use error::PathFailure;
pub use error::PathReport;
pub use error::Pipeline;
pub use error::VariantTag;
pub use interaction::InteractionData;
pub use interaction::decode_interaction_data;
pub use provider::FundingSourceType;
pub use provisioning::ProvisioningData;
pub use provisioning::decode_provisioning_data;
