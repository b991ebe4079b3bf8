// crates/virtual-cards-sdk/src/errors.rs
// ============================================================================
// Module: Virtual Cards Errors
// Description: Domain error taxonomy for virtual cards operations.
// Purpose: Normalize backend, transport, and decode failures into one enum.
// Dependencies: thiserror, virtual-cards-codec
// ============================================================================

//! ## Overview
//! Backend GraphQL errors carry an `errorType` string. [`map_graphql_error`]
//! turns it into a typed [`VirtualCardsError`], decoding interaction data
//! when the backend asks the user to interact with the provider.
//! Invariants:
//! - Unknown error types never panic; they surface as
//!   [`VirtualCardsError::Unknown`] with the original type and message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;
use virtual_cards_codec::DecodeError;
use virtual_cards_codec::InteractionData;
use virtual_cards_codec::decode_interaction_data;

use crate::graphql::GraphQlError;
use crate::interfaces::SessionError;
use crate::interfaces::TransportError;
use crate::interfaces::WatchError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of virtual-cards service error types.
const VIRTUAL_CARDS_ERROR_PREFIX: &str = "sudoplatform.virtual-cards.";
/// Prefix of platform-wide error types.
const PLATFORM_ERROR_PREFIX: &str = "sudoplatform.";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Virtual cards operation errors.
///
/// Backend variants carry the backend's message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VirtualCardsError {
    /// Funding source does not exist.
    #[error("funding source not found: {0}")]
    FundingSourceNotFound(String),
    /// Funding source is in a state that forbids the operation.
    #[error("funding source state does not allow this operation: {0}")]
    FundingSourceState(String),
    /// Completion data was rejected by the provider.
    #[error("funding source completion data is invalid: {0}")]
    FundingSourceCompletionDataInvalid(String),
    /// Completion was attempted before setup.
    #[error("funding source has not been set up: {0}")]
    FundingSourceNotSetup(String),
    /// Provider requires the user to complete an interaction first.
    #[error("funding source requires user interaction")]
    FundingSourceRequiresUserInteraction {
        /// Decoded provider interaction instructions.
        interaction_data: InteractionData,
    },
    /// Provisional funding source does not exist.
    #[error("provisional funding source not found: {0}")]
    ProvisionalFundingSourceNotFound(String),
    /// Provider rejected the funding instrument.
    #[error("funding source is not acceptable: {0}")]
    UnacceptableFundingSource(String),
    /// Funding instrument is already registered.
    #[error("duplicate funding source: {0}")]
    DuplicateFundingSource(String),
    /// Currency is not supported.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
    /// Velocity limit reached.
    #[error("velocity exceeded: {0}")]
    VelocityExceeded(String),
    /// Entitlement limit reached.
    #[error("entitlement exceeded: {0}")]
    EntitlementExceeded(String),
    /// Card does not exist.
    #[error("card not found: {0}")]
    CardNotFound(String),
    /// Card is in a state that forbids the operation.
    #[error("card state does not allow this operation: {0}")]
    CardState(String),
    /// User identity has not been verified.
    #[error("identity verification not verified: {0}")]
    IdentityVerificationNotVerified(String),
    /// Account is locked.
    #[error("account locked: {0}")]
    AccountLocked(String),
    /// User lacks the entitlement for the operation.
    #[error("insufficient entitlements: {0}")]
    InsufficientEntitlements(String),
    /// Request argument rejected by the backend.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Platform rate or size limit reached.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
    /// Caller is not authorized.
    #[error("not authorized: {0}")]
    NotAuthorized(String),
    /// Backend failure.
    #[error("service error: {0}")]
    ServiceError(String),
    /// No user is signed in.
    #[error("not signed in")]
    NotSignedIn,
    /// Provider payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Request could not be executed.
    #[error("transport error: {0}")]
    Transport(String),
    /// Session state could not be read.
    #[error("session error: {0}")]
    Session(String),
    /// Subscription transport failure.
    #[error(transparent)]
    Watch(#[from] WatchError),
    /// Response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    /// Backend error with an unrecognized type.
    #[error("unknown error ({}): {message}", .error_type.as_deref().unwrap_or("untyped"))]
    Unknown {
        /// Backend error type, when present.
        error_type: Option<String>,
        /// Backend message.
        message: String,
    },
}

impl VirtualCardsError {
    /// Returns a stable snake-case label for audit logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FundingSourceNotFound(_) => "funding_source_not_found",
            Self::FundingSourceState(_) => "funding_source_state",
            Self::FundingSourceCompletionDataInvalid(_) => "funding_source_completion_data_invalid",
            Self::FundingSourceNotSetup(_) => "funding_source_not_setup",
            Self::FundingSourceRequiresUserInteraction {
                ..
            } => "funding_source_requires_user_interaction",
            Self::ProvisionalFundingSourceNotFound(_) => "provisional_funding_source_not_found",
            Self::UnacceptableFundingSource(_) => "unacceptable_funding_source",
            Self::DuplicateFundingSource(_) => "duplicate_funding_source",
            Self::UnsupportedCurrency(_) => "unsupported_currency",
            Self::VelocityExceeded(_) => "velocity_exceeded",
            Self::EntitlementExceeded(_) => "entitlement_exceeded",
            Self::CardNotFound(_) => "card_not_found",
            Self::CardState(_) => "card_state",
            Self::IdentityVerificationNotVerified(_) => "identity_verification_not_verified",
            Self::AccountLocked(_) => "account_locked",
            Self::InsufficientEntitlements(_) => "insufficient_entitlements",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::LimitExceeded(_) => "limit_exceeded",
            Self::NotAuthorized(_) => "not_authorized",
            Self::ServiceError(_) => "service_error",
            Self::NotSignedIn => "not_signed_in",
            Self::Decode(_) => "decode",
            Self::Transport(_) => "transport",
            Self::Session(_) => "session",
            Self::Watch(_) => "watch",
            Self::UnexpectedResponse(_) => "unexpected_response",
            Self::Unknown {
                ..
            } => "unknown",
        }
    }
}

impl From<TransportError> for VirtualCardsError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<SessionError> for VirtualCardsError {
    fn from(err: SessionError) -> Self {
        Self::Session(err.0)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a backend GraphQL error onto [`VirtualCardsError`].
#[must_use]
pub fn map_graphql_error(error: &GraphQlError) -> VirtualCardsError {
    let message = error.message.clone();
    let Some(error_type) = error.error_type.as_deref() else {
        return VirtualCardsError::Unknown {
            error_type: None,
            message,
        };
    };
    if let Some(name) = error_type.strip_prefix(VIRTUAL_CARDS_ERROR_PREFIX) {
        if let Some(mapped) = map_virtual_cards_error(name, error, &message) {
            return mapped;
        }
    } else if let Some(name) = error_type.strip_prefix(PLATFORM_ERROR_PREFIX)
        && let Some(mapped) = map_platform_error(name, &message)
    {
        return mapped;
    }
    VirtualCardsError::Unknown {
        error_type: Some(error_type.to_string()),
        message,
    }
}

/// Maps `sudoplatform.virtual-cards.*` error names.
fn map_virtual_cards_error(
    name: &str,
    error: &GraphQlError,
    message: &str,
) -> Option<VirtualCardsError> {
    let message = message.to_string();
    let mapped = match name {
        "FundingSourceNotFoundError" => VirtualCardsError::FundingSourceNotFound(message),
        "FundingSourceStateError" => VirtualCardsError::FundingSourceState(message),
        "FundingSourceCompletionDataInvalidError"
        | "FundingSourceCompletionDataInvalidErrorCode" => {
            VirtualCardsError::FundingSourceCompletionDataInvalid(message)
        }
        "FundingSourceNotSetupError" | "FundingSourceNotSetupErrorCode" => {
            VirtualCardsError::FundingSourceNotSetup(message)
        }
        "FundingSourceRequiresUserInteractionError" => interaction_required(error),
        "ProvisionalFundingSourceNotFoundError" => {
            VirtualCardsError::ProvisionalFundingSourceNotFound(message)
        }
        "UnacceptableFundingSourceError" => VirtualCardsError::UnacceptableFundingSource(message),
        "DuplicateFundingSourceError" => VirtualCardsError::DuplicateFundingSource(message),
        "UnsupportedCurrencyError" => VirtualCardsError::UnsupportedCurrency(message),
        "VelocityExceededError" => VirtualCardsError::VelocityExceeded(message),
        "EntitlementExceededError" => VirtualCardsError::EntitlementExceeded(message),
        "CardNotFoundError" => VirtualCardsError::CardNotFound(message),
        "CardStateError" => VirtualCardsError::CardState(message),
        "IdentityVerificationNotVerifiedError" => {
            VirtualCardsError::IdentityVerificationNotVerified(message)
        }
        "AccountLockedError" => VirtualCardsError::AccountLocked(message),
        _ => return None,
    };
    Some(mapped)
}

/// Maps `sudoplatform.*` error names.
fn map_platform_error(name: &str, message: &str) -> Option<VirtualCardsError> {
    let message = message.to_string();
    let mapped = match name {
        "InsufficientEntitlementsError" => VirtualCardsError::InsufficientEntitlements(message),
        "InvalidArgumentError" => VirtualCardsError::InvalidArgument(message),
        "LimitExceededError" => VirtualCardsError::LimitExceeded(message),
        "NotAuthorizedError" => VirtualCardsError::NotAuthorized(message),
        "ServiceError" => VirtualCardsError::ServiceError(message),
        _ => return None,
    };
    Some(mapped)
}

/// Decodes the interaction payload carried in `errorInfo`.
fn interaction_required(error: &GraphQlError) -> VirtualCardsError {
    let missing = Value::Null;
    let info = error.error_info.as_ref().unwrap_or(&missing);
    match decode_interaction_data(info) {
        Ok(interaction_data) => VirtualCardsError::FundingSourceRequiresUserInteraction {
            interaction_data,
        },
        Err(err) => VirtualCardsError::Decode(err),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
