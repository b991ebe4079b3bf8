// crates/virtual-cards-codec/src/completion.rs
// ============================================================================
// Module: Funding Source Input Payloads
// Description: Encoders for setup, completion, and refresh payloads.
// Purpose: Produce the Base64 JSON envelopes the backend expects as input.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Client-collected provider data is sent to the backend in the same Base64
//! JSON envelope the backend uses for provisioning data. Each input type here
//! renders its wire record with `to_wire` and its envelope with `encode`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::envelope::encode_envelope;
use crate::provider::CHECKOUT_PROVIDER;
use crate::provider::FundingSourceType;
use crate::provider::PAYLOAD_VERSION_1;
use crate::provider::STRIPE_PROVIDER;
use crate::schema::Record;

// ============================================================================
// SECTION: Authorization Text
// ============================================================================

/// Agreement text the user accepted when linking a bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationText {
    /// RFC 5646 language tag of the text.
    pub language: String,
    /// Text content.
    pub content: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Hash of the content.
    pub hash: String,
    /// Hash algorithm used for `hash`.
    pub hash_algorithm: String,
}

impl AuthorizationText {
    /// Returns the wire record.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        json!({
            "language": self.language,
            "content": self.content,
            "contentType": self.content_type,
            "hash": self.hash,
            "hashAlgorithm": self.hash_algorithm,
        })
    }
}

// ============================================================================
// SECTION: Setup Data
// ============================================================================

/// Data sent when setting up a provisional funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupData {
    /// Name of the application performing setup.
    pub application_name: String,
}

impl SetupData {
    /// Returns the wire record.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        json!({ "applicationName": self.application_name })
    }

    /// Encodes the data as a Base64 JSON envelope.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_envelope(&self.to_wire())
    }
}

// ============================================================================
// SECTION: Completion Data
// ============================================================================

/// Provider data collected by the client to complete a funding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionData {
    /// Stripe card confirmed payment method.
    StripeCard {
        /// Stripe payment method identifier.
        payment_method: String,
    },
    /// Checkout.com card token.
    CheckoutCard {
        /// Checkout.com payment token.
        payment_token: String,
    },
    /// Checkout.com bank account link.
    CheckoutBankAccount {
        /// Public token from the account linking flow.
        public_token: String,
        /// Selected account identifier.
        account_id: String,
        /// Institution identifier.
        institution_id: String,
        /// Agreement the user accepted.
        authorization_text: AuthorizationText,
    },
}

impl CompletionData {
    /// Returns the provider name.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::StripeCard {
                ..
            } => STRIPE_PROVIDER,
            Self::CheckoutCard {
                ..
            }
            | Self::CheckoutBankAccount {
                ..
            } => CHECKOUT_PROVIDER,
        }
    }

    /// Returns the funding source type being completed.
    #[must_use]
    pub const fn funding_source_type(&self) -> FundingSourceType {
        match self {
            Self::StripeCard {
                ..
            }
            | Self::CheckoutCard {
                ..
            } => FundingSourceType::CreditCard,
            Self::CheckoutBankAccount {
                ..
            } => FundingSourceType::BankAccount,
        }
    }

    /// Returns the wire record.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let mut wire = tagged_record(self.provider(), self.funding_source_type());
        match self {
            Self::StripeCard {
                payment_method,
            } => {
                wire.insert("payment_method".to_string(), json!(payment_method));
            }
            Self::CheckoutCard {
                payment_token,
            } => {
                wire.insert("payment_token".to_string(), json!(payment_token));
            }
            Self::CheckoutBankAccount {
                public_token,
                account_id,
                institution_id,
                authorization_text,
            } => {
                wire.insert("public_token".to_string(), json!(public_token));
                wire.insert("account_id".to_string(), json!(account_id));
                wire.insert("institution_id".to_string(), json!(institution_id));
                wire.insert("authorizationText".to_string(), authorization_text.to_wire());
            }
        }
        Value::Object(wire)
    }

    /// Encodes the data as a Base64 JSON envelope.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_envelope(&self.to_wire())
    }
}

// ============================================================================
// SECTION: Refresh Data
// ============================================================================

/// Provider data used to refresh a funding source that needs re-linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshData {
    /// Checkout.com bank account refresh.
    CheckoutBankAccount {
        /// Name of the application performing the refresh.
        application_name: String,
        /// Account selected during re-linking, when it changed.
        account_id: Option<String>,
        /// Agreement accepted during re-linking, when required.
        authorization_text: Option<AuthorizationText>,
    },
}

impl RefreshData {
    /// Returns the wire record.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Self::CheckoutBankAccount {
                application_name,
                account_id,
                authorization_text,
            } => {
                let mut wire =
                    tagged_record(CHECKOUT_PROVIDER, FundingSourceType::BankAccount);
                wire.insert("applicationName".to_string(), json!(application_name));
                if let Some(account_id) = account_id {
                    wire.insert("accountId".to_string(), json!(account_id));
                }
                if let Some(text) = authorization_text {
                    wire.insert("authorizationText".to_string(), text.to_wire());
                }
                Value::Object(wire)
            }
        }
    }

    /// Encodes the data as a Base64 JSON envelope.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_envelope(&self.to_wire())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a record carrying the `(provider, version, type)` discriminants.
fn tagged_record(provider: &str, kind: FundingSourceType) -> Record {
    let mut wire = Record::new();
    wire.insert("provider".to_string(), json!(provider));
    wire.insert("version".to_string(), json!(PAYLOAD_VERSION_1));
    wire.insert("type".to_string(), json!(kind.as_str()));
    wire
}
