// crates/virtual-cards-codec/src/schema.rs
// ============================================================================
// Module: Virtual Cards Schema Registry
// Description: Structural variant schemas and ordered variant resolution.
// Purpose: Match decoded records against a closed set of provider variants.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`VariantSchema`] is a named list of [`FieldRule`] predicates. Literal
//! rules act as discriminants (`provider = "stripe"`, `version = 1`); typed
//! rules require a primitive type. A [`SchemaRegistry`] pairs each specific
//! schema with a mapper into the typed output and keeps a generic base schema
//! that only detects well-formed records for unknown variants.
//! Invariants:
//! - Specific variants are evaluated in declaration order; the first full
//!   match wins.
//! - A record that only satisfies the base schema never resolves to success.
//! - A record whose discriminants select a specific variant but which fails
//!   that variant's other rules is a mismatch, not an unknown variant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::error::PathFailure;
use crate::error::VariantTag;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Decoded JSON record.
pub type Record = Map<String, Value>;

/// Returns a string field from a record.
#[must_use]
pub fn string_field(record: &Record, name: &str) -> Option<String> {
    record.get(name).and_then(Value::as_str).map(str::to_string)
}

// ============================================================================
// SECTION: Field Rules
// ============================================================================

/// Expected shape of a single record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// Exactly this string (discriminant).
    LiteralString(&'static str),
    /// Exactly this number (discriminant).
    LiteralNumber(u32),
}

impl FieldKind {
    /// Returns true when the rule acts as a discriminant.
    #[must_use]
    pub const fn is_discriminant(self) -> bool {
        matches!(self, Self::LiteralString(_) | Self::LiteralNumber(_))
    }

    /// Returns true when `value` satisfies the rule.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::LiteralString(expected) => value.as_str() == Some(expected),
            Self::LiteralNumber(expected) => value.as_f64() == Some(f64::from(expected)),
        }
    }

    /// Returns the expected type label used in path reports.
    #[must_use]
    pub fn expected(self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::LiteralString(expected) => format!("\"{expected}\""),
            Self::LiteralNumber(expected) => expected.to_string(),
        }
    }
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Field must be present and valid.
    Required,
    /// Field may be absent; when present it must be valid.
    Optional,
}

/// Predicate over one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name.
    pub name: &'static str,
    /// Expected field shape.
    pub kind: FieldKind,
    /// Presence requirement.
    pub presence: Presence,
}

impl FieldRule {
    /// Builds a required rule.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    /// Builds an optional rule.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
        }
    }
}

// ============================================================================
// SECTION: Variant Schemas
// ============================================================================

/// Named structural predicate over a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSchema {
    /// Schema name used in path reports.
    pub name: &'static str,
    /// Field rules evaluated in order.
    pub fields: &'static [FieldRule],
}

impl VariantSchema {
    /// Returns true when every discriminant rule is satisfied.
    ///
    /// Optional discriminants are satisfied when absent.
    #[must_use]
    pub fn claims(&self, record: &Record) -> bool {
        let mut discriminants =
            self.fields.iter().filter(|rule| rule.kind.is_discriminant()).peekable();
        if discriminants.peek().is_none() {
            return false;
        }
        discriminants.all(|rule| match record.get(rule.name) {
            None => rule.presence == Presence::Optional,
            Some(value) => rule.kind.accepts(value),
        })
    }

    /// Validates the record, returning every failed field.
    #[must_use]
    pub fn check(&self, record: &Record) -> Vec<PathFailure> {
        self.fields
            .iter()
            .filter_map(|rule| match record.get(rule.name) {
                None if rule.presence == Presence::Optional => None,
                Some(value) if rule.kind.accepts(value) => None,
                actual => Some(PathFailure {
                    schema: self.name,
                    field: rule.name,
                    expected: rule.kind.expected(),
                    actual: actual.map(Value::to_string),
                }),
            })
            .collect()
    }

    /// Returns true when the record satisfies every rule.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.check(record).is_empty()
    }
}

/// Field rules of the generic fallback schema.
pub const BASE_FIELDS: &[FieldRule] = &[
    FieldRule::required("provider", FieldKind::String),
    FieldRule::required("version", FieldKind::Number),
    FieldRule::required("type", FieldKind::String),
];

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Maps a validated record into a typed output.
pub type VariantMapper<T> = fn(&Record) -> Option<T>;

/// Specific schema paired with its output mapper.
pub struct RegisteredVariant<T: 'static> {
    /// Schema the record must satisfy.
    pub schema: VariantSchema,
    /// Mapper producing the typed output.
    pub map: VariantMapper<T>,
}

/// Outcome of resolving a record against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// A specific variant matched.
    Matched(T),
    /// Only the base schema matched.
    Unrecognized(VariantTag),
    /// No usable schema matched; carries every failed path.
    Mismatch(Vec<PathFailure>),
}

/// Closed, ordered registry of variant schemas with a base fallback.
///
/// # Invariants
/// - The registry is immutable and safe to share across threads.
pub struct SchemaRegistry<T: 'static> {
    /// Specific variants in precedence order.
    variants: &'static [RegisteredVariant<T>],
    /// Generic fallback schema.
    base: VariantSchema,
}

impl<T> SchemaRegistry<T> {
    /// Creates a registry from ordered variants and a base schema.
    #[must_use]
    pub const fn new(variants: &'static [RegisteredVariant<T>], base: VariantSchema) -> Self {
        Self {
            variants,
            base,
        }
    }

    /// Resolves a record to a typed output.
    #[must_use]
    pub fn resolve(&self, record: &Record) -> Resolution<T> {
        let mut claimed = false;
        for variant in self.variants {
            if variant.schema.matches(record) {
                if let Some(output) = (variant.map)(record) {
                    return Resolution::Matched(output);
                }
                claimed = true;
            } else if variant.schema.claims(record) {
                claimed = true;
            }
        }
        if !claimed
            && self.base.matches(record)
            && let Some(tag) = VariantTag::from_record(record)
        {
            return Resolution::Unrecognized(tag);
        }
        Resolution::Mismatch(self.report(record))
    }

    /// Collects failed paths across every specific schema and the base schema.
    #[must_use]
    pub fn report(&self, record: &Record) -> Vec<PathFailure> {
        self.variants
            .iter()
            .map(|variant| &variant.schema)
            .chain(std::iter::once(&self.base))
            .flat_map(|schema| schema.check(record))
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
