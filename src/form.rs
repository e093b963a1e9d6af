//! Contact form validation log.
//!
//! Every validation failure is recorded once per `(field, error_type)`;
//! repeats only refresh the timestamp. The log is submitted with the form
//! as a JSON array.

use serde::{Deserialize, Serialize};

use crate::utils::date::DateTimeUtc;

/// Kind of constraint a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ValueMissing,
    TooShort,
    TooLong,
    TypeMismatch,
    PatternMismatch,
    /// A keystroke rejected by the field's input mask.
    InvalidCharacter,
}

impl ErrorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValueMissing => "value_missing",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::TypeMismatch => "type_mismatch",
            Self::PatternMismatch => "pattern_mismatch",
            Self::InvalidCharacter => "invalid_character",
        }
    }

    /// User-facing message.
    ///
    /// `constraint` is the length limit for `TooShort`/`TooLong`, the input
    /// type for `TypeMismatch` and the rejected character for
    /// `InvalidCharacter`; other kinds ignore it.
    pub fn message(self, label: &str, constraint: &str) -> String {
        match self {
            Self::ValueMissing => format!("{label} is required."),
            Self::TooShort => format!("{label} must be at least {constraint} characters."),
            Self::TooLong => format!("{label} must be no more than {constraint} characters."),
            Self::TypeMismatch => format!("Please enter a valid {constraint}."),
            Self::PatternMismatch => format!("{label} contains invalid characters."),
            Self::InvalidCharacter => {
                format!("User attempted to enter invalid character: {constraint}")
            }
        }
    }
}

/// Label text as shown next to the field, without the required marker.
pub fn field_label(raw: &str) -> String {
    raw.replacen('*', "", 1).trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub field: String,
    pub error_type: ErrorType,
    pub message: String,
    /// `YYYY-MM-DDTHH:MM:SS.sssZ`
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure now.
    pub fn record(&mut self, field: &str, error_type: ErrorType, message: impl Into<String>) {
        self.record_at(field, error_type, message, DateTimeUtc::now());
    }

    /// Record a failure at a given time.
    pub fn record_at(
        &mut self,
        field: &str,
        error_type: ErrorType,
        message: impl Into<String>,
        at: DateTimeUtc,
    ) {
        let timestamp = at.to_iso_string();
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.field == field && entry.error_type == error_type)
        {
            Some(existing) => existing.timestamp = timestamp,
            None => self.entries.push(ErrorEntry {
                field: field.to_string(),
                error_type,
                message: message.into(),
                timestamp,
            }),
        }
    }

    /// Entries in first-insertion order.
    #[inline]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialized value for the hidden form field.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
