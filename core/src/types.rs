//! Domain DTOs for the record catalog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `RecordDraft` is the editor payload: everything a `Record` carries except
//! the server-assigned `id`. It is sent as-is for both create and update.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
pub type RecordId = i64;

/// Dietary classification of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl Diet {
    pub const ALL: [Diet; 3] = [Diet::Herbivore, Diet::Carnivore, Diet::Omnivore];

    pub fn as_str(self) -> &'static str {
        match self {
            Diet::Herbivore => "Herbivore",
            Diet::Carnivore => "Carnivore",
            Diet::Omnivore => "Omnivore",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog record returned by the API.
///
/// `length` is in meters and `weight` in tons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub species: String,
    pub period: String,
    pub diet: Diet,
    pub length: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Request payload for creating or updating a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub name: String,
    pub species: String,
    pub period: String,
    pub diet: Diet,
    pub length: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Smallest accepted length, in meters.
pub const MIN_LENGTH: f64 = 0.1;
/// Smallest accepted weight, in tons.
pub const MIN_WEIGHT: f64 = 0.01;
/// Shortest accepted name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

const REQUIRED: &str = "This field is required";

/// A single failed editor-form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl RecordDraft {
    /// Check the draft against the editor-form rules.
    ///
    /// Returns an empty `Vec` if valid; otherwise one entry per failing field.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", REQUIRED));
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::new(
                "name",
                format!("Minimum {MIN_NAME_CHARS} characters"),
            ));
        }

        if self.species.trim().is_empty() {
            errors.push(FieldError::new("species", REQUIRED));
        }

        if self.period.trim().is_empty() {
            errors.push(FieldError::new("period", REQUIRED));
        }

        if self.length.is_nan() || self.length < MIN_LENGTH {
            errors.push(FieldError::new(
                "length",
                format!("Minimum value is {MIN_LENGTH}"),
            ));
        }

        if self.weight.is_nan() || self.weight < MIN_WEIGHT {
            errors.push(FieldError::new(
                "weight",
                format!("Minimum value is {MIN_WEIGHT}"),
            ));
        }

        if let Some(url) = self.image_url.as_deref() {
            if !url.is_empty() && !is_http_url(url) {
                errors.push(FieldError::new(
                    "imageUrl",
                    "Invalid URL (must start with http:// or https://)",
                ));
            }
        }

        errors
    }

    /// Drop optional fields the editor left blank so they are omitted on the
    /// wire instead of sent as empty strings.
    pub fn normalized(mut self) -> Self {
        self.description = self.description.filter(|s| !s.trim().is_empty());
        self.image_url = self.image_url.filter(|s| !s.trim().is_empty());
        self
    }
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            species: record.species.clone(),
            period: record.period.clone(),
            diet: record.diet,
            length: record.length,
            weight: record.weight,
            description: record.description.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

/// Whether `url` matches `^https?://.+`.
pub(crate) fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}
