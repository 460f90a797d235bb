//! Draft validation
//!
//! A single pure pass over the draft. Every rule is evaluated; nothing
//! short-circuits, so each offending field gets its own message and the UI
//! can surface all of them at once.

use crate::record::WebhookDraft;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Field-keyed validation failures. An empty set means the draft may be
/// submitted. Header rows are keyed positionally (`header_key_<i>`,
/// `header_value_<i>`) so messages land next to the row that caused them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }
}

/// Validate a draft before submission.
///
/// Rules:
/// 1. `url` must be present and parse as a URL.
/// 2. Each header row must have both key and value set, or neither; rows
///    with both sides empty are entry placeholders and are ignored.
pub fn validate(draft: &WebhookDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.url.is_empty() {
        errors.insert("url", "URL is required.");
    } else if Url::parse(&draft.url).is_err() {
        errors.insert("url", "Please enter a valid URL.");
    }

    for (index, row) in draft.headers.iter().enumerate() {
        if !row.key.is_empty() && row.value.is_empty() {
            errors.insert(format!("header_value_{index}"), "Value is required.");
        }
        if row.key.is_empty() && !row.value.is_empty() {
            errors.insert(format!("header_key_{index}"), "Key is required.");
        }
    }

    errors
}
