//! Webhook record model and its serialization boundaries
//!
//! A persisted record carries `headers` as a JSON-encoded string-to-string
//! object and `events` as an ordered list of event names. The editable form
//! expands headers into an ordered sequence of key/value rows, so entry order
//! and in-progress blank rows survive editing, and collapses the event list
//! into a single comma-delimited string for plain text entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Events placeholder offered when creating a new webhook.
pub const DEFAULT_EVENTS: &str = "contact.created, contact.updated";

/// A webhook configuration as stored by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRecord {
    /// Backend-assigned identifier; absent until the record is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Absolute HTTP(S) endpoint the backend delivers to.
    pub url: String,
    /// Subscribed event names, e.g. `contact.created`. Order is preserved;
    /// the model does not enforce uniqueness.
    #[serde(default)]
    pub events: Vec<String>,
    /// JSON-encoded flat object of custom request headers.
    #[serde(default)]
    pub headers: String,
}

impl WebhookRecord {
    /// Whether this record exists in the directory. An empty `id` counts as
    /// absent and routes the save to create rather than update.
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Expand into editable field state.
    ///
    /// Malformed or missing `headers` hydrate as an empty set rather than an
    /// error; the draft always carries at least one (blank) header row.
    pub fn to_draft(&self) -> WebhookDraft {
        let mut headers = match parse_headers(&self.headers) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(webhook_id = ?self.id, %err, "failed to parse stored webhook headers");
                Vec::new()
            }
        };
        if headers.is_empty() {
            headers.push(HeaderRow::default());
        }

        WebhookDraft {
            url: self.url.clone(),
            events: self.events.join(", "),
            headers,
        }
    }
}

/// Decode the stored header object into editable rows. Values that are not
/// JSON strings are kept by rendering them back to text, matching how loosely
/// typed stores hand them back.
fn parse_headers(raw: &str) -> Result<Vec<HeaderRow>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let object: serde_json::Map<String, Value> = serde_json::from_str(raw)?;
    Ok(object
        .into_iter()
        .map(|(key, value)| HeaderRow {
            key,
            value: match value {
                Value::String(text) => text,
                other => other.to_string(),
            },
        })
        .collect())
}

/// One editable header pair. Rows with both sides empty are entry
/// placeholders and are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    pub key: String,
    pub value: String,
}

impl HeaderRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Editable state of a webhook being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDraft {
    pub url: String,
    /// Comma-delimited event names as typed by the user.
    pub events: String,
    /// Ordered header rows; never empty while a draft exists.
    pub headers: Vec<HeaderRow>,
}

impl Default for WebhookDraft {
    fn default() -> Self {
        Self {
            url: String::new(),
            events: DEFAULT_EVENTS.to_string(),
            headers: vec![HeaderRow::default()],
        }
    }
}

impl WebhookDraft {
    /// Collapse back to the canonical record shape.
    ///
    /// Header rows missing a key or a value are dropped here; validation has
    /// already rejected one-sided pairs by the time a draft is submitted.
    /// The event string is split on commas with each segment trimmed and
    /// empty segments discarded, order preserved. The result carries no `id`.
    pub fn to_record(&self) -> WebhookRecord {
        let mut object = serde_json::Map::new();
        for row in &self.headers {
            if row.is_complete() {
                object.insert(row.key.clone(), Value::String(row.value.clone()));
            }
        }

        let events = self
            .events
            .split(',')
            .map(str::trim)
            .filter(|event| !event.is_empty())
            .map(String::from)
            .collect();

        WebhookRecord {
            id: None,
            url: self.url.clone(),
            events,
            headers: Value::Object(object).to_string(),
        }
    }
}
