//! Webhook configuration support for Leadflow
//!
//! This crate models webhook configurations and the editing workflow around
//! them:
//! - The canonical record shape and its two serialization boundaries (wire
//!   form with JSON-encoded headers, editable form with ordered header rows)
//! - Pure draft validation
//! - An explicit editor state machine gating submission on validation
//!
//! Delivery of configured webhooks is a backend concern and lives elsewhere;
//! nothing here dispatches HTTP.
//!
//! # Example
//!
//! ```rust
//! use leadflow_webhook::{Submission, WebhookEditor};
//!
//! let mut editor = WebhookEditor::new();
//! editor.open_create()?;
//! editor.set_url("https://api.example.com/hook")?;
//! editor.set_events("contact.created")?;
//!
//! match editor.begin_submit()? {
//!     Submission::Accepted(_record) => {
//!         // persist `_record` through the directory client, then:
//!         editor.complete_submit()?;
//!     }
//!     Submission::Rejected(errors) => {
//!         for (field, message) in errors.iter() {
//!             eprintln!("{field}: {message}");
//!         }
//!     }
//! }
//! # Ok::<(), leadflow_webhook::WebhookError>(())
//! ```

pub mod editor;
pub mod record;
pub mod validate;

pub use editor::{EditorState, Submission, WebhookEditor};
pub use record::{HeaderRow, WebhookDraft, WebhookRecord, DEFAULT_EVENTS};
pub use validate::{validate, ValidationErrors};

use thiserror::Error;

/// Webhook editor errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("editor is not open")]
    NotOpen,

    #[error("editor is already open")]
    AlreadyOpen,

    #[error("no submission in flight")]
    NotSubmitting,

    #[error("header row {0} is out of range")]
    HeaderRowOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, WebhookError>;
