//! Editor state machine for webhook configurations
//!
//! The editor owns the draft for as long as it is open, gates submission on
//! validation, and hands a normalized record to whatever persists it. It is
//! deliberately free of I/O: the caller performs the directory call while the
//! editor sits in `Submitting`, then resolves it with [`WebhookEditor::complete_submit`]
//! or [`WebhookEditor::fail_submit`].

use crate::record::{HeaderRow, WebhookDraft, WebhookRecord};
use crate::validate::{validate, ValidationErrors};
use crate::{Result, WebhookError};

/// Editor lifecycle. `seed` is present in edit mode and carries the fields
/// the editable form does not cover (notably `id`) through submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Open {
        draft: WebhookDraft,
        seed: Option<WebhookRecord>,
        dirty: bool,
    },
    Submitting {
        draft: WebhookDraft,
        seed: Option<WebhookRecord>,
        pending: WebhookRecord,
    },
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation passed; persist this record, then resolve the editor with
    /// `complete_submit` or `fail_submit`.
    Accepted(WebhookRecord),
    /// Validation failed; the editor stays open with the draft untouched.
    Rejected(ValidationErrors),
}

/// Stateful editor over a webhook draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEditor {
    state: EditorState,
}

impl Default for WebhookEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WebhookEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditorState::Closed)
    }

    /// Whether the user has touched the draft since it was hydrated.
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, EditorState::Open { dirty: true, .. })
    }

    /// Whether the editor was opened over an existing record.
    pub fn is_editing(&self) -> bool {
        matches!(
            self.state,
            EditorState::Open { seed: Some(_), .. } | EditorState::Submitting { seed: Some(_), .. }
        )
    }

    pub fn draft(&self) -> Option<&WebhookDraft> {
        match &self.state {
            EditorState::Open { draft, .. } | EditorState::Submitting { draft, .. } => Some(draft),
            EditorState::Closed => None,
        }
    }

    /// Open with a blank draft: empty URL, the conventional events
    /// placeholder, one blank header row.
    pub fn open_create(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(WebhookError::AlreadyOpen);
        }
        self.state = EditorState::Open {
            draft: WebhookDraft::default(),
            seed: None,
            dirty: false,
        };
        Ok(())
    }

    /// Open over an existing record, hydrating the draft from it. A
    /// malformed stored `headers` payload is logged during hydration and
    /// replaced with a single blank row; it never propagates.
    pub fn open_edit(&mut self, record: WebhookRecord) -> Result<()> {
        if self.is_open() {
            return Err(WebhookError::AlreadyOpen);
        }
        self.state = EditorState::Open {
            draft: record.to_draft(),
            seed: Some(record),
            dirty: false,
        };
        Ok(())
    }

    /// Cancel or dismiss. Discards all field state regardless of mode; no
    /// draft survives a close.
    pub fn close(&mut self) {
        self.state = EditorState::Closed;
    }

    fn open_mut(&mut self) -> Result<(&mut WebhookDraft, &mut bool)> {
        match &mut self.state {
            EditorState::Open { draft, dirty, .. } => Ok((draft, dirty)),
            _ => Err(WebhookError::NotOpen),
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        draft.url = url.into();
        *dirty = true;
        Ok(())
    }

    pub fn set_events(&mut self, events: impl Into<String>) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        draft.events = events.into();
        *dirty = true;
        Ok(())
    }

    /// Append a trailing blank header row.
    pub fn add_header(&mut self) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        draft.headers.push(HeaderRow::default());
        *dirty = true;
        Ok(())
    }

    pub fn set_header_key(&mut self, index: usize, key: impl Into<String>) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        let row = draft
            .headers
            .get_mut(index)
            .ok_or(WebhookError::HeaderRowOutOfRange(index))?;
        row.key = key.into();
        *dirty = true;
        Ok(())
    }

    pub fn set_header_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        let row = draft
            .headers
            .get_mut(index)
            .ok_or(WebhookError::HeaderRowOutOfRange(index))?;
        row.value = value.into();
        *dirty = true;
        Ok(())
    }

    /// Whether the row may be removed by direct user action. The final row
    /// is kept as the entry affordance once it is blank.
    pub fn can_remove_header(&self, index: usize) -> bool {
        match self.draft() {
            Some(draft) => match draft.headers.get(index) {
                Some(row) => draft.headers.len() > 1 || !row.is_blank(),
                None => false,
            },
            None => false,
        }
    }

    /// Remove a header row. The list never reaches zero rows: removing the
    /// final row leaves a single blank pair in its place.
    pub fn remove_header(&mut self, index: usize) -> Result<()> {
        let (draft, dirty) = self.open_mut()?;
        if index >= draft.headers.len() {
            return Err(WebhookError::HeaderRowOutOfRange(index));
        }
        draft.headers.remove(index);
        if draft.headers.is_empty() {
            draft.headers.push(HeaderRow::default());
        }
        *dirty = true;
        Ok(())
    }

    /// Validate and, if clean, normalize the draft for persistence.
    ///
    /// On rejection the editor stays open (dirty — an attempted submit counts
    /// as interaction) and no record is produced. On acceptance the draft
    /// collapses via `to_record`, merges onto the seed in edit mode so `id`
    /// survives, and the editor moves to `Submitting` until the caller
    /// resolves the directory call.
    pub fn begin_submit(&mut self) -> Result<Submission> {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        let (draft, seed) = match state {
            EditorState::Open { draft, seed, .. } => (draft, seed),
            other => {
                self.state = other;
                return Err(WebhookError::NotOpen);
            }
        };

        let errors = validate(&draft);
        if !errors.is_empty() {
            self.state = EditorState::Open {
                draft,
                seed,
                dirty: true,
            };
            return Ok(Submission::Rejected(errors));
        }

        let mut pending = draft.to_record();
        if let Some(seed) = &seed {
            pending.id = seed.id.clone();
        }
        self.state = EditorState::Submitting {
            draft,
            seed,
            pending: pending.clone(),
        };
        Ok(Submission::Accepted(pending))
    }

    /// The save landed; reset and close.
    pub fn complete_submit(&mut self) -> Result<()> {
        match self.state {
            EditorState::Submitting { .. } => {
                self.state = EditorState::Closed;
                Ok(())
            }
            _ => Err(WebhookError::NotSubmitting),
        }
    }

    /// The save failed; roll back to the open draft so the user can retry
    /// or cancel. The draft is exactly what was submitted.
    pub fn fail_submit(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        match state {
            EditorState::Submitting { draft, seed, .. } => {
                self.state = EditorState::Open {
                    draft,
                    seed,
                    dirty: true,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(WebhookError::NotSubmitting)
            }
        }
    }
}
