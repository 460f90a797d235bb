//! Data models for the Leadflow SDK

use leadflow_webhook::WebhookRecord;
use serde::{Deserialize, Serialize};

/// `GET /api/settings/webhooks` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookList {
    #[serde(default)]
    pub webhooks: Vec<WebhookRecord>,
}

/// A saved webhook as returned by the backend.
///
/// Some deployments return the record directly, others wrap it in a
/// `webhook` field. Both shapes normalize to the plain record before leaving
/// the client; neither leaks into application state.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SavedWebhook {
    Enveloped { webhook: WebhookRecord },
    Direct(WebhookRecord),
}

impl SavedWebhook {
    pub fn into_record(self) -> WebhookRecord {
        match self {
            SavedWebhook::Enveloped { webhook } => webhook,
            SavedWebhook::Direct(record) => record,
        }
    }
}

/// Body convention for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// A contact in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verification_status: Option<String>,
}

/// `GET /api/contacts` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactList {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// `POST /api/contacts` request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

/// `POST /api/contacts` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedContact {
    pub contact: Contact,
}

/// An email-verification job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationJob {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `POST /api/verification/jobs` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub job: VerificationJob,
}
