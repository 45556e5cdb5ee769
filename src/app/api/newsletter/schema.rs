use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::newsletter::{DispatchReceipt, DispatchRequest, NewsletterSummary};

/// Every field is optional so that absent fields are reported as missing
/// instead of being rejected by the extractor.
#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterRequestBody {
    pub subject: Option<String>,
    pub message_body: Option<String>,
    pub contact_ids: Option<Vec<i64>>,
}

impl From<SendNewsletterRequestBody> for DispatchRequest {
    fn from(body: SendNewsletterRequestBody) -> Self {
        Self {
            subject: body.subject,
            message_body: body.message_body,
            contact_ids: body.contact_ids,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterResponseBody {
    pub success: bool,
    pub newsletter_id: Uuid,
    pub recipient_count: usize,
}

impl From<DispatchReceipt> for SendNewsletterResponseBody {
    fn from(receipt: DispatchReceipt) -> Self {
        Self {
            success: true,
            newsletter_id: receipt.newsletter_id,
            recipient_count: receipt.recipient_count,
        }
    }
}

#[derive(serde::Serialize)]
pub struct ListNewslettersResponseBody {
    pub newsletters: Vec<NewsletterItem>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterItem {
    pub id: Uuid,
    pub subject: String,
    pub total_recipients: i32,
    pub attached_recipients: i64,
    pub incomplete: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NewsletterSummary> for NewsletterItem {
    fn from(summary: NewsletterSummary) -> Self {
        Self {
            incomplete: summary.is_incomplete(),
            id: summary.id,
            subject: summary.subject,
            total_recipients: summary.total_recipients,
            attached_recipients: summary.attached_recipients,
            created_at: summary.created_at,
        }
    }
}
