pub mod composer;
pub mod dispatch;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use self::composer::{ComposerError, Draft};
pub use self::dispatch::{
    dispatch, Caller, DispatchError, DispatchReceipt, DispatchRequest, NewsletterStore,
};

/// Values of a newsletter row before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNewsletter {
    pub user_id: Uuid,
    pub subject: String,
    pub message_body: String,
    pub total_recipients: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Newsletter {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub message_body: String,
    pub total_recipients: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsletterRecipient {
    pub newsletter_id: Uuid,
    pub contact_id: i64,
}

/// A stored newsletter along with the recipient links actually attached to it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct NewsletterSummary {
    pub id: Uuid,
    pub subject: String,
    pub total_recipients: i32,
    pub attached_recipients: i64,
    pub created_at: DateTime<Utc>,
}

impl NewsletterSummary {
    /// True when the recipient batch never made it to the store.
    pub fn is_incomplete(&self) -> bool {
        i64::from(self.total_recipients) != self.attached_recipients
    }
}
