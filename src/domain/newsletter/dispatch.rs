use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::{NewNewsletter, Newsletter, NewsletterRecipient};

/// Persistence needed to record a dispatch.
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Inserts one newsletter row and returns it as stored.
    async fn insert_newsletter(&self, newsletter: &NewNewsletter) -> anyhow::Result<Newsletter>;

    /// Inserts every recipient link in a single batch.
    async fn insert_recipients(&self, recipients: &[NewsletterRecipient]) -> anyhow::Result<()>;
}

/// The authenticated account on whose behalf a newsletter is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    pub subject: Option<String>,
    pub message_body: Option<String>,
    pub contact_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub newsletter_id: Uuid,
    pub recipient_count: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Failed to create newsletter")]
    NewsletterNotCreated(#[source] anyhow::Error),
    /// The newsletter row exists but none of its recipients were attached.
    #[error("Failed to record recipients")]
    RecipientsNotRecorded {
        newsletter_id: Uuid,
        #[source]
        source: anyhow::Error,
    },
}

/// Records a newsletter and its recipient links.
///
/// The two inserts are not wrapped in a transaction: when the recipient batch
/// fails, the newsletter row stays behind with no recipients attached.
#[tracing::instrument(
    name = "Dispatch newsletter",
    skip(store, request),
    fields(user_id = tracing::field::Empty, newsletter_id = tracing::field::Empty)
)]
pub async fn dispatch<S>(
    store: &S,
    caller: Option<Caller>,
    request: DispatchRequest,
) -> Result<DispatchReceipt, DispatchError>
where
    S: NewsletterStore + ?Sized,
{
    let caller = caller.ok_or(DispatchError::Unauthorized)?;
    tracing::Span::current().record("user_id", &tracing::field::display(&caller.user_id));

    let (subject, message_body, contact_ids) =
        match (request.subject, request.message_body, request.contact_ids) {
            (Some(subject), Some(message_body), Some(contact_ids))
                if !subject.is_empty() && !message_body.is_empty() && !contact_ids.is_empty() =>
            {
                (subject, message_body, contact_ids)
            }
            _ => return Err(DispatchError::MissingFields),
        };

    let total_recipients = i32::try_from(contact_ids.len())
        .context("Too many recipients for a single newsletter")
        .map_err(DispatchError::NewsletterNotCreated)?;

    let newsletter = store
        .insert_newsletter(&NewNewsletter {
            user_id: caller.user_id,
            subject,
            message_body,
            total_recipients,
        })
        .await
        .map_err(DispatchError::NewsletterNotCreated)?;
    tracing::Span::current().record("newsletter_id", &tracing::field::display(&newsletter.id));

    let recipients: Vec<NewsletterRecipient> = contact_ids
        .iter()
        .map(|&contact_id| NewsletterRecipient {
            newsletter_id: newsletter.id,
            contact_id,
        })
        .collect();

    store
        .insert_recipients(&recipients)
        .await
        .map_err(|source| DispatchError::RecipientsNotRecorded {
            newsletter_id: newsletter.id,
            source,
        })?;

    Ok(DispatchReceipt {
        newsletter_id: newsletter.id,
        recipient_count: recipients.len(),
    })
}
