use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::newsletter::{
    NewNewsletter, Newsletter, NewsletterRecipient, NewsletterStore, NewsletterSummary,
};

#[async_trait]
impl NewsletterStore for PgPool {
    #[tracing::instrument(name = "Insert newsletter", skip(self, newsletter))]
    async fn insert_newsletter(&self, newsletter: &NewNewsletter) -> anyhow::Result<Newsletter> {
        sqlx::query_as::<_, Newsletter>(
            r#"
            INSERT INTO newsletters (id, user_id, subject, message_body, total_recipients, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, subject, message_body, total_recipients, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(newsletter.user_id)
        .bind(&newsletter.subject)
        .bind(&newsletter.message_body)
        .bind(newsletter.total_recipients)
        .bind(chrono::Utc::now())
        .fetch_one(self)
        .await
        .context("Failed to insert the newsletter.")
    }

    #[tracing::instrument(
        name = "Insert newsletter recipients",
        skip(self, recipients),
        fields(count = recipients.len())
    )]
    async fn insert_recipients(&self, recipients: &[NewsletterRecipient]) -> anyhow::Result<()> {
        let (newsletter_ids, contact_ids): (Vec<Uuid>, Vec<i64>) = recipients
            .iter()
            .map(|recipient| (recipient.newsletter_id, recipient.contact_id))
            .unzip();

        sqlx::query(
            r#"
            INSERT INTO newsletter_recipients (newsletter_id, contact_id)
            SELECT * FROM UNNEST($1::uuid[], $2::bigint[])
            "#,
        )
        .bind(newsletter_ids)
        .bind(contact_ids)
        .execute(self)
        .await
        .context("Failed to insert the newsletter recipients.")?;

        Ok(())
    }
}

/// Newsletters sent by `user_id`, newest first, with their attached recipient count.
#[tracing::instrument(name = "Fetch newsletter summaries", skip(pool))]
pub async fn fetch_newsletter_summaries(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NewsletterSummary>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterSummary>(
        r#"
        SELECT n.id, n.subject, n.total_recipients,
               COUNT(r.contact_id) AS attached_recipients,
               n.created_at
        FROM newsletters n
        LEFT JOIN newsletter_recipients r ON r.newsletter_id = n.id
        WHERE n.user_id = $1
        GROUP BY n.id
        ORDER BY n.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
