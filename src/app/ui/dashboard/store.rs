use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct Analytics {
    pub total_contacts: i64,
    pub subscribed_contacts: i64,
    pub active_contacts: i64,
    pub newsletters_sent: i64,
    pub recipients_recorded: i64,
}

#[tracing::instrument(name = "Fetch analytics", skip(pool))]
pub async fn fetch_analytics(pool: &PgPool, user_id: Uuid) -> Result<Analytics, sqlx::Error> {
    sqlx::query_as::<_, Analytics>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM contacts) AS total_contacts,
            (SELECT COUNT(*) FROM contacts WHERE subscribed_newsletters) AS subscribed_contacts,
            (SELECT COUNT(*) FROM contacts WHERE is_active) AS active_contacts,
            (SELECT COUNT(*) FROM newsletters WHERE user_id = $1) AS newsletters_sent,
            (SELECT COUNT(*)
               FROM newsletter_recipients r
               JOIN newsletters n ON n.id = r.newsletter_id
              WHERE n.user_id = $1) AS recipients_recorded
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
