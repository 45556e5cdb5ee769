use sqlx::PgPool;

use crate::domain::contact::Contact;

/// The whole contact list, newest first.
#[tracing::instrument(name = "Fetch contacts", skip(pool))]
pub async fn fetch_contacts(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, first_name, last_name, email, country,
               subscribed_newsletters, is_active, created_at
        FROM contacts
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        e
    })
}
