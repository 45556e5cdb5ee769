use anyhow::Context;
use axum::{
    extract::{Query, State},
    Json,
};

use super::{schema, store::fetch_contacts};
use crate::{
    app::{error::AppResult, extractor::SessionUser, AppState},
    domain::contact::{filter::unique_countries, ContactFilter},
};

#[tracing::instrument(name = "List contacts", skip(state))]
pub async fn list_contacts(
    user: SessionUser,
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> AppResult<Json<schema::ListContactsResponseBody>> {
    let contacts = fetch_contacts(&state.db)
        .await
        .context("Failed to retrieve contacts.")?;

    let countries = unique_countries(&contacts);
    let contacts = filter.apply(&contacts).into_iter().cloned().collect();

    Ok(Json(schema::ListContactsResponseBody {
        contacts,
        countries,
    }))
}
