use anyhow::Context;
use axum::{body::Bytes, extract::State, Json};
use tower_sessions::Session;

use super::{schema, store::fetch_newsletter_summaries};
use crate::{
    app::{
        error::{AppError, AppResult},
        extractor::{current_caller, SessionUser},
        AppState,
    },
    domain::newsletter::dispatch,
};

/// The body is parsed as JSON whatever its `Content-Type` says.
#[tracing::instrument(name = "Send newsletter", skip(session, state, payload))]
pub async fn send_newsletter(
    session: Session,
    State(state): State<AppState>,
    payload: Bytes,
) -> AppResult<Json<schema::SendNewsletterResponseBody>> {
    let caller = current_caller(&session).await?;
    if caller.is_none() {
        return Err(AppError::Unauthorized);
    }

    let body: schema::SendNewsletterRequestBody =
        serde_json::from_slice(&payload).context("Failed to parse the request body.")?;

    let receipt = dispatch(&state.db, caller, body.into()).await?;

    Ok(Json(receipt.into()))
}

#[tracing::instrument(name = "List newsletters", skip(state))]
pub async fn list_newsletters(
    user: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<schema::ListNewslettersResponseBody>> {
    let newsletters = fetch_newsletter_summaries(&state.db, user.user_id)
        .await
        .context("Failed to retrieve newsletters.")?;

    Ok(Json(schema::ListNewslettersResponseBody {
        newsletters: newsletters.into_iter().map(Into::into).collect(),
    }))
}
