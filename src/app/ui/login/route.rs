use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use secrecy::Secret;
use tower_sessions::Session;

use super::schema;
use crate::app::{
    api::user::auth::{validate_credentials, AuthError, Credentials},
    error::AppResult,
    extractor::{current_caller, USER_ID},
    AppState,
};

#[derive(Template, Default)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[tracing::instrument(name = "Login form", skip(session))]
pub async fn login_form(session: Session) -> AppResult<Response> {
    if current_caller(&session).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    Ok(LoginTemplate::default().into_response())
}

#[tracing::instrument(
    name = "Login",
    skip(session, state, body),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Form(body): Form<schema::LoginRequestBody>,
) -> AppResult<Response> {
    let credentials = Credentials {
        username: body.username,
        password: Secret::new(body.password),
    };
    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));

    match validate_credentials(credentials, &state.db).await {
        Ok(user_id) => {
            tracing::Span::current().record("user_id", &tracing::field::display(&user_id));

            session
                .cycle_id()
                .await
                .context("Failed to renew the session id.")?;
            session
                .insert(USER_ID, user_id)
                .await
                .context("Failed to store the user id in the session.")?;

            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(AuthError::InvalidCredentials(e)) => {
            tracing::warn!(details = ?e, "login rejected");
            Ok(LoginTemplate {
                error: Some("Incorrect username or password".to_owned()),
            }
            .into_response())
        }
        Err(AuthError::UnexpectedError(e)) => Err(e.into()),
    }
}

#[tracing::instrument(name = "Logout", skip(session))]
pub async fn logout(session: Session) -> AppResult<Redirect> {
    session
        .flush()
        .await
        .context("Failed to clear the session.")?;

    Ok(Redirect::to("/login"))
}
