use anyhow::{anyhow, Context};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::app::error::AppError;
use crate::domain::newsletter::Caller;

pub const USER_ID: &str = "user_id";

/// Reads the logged in account from the session, if any.
pub async fn current_caller(session: &Session) -> anyhow::Result<Option<Caller>> {
    let user_id: Option<Uuid> = session
        .get(USER_ID)
        .await
        .context("Failed to read the user id from the session.")?;

    Ok(user_id.map(|user_id| Caller { user_id }))
}

async fn session_from_parts<S>(parts: &mut Parts, state: &S) -> Result<Session, AppError>
where
    S: Send + Sync,
{
    Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, message)| AppError::UnexpectedError(anyhow!(message)))
}

/// Add this as a parameter to an API handler to require a logged in user.
///
/// Rejects with `401 { "error": "Unauthorized" }`.
#[derive(Debug)]
pub struct SessionUser {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).await?;
        let caller = current_caller(&session)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(SessionUser {
            user_id: caller.user_id,
        })
    }
}

/// Same guard as [`SessionUser`] for pages: anonymous visitors are sent to the login form.
#[derive(Debug)]
pub struct DashboardUser {
    pub user_id: Uuid,
}

impl DashboardUser {
    pub fn caller(&self) -> Caller {
        Caller {
            user_id: self.user_id,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DashboardUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match current_caller(&session).await {
            Ok(Some(caller)) => Ok(DashboardUser {
                user_id: caller.user_id,
            }),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(AppError::UnexpectedError(e).into_response()),
        }
    }
}
