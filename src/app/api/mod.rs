use axum::Router;

use super::AppState;

pub mod contact;
pub mod health;
pub mod newsletter;
pub mod user;

pub fn router() -> Router<AppState> {
    health::router()
        .merge(contact::router())
        .merge(newsletter::router())
}
