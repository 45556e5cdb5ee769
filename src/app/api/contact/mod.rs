use axum::{routing::get, Router};

use crate::app::AppState;

pub mod route;
pub mod schema;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/contacts", get(route::list_contacts))
}
