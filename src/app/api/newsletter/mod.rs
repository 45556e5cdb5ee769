use crate::app::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod route;
pub mod schema;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/send-newsletter", post(route::send_newsletter))
        .route("/api/newsletters", get(route::list_newsletters))
}
