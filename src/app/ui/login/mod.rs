use super::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(route::login_form).post(route::login))
        .route("/logout", post(route::logout))
}
