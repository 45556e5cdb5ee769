use axum::response::{IntoResponse, Redirect};

pub async fn home() -> impl IntoResponse {
    Redirect::to("/dashboard")
}
