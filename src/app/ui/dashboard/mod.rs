use super::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod route;
pub mod schema;
pub mod state;
pub mod store;
pub mod view;

pub const COMPOSER: &str = "/dashboard";
pub const CONTACTS: &str = "/dashboard/contacts";
pub const HISTORY: &str = "/dashboard/history";
pub const ANALYTICS: &str = "/dashboard/analytics";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(COMPOSER, get(route::composer_page))
        .route("/dashboard/filter", post(route::apply_filter))
        .route("/dashboard/selection", post(route::toggle_all))
        .route("/dashboard/selection/:contact_id", post(route::toggle_contact))
        .route("/dashboard/send", post(route::send))
        .route(CONTACTS, get(route::contacts_page))
        .route(HISTORY, get(route::history_page))
        .route(ANALYTICS, get(route::analytics_page))
}
