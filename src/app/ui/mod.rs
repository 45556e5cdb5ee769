use axum::Router;

use super::AppState;

mod asset;
mod dashboard;
mod flash;
mod home;
mod login;
mod nav;
pub mod not_found;

pub fn router() -> Router<AppState> {
    home::router()
        .merge(login::router())
        .merge(dashboard::router())
        .merge(asset::router())
}
