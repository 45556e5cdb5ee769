use std::{io, net::IpAddr};

use anyhow::Context;
use axum::{http::Request, Router};
use bb8_redis::RedisConnectionManager;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};

use crate::config::{SessionSettings, Settings};

use self::session_store::RedisStore;

mod api;
mod error;
mod extractor;
mod session_store;
mod ui;

pub use self::api::user::auth::bootstrap_admin;

#[derive(Clone)]
pub struct AppState {
    db: PgPool,
}

fn app_router() -> Router<AppState> {
    api::router()
        .merge(ui::router())
        .fallback(ui::not_found::not_found_page)
}

enum SessionBackend {
    Memory(MemoryStore),
    Redis(RedisStore<bb8::Pool<RedisConnectionManager>>),
}

pub struct App {
    listener: TcpListener,
    sessions: SessionBackend,
    session_settings: SessionSettings,
}

impl App {
    pub async fn with(config: &Settings) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .context("The listener should be able to bind the address.")?;

        let sessions = match &config.session.redis_uri {
            Some(uri) => {
                let manager = RedisConnectionManager::new(uri.expose_secret().as_str())
                    .context("Invalid Redis connection string.")?;
                let pool = bb8::Pool::builder()
                    .build(manager)
                    .await
                    .context("Could not build the Redis connection pool.")?;
                SessionBackend::Redis(RedisStore::new(pool))
            }
            None => {
                tracing::warn!("no Redis configured, sessions are kept in memory");
                SessionBackend::Memory(MemoryStore::default())
            }
        };

        Ok(Self {
            listener,
            sessions,
            session_settings: config.session.clone(),
        })
    }

    pub fn host(&self) -> IpAddr {
        self.listener
            .local_addr()
            .expect("A bound listener should have a local address.")
            .ip()
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .expect("A bound listener should have a local address.")
            .port()
    }

    pub async fn serve(self, db: PgPool) -> Result<(), io::Error> {
        let Self {
            listener,
            sessions,
            session_settings,
        } = self;

        match sessions {
            SessionBackend::Memory(store) => serve_with(listener, db, store, &session_settings).await,
            SessionBackend::Redis(store) => serve_with(listener, db, store, &session_settings).await,
        }
    }
}

async fn serve_with<S>(
    listener: TcpListener,
    db: PgPool,
    store: S,
    settings: &SessionSettings,
) -> Result<(), io::Error>
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(settings.secure_cookie)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            settings.inactivity_minutes,
        )));

    let app = app_router()
        .with_state(AppState { db })
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "request",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    %id,
                )
            }),
        );

    axum::serve(listener, app.into_make_service()).await
}
