use chrono::{DateTime, Utc};
use newsletter_dashboard::{
    app::{bootstrap_admin, App},
    config::{get_configuration, AdminSettings, DatabaseSettings},
    telemetry::get_subscriber,
};
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "newsletter_dashboard=trace,sqlx=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

pub struct TestUser {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
}

pub struct TestApp {
    pub addr: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
    pub user: TestUser,
}

pub struct NewContact<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub country: &'a str,
    pub subscribed: bool,
    pub active: bool,
}

impl<'a> NewContact<'a> {
    pub fn named(first_name: &'a str, email: &'a str) -> Self {
        Self {
            first_name,
            last_name: "Doe",
            email,
            country: "India",
            subscribed: true,
            active: true,
        }
    }
}

impl TestApp {
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/login", &self.addr))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn login_as_user(&self) {
        let response = self.login(&self.user.username, &self.user.password).await;
        assert_redirect_to(&response, "/dashboard");
    }

    pub async fn post_send_newsletter(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/send-newsletter", &self.addr))
            .json(body)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_raw_send_newsletter(
        &self,
        content_type: &str,
        body: &str,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}/api/send-newsletter", &self.addr))
            .header("Content-Type", content_type)
            .body(body.to_owned())
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", &self.addr, path))
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get_html(&self, path: &str) -> String {
        self.get(path)
            .await
            .text()
            .await
            .expect("The page should have a body.")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{}", &self.addr, path))
            .form(form)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn insert_contact(&self, contact: NewContact<'_>) -> i64 {
        self.insert_contact_at(contact, Utc::now()).await
    }

    pub async fn insert_contact_at(&self, contact: NewContact<'_>, created_at: DateTime<Utc>) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO contacts
                (first_name, last_name, email, country, subscribed_newsletters, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(contact.first_name)
        .bind(contact.last_name)
        .bind(contact.email)
        .bind(contact.country)
        .bind(contact.subscribed)
        .bind(contact.active)
        .bind(created_at)
        .fetch_one(&self.db_pool)
        .await
        .expect("The contact should be inserted.")
    }

    pub async fn newsletter_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM newsletters")
            .fetch_one(&self.db_pool)
            .await
            .expect("The newsletters should be counted.")
    }

    pub async fn recipient_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_recipients")
            .fetch_one(&self.db_pool)
            .await
            .expect("The recipients should be counted.")
    }
}

pub fn assert_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(303, response.status().as_u16());
    assert_eq!(
        Some(location),
        response
            .headers()
            .get("Location")
            .and_then(|value| value.to_str().ok())
    );
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.database.database_name = Uuid::new_v4().to_string();
    config.session.redis_uri = None;

    let connection_pool = configure_database(&config.database).await;

    let user = TestUser {
        user_id: Uuid::nil(),
        username: Uuid::new_v4().to_string(),
        password: Uuid::new_v4().to_string(),
    };
    let user_id = bootstrap_admin(
        &connection_pool,
        &AdminSettings {
            username: user.username.clone(),
            password: Secret::new(user.password.clone()),
        },
    )
    .await
    .expect("The test user should be created.");

    let app = App::with(&config)
        .await
        .expect("The application should be built.");

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .expect("The HTTP client should be built.");

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port()),
        db_pool: connection_pool.clone(),
        client,
        user: TestUser { user_id, ..user },
    };

    let _ = tokio::spawn(async move {
        app.serve(connection_pool)
            .await
            .expect("The server should be running")
    });

    test_app
}

async fn configure_database(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("A postgres connection should be created.");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("The database should be created.");

    // Migrate database
    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("A postgres connection pool should be created.");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("The migrations should run without error.");

    connection_pool
}
