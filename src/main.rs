use anyhow::Context;
use newsletter_dashboard::{
    app::{bootstrap_admin, App},
    config::get_configuration,
    telemetry::get_subscriber,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("Failed to read configuration.")?;

    get_subscriber(&config.log_level, std::io::stderr).init();

    let db = PgPoolOptions::new()
        .max_connections(50)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.database.with_db());

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Could not run database migrations")?;

    if let Some(admin) = &config.application.admin {
        bootstrap_admin(&db, admin)
            .await
            .context("Could not bootstrap the admin account")?;
    }

    let app = App::with(&config).await?;

    tracing::info!(host = %app.host(), port = app.port(), "starting server");
    app.serve(db).await.context("The server should be running")?;

    Ok(())
}
