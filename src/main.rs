use dotenv::dotenv;
use restaurant::config::configuration::{Settings, StorageBackend};
use restaurant::db::{establish_connection, run_migrations};
use restaurant::startup::{AppState, Application};
use restaurant::store::{InMemoryStore, PgStore, Stores};
use restaurant::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

fn to_io(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber("restaurant".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::new().expect("Failed to load configurations");
    let stores = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = establish_connection(&config.database.url).map_err(to_io)?;
            run_migrations(&pool).await.map_err(to_io)?;
            Stores::from_backend(Arc::new(PgStore::new(pool, config.database.timeout())))
        }
        StorageBackend::Memory => {
            tracing::warn!("serving from the in-memory store; data is lost on exit");
            Stores::from_backend(Arc::new(InMemoryStore::new()))
        }
    };

    let state = AppState::new(stores, &config.jwt);
    let application = Application::build(
        &config.application.host,
        config.application.port,
        state,
    )
    .await?;
    tracing::info!(port = application.port(), "restaurant service listening");
    application.run_until_stopped().await?;
    Ok(())
}
