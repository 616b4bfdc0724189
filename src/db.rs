use crate::errors::custom::DbError;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_async_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::instrument;

pub type PgPool = Pool<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/******************************************/
// Establishing Db Connection
/******************************************/
pub fn establish_connection(database_url: &str) -> Result<PgPool, DbError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .build()
        .map_err(|err| DbError::ConnectionError(err.to_string()))
}

/******************************************/
// Bringing the schema up to date
/******************************************/
#[instrument(name = "Run pending migrations", skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    MIGRATIONS
        .run_pending_migrations(&mut *conn)
        .await
        .map_err(|err| DbError::Other(err.to_string()))
}
