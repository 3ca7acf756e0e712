pub mod queries;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::Question;

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqlitePool::connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
