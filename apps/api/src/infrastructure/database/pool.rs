use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
    ignore_missing_migrations: bool,
) -> anyhow::Result<PgPool> {
    let pool = create_pool(database_url, max_connections).await?;
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(ignore_missing_migrations);
    migrator.run(&pool).await?;
    Ok(pool)
}
