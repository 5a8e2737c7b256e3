use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "casebill={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    if let Some(server) = settings.server {
        tracing::info!("Found server settings...");
        let db = parse_database(&server.database).await?;

        let engine = engine::Engine::builder()
            .database(db.clone())
            .build()
            .await?;

        let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
        let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, server.port)).await?;
        server::run_with_listener(engine, db, listener).await?;
    }

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
