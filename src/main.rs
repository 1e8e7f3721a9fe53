use std::sync::Arc;

use attendance_api::config::ApiConfig;
use attendance_core::store::Stores;
use attendance_db::{create_pool, schema::initialize_database, PgStore};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    let stores = Stores::from_backend(Arc::new(PgStore::new(db_pool)));
    attendance_api::start_server(config, stores).await?;

    Ok(())
}
