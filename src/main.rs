use clap::Parser;

use account_registry::cli::{self, Cli};
use account_registry::config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    config::init_logging()?;

    let settings = config::RegistrySettings::from_env();
    let db = config::init_database(&settings).await?;
    config::migrate_database(&db).await?;

    cli::execute_command(cli, &db).await
}
