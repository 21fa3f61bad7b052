mod seed;
mod table;

use std::process::ExitCode;

use domain::{DatabaseConfig, Repositories, build_pool_with_size};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match DatabaseConfig::from_environment() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error initializing database: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(database = %config.describe(), "Connecting to database...");

    // One connection, dropped together with the pool once we are done.
    let repositories = Repositories::build(build_pool_with_size(&config, 1));
    let result = seed::seed_and_list(repositories.users.as_ref());
    drop(repositories);

    match result {
        Ok(users) => {
            tracing::info!("Database initialized successfully");
            tracing::info!("Created users table");
            tracing::info!("Inserted sample data (Alice and Bob)");
            println!("\nCurrent users in database:");
            print!("{}", table::render_table(&users));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error initializing database: {e}");
            ExitCode::FAILURE
        }
    }
}
