use backend::{api::Server, config::AppConfig};
use domain::{ConnectionCheck, Repositories, build_pool, check_connection};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_environment()?;

    // Neither a bad configuration nor a failed connection is fatal, /db
    // reports the error on each request.
    let repositories = match &config.database {
        Ok(database) => {
            tracing::info!(database = %database.describe(), "Using database");
            let pool = build_pool(database);

            let checked = pool.clone();
            tokio::task::spawn_blocking(move || {
                let ConnectionCheck { elapsed, result } = check_connection(&checked);
                let elapsed_ms = elapsed.as_millis();
                match result {
                    Ok(()) => tracing::info!(elapsed_ms, "Database connected successfully"),
                    Err(e) => tracing::error!(
                        error = %e,
                        elapsed_ms,
                        timeout_ms = checked.connection_timeout().as_millis(),
                        "Database connection error, /db requests will wait as long before failing"
                    ),
                }
            });

            Repositories::build(pool)
        }
        Err(e) => {
            tracing::error!(error = %e, "Database configuration error");
            Repositories::unconfigured(e.clone())
        }
    };

    let server = Server::new(config, repositories);

    server
        .start()
        .await
        .map_err(|e| format!("Failed to start HTTP server {e}"))?;

    Ok(())
}
