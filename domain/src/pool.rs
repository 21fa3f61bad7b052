use std::time::{Duration, Instant};

use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use secrecy::ExposeSecret;

use crate::{config::DatabaseConfig, repositories::RepositoryError};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Outcome of a single checkout and how long it took.
#[derive(Debug)]
pub struct ConnectionCheck {
    pub elapsed: Duration,
    pub result: Result<(), RepositoryError>,
}

/// Builds a pool without connecting. Connection failures surface on the
/// first checkout instead.
pub fn build_pool(config: &DatabaseConfig) -> DbPool {
    Pool::builder().build_unchecked(manager(config))
}

pub fn build_pool_with_size(config: &DatabaseConfig, max_size: u32) -> DbPool {
    Pool::builder()
        .max_size(max_size)
        .build_unchecked(manager(config))
}

/// Checks out a single connection and hands it straight back.
///
/// A checkout against an unreachable store only fails once the pool's
/// connection timeout runs out, which `elapsed` reflects.
pub fn check_connection(pool: &DbPool) -> ConnectionCheck {
    let started = Instant::now();
    let result = pool.get().map(drop).map_err(RepositoryError::from);

    ConnectionCheck {
        elapsed: started.elapsed(),
        result,
    }
}

fn manager(config: &DatabaseConfig) -> ConnectionManager<PgConnection> {
    ConnectionManager::new(config.connection_string().expose_secret().as_str())
}
