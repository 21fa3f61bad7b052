pub mod config;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use config::{ConfigError, ConnectionTarget, DatabaseConfig, TlsMode};
pub use models::*;
pub use pool::{ConnectionCheck, DbPool, build_pool, build_pool_with_size, check_connection};
pub use repositories::{Repositories, RepositoryError, UsersRepository};
