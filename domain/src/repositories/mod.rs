mod users;

use std::sync::Arc;

use diesel::r2d2::PoolError;
use thiserror::Error;

use crate::{config::ConfigError, pool::DbPool};

#[cfg(feature = "test-support")]
pub use users::memory::InMemoryUsersRepository;
pub use users::{
    UsersRepository, implementation::PgUsersRepository, unconfigured::UnconfiguredUsersRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UsersRepository>,
}

impl Repositories {
    pub fn build(pool: DbPool) -> Repositories {
        let users = Arc::new(PgUsersRepository::new(pool));

        Repositories { users }
    }

    /// Repositories for a store whose configuration could not be resolved.
    /// Every call reports `error`.
    pub fn unconfigured(error: ConfigError) -> Repositories {
        let users = Arc::new(UnconfiguredUsersRepository::new(error));

        Repositories { users }
    }

    pub fn with_users(users: Arc<dyn UsersRepository>) -> Repositories {
        Repositories { users }
    }
}
