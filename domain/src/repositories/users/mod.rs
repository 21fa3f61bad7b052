use super::RepositoryError;
use crate::User;

pub mod implementation;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod unconfigured;

pub trait UsersRepository: Send + Sync {
    /// Every row of the `users` table, ordered by id.
    fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Creates the table if needed and inserts the sample users whose email
    /// is not present yet.
    fn seed(&self) -> Result<(), RepositoryError>;
}
