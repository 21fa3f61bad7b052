use domain::{RepositoryError, User, UsersRepository};

/// Runs the schema and seed script, then reads back every row as
/// confirmation. Stops at the first failure.
pub fn seed_and_list(users: &dyn UsersRepository) -> Result<Vec<User>, RepositoryError> {
    users.seed()?;
    users.list_all()
}
