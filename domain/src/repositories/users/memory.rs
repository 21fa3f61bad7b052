use std::sync::Mutex;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::{SAMPLE_USERS, User, repositories::RepositoryError};

/// Keeps the `users` table in memory, following the same rules as the
/// PostgreSQL seed script: the table exists only after seeding, and a sample
/// row is skipped when its email is already taken.
#[derive(Default)]
pub struct InMemoryUsersRepository {
    state: Mutex<State>,
    unavailable: bool,
}

#[derive(Default)]
struct State {
    table_exists: bool,
    rows: Vec<User>,
    next_id: i32,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose store can never be reached.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Inserts a row directly, creating the table if needed.
    pub fn insert(&self, name: &str, email: &str) -> Result<User, RepositoryError> {
        self.ensure_available()?;
        let mut state = self.lock();
        state.table_exists = true;

        if state.rows.iter().any(|row| row.email == email) {
            return Err(database_error(
                DatabaseErrorKind::UniqueViolation,
                "duplicate key value violates unique constraint \"users_email_key\"",
            ));
        }

        Ok(state.push(name, email))
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(database_error(
                DatabaseErrorKind::ClosedConnection,
                "connection refused",
            ))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl State {
    fn push(&mut self, name: &str, email: &str) -> User {
        self.next_id += 1;
        let user = User {
            id: self.next_id,
            name: name.to_owned(),
            email: email.to_owned(),
        };
        self.rows.push(user.clone());
        user
    }
}

impl super::UsersRepository for InMemoryUsersRepository {
    fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        self.ensure_available()?;
        let state = self.lock();

        if !state.table_exists {
            return Err(database_error(
                DatabaseErrorKind::Unknown,
                "relation \"users\" does not exist",
            ));
        }

        Ok(state.rows.clone())
    }

    fn seed(&self) -> Result<(), RepositoryError> {
        self.ensure_available()?;
        let mut state = self.lock();
        state.table_exists = true;

        for user in SAMPLE_USERS {
            if !state.rows.iter().any(|row| row.email == user.email) {
                state.push(user.name, user.email);
            }
        }

        Ok(())
    }
}

fn database_error(kind: DatabaseErrorKind, message: &str) -> RepositoryError {
    RepositoryError::Query(DieselError::DatabaseError(kind, Box::new(message.to_owned())))
}
