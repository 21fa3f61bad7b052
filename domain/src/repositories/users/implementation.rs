use diesel::{connection::SimpleConnection, prelude::*};

use crate::{User, pool::DbPool, repositories::RepositoryError, seed::SCHEMA_AND_SEED_SQL};

pub struct PgUsersRepository {
    pool: DbPool,
}

impl PgUsersRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl super::UsersRepository for PgUsersRepository {
    fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        use crate::schema::users;

        let mut connection = self.pool.get()?;

        let rows = users::table
            .select(User::as_select())
            .order(users::id.asc())
            .load(&mut *connection)?;

        Ok(rows)
    }

    fn seed(&self) -> Result<(), RepositoryError> {
        let mut connection = self.pool.get()?;

        connection.batch_execute(SCHEMA_AND_SEED_SQL)?;

        Ok(())
    }
}
