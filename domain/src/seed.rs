//! Schema and sample data for the `users` table.

/// Creates the table when it is missing and inserts each sample row only when
/// no row with the same email exists, so the batch can be re-run safely.
pub const SCHEMA_AND_SEED_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(100) UNIQUE NOT NULL
);

INSERT INTO users (name, email)
SELECT 'Alice', 'alice@example.com'
WHERE NOT EXISTS (SELECT 1 FROM users WHERE email = 'alice@example.com');

INSERT INTO users (name, email)
SELECT 'Bob', 'bob@example.com'
WHERE NOT EXISTS (SELECT 1 FROM users WHERE email = 'bob@example.com');
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_USERS;

    #[test]
    fn script_should_guard_every_sample_user() {
        for user in SAMPLE_USERS {
            let guard = format!(
                "SELECT '{}', '{}'\nWHERE NOT EXISTS (SELECT 1 FROM users WHERE email = '{}')",
                user.name, user.email, user.email
            );
            assert!(SCHEMA_AND_SEED_SQL.contains(&guard), "missing guard for {}", user.email);
        }
    }

    #[test]
    fn script_should_create_table_only_if_absent() {
        assert!(SCHEMA_AND_SEED_SQL.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(SCHEMA_AND_SEED_SQL.contains("email VARCHAR(100) UNIQUE NOT NULL"));
    }
}
