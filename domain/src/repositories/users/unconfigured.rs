use crate::{User, config::ConfigError, repositories::RepositoryError};

/// Stands in for the store when its configuration is invalid, so callers see
/// the configuration error on use instead of at startup.
pub struct UnconfiguredUsersRepository {
    error: ConfigError,
}

impl UnconfiguredUsersRepository {
    pub fn new(error: ConfigError) -> Self {
        Self { error }
    }
}

impl super::UsersRepository for UnconfiguredUsersRepository {
    fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        Err(self.error.clone().into())
    }

    fn seed(&self) -> Result<(), RepositoryError> {
        Err(self.error.clone().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UsersRepository;

    #[test]
    fn every_call_should_report_the_config_error() {
        let repository =
            UnconfiguredUsersRepository::new(ConfigError::InvalidPort("abc".to_owned()));

        let expected = "DB_PORT needs to be an integer between 0 and 65535, got \"abc\"";
        assert_eq!(repository.list_all().unwrap_err().to_string(), expected);
        assert_eq!(repository.seed().unwrap_err().to_string(), expected);
    }
}
