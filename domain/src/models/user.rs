use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A row the seed step creates when its email is not taken yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: &'static str,
    pub email: &'static str,
}

pub const SAMPLE_USERS: [NewUser; 2] = [
    NewUser {
        name: "Alice",
        email: "alice@example.com",
    },
    NewUser {
        name: "Bob",
        email: "bob@example.com",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_should_serialize_as_plain_row() {
        let user = User {
            id: 1,
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({ "id": 1, "name": "Alice", "email": "alice@example.com" })
        );
    }

    #[test]
    fn sample_users_should_have_distinct_emails() {
        assert_ne!(SAMPLE_USERS[0].email, SAMPLE_USERS[1].email);
    }
}
