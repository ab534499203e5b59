//! Authentication models

use serde::{Deserialize, Serialize};

/// Primary key of a row in the `user` table
pub type UserId = i64;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Username for login
    pub username: String,
    /// bcrypt hash of the password, never sent to clients
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Register and login form fields
///
/// Missing fields deserialize to empty strings so that the credential store
/// reports them as validation errors instead of the extractor rejecting the
/// request.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$2b$04$secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
