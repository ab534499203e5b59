//! Blog post models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// Primary key of a row in the `post` table
pub type PostId = i64;

/// A post joined with its author's username
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub created: NaiveDateTime,
    pub author_id: UserId,
    pub username: String,
}

impl Post {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Create and update form fields
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}
