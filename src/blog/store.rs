//! Post storage backed by the `post` table

use sqlx::SqlitePool;

use crate::auth::UserId;
use crate::blog::models::{Post, PostId};
use crate::error::{Error, Result};

const SELECT_POSTS: &str = "SELECT p.id, p.title, p.body, p.created, p.author_id, u.username \
     FROM post p JOIN user u ON p.author_id = u.id";

#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first
    pub async fn list(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} ORDER BY p.created DESC, p.id DESC",
            SELECT_POSTS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    /// Fetch a post, optionally requiring that `check_author` wrote it
    pub async fn get(&self, id: PostId, check_author: Option<UserId>) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(&format!("{} WHERE p.id = ?", SELECT_POSTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::PostNotFound(id))?;

        if let Some(user_id) = check_author {
            if !post.is_authored_by(user_id) {
                return Err(Error::Forbidden);
            }
        }

        Ok(post)
    }

    /// Create a post and return its id
    pub async fn create(&self, author_id: UserId, title: &str, body: &str) -> Result<PostId> {
        validate_title(title)?;

        let done = sqlx::query("INSERT INTO post (title, body, author_id) VALUES (?, ?, ?)")
            .bind(title)
            .bind(body)
            .bind(author_id)
            .execute(&self.pool)
            .await?;

        let id = done.last_insert_rowid();
        tracing::info!("User {} created post {}", author_id, id);
        Ok(id)
    }

    /// Replace the title and body of a post owned by `author_id`
    pub async fn update(&self, id: PostId, author_id: UserId, title: &str, body: &str) -> Result<()> {
        validate_title(title)?;
        self.get(id, Some(author_id)).await?;

        sqlx::query("UPDATE post SET title = ?, body = ? WHERE id = ?")
            .bind(title)
            .bind(body)
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("User {} updated post {}", author_id, id);
        Ok(())
    }

    /// Delete a post owned by `author_id`
    pub async fn delete(&self, id: PostId, author_id: UserId) -> Result<()> {
        self.get(id, Some(author_id)).await?;

        sqlx::query("DELETE FROM post WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("User {} deleted post {}", author_id, id);
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::Validation("Title is required.".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::db;

    async fn setup() -> (PostStore, UserId, UserId) {
        let pool = db::connect_in_memory().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        let users = CredentialStore::with_cost(pool.clone(), 4);
        let alice = users.register("alice", "pw").await.unwrap();
        let bob = users.register("bob", "pw").await.unwrap();
        (PostStore::new(pool), alice, bob)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (posts, alice, _) = setup().await;
        let id = posts.create(alice, "Hello", "First post").await.unwrap();

        let post = posts.get(id, None).await.unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "First post");
        assert_eq!(post.username, "alice");
        assert_eq!(post.author_id, alice);
    }

    #[tokio::test]
    async fn test_title_required() {
        let (posts, alice, _) = setup().await;
        let err = posts.create(alice, "", "body").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Title is required."));
        assert!(posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (posts, alice, bob) = setup().await;
        posts.create(alice, "one", "").await.unwrap();
        posts.create(bob, "two", "").await.unwrap();

        let listed = posts.list().await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "one"]);
        assert_eq!(listed[0].username, "bob");
    }

    #[tokio::test]
    async fn test_missing_post() {
        let (posts, alice, _) = setup().await;
        let err = posts.get(42, None).await.unwrap_err();
        assert!(matches!(err, Error::PostNotFound(42)));

        let err = posts.delete(42, alice).await.unwrap_err();
        assert!(matches!(err, Error::PostNotFound(42)));
    }

    #[tokio::test]
    async fn test_only_author_may_update() {
        let (posts, alice, bob) = setup().await;
        let id = posts.create(alice, "mine", "body").await.unwrap();

        let err = posts.update(id, bob, "stolen", "").await.unwrap_err();
        assert!(matches!(err, Error::Forbidden));

        posts.update(id, alice, "still mine", "edited").await.unwrap();
        let post = posts.get(id, Some(alice)).await.unwrap();
        assert_eq!(post.title, "still mine");
        assert_eq!(post.body, "edited");
    }

    #[tokio::test]
    async fn test_only_author_may_delete() {
        let (posts, alice, bob) = setup().await;
        let id = posts.create(alice, "mine", "body").await.unwrap();

        assert!(matches!(posts.delete(id, bob).await, Err(Error::Forbidden)));
        posts.delete(id, alice).await.unwrap();
        assert!(matches!(posts.get(id, None).await, Err(Error::PostNotFound(_))));
    }
}
