//! Blog posts

pub mod models;
pub mod store;

pub use models::{Post, PostForm, PostId};
pub use store::PostStore;
