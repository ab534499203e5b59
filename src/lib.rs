//! Blogpad - a small blog with user accounts
//!
//! This is the library interface for Blogpad: credential storage, signed
//! cookie sessions, the login guard, post storage and the web router.

pub mod api;
pub mod auth;
pub mod blog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ui;

pub use config::Config;
pub use error::Error;
