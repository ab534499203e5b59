//! HTTP server and account routes

pub mod routes;
pub mod server;

pub use server::*;
