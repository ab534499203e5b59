//! Web UI

mod handlers;
mod templates;

pub use handlers::*;
pub use templates::Templates;
