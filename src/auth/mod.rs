//! Authentication and session management

pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod session;
pub mod store;

pub use guard::{guard, Guarded, LOGIN_PATH};
pub use jwt::{create_token, validate_token, Claims, TokenKeys};
pub use middleware::{extract_token, login_required, CurrentUser, RequireUser};
pub use models::{CredentialsForm, User, UserId};
pub use session::{SessionManager, SessionToken};
pub use store::CredentialStore;
