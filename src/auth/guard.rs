//! Access guard for operations that need a logged-in user

use crate::auth::models::User;

/// Where anonymous visitors are sent
pub const LOGIN_PATH: &str = "/auth/login";

/// Outcome of running an operation through [`guard`]
#[derive(Debug, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The operation ran and produced this value
    Allowed(T),
    /// Nobody is logged in; the operation did not run
    RedirectToLogin,
}

impl<T> Guarded<T> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Guarded::Allowed(_))
    }

    pub fn into_allowed(self) -> Option<T> {
        match self {
            Guarded::Allowed(value) => Some(value),
            Guarded::RedirectToLogin => None,
        }
    }
}

/// Run `op` with the current user, or refuse when there is none
pub fn guard<T, F>(identity: Option<&User>, op: F) -> Guarded<T>
where
    F: FnOnce(&User) -> T,
{
    match identity {
        Some(user) => Guarded::Allowed(op(user)),
        None => Guarded::RedirectToLogin,
    }
}
