pub mod auth;

pub use auth::{MaybeUser, optional_auth_middleware};
