//! Session state that outlives a single request: the persisted token file and
//! the manager that keeps the token valid.

mod auth;
mod token_file;

pub use auth::{EXPIRY_BUFFER_SECS, TokenManager, is_expired};
pub use token_file::TokenFile;
