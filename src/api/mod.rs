//! HTTP endpoints of the local OAuth callback server.
//!
//! The server only lives for the duration of an authorization flow; see
//! [`crate::server`].

mod callback;

pub use callback::callback;
