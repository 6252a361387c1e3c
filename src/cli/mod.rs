//! # Command line front end
//!
//! Thin layer over [`crate::spotify`]: every function here runs one domain
//! operation (or a short search-pick-act sequence), renders the records as
//! tables and reports the outcome with the colored output macros.
//!
//! - [`auth`] connects a [`crate::spotify::SpotifyClient`], authorizing in the
//!   browser when no session is stored
//! - [`search`], [`library`], [`playlist`], [`player`], [`queue`] hold the
//!   actions, grouped like the menu
//! - [`interactive`] is the numbered menu
//!
//! Failures come back as [`crate::error::Error`] and go through [`report`]:
//! authentication errors end the process, everything else is a warning.

mod auth;
pub mod interactive;
pub mod library;
pub mod player;
pub mod playlist;
mod prompt;
pub mod queue;
pub mod render;
pub mod search;

pub use auth::connect;

use crate::{error::Error, warning};

/// What a command line query searches for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    Track,
    Artist,
    Album,
    Playlist,
}

/// Prints `e` for the user. Exits with status 1 on authentication errors.
pub fn report(e: Error) {
    match e {
        Error::Auth(_) | Error::Unauthorized => {
            crate::error!("{}. Delete the stored token and sign in again.", e)
        }
        Error::NotFound => warning!("Nothing found. Is a Spotify device active?"),
        e => warning!("{}", e),
    }
}
