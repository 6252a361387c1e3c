//! spotcli: a command line client for the Spotify Web API.
//!
//! Search the catalog, manage saved tracks, albums and playlists, control
//! playback and the queue. The library half is usable on its own: build a
//! [`spotify::SpotifyClient`] from a [`config::Config`] and a
//! [`management::TokenManager`] and call the operations in [`spotify`].
//!
//! # Modules
//!
//! - `api` - endpoints of the local OAuth callback server
//! - `cli` - command line and interactive menu actions
//! - `config` - environment driven configuration
//! - `error` - the crate wide error type
//! - `management` - token persistence and refresh
//! - `mapping` - JSON to record conversions
//! - `server` - the OAuth callback server
//! - `spotify` - Web API transport and domain operations
//! - `types` - records and table rows
//! - `utils` - PKCE helpers and formatting
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotcli::{config::Config, management::{TokenFile, TokenManager}, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotcli::error::Result<()> {
//!     spotcli::config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let tokens = TokenManager::load(config.clone(), TokenFile::default()).await?;
//!     let client = spotify::SpotifyClient::from_config(&config, Arc::new(tokens))?;
//!     let tracks = spotify::search::search_tracks(&client, "PTSMR", 10).await?;
//!     println!("{} tracks", tracks.count());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod mapping;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Writes one status line `[<marker>] <message>` with a coloured marker.
///
/// Backs the four user facing macros below. `info!` and `success!` go to
/// stdout next to the tables; `warning!` and `error!` go to stderr so piped
/// output stays clean.
#[doc(hidden)]
#[macro_export]
macro_rules! __status_line {
  (out, $marker:expr, $($arg:tt)*) => ({
    println!("[{}] {}", $marker, std::format_args!($($arg)*));
  });
  (err, $marker:expr, $($arg:tt)*) => ({
    eprintln!("[{}] {}", $marker, std::format_args!($($arg)*));
  });
}

/// Progress and status, marked with a blue `o`.
///
/// ```
/// info!("Showing {} of {} results.", 10, 57);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__status_line!(out, "o".blue().bold(), $($arg)*);
  })
}

/// A completed change, marked with a green check.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__status_line!(out, "✓".green().bold(), $($arg)*);
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for failures the process cannot continue from: missing configuration,
/// a session that cannot be restored. The expansion diverges, so it can be
/// used where a value is expected:
///
/// ```
/// let config = match Config::from_env() {
///     Ok(config) => config,
///     Err(e) => error!("{}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__status_line!(err, "!".red().bold(), $($arg)*);
    std::process::exit(1);
  })
}

/// A recoverable problem, marked with a yellow `!`. The menu keeps running.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__status_line!(err, "!".yellow().bold(), $($arg)*);
  })
}
