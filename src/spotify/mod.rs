//! # Spotify Web API
//!
//! Everything that talks to Spotify lives here, split by area:
//!
//! ```text
//! CLI
//!  ↓
//! search · artists · albums · library · playlist · player · queue · user
//!  ↓
//! SpotifyClient (token check, one refresh + retry on 401)
//!  ↓
//! Transport (bearer auth, JSON, status mapping)      auth (PKCE flow, refresh)
//!  ↓                                                  ↓
//! api.spotify.com/v1                                 accounts.spotify.com
//! ```
//!
//! Each operation is an `async fn` taking a [`SpotifyClient`] and returning
//! [`crate::error::Result`]. Responses are mapped into the records in
//! [`crate::types`] by the total conversions in [`crate::mapping`], so a
//! missing or malformed field never fails an operation.
//!
//! ## Example
//!
//! ```rust,ignore
//! let tokens = Arc::new(TokenManager::load(config.clone(), TokenFile::default()).await?);
//! let client = SpotifyClient::from_config(&config, tokens)?;
//!
//! let tracks = spotify::search::search_tracks(&client, "PTSMR", 10).await?;
//! println!("{} of {} results", tracks.count(), tracks.total);
//! ```

pub mod albums;
pub mod artists;
pub mod auth;
mod client;
pub mod library;
pub mod player;
pub mod playlist;
pub mod queue;
pub mod search;
mod transport;
pub mod user;

pub use client::{MAX_LIMIT, SpotifyClient, check_ids, clamp_limit};
pub use transport::{ApiResponse, Transport, encode_query};
