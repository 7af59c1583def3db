//! Effectful half of the Dove Ministries client: REST access, session
//! state, the saved-devotions store and the live broadcast feed.
//!
//! The pure list logic lives in `dove-core`; this crate wires it to the
//! backend and to durable storage.

pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod forms;
pub mod http;
pub mod notify;

pub use auth::{AuthContext, Session};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use favorites::{FAVORITES_KEY, FavoritesRemote, FavoritesStore};
pub use feed::{BroadcastFeed, BroadcastSource};
pub use http::ApiClient;
pub use notify::Notifier;
