//! Shared data model for the Dove Ministries client.
//!
//! Field names follow the backend's JSON (camelCase), so every type here
//! can be deserialized straight from a REST response body.

pub mod api;
pub mod events;
pub mod models;
