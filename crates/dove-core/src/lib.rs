//! Broadcast list reconciliation for the radio manager.
//!
//! Everything in this crate is pure: the same input always produces the
//! same output and nothing here touches the network or storage.

pub mod classify;
pub mod merge;
pub mod sort_filter;
pub mod stats;

pub use classify::{Badge, BadgeColor, classify};
pub use merge::merge;
pub use sort_filter::{ActiveStat, ParseStatError, apply};
pub use stats::BroadcastStats;
