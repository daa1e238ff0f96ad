//! Apprenticeship listings feed.
//!
//! Listings come from a periodically refreshed JSON feed and are held
//! in memory; the reachability computation works on a snapshot.

mod client;
mod error;
mod store;

pub use client::ListingsClient;
pub use error::ListingsError;
pub use store::ListingsStore;
