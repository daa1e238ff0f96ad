//! Apprenticeship reachability server.
//!
//! A web application that answers: "which apprenticeship openings can
//! I reach by public transit within my travel-time budget?"

pub mod cache;
pub mod domain;
pub mod engine;
pub mod geocode;
pub mod listings;
pub mod reachability;
pub mod web;
