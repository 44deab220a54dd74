//! `wayfarer-core` -- pure planning logic for the Philippine trip planner.
//!
//! Everything here is synchronous and free of I/O: the built-in destination
//! catalog, the catalog filter, selection state, the itinerary builder, the
//! export payload, and dashboard statistics. Rendering, persistence and
//! timing live in the other workspace crates.

pub mod catalog;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod itinerary;
pub mod selection;
pub mod types;
