//! `wayfarer-session` -- the UI-facing planner session.
//!
//! Owns the mutable pieces of a visit (filter criteria, destination
//! selection, last generated itinerary), debounces free-text search, and
//! publishes results to subscribers over an in-process bus.

pub mod bus;
pub mod config;
pub mod debounce;
pub mod session;

pub use bus::{SessionBus, SessionEvent};
pub use config::PlannerConfig;
pub use debounce::Debouncer;
pub use session::PlannerSession;
