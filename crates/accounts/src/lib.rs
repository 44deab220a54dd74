//! `wayfarer-accounts` -- visitor registration over a key-value store.
//!
//! Mirrors the browser's local-storage account list: users are kept as one
//! JSON array under a single key. Nothing here is a security boundary; the
//! store is readable by anyone with access to it.

pub mod error;
pub mod password;
pub mod store;
pub mod users;

pub use error::AccountError;
pub use store::{KeyValueStore, MemoryStore};
pub use users::{RegisterRequest, RegistrationResult, User, UserManager};
