//! Database models and ORM layer for the JukeStack credential store.
//!
//! Diesel-based models, queries and connection management for the three
//! relations the authentication authority persists: user credentials,
//! sessions and email-verification tokens. This crate is a dumb store;
//! validity windows and token shapes are decided by the authority.

pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod session;
pub mod user;
