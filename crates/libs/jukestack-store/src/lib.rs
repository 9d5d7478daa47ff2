//! Relational credential store adapter.
//!
//! Implements the authority's [`AuthStore`](jukestack_session::store::AuthStore)
//! interface on top of the Diesel models in `jukestack-models`. This is
//! the store handed to [`AuthManager`](jukestack_session::manager::AuthManager)
//! in a real deployment.

pub mod db_store;

pub use db_store::DbAuthStore;
