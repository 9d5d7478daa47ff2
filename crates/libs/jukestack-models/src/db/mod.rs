//! Database connection and configuration.

pub mod config;
pub mod connection;
