//! User credential models.

pub mod juke_user;
