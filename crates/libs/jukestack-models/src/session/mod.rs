//! Session and email-verification models.

pub mod auth_session;
pub mod email_verification;
