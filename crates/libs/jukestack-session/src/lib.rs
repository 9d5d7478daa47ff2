//! The JukeStack authentication authority.
//!
//! Single point of truth for turning user-presented credentials into
//! authenticated identity: password verification, session-token
//! issuance/validation/invalidation and time-boxed email-verification
//! tokens. Persistence is abstracted behind [`store::AuthStore`]; the
//! HTTP layer consumes plain results and never sees secret material
//! beyond the raw tokens it must deliver.

pub mod config;
pub mod error;
pub mod manager;
pub mod prelude;
pub mod store;
