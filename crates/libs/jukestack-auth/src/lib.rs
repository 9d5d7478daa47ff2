//! Secret hashing primitives for the JukeStack backend.
//!
//! Everything that touches raw secret material lives here: salted
//! password hashing, session/verification token digests and the
//! constant-time comparison used to verify them. Higher layers only
//! ever see digests and hex strings.

pub mod compare;
pub mod error;
pub mod iterated_hash;
pub mod prelude;
pub mod scheme;
pub mod secret_hash;
