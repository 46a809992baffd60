//! Public runtime API surface.
//!
//! Re-exports the error types and the participant handle clients use to
//! drive a session.
mod errors;
mod handle;

pub use errors::{RepositoryError, Result, RuntimeError, TransportError, WireError};
pub use handle::ParticipantHandle;
