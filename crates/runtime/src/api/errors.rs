//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, the transport and
//! request validation so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use pot_core::{PotId, RequestError};

pub use crate::repository::RepositoryError;
pub use crate::transport::{TransportError, WireError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("participant worker command channel closed")]
    CommandChannelClosed,

    #[error("participant worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("participant worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("pot {0} is not registered")]
    UnknownPot(PotId),

    #[error("pot {0} is already registered")]
    PotAlreadySpawned(PotId),

    #[error("no pot is focused")]
    NoFocus,

    #[error("request rejected: {0}")]
    Request(#[from] RequestError),

    /// A previous removal from this participant has not come back through
    /// the broadcast yet, so the local use total may be stale.
    #[error("a removal for pot {0} is still in flight")]
    RemovalInFlight(PotId),

    #[error("failed to load pot content: {0}")]
    Content(String),

    #[error("runtime requires an item catalog before building")]
    MissingItems,

    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(String),
}
