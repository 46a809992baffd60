//! Runtime orchestration for replicated cooking pots.
//!
//! This crate wires the deterministic pot logic of `pot-core` to the pieces a
//! live session needs: participant workers, an ordered replication hub,
//! scene hosts for appliers and visuals, and repositories for the data a pot
//! keeps on its host item. Consumers embed [`Runtime`] to run a session and
//! drive each participant through a [`ParticipantHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`transport`] carries replicated calls between participants
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod registry;
pub mod repository;
pub mod runtime;
pub mod scene;
pub mod transport;
pub mod types;

mod workers;

pub use api::{ParticipantHandle, Result, RuntimeError};
pub use events::{Event, EventBus, LifecycleEvent, ReplicationEvent, Topic};
pub use oracle::{ItemOracleImpl, OracleBundle};
pub use registry::{PotInstance, PotRegistry, PotSnapshot};
pub use repository::{
    FilePotRepository, InMemoryPotRepository, LoadedPot, PotRepository, RecordKey,
    RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scene::{SceneHost, SceneVisual};
pub use transport::{Envelope, Frame, ReplicationHub, TransportError, WireError};
pub use types::{ParticipantId, Sequence};
