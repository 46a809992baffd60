//! Worker tasks that back the runtime orchestration.
//!
//! One participant worker runs per peer of the session; all of them meet at
//! the shared replication hub.

mod participant;

pub use participant::{Command, ParticipantWorker, PotRequest, WorkerContext};
