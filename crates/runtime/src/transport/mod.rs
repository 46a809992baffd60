//! Replication transport.
//!
//! The game delivers replicated calls through a reliable, ordered broadcast
//! primitive. [`ReplicationHub`] is the in-process stand-in used by the
//! runtime and its tests; frame payloads use the [`Envelope`] wire format.
mod hub;
mod wire;

pub use hub::{Frame, FrameReceiver, ReplicationHub, TransportError};
pub use wire::{Envelope, WireError};
