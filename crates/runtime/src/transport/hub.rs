//! In-process reliable, ordered broadcast.

use std::sync::{Arc, Mutex};

use pot_core::{PotCommand, PotId};
use thiserror::Error;
use tokio::sync::mpsc;

use super::wire::{Envelope, WireError};
use crate::types::{ParticipantId, Sequence};

/// A sequenced payload as delivered to one participant.
///
/// The sequence lives outside the payload, so a receiver that cannot decode
/// the payload still knows which call it skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub sequence: Sequence,
    pub payload: Vec<u8>,
}

/// Frames delivered to one participant.
pub type FrameReceiver = mpsc::UnboundedReceiver<Frame>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("replication hub lock was poisoned")]
    LockPoisoned,

    #[error("{0} already joined the session")]
    AlreadyJoined(ParticipantId),

    #[error(transparent)]
    Wire(#[from] WireError),
}

struct Peer {
    id: ParticipantId,
    tx: mpsc::UnboundedSender<Frame>,
}

#[derive(Default)]
struct HubState {
    last_sequence: Sequence,
    peers: Vec<Peer>,
    /// Frames sequenced while delivery is held, in sequence order.
    held: Option<Vec<Frame>>,
}

impl HubState {
    fn deliver(&mut self, frame: &Frame) {
        self.peers.retain(|peer| {
            let delivered = peer.tx.send(frame.clone()).is_ok();
            if !delivered {
                tracing::debug!(id = %peer.id, "dropping disconnected participant");
            }
            delivered
        });
    }
}

/// Broadcasts every replicated call to all joined participants, the origin
/// included.
///
/// Sequencing and fan-out happen under one lock, so every participant
/// receives frames in the same global order. Channels are unbounded; a
/// frame is never dropped while its receiver is alive.
#[derive(Clone, Default)]
pub struct ReplicationHub {
    state: Arc<Mutex<HubState>>,
}

impl ReplicationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant and returns its frame stream.
    pub fn join(&self, id: ParticipantId) -> Result<FrameReceiver, TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::LockPoisoned)?;
        if state.peers.iter().any(|peer| peer.id == id) {
            return Err(TransportError::AlreadyJoined(id));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        state.peers.push(Peer { id, tx });
        tracing::debug!(%id, peers = state.peers.len(), "participant joined");
        Ok(rx)
    }

    pub fn leave(&self, id: ParticipantId) -> Result<(), TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::LockPoisoned)?;
        state.peers.retain(|peer| peer.id != id);
        Ok(())
    }

    /// Encodes a call, assigns the next sequence number and delivers it to
    /// everyone.
    pub fn broadcast(
        &self,
        origin: ParticipantId,
        pot: PotId,
        command: PotCommand,
    ) -> Result<Sequence, TransportError> {
        let payload = Envelope {
            origin,
            pot,
            command,
        }
        .encode()?;
        let sequence = self.relay(payload)?;
        tracing::trace!(sequence, %origin, %pot, "broadcast");
        Ok(sequence)
    }

    /// Sequences and delivers an already-encoded payload, as handed over by
    /// a remote peer. The payload is not inspected.
    pub fn relay(&self, payload: Vec<u8>) -> Result<Sequence, TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::LockPoisoned)?;
        let sequence = state.last_sequence + 1;
        state.last_sequence = sequence;

        let frame = Frame { sequence, payload };
        match state.held.as_mut() {
            Some(held) => held.push(frame),
            None => state.deliver(&frame),
        }
        Ok(sequence)
    }

    /// Stops delivering frames. Calls are still sequenced and queued in
    /// order, which models a slow network.
    pub fn hold(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::LockPoisoned)?;
        state.held.get_or_insert_with(Vec::new);
        Ok(())
    }

    /// Delivers every held frame in order and resumes immediate delivery.
    /// Returns how many frames were released.
    pub fn release(&self) -> Result<usize, TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::LockPoisoned)?;
        let held = state.held.take().unwrap_or_default();
        for frame in &held {
            state.deliver(frame);
        }
        tracing::debug!(frames = held.len(), "released held frames");
        Ok(held.len())
    }

    pub fn participants(&self) -> usize {
        self.state.lock().map(|state| state.peers.len()).unwrap_or(0)
    }
}
