//! Event types for different topics.

use pot_core::{ErrorSeverity, PotId, PotPhase};
use serde::{Deserialize, Serialize};

use crate::types::{ParticipantId, Sequence};

/// Outcome of a replicated call on one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplicationEvent {
    /// The call was applied and the derived caches rebuilt.
    CommandApplied {
        participant: ParticipantId,
        pot: PotId,
        sequence: Sequence,
        command: String,
        phase: PotPhase,
        total_uses: u32,
        digest: [u8; 32],
    },

    /// The call was rejected, or applied without a combined effect.
    CommandFailed {
        participant: ParticipantId,
        pot: PotId,
        sequence: Sequence,
        command: String,
        error: String,
        severity: ErrorSeverity,
    },

    /// The frame's payload could not be decoded. The call is skipped so the
    /// participant keeps up with the sequence; its replicas may now lag.
    FrameRejected {
        participant: ParticipantId,
        sequence: Sequence,
        error: String,
    },
}

impl ReplicationEvent {
    pub fn participant(&self) -> ParticipantId {
        match self {
            Self::CommandApplied { participant, .. }
            | Self::CommandFailed { participant, .. }
            | Self::FrameRejected { participant, .. } => *participant,
        }
    }

    pub fn sequence(&self) -> Sequence {
        match self {
            Self::CommandApplied { sequence, .. }
            | Self::CommandFailed { sequence, .. }
            | Self::FrameRejected { sequence, .. } => *sequence,
        }
    }
}

/// Pot registration on one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    PotSpawned {
        participant: ParticipantId,
        pot: PotId,
        /// Entries restored from persistence.
        restored: usize,
        /// The persisted store was missing or corrupt and was reset.
        reset: bool,
    },

    PotDespawned {
        participant: ParticipantId,
        pot: PotId,
    },
}
