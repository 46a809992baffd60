//! Wire format of replicated commands.
//!
//! Frame payloads are bincode-encoded [`Envelope`]s. The command inside
//! carries only resolved values, so decoding a payload is all a receiver
//! needs to apply it.

use pot_core::{PotCommand, PotId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ParticipantId;

/// One replicated call addressed to a pot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub origin: ParticipantId,
    pub pot: PotId,
    pub command: PotCommand,
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode payload of {len} bytes: {source}")]
    Decode {
        len: usize,
        #[source]
        source: bincode::Error,
    },
}

impl Envelope {
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(WireError::Encode)
    }

    pub fn decode(frame: &[u8]) -> Result<Self, WireError> {
        bincode::deserialize(frame).map_err(|source| WireError::Decode {
            len: frame.len(),
            source,
        })
    }
}
