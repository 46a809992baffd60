//! Identifiers shared throughout the runtime.

use serde::{Deserialize, Serialize};

/// Global position of a replicated command in the broadcast order.
pub type Sequence = u64;

/// Identifies one participant of a session. Participant 0 is the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    pub const HOST: Self = Self(0);

    pub fn is_host(self) -> bool {
        self == Self::HOST
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}
