//! Cloneable façade for issuing requests to one participant.
//!
//! [`ParticipantHandle`] hides channel plumbing and offers async helpers for
//! registering pots, turning local input into replicated calls and reading
//! back pot state.
use tokio::sync::{broadcast, mpsc, oneshot};

use pot_core::{ItemInstance, PotId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::registry::PotSnapshot;
use crate::types::{ParticipantId, Sequence};
use crate::workers::{Command, PotRequest};

/// Client-facing handle to one participant
#[derive(Clone)]
pub struct ParticipantHandle {
    id: ParticipantId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ParticipantHandle {
    pub(crate) fn new(
        id: ParticipantId,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    async fn call<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Registers a pot on this participant, restoring persisted contents.
    pub async fn spawn_pot(&self, pot: PotId) -> Result<PotSnapshot> {
        self.call(|reply| Command::SpawnPot { pot, reply }).await?
    }

    /// Unregisters a pot and tears down its scene objects.
    pub async fn despawn_pot(&self, pot: PotId) -> Result<()> {
        self.call(|reply| Command::DespawnPot { pot, reply }).await?
    }

    /// Sets the pot local input is aimed at.
    pub async fn focus(&self, pot: Option<PotId>) -> Result<()> {
        self.call(|reply| Command::Focus { pot, reply }).await?
    }

    /// Offers an ingredient to the focused pot.
    pub async fn feed_focused(&self, item: ItemInstance) -> Result<Sequence> {
        self.request(None, PotRequest::Add(item)).await
    }

    pub async fn request_add(&self, pot: PotId, item: ItemInstance) -> Result<Sequence> {
        self.request(Some(pot), PotRequest::Add(item)).await
    }

    pub async fn request_clear(&self, pot: PotId) -> Result<Sequence> {
        self.request(Some(pot), PotRequest::Clear).await
    }

    /// Consumes one use, chosen uniformly at random by this participant.
    pub async fn request_remove_one_use(&self, pot: PotId) -> Result<Sequence> {
        self.request(Some(pot), PotRequest::RemoveOneUse).await
    }

    async fn request(&self, pot: Option<PotId>, request: PotRequest) -> Result<Sequence> {
        self.call(|reply| Command::Request {
            pot,
            request,
            reply,
        })
        .await?
    }

    /// Attaches or detaches the pot's interior sub-object. Reattaching
    /// reconciles the visuals that were deferred meanwhile.
    pub async fn set_interior_attached(&self, pot: PotId, attached: bool) -> Result<()> {
        self.call(|reply| Command::SetInterior {
            pot,
            attached,
            reply,
        })
        .await?
    }

    /// Resolves once this participant has applied every call up to `sequence`.
    pub async fn wait_for(&self, sequence: Sequence) -> Result<()> {
        self.call(|reply| Command::AwaitSequence { sequence, reply })
            .await
    }

    /// Query a pot's current state (read-only snapshot)
    pub async fn query_pot(&self, pot: PotId) -> Result<Option<PotSnapshot>> {
        self.call(|reply| Command::QueryPot { pot, reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Replication` - Replicated calls applied or rejected
    /// - `Topic::Lifecycle` - Pots spawned and despawned
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
