//! Participant worker that owns one peer's pot replicas.
//!
//! Receives commands from [`ParticipantHandle`](crate::api::ParticipantHandle),
//! turns local requests into broadcast calls, applies every frame the
//! [`ReplicationHub`] delivers through [`pot_core::PotEngine`] and publishes
//! the outcome to the EventBus.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use pot_core::{
    CommandResult, CookingPot, ExecuteError, ExecutionOutcome, ItemInstance,
    PotConfig, PotEngine, PotError, PotId, PotState, UseBudget,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, LifecycleEvent, ReplicationEvent};
use crate::oracle::OracleBundle;
use crate::registry::{PotInstance, PotRegistry, PotSnapshot};
use crate::repository::PotRepository;
use crate::scene::SceneHost;
use crate::transport::{Envelope, Frame, FrameReceiver, ReplicationHub};
use crate::types::{ParticipantId, Sequence};

/// Local input aimed at a pot.
#[derive(Debug, Clone)]
pub enum PotRequest {
    Add(ItemInstance),
    Clear,
    RemoveOneUse,
}

impl PotRequest {
    fn as_str(&self) -> &'static str {
        match self {
            PotRequest::Add(_) => "add_entry",
            PotRequest::Clear => "clear",
            PotRequest::RemoveOneUse => "remove_one_use",
        }
    }
}

/// Commands that can be sent to a participant worker
pub enum Command {
    /// Register a pot, restoring its persisted contents.
    SpawnPot {
        pot: PotId,
        reply: oneshot::Sender<Result<PotSnapshot>>,
    },
    /// Unregister a pot and tear down its scene objects.
    DespawnPot {
        pot: PotId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Aim local input at a pot, or at nothing.
    Focus {
        pot: Option<PotId>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Validate a local request and broadcast it. `None` targets the focus.
    Request {
        pot: Option<PotId>,
        request: PotRequest,
        reply: oneshot::Sender<Result<Sequence>>,
    },
    /// Attach or detach the pot's interior sub-object.
    SetInterior {
        pot: PotId,
        attached: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Reply once every call up to `sequence` has been applied.
    AwaitSequence {
        sequence: Sequence,
        reply: oneshot::Sender<()>,
    },
    /// Query a pot's current state (read-only).
    QueryPot {
        pot: PotId,
        reply: oneshot::Sender<Option<PotSnapshot>>,
    },
}

/// Dependencies every participant of a session shares.
#[derive(Clone)]
pub struct WorkerContext {
    pub oracles: OracleBundle,
    pub hub: ReplicationHub,
    pub event_bus: EventBus,
    pub repository: Option<Arc<dyn PotRepository>>,
    pub config: PotConfig,
    pub seed: u64,
}

/// Background task driving one participant.
///
/// Only the host participant writes to the repository; every participant
/// reads it when a pot is spawned so all replicas start from the same data.
pub struct ParticipantWorker {
    id: ParticipantId,
    context: WorkerContext,
    registry: PotRegistry,
    focus: Option<PotId>,
    frames: FrameReceiver,
    command_rx: mpsc::Receiver<Command>,
    picker: StdRng,
    applied_through: Sequence,
    waiters: Vec<(Sequence, oneshot::Sender<()>)>,
}

impl ParticipantWorker {
    pub fn new(
        id: ParticipantId,
        context: WorkerContext,
        frames: FrameReceiver,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        let picker = StdRng::seed_from_u64(context.seed ^ u64::from(id.0).rotate_left(32));
        info!(participant = %id, host = id.is_host(), "participant worker initialized");

        Self {
            id,
            context,
            registry: PotRegistry::new(),
            focus: None,
            frames,
            command_rx,
            picker,
            applied_through: 0,
            waiters: Vec::new(),
        }
    }

    /// Main worker loop.
    ///
    /// Inbound frames are drained before local commands so a request always
    /// validates against the newest replicated state this participant has.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                frame = self.frames.recv() => match frame {
                    Some(frame) => self.handle_frame(frame),
                    None => break,
                },
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
            }
        }

        if let Err(error) = self.context.hub.leave(self.id) {
            warn!(participant = %self.id, %error, "failed to leave replication hub");
        }
        for id in self.registry.ids().collect::<Vec<_>>() {
            if let Some(mut instance) = self.registry.remove(id) {
                instance.pot.tear_down(&mut instance.scene);
            }
        }
        debug!(participant = %self.id, "participant worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SpawnPot { pot, reply } => {
                let result = self.handle_spawn(pot);
                if reply.send(result).is_err() {
                    debug!("SpawnPot reply channel closed (caller dropped)");
                }
            }
            Command::DespawnPot { pot, reply } => {
                let result = self.handle_despawn(pot);
                if reply.send(result).is_err() {
                    debug!("DespawnPot reply channel closed (caller dropped)");
                }
            }
            Command::Focus { pot, reply } => {
                let result = match pot {
                    Some(id) if !self.registry.contains(id) => Err(RuntimeError::UnknownPot(id)),
                    _ => {
                        self.focus = pot;
                        Ok(())
                    }
                };
                if reply.send(result).is_err() {
                    debug!("Focus reply channel closed (caller dropped)");
                }
            }
            Command::Request {
                pot,
                request,
                reply,
            } => {
                let result = self.handle_request(pot, request);
                if reply.send(result).is_err() {
                    debug!("Request reply channel closed (caller dropped)");
                }
            }
            Command::SetInterior {
                pot,
                attached,
                reply,
            } => {
                let result = self.handle_set_interior(pot, attached);
                if reply.send(result).is_err() {
                    debug!("SetInterior reply channel closed (caller dropped)");
                }
            }
            Command::AwaitSequence { sequence, reply } => {
                if sequence <= self.applied_through {
                    let _ = reply.send(());
                } else {
                    self.waiters.push((sequence, reply));
                }
            }
            Command::QueryPot { pot, reply } => {
                let snapshot = self.registry.get(pot).map(PotInstance::snapshot);
                if reply.send(snapshot).is_err() {
                    debug!("QueryPot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_spawn(&mut self, id: PotId) -> Result<PotSnapshot> {
        if self.registry.contains(id) {
            return Err(RuntimeError::PotAlreadySpawned(id));
        }

        let config = self.context.config.clone();
        let (state, restored, reset) = match &self.context.repository {
            Some(repository) => {
                let loaded = if self.id.is_host() {
                    repository.restore(id)?
                } else {
                    repository.load(id)?
                };
                // A store without a persisted budget keeps exactly its own uses.
                let value = loaded
                    .budget
                    .unwrap_or_else(|| loaded.store.total_uses());
                let restored = loaded.store.len();
                let state = PotState {
                    store: loaded.store,
                    budget: UseBudget::restored(config.max_uses, value),
                };
                (state, restored, loaded.reset)
            }
            None => (PotState::new(UseBudget::established(config.max_uses)), 0, false),
        };

        let mut instance = PotInstance::new(CookingPot::with_state(id, config, state), SceneHost::new());
        let env = self.context.oracles.as_pot_env();
        if let Err(error) = PotEngine::new(&mut instance.pot).initialize(env, &mut instance.scene) {
            error!(
                participant = %self.id,
                pot = %id,
                %error,
                "restored pot has no combined effect"
            );
        }

        let snapshot = instance.snapshot();
        if self.registry.insert(instance).is_err() {
            return Err(RuntimeError::PotAlreadySpawned(id));
        }

        info!(
            participant = %self.id,
            pot = %id,
            restored,
            reset,
            total_uses = snapshot.total_uses,
            "pot spawned"
        );
        self.context
            .event_bus
            .publish(Event::Lifecycle(LifecycleEvent::PotSpawned {
                participant: self.id,
                pot: id,
                restored,
                reset,
            }));

        Ok(snapshot)
    }

    fn handle_despawn(&mut self, id: PotId) -> Result<()> {
        let mut instance = self
            .registry
            .remove(id)
            .ok_or(RuntimeError::UnknownPot(id))?;
        instance.pot.tear_down(&mut instance.scene);
        if self.focus == Some(id) {
            self.focus = None;
        }

        info!(participant = %self.id, pot = %id, "pot despawned");
        self.context
            .event_bus
            .publish(Event::Lifecycle(LifecycleEvent::PotDespawned {
                participant: self.id,
                pot: id,
            }));
        Ok(())
    }

    /// Validates a local request against this replica and broadcasts the
    /// resulting call. The replica itself only changes when the call comes
    /// back through the hub.
    fn handle_request(&mut self, target: Option<PotId>, request: PotRequest) -> Result<Sequence> {
        let id = target.or(self.focus).ok_or(RuntimeError::NoFocus)?;
        let instance = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownPot(id))?;

        let command = match &request {
            PotRequest::Add(item) => instance
                .pot
                .request_add(self.context.oracles.items(), *item)?,
            PotRequest::Clear => instance.pot.request_clear(),
            PotRequest::RemoveOneUse => {
                if instance.removal_in_flight.is_some() {
                    return Err(RuntimeError::RemovalInFlight(id));
                }
                let picker = &mut self.picker;
                instance
                    .pot
                    .request_remove_one_use(|total| picker.gen_range(0..total))?
            }
        };

        let sequence = self.context.hub.broadcast(self.id, id, command)?;
        if matches!(request, PotRequest::RemoveOneUse) {
            instance.removal_in_flight = Some(sequence);
        }

        debug!(
            participant = %self.id,
            pot = %id,
            sequence,
            request = request.as_str(),
            "request broadcast"
        );
        Ok(sequence)
    }

    fn handle_set_interior(&mut self, id: PotId, attached: bool) -> Result<()> {
        let instance = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownPot(id))?;

        if !attached {
            let despawned = instance.pot.clear_visuals(&mut instance.scene);
            instance.scene.detach_interior();
            debug!(participant = %self.id, pot = %id, despawned, "interior detached");
            return Ok(());
        }

        instance.scene.attach_interior();
        let env = self.context.oracles.as_pot_env();
        match PotEngine::new(&mut instance.pot).initialize(env, &mut instance.scene) {
            Ok(report) => {
                debug!(
                    participant = %self.id,
                    pot = %id,
                    spawned = report.visuals.spawned,
                    "interior attached"
                );
            }
            Err(error) => {
                error!(participant = %self.id, pot = %id, %error, "refresh after attach failed");
            }
        }
        Ok(())
    }

    /// Applies one frame and answers every waiter it satisfies.
    ///
    /// A payload that fails to decode still counts as applied, so waiters on
    /// its sequence resolve; the skip is reported as `FrameRejected`.
    fn handle_frame(&mut self, frame: Frame) {
        let Frame { sequence, payload } = frame;
        self.applied_through = self.applied_through.max(sequence);

        match Envelope::decode(&payload) {
            Ok(envelope) => self.apply_envelope(sequence, envelope),
            Err(error) => {
                error!(participant = %self.id, sequence, %error, "dropping undecodable frame");
                self.registry.settle_removal(sequence);
                self.context
                    .event_bus
                    .publish(Event::Replication(ReplicationEvent::FrameRejected {
                        participant: self.id,
                        sequence,
                        error: error.to_string(),
                    }));
            }
        }

        let applied_through = self.applied_through;
        let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiters)
            .into_iter()
            .partition(|(sequence, _)| *sequence <= applied_through);
        self.waiters = pending;
        for (_, reply) in ready {
            let _ = reply.send(());
        }
    }

    fn apply_envelope(&mut self, sequence: Sequence, envelope: Envelope) {
        let Envelope {
            origin,
            pot: id,
            command,
        } = envelope;

        let Some(instance) = self.registry.get_mut(id) else {
            debug!(participant = %self.id, pot = %id, sequence, "call for unregistered pot ignored");
            return;
        };

        if origin == self.id && instance.removal_in_flight == Some(sequence) {
            instance.removal_in_flight = None;
        }

        let env = self.context.oracles.as_pot_env();
        let result = PotEngine::new(&mut instance.pot).execute(env, &mut instance.scene, &command);

        let event = match result {
            Ok(outcome) => {
                log_outcome(self.id, &instance.pot, sequence, command.as_str(), &outcome);
                if self.id.is_host() {
                    persist(self.context.repository.as_deref(), &instance.pot);
                }
                ReplicationEvent::CommandApplied {
                    participant: self.id,
                    pot: id,
                    sequence,
                    command: command.as_str().to_string(),
                    phase: outcome.phase,
                    total_uses: outcome.total_uses,
                    digest: outcome.digest,
                }
            }
            Err(error) => {
                log_failure(self.id, id, sequence, command.as_str(), &error);
                if error.state_changed() && self.id.is_host() {
                    persist(self.context.repository.as_deref(), &instance.pot);
                }
                ReplicationEvent::CommandFailed {
                    participant: self.id,
                    pot: id,
                    sequence,
                    command: command.as_str().to_string(),
                    error: error.to_string(),
                    severity: error.severity(),
                }
            }
        };

        self.context.event_bus.publish(Event::Replication(event));
    }
}

fn log_outcome(
    participant: ParticipantId,
    pot: &CookingPot,
    sequence: Sequence,
    command: &'static str,
    outcome: &ExecutionOutcome,
) {
    info!(
        %participant,
        pot = %pot.id(),
        sequence,
        command,
        phase = %outcome.phase,
        total_uses = outcome.total_uses,
        entries = ?pot.store().snapshot(),
        digest = %hex::encode(outcome.digest),
        "call applied"
    );
    debug!(
        %participant,
        pot = %pot.id(),
        statuses = ?pot.effects().statuses,
        afflictions = pot.effects().afflictions.len(),
        appliers = outcome.refresh.appliers_attached,
        "combined effect rebuilt"
    );

    if let CommandResult::UseRemoved(removal) = &outcome.result {
        if let Some(pruned) = &removal.removal.pruned {
            debug!(%participant, pot = %pot.id(), item = %pruned.id, "ingredient used up");
        }
        if removal.budget_cleared > 0 {
            info!(
                %participant,
                pot = %pot.id(),
                dropped = removal.budget_cleared,
                "pot ran out of uses and was emptied"
            );
        }
    }
}

fn log_failure(
    participant: ParticipantId,
    pot: PotId,
    sequence: Sequence,
    command: &'static str,
    error: &ExecuteError,
) {
    let severity = error.severity();
    if severity.is_internal() {
        error!(
            %participant,
            %pot,
            sequence,
            command,
            %error,
            state_changed = error.state_changed(),
            "call failed"
        );
    } else {
        warn!(
            %participant,
            %pot,
            sequence,
            command,
            %error,
            retryable = severity.is_recoverable(),
            "call rejected"
        );
    }
}

fn persist(repository: Option<&dyn PotRepository>, pot: &CookingPot) {
    let Some(repository) = repository else {
        return;
    };
    if let Err(error) = repository.save(pot.id(), pot.store(), pot.budget()) {
        error!(pot = %pot.id(), %error, "failed to persist pot");
    }
}
