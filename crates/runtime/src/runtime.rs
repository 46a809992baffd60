//! High-level runtime orchestrator.
//!
//! The runtime owns one worker per participant, joins them to a shared
//! replication hub and exposes a builder-based API for clients to drive a
//! cooking session.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use pot_content::ContentFactory;
use pot_core::{PotConfig, PotId};

use crate::api::{ParticipantHandle, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::{ItemOracleImpl, OracleBundle};
use crate::registry::PotSnapshot;
use crate::repository::{FilePotRepository, PotRepository};
use crate::transport::ReplicationHub;
use crate::types::ParticipantId;
use crate::workers::{Command, ParticipantWorker, WorkerContext};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub pot: PotConfig,
    /// Number of participants, the host included.
    pub participants: u32,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seeds each participant's removal picker.
    pub seed: u64,
    /// Directory for the host's file repository. Ignored when a repository
    /// is injected through the builder.
    pub persistence_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pot: PotConfig::default(),
            participants: 2,
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: 0,
            persistence_dir: None,
        }
    }
}

/// Main runtime that orchestrates a replicated cooking session
///
/// Design: Runtime owns the participant workers.
/// [`ParticipantHandle`] provides a cloneable façade per participant.
pub struct Runtime {
    handles: Vec<ParticipantHandle>,
    items: Arc<ItemOracleImpl>,
    event_bus: EventBus,
    hub: ReplicationHub,
    worker_handles: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Handle of the host participant.
    pub fn host(&self) -> &ParticipantHandle {
        &self.handles[0]
    }

    pub fn participant(&self, index: usize) -> Option<&ParticipantHandle> {
        self.handles.get(index)
    }

    pub fn participants(&self) -> &[ParticipantHandle] {
        &self.handles
    }

    /// The item catalog every participant resolves ingredients against.
    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }

    pub fn hub(&self) -> &ReplicationHub {
        &self.hub
    }

    /// Subscribe to events of every participant on a topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Registers a pot on every participant, host first, so the host has
    /// repaired any corrupt persisted contents before the others read them.
    pub async fn spawn_pot(&self, pot: PotId) -> Result<Vec<PotSnapshot>> {
        let mut snapshots = Vec::with_capacity(self.handles.len());
        for handle in &self.handles {
            snapshots.push(handle.spawn_pot(pot).await?);
        }
        Ok(snapshots)
    }

    pub async fn despawn_pot(&self, pot: PotId) -> Result<()> {
        for handle in &self.handles {
            handle.despawn_pot(pot).await?;
        }
        Ok(())
    }

    /// Resolves once every participant has applied every call up to and
    /// including `sequence`.
    pub async fn settle(&self, sequence: u64) -> Result<()> {
        for handle in &self.handles {
            handle.wait_for(sequence).await?;
        }
        Ok(())
    }

    /// Snapshots of one pot on every participant that has it registered.
    pub async fn query_all(&self, pot: PotId) -> Result<Vec<PotSnapshot>> {
        let mut snapshots = Vec::with_capacity(self.handles.len());
        for handle in &self.handles {
            if let Some(snapshot) = handle.query_pot(pot).await? {
                snapshots.push(snapshot);
            }
        }
        Ok(snapshots)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Handles cloned by clients keep their worker alive; drop them first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handles);

        for worker in self.worker_handles {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    items: Option<Arc<ItemOracleImpl>>,
    repository: Option<Arc<dyn PotRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            items: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required item catalog
    pub fn items(mut self, items: ItemOracleImpl) -> Self {
        self.items = Some(Arc::new(items));
        self
    }

    /// Load the item catalog and pot configuration from a data directory.
    ///
    /// Replaces the pot section of the current configuration.
    pub fn content(mut self, factory: &ContentFactory) -> Result<Self> {
        let pot = factory
            .load_config()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        let items = factory
            .load_items()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            items = items.len(),
            max_uses = pot.max_uses,
            "loaded pot content"
        );
        self.config.pot = pot;
        self.items = Some(Arc::new(ItemOracleImpl::from_definitions(items)));
        Ok(self)
    }

    /// Set a repository for pot contents (optional)
    pub fn repository(mut self, repository: Arc<dyn PotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let items = self.items.ok_or(RuntimeError::MissingItems)?;

        if self.config.participants == 0 {
            return Err(RuntimeError::InvalidConfig(
                "a session needs at least one participant".to_string(),
            ));
        }
        if self.config.pot.max_uses == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_uses must be at least 1".to_string(),
            ));
        }

        let repository = match (self.repository, &self.config.persistence_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => {
                Some(Arc::new(FilePotRepository::new(dir)?) as Arc<dyn PotRepository>)
            }
            (None, None) => None,
        };

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let hub = ReplicationHub::new();
        let context = WorkerContext {
            oracles: OracleBundle::new(items.clone()),
            hub: hub.clone(),
            event_bus: event_bus.clone(),
            repository,
            config: self.config.pot.clone(),
            seed: self.config.seed,
        };

        let mut handles = Vec::with_capacity(self.config.participants as usize);
        let mut worker_handles = Vec::with_capacity(self.config.participants as usize);

        for index in 0..self.config.participants {
            let id = ParticipantId(index);
            let frames = hub.join(id)?;
            let (command_tx, command_rx) =
                mpsc::channel::<Command>(self.config.command_buffer_size);

            let worker = ParticipantWorker::new(id, context.clone(), frames, command_rx);
            worker_handles.push(tokio::spawn(async move {
                worker.run().await;
            }));
            handles.push(ParticipantHandle::new(id, command_tx, event_bus.clone()));
        }

        tracing::info!(
            participants = self.config.participants,
            persistent = context.repository.is_some(),
            max_uses = self.config.pot.max_uses,
            "runtime started"
        );

        Ok(Runtime {
            handles,
            items,
            event_bus,
            hub,
            worker_handles,
        })
    }
}
