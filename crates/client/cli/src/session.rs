//! Scripted cooking round played against one shared pot.

use anyhow::{Context, Result, bail, ensure};
use pot_core::{ItemInstance, ItemOracle, PotId};
use pot_runtime::{Event, ReplicationEvent, Runtime, Topic};
use tracing::{info, warn};

const POT: PotId = PotId(1);

/// Every participant feeds one ingredient, a round of consumptions races
/// over a slow network, then the host eats the pot empty. Replicas are
/// compared after each stage.
pub async fn run(runtime: &Runtime) -> Result<()> {
    let ids: Vec<_> = runtime
        .items()
        .all_definitions()
        .iter()
        .map(|definition| definition.id)
        .collect();
    ensure!(!ids.is_empty(), "item catalog is empty");

    let mut events = runtime.subscribe(Topic::Replication);
    let restored = runtime.spawn_pot(POT).await?;
    if let Some(snapshot) = restored.first() {
        info!(
            pot = %POT,
            entries = snapshot.entries.len(),
            total_uses = snapshot.total_uses,
            "pot ready"
        );
    }

    let mut last = 0;
    for (index, handle) in runtime.participants().iter().enumerate() {
        handle.focus(Some(POT)).await?;
        let item = ids[index % ids.len()];
        let uses = i32::try_from(index + 1).unwrap_or(i32::MAX);
        last = handle
            .feed_focused(ItemInstance::new(item, 0, Some(uses)))
            .await?;
    }
    runtime.settle(last).await?;
    report(runtime, "fed").await?;

    runtime.hub().hold()?;
    for handle in runtime.participants() {
        match handle.request_remove_one_use(POT).await {
            Ok(sequence) => last = last.max(sequence),
            Err(error) => warn!(participant = %handle.id(), %error, "consumption refused"),
        }
    }
    if let Err(error) = runtime.host().request_remove_one_use(POT).await {
        info!(%error, "host waits for its first consumption to come back");
    }
    let released = runtime.hub().release()?;
    info!(released, "network caught up");
    runtime.settle(last).await?;
    report(runtime, "consumed").await?;

    loop {
        let snapshot = runtime
            .host()
            .query_pot(POT)
            .await?
            .context("host lost the pot")?;
        if snapshot.total_uses == 0 {
            break;
        }
        let sequence = runtime.host().request_remove_one_use(POT).await?;
        runtime.settle(sequence).await?;
    }
    report(runtime, "emptied").await?;

    while let Ok(event) = events.try_recv() {
        if let Event::Replication(ReplicationEvent::CommandFailed {
            participant,
            sequence,
            error,
            ..
        }) = event
        {
            warn!(%participant, sequence, %error, "replicated call failed");
        }
    }

    Ok(())
}

async fn report(runtime: &Runtime, stage: &str) -> Result<()> {
    let snapshots = runtime.query_all(POT).await?;
    let Some(reference) = snapshots.first() else {
        bail!("no participant has {POT} registered");
    };

    for (handle, snapshot) in runtime.participants().iter().zip(&snapshots) {
        info!(
            stage,
            participant = %handle.id(),
            phase = %snapshot.phase,
            total_uses = snapshot.total_uses,
            budget = ?snapshot.budget.value(),
            effects = %snapshot.effects,
            visuals = snapshot.visuals.values().sum::<usize>(),
            digest = %hex::encode(snapshot.digest),
            "replica state"
        );
    }

    ensure!(
        snapshots.iter().all(|s| s.digest == reference.digest),
        "replicas diverged after stage {stage}"
    );
    Ok(())
}
