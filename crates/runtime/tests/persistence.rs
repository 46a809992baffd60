mod common;

use std::sync::Arc;

use pot_core::{ItemInstance, PotId, PotPhase, StatusKind};
use pot_runtime::{
    Event, FilePotRepository, InMemoryPotRepository, LifecycleEvent, PotRepository, RecordKey,
    Runtime, RuntimeConfig, Topic,
};
use tempfile::TempDir;

use common::{BERRY, SOUP_BONE, approx, catalog, config};

const POT: PotId = PotId(3);

async fn start_with(repository: Arc<dyn PotRepository>, participants: u32) -> Runtime {
    Runtime::builder()
        .config(config(participants, 10))
        .items(catalog())
        .repository(repository)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn host_persists_and_a_new_session_restores() {
    let dir = TempDir::new().unwrap();
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            persistence_dir: Some(dir.path().to_path_buf()),
            ..config(2, 10)
        })
        .items(catalog())
        .build()
        .await
        .unwrap();
    runtime.spawn_pot(POT).await.unwrap();

    let host = runtime.host();
    host.request_add(POT, ItemInstance::new(BERRY, 0, Some(3)))
        .await
        .unwrap();
    let seq = host
        .request_add(POT, ItemInstance::new(SOUP_BONE, 2, Some(1)))
        .await
        .unwrap();
    runtime.settle(seq).await.unwrap();
    let before = host.query_pot(POT).await.unwrap().unwrap();
    runtime.shutdown().await.unwrap();

    let repository = FilePotRepository::new(dir.path()).unwrap();
    let contents = repository.read(POT, RecordKey::Contents).unwrap().unwrap();
    assert_eq!(
        contents,
        r#"[{"ID":1,"CookedAmount":0,"Uses":3},{"ID":2,"CookedAmount":2,"Uses":1}]"#
    );
    assert_eq!(
        repository.read(POT, RecordKey::Budget).unwrap().as_deref(),
        Some("4")
    );

    let restored = start_with(Arc::new(repository), 3).await;
    let snapshots = restored.spawn_pot(POT).await.unwrap();
    for snapshot in &snapshots {
        assert_eq!(snapshot.entries, before.entries);
        assert_eq!(snapshot.digest, before.digest);
        assert_eq!(snapshot.budget.value(), Some(4));
        assert_eq!(snapshot.phase, PotPhase::Loaded);
        assert!(approx(
            snapshot.effects.statuses.get(StatusKind::Hunger),
            before.effects.statuses.get(StatusKind::Hunger).unwrap()
        ));
    }

    restored.shutdown().await.unwrap();
}

#[tokio::test]
async fn corrupt_contents_load_empty_and_are_repaired() {
    let repository = Arc::new(InMemoryPotRepository::new());
    repository
        .write(POT, RecordKey::Contents, "{not json")
        .unwrap();

    let runtime = start_with(repository.clone(), 2).await;
    let mut lifecycle = runtime.subscribe(Topic::Lifecycle);
    let snapshots = runtime.spawn_pot(POT).await.unwrap();

    assert!(snapshots.iter().all(|s| s.phase == PotPhase::Empty));
    assert_eq!(
        repository.read(POT, RecordKey::Contents).unwrap().as_deref(),
        Some("[]")
    );

    let mut resets = 0;
    while let Ok(event) = lifecycle.try_recv() {
        // the host repairs the value before the guest reads it
        if let Event::Lifecycle(LifecycleEvent::PotSpawned { reset: true, .. }) = event {
            resets += 1;
        }
    }
    assert_eq!(resets, 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn store_without_budget_keeps_its_own_uses() {
    let repository = Arc::new(InMemoryPotRepository::new());
    repository
        .write(POT, RecordKey::Contents, r#"[{"ID":1,"CookedAmount":0,"Uses":2}]"#)
        .unwrap();

    let runtime = start_with(repository.clone(), 1).await;
    let snapshot = runtime.spawn_pot(POT).await.unwrap().remove(0);
    assert_eq!(snapshot.total_uses, 2);
    assert_eq!(snapshot.budget.value(), Some(2));

    let host = runtime.host();
    for _ in 0..2 {
        let seq = host.request_remove_one_use(POT).await.unwrap();
        runtime.settle(seq).await.unwrap();
    }
    let emptied = host.query_pot(POT).await.unwrap().unwrap();
    assert_eq!(emptied.phase, PotPhase::Empty);
    assert_eq!(
        repository.read(POT, RecordKey::Contents).unwrap().as_deref(),
        Some("[]")
    );
    assert_eq!(
        repository.read(POT, RecordKey::Budget).unwrap().as_deref(),
        Some("0")
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn only_the_host_writes() {
    let repository = Arc::new(InMemoryPotRepository::new());
    let runtime = start_with(repository.clone(), 3).await;
    runtime.spawn_pot(POT).await.unwrap();

    // a guest's request is persisted once, by the host, after it comes back
    let guest = runtime.participant(2).unwrap();
    let seq = guest
        .request_add(POT, ItemInstance::new(BERRY, 1, Some(2)))
        .await
        .unwrap();
    runtime.settle(seq).await.unwrap();

    assert_eq!(
        repository.read(POT, RecordKey::Contents).unwrap().as_deref(),
        Some(r#"[{"ID":1,"CookedAmount":1,"Uses":2}]"#)
    );

    runtime.despawn_pot(POT).await.unwrap();
    assert!(runtime.host().query_pot(POT).await.unwrap().is_none());
    // despawning keeps the data for the next spawn
    assert!(repository.read(POT, RecordKey::Contents).unwrap().is_some());

    runtime.shutdown().await.unwrap();
}
