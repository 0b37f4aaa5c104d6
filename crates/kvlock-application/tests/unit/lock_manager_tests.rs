//! Lock manager behaviour against the in-memory store

use crate::support::{
    StallingStore, UnreachableStore, counting_manager, memory_manager, namespace,
};
use kvlock_application::LockManager;
use kvlock_domain::LockOutcome;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_lock_key_is_namespaced() {
    let manager = memory_manager();
    assert_eq!(manager.lock_key("LOCK_KEY"), "test:kvlock:string:LOCK_KEY");
}

#[tokio::test]
async fn test_acquire_release_reacquire_scenario() {
    let manager = memory_manager();

    let first = manager
        .try_lock_once("LOCK_KEY", 60_000)
        .await
        .unwrap()
        .expect("fresh key should be acquired");

    let second = manager.try_lock_once("LOCK_KEY", 60_000).await.unwrap();
    assert!(second.is_none());

    assert!(manager.release_lock("LOCK_KEY", first.as_str()).await.unwrap());

    let third = manager
        .try_lock_once("LOCK_KEY", 60_000)
        .await
        .unwrap()
        .expect("released key should be acquirable again");
    assert_ne!(first, third);
}

#[tokio::test]
async fn test_get_returns_holder_token() {
    let manager = memory_manager();
    assert_eq!(manager.get("job").await, None);

    let token = manager.try_lock_once("job", 5_000).await.unwrap().unwrap();
    assert_eq!(manager.get("job").await, Some(token.into_inner()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_acquirers_have_single_winner() {
    let manager = memory_manager();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.try_lock_once("contested", 30_000).await })
        })
        .collect();

    let winners = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .filter(Option::is_some)
        .count();
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_release_requires_matching_token() {
    let manager = memory_manager();
    let token = manager.try_lock_once("res", 30_000).await.unwrap().unwrap();

    assert!(!manager.release_lock("res", "not-the-token").await.unwrap());
    assert_eq!(manager.get("res").await.as_deref(), Some(token.as_str()));

    assert!(manager.release_lock("res", token.as_str()).await.unwrap());
    assert!(!manager.release_lock("res", token.as_str()).await.unwrap());
}

#[tokio::test]
async fn test_expiry_reenables_acquisition() {
    let manager = memory_manager();

    assert!(manager.try_lock_once("short", 1_000).await.unwrap().is_some());
    assert!(manager.try_lock_once("short", 1_000).await.unwrap().is_none());

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    assert!(manager.try_lock_once("short", 1_000).await.unwrap().is_some());
}

#[tokio::test]
async fn test_release_after_expiry_and_reacquire_is_noop() {
    let manager = memory_manager();
    let stale = manager.try_lock_once("handoff", 1_000).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    let fresh = manager.try_lock_once("handoff", 30_000).await.unwrap().unwrap();

    assert!(!manager.release_lock("handoff", stale.as_str()).await.unwrap());
    assert_eq!(manager.get("handoff").await.as_deref(), Some(fresh.as_str()));
}

#[tokio::test]
async fn test_timeout_bound_respected_on_held_key() {
    let manager = memory_manager();
    manager.try_lock_once("held", 60_000).await.unwrap().unwrap();

    let started = Instant::now();
    let result = manager.try_lock_with_timeout("held", 60_000, 500).await.unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_none());
    assert!(elapsed >= Duration::from_millis(400), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(700), "overshot the bound: {elapsed:?}");
}

#[tokio::test]
async fn test_timeout_bound_holds_when_store_stalls() {
    let manager = LockManager::new(Arc::new(StallingStore::default()), namespace());

    let started = Instant::now();
    let result = manager.try_lock_with_timeout("stuck", 10_000, 500).await.unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_none());
    assert!(elapsed >= Duration::from_millis(450), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(700), "stalled store overran the bound: {elapsed:?}");
}

#[tokio::test]
async fn test_wait_succeeds_when_holder_releases() {
    let manager = memory_manager();
    let token = manager.try_lock_once("queue", 60_000).await.unwrap().unwrap();

    let holder = manager.clone();
    let release = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        holder.release_lock("queue", token.as_str()).await.unwrap()
    });

    let waited = manager.try_lock_with_timeout("queue", 60_000, 2_000).await.unwrap();
    assert!(release.await.unwrap());
    assert!(waited.is_some());
}

#[tokio::test]
async fn test_wait_acquires_free_key_immediately() {
    let (manager, store) = counting_manager();

    let token = manager.try_lock_with_timeout("free", 10_000, 1_000).await.unwrap();
    assert!(token.is_some());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_timeout_validation_rejects_before_store_call() {
    let (manager, store) = counting_manager();

    for timeout in [0, 70_000] {
        let err = manager
            .try_lock_with_timeout("any", 10_000, timeout)
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_sub_second_ttl_rejected_before_store_call() {
    let (manager, store) = counting_manager();

    assert!(manager.try_lock_once("any", 200).await.is_err());
    assert!(manager.try_lock_with_timeout("any", 999, 500).await.is_err());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_empty_arguments_rejected_before_store_call() {
    let (manager, store) = counting_manager();

    assert!(manager.release_lock("", "token").await.unwrap_err().is_invalid_argument());
    assert!(manager.release_lock("key", "").await.unwrap_err().is_invalid_argument());
    assert!(manager.try_lock_once("", 10_000).await.unwrap_err().is_invalid_argument());
    assert!(
        manager
            .try_lock_with_timeout("", 10_000, 500)
            .await
            .unwrap_err()
            .is_invalid_argument()
    );
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_attempt_lock_distinguishes_outcomes() {
    let manager = memory_manager();
    assert!(manager.attempt_lock("k", 10_000).await.unwrap().is_acquired());
    assert_eq!(
        manager.attempt_lock("k", 10_000).await.unwrap(),
        LockOutcome::Contended
    );

    let unreachable = LockManager::new(Arc::new(UnreachableStore), namespace());
    match unreachable.attempt_lock("k", 10_000).await.unwrap() {
        LockOutcome::Unavailable { reason } => assert!(reason.contains("connection refused")),
        other => panic!("Expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_store_failures_map_to_absent() {
    let manager = LockManager::new(Arc::new(UnreachableStore), namespace());

    assert_eq!(manager.try_lock_once("k", 10_000).await.unwrap(), None);
    assert_eq!(manager.get("k").await, None);
    assert_eq!(manager.try_lock_with_timeout("k", 10_000, 120).await.unwrap(), None);
}

#[tokio::test]
async fn test_release_propagates_store_failure() {
    let manager = LockManager::new(Arc::new(UnreachableStore), namespace());
    let err = manager.release_lock("k", "token").await.unwrap_err();
    assert!(matches!(err, kvlock_domain::Error::Store { .. }));
}
