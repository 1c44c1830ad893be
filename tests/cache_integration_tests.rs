//! Integration Tests for the Cache
//!
//! Exercises the public API end to end: lookup-or-load, eviction, statistics
//! and listeners.

use std::sync::{Arc, Mutex};

use mini_cache::cache::{Cache, CacheBuilder, Capacity, Event, Listener, Policy};
use mini_cache::{CacheError, SharedCache};

// == Helper Functions ==

fn numbers(key: &i32) -> anyhow::Result<Option<String>> {
    Ok(Some(key.to_string()))
}

fn recorder() -> (Arc<dyn Listener<i32>>, Arc<Mutex<Vec<(Event, i32)>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let listener: Arc<dyn Listener<i32>> =
        Arc::new(move |event: Event, key: &i32| -> anyhow::Result<()> {
            sink.lock().unwrap().push((event, *key));
            Ok(())
        });
    (listener, log)
}

fn lru_cache_of_one() -> Cache<i32, String> {
    CacheBuilder::new()
        .loader(numbers)
        .limit(Capacity::Size(1))
        .policy(Policy::Lru)
        .build()
}

// == Lookup and Load ==

#[test]
fn test_first_get_loads_value() {
    let mut cache = lru_cache_of_one();

    assert_eq!(cache.get(&1).unwrap(), Some("1".to_string()));

    let stats = cache.statistics();
    assert_eq!(stats.hits(), 0);
    assert_eq!(stats.misses(), 1);
    assert_eq!(stats.errors(), 0);
    assert_eq!(stats.weight(), 0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_second_key_evicts_first() {
    let mut cache = lru_cache_of_one();

    cache.get(&1).unwrap();
    cache.get(&2).unwrap();

    assert_eq!(cache.statistics().eviction_count(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_weight_limit_with_weight_policy() {
    let mut cache = CacheBuilder::new()
        .loader(numbers)
        .weigher(|value: &String| value.parse::<u64>().unwrap_or(0))
        .limit(Capacity::Weight(1))
        .policy(Policy::Weight)
        .build();

    cache.get(&1).unwrap();
    assert_eq!(cache.statistics().weight(), 1);

    cache.get(&2).unwrap();
    assert!(!cache.contains_key(&1));
    assert!(cache.contains_key(&2));
    assert_eq!(cache.statistics().weight(), 2);
}

#[test]
fn test_overwrite_keeps_single_entry() {
    let (listener, log) = recorder();
    let mut cache = CacheBuilder::new()
        .weigher(|value: &String| value.len() as u64)
        .listener(listener)
        .build();

    cache.add(1, "x".to_string()).unwrap();
    cache.add(1, "yy".to_string()).unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.statistics().weight(), 2);
    assert!(!log
        .lock()
        .unwrap()
        .iter()
        .any(|(event, _)| *event == Event::Evicted));
}

#[test]
fn test_unknown_key_counts_error() {
    let mut cache: Cache<i32, String> = CacheBuilder::new().build();

    assert_eq!(cache.get(&9).unwrap(), None);

    let stats = cache.statistics();
    assert_eq!(stats.misses(), 1);
    assert_eq!(stats.errors(), 1);
    assert!(cache.is_empty());
}

// == Eviction Ordering ==

#[test]
fn test_lru_evicts_first_inserted() {
    let (listener, log) = recorder();
    let mut cache: Cache<i32, String> = CacheBuilder::new()
        .limit(Capacity::Size(1))
        .policy(Policy::Lru)
        .listener(listener)
        .build();

    cache.add(1, "a".to_string()).unwrap();
    cache.add(2, "b".to_string()).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![(Event::Added, 1), (Event::Evicted, 1), (Event::Added, 2)]
    );
}

#[test]
fn test_statistics_view_is_live() {
    let mut cache = lru_cache_of_one();

    cache.get(&1).unwrap();
    cache.get(&1).unwrap();
    cache.get(&2).unwrap();

    let stats = cache.statistics();
    assert_eq!(stats.hits(), 1);
    assert_eq!(stats.misses(), 2);
    assert_eq!(stats.max_size(), 1);
    assert!((stats.hit_rate() - 1.0 / 3.0).abs() < f64::EPSILON);
}

// == Errors ==

#[test]
fn test_invalid_keys_propagate() {
    let mut cache: Cache<Option<i32>, String> = CacheBuilder::new().build();

    assert!(matches!(cache.get(&None), Err(CacheError::InvalidArgument(_))));
    assert!(matches!(
        cache.add(None, "x".to_string()),
        Err(CacheError::InvalidArgument(_))
    ));
    assert_eq!(cache.statistics().misses(), 0);

    cache.add(Some(1), "x".to_string()).unwrap();
    assert_eq!(cache.get(&Some(1)).unwrap(), Some("x".to_string()));
}

#[test]
fn test_listener_failure_reaches_caller() {
    let mut cache = CacheBuilder::new()
        .loader(numbers)
        .listener(Arc::new(|_: Event, key: &i32| -> anyhow::Result<()> {
            if *key == 13 {
                anyhow::bail!("unlucky key");
            }
            Ok(())
        }))
        .build();

    assert!(cache.get(&12).is_ok());
    let err = cache.get(&13).unwrap_err();

    assert!(matches!(err, CacheError::Listener(_)));
    assert!(err.to_string().contains("unlucky key"));
}

// == Shared Cache ==

#[tokio::test]
async fn test_shared_cache_across_tasks() {
    let cache = SharedCache::new(
        CacheBuilder::new()
            .loader(numbers)
            .limit(Capacity::Size(4))
            .build(),
    );

    let handles: Vec<_> = (0..16)
        .map(|key| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get(&(key % 8)).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let stats = cache.statistics().await;
    assert_eq!(stats.hits() + stats.misses(), 16);
    assert!(cache.len().await <= 4);
    assert_eq!(stats.weight(), 0);
}
