//! Unit tests for pool metrics and the metrics registry

use super::*;
use poolscope_core::{Endpoint, PoolSettings};
use std::sync::{Arc, Barrier};
use std::thread;

fn db1() -> Endpoint {
    Endpoint::new("db1.example.com", 27017)
}

fn db2() -> Endpoint {
    Endpoint::new("db2.example.com", 27017)
}

mod pool_metrics_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = PoolMetrics::new();
        assert_eq!(metrics.snapshot(), PoolSnapshot::default());
    }

    #[test]
    fn test_size_tracks_created_minus_closed() {
        let metrics = PoolMetrics::new();
        assert_eq!(metrics.increment_size(), 1);
        assert_eq!(metrics.increment_size(), 2);
        assert_eq!(metrics.increment_size(), 3);
        assert_eq!(metrics.decrement_size(), 2);
        assert_eq!(metrics.size(), 2);
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        let metrics = PoolMetrics::new();
        assert_eq!(metrics.decrement_size(), 0);
        assert_eq!(metrics.decrement_checked_out(), 0);

        metrics.increment_checked_out();
        assert_eq!(metrics.decrement_checked_out(), 0);
        assert_eq!(metrics.decrement_checked_out(), 0);
        assert_eq!(metrics.checked_out(), 0);
    }

    #[test]
    fn test_apply_settings() {
        let metrics = PoolMetrics::new();
        metrics.apply_settings(&PoolSettings::new(50).with_min_size(5));
        assert_eq!(metrics.max_size(), 50);
        assert_eq!(metrics.min_size(), 5);
    }

    #[test]
    fn test_reset_keeps_bounds() {
        let metrics = PoolMetrics::new();
        metrics.apply_settings(&PoolSettings::new(50));
        metrics.increment_size();
        metrics.increment_size();
        metrics.increment_checked_out();

        metrics.reset();

        assert_eq!(metrics.snapshot(), PoolSnapshot::new(0, 0, 50));
        assert_eq!(metrics.increment_size(), 1);
    }
}

mod snapshot_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_display() {
        assert_eq!(PoolSnapshot::new(3, 2, 50).to_string(), "[3/2/50]");
        assert_eq!(PoolSnapshot::default().to_string(), "[0/0/0]");
    }

    #[test]
    fn test_available() {
        assert_eq!(PoolSnapshot::new(5, 2, 10).available(), 3);
        // Racing events can briefly put checked_out above size
        assert_eq!(PoolSnapshot::new(1, 2, 10).available(), 0);
    }

    #[test]
    fn test_utilization() {
        assert_eq!(PoolSnapshot::new(10, 5, 10).utilization(), 0.5);
        assert_eq!(PoolSnapshot::new(3, 3, 0).utilization(), 0.0);
        assert_eq!(PoolSnapshot::new(12, 12, 10).utilization(), 1.0);
    }

    #[test]
    fn test_is_saturated() {
        assert!(PoolSnapshot::new(10, 10, 10).is_saturated());
        assert!(!PoolSnapshot::new(10, 9, 10).is_saturated());
        assert!(!PoolSnapshot::new(0, 0, 0).is_saturated());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = PoolSnapshot::new(3, 1, 50);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"size\":3"));
        assert!(json.contains("\"checked_out\":1"));
        assert!(json.contains("\"max_size\":50"));
    }

    #[test]
    fn test_statistics_from_snapshot() {
        let snapshot = PoolSnapshot {
            size: 4,
            checked_out: 1,
            max_size: 20,
            min_size: 2,
        };
        let stats = PoolStatistics::new(&db1(), snapshot);
        assert_eq!(stats.host, "db1.example.com");
        assert_eq!(stats.port, 27017);
        assert_eq!(stats.min_size, 2);
        assert_eq!(stats.max_size, 20);
        assert_eq!(stats.size, 4);
        assert_eq!(stats.checked_out, 1);
    }
}

mod registry_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_or_create_returns_same_record() {
        let registry = PoolMetricsRegistry::new();
        let first = registry.get_or_create(&db1());
        let second = registry.get_or_create(&db1());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = PoolMetricsRegistry::new();
        assert!(registry.get(&db1()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_returns_record() {
        let registry = PoolMetricsRegistry::new();
        registry.get_or_create(&db1()).increment_size();

        let removed = registry.remove(&db1()).unwrap();
        assert_eq!(removed.size(), 1);
        assert!(!registry.contains(&db1()));
        assert!(registry.remove(&db1()).is_none());
    }

    #[test]
    fn test_recreated_after_remove_starts_fresh() {
        let registry = PoolMetricsRegistry::new();
        registry.get_or_create(&db1()).increment_size();
        registry.remove(&db1());

        assert_eq!(registry.get_or_create(&db1()).size(), 0);
    }

    #[test]
    fn test_snapshot_all_sorted() {
        let registry = PoolMetricsRegistry::new();
        registry.get_or_create(&db2()).increment_size();
        let metrics = registry.get_or_create(&db1());
        metrics.apply_settings(&PoolSettings::new(50));
        metrics.increment_size();
        metrics.increment_size();
        metrics.increment_checked_out();

        let all = registry.snapshot_all();
        assert_eq!(
            all,
            vec![
                (db1(), PoolSnapshot::new(2, 1, 50)),
                (db2(), PoolSnapshot::new(1, 0, 0)),
            ]
        );
    }

    #[test]
    fn test_totals() {
        let registry = PoolMetricsRegistry::new();
        for endpoint in [db1(), db2()] {
            let metrics = registry.get_or_create(&endpoint);
            metrics.increment_size();
            metrics.increment_size();
            metrics.increment_checked_out();
        }

        assert_eq!(registry.total_pool_size(), 4);
        assert_eq!(registry.total_checked_out(), 2);
    }

    #[test]
    fn test_totals_empty() {
        let registry = PoolMetricsRegistry::new();
        assert_eq!(registry.total_pool_size(), 0);
        assert_eq!(registry.total_checked_out(), 0);
    }

    #[test]
    fn test_statistics_for_unknown_endpoint() {
        let registry = PoolMetricsRegistry::new();
        assert!(registry.statistics(&db1()).is_none());
    }

    #[test]
    fn test_concurrent_get_or_create_yields_one_record() {
        let registry = Arc::new(PoolMetricsRegistry::new());
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let metrics = registry.get_or_create(&db1());
                    metrics.increment_size();
                    metrics
                })
            })
            .collect();

        let records: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        assert!(records.iter().all(|r| Arc::ptr_eq(r, &records[0])));
        assert_eq!(registry.get(&db1()).unwrap().size(), 16);
    }
}
