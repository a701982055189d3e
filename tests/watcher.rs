#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use obras::db::orders::Orders;
    use obras::libs::config::WatchConfig;
    use obras::libs::order::WorkOrder;
    use obras::libs::pause::OpenPause;
    use obras::libs::sla::{SlaClock, SlaStatus};
    use obras::libs::watcher::{detect_transitions, SlaWatcher};
    use std::collections::HashMap;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct WatcherTestContext {
        orders: Orders,
        db_path: std::path::PathBuf,
        _temp_dir: TempDir,
    }

    impl TestContext for WatcherTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("obras.db");
            WatcherTestContext {
                orders: Orders::open(&db_path).unwrap(),
                db_path,
                _temp_dir: temp_dir,
            }
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_first_observation_reports_only_late_orders() {
        let orders = vec![WorkOrder::new("OS-OK", at(14, 0), Some(72.0)), WorkOrder::new("OS-LATE", at(13, 0), Some(24.0))];
        let reports = SlaClock::default().evaluate_all(&orders, at(14, 12));

        let transitions = detect_transitions(&HashMap::new(), &reports);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].order_id, "OS-LATE");
        assert_eq!(transitions[0].from, None);
        assert_eq!(transitions[0].to, SlaStatus::Overdue);
    }

    #[test]
    fn test_only_changes_are_reported() {
        let orders = vec![WorkOrder::new("OS-1", at(13, 0), Some(24.0)), WorkOrder::new("OS-2", at(13, 0), Some(72.0))];
        let reports = SlaClock::default().evaluate_all(&orders, at(15, 0));

        let previous = HashMap::from([("OS-1".to_string(), SlaStatus::NearDue), ("OS-2".to_string(), SlaStatus::OnTrack)]);
        let transitions = detect_transitions(&previous, &reports);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].order_id, "OS-1");
        assert_eq!(transitions[0].from, Some(SlaStatus::NearDue));
        assert_eq!(transitions[0].to, SlaStatus::Overdue);
        assert!((transitions[0].elapsed_hours - 48.0).abs() < 1e-9);
    }

    #[test_context(WatcherTestContext)]
    #[test]
    fn test_tick_tracks_classification(ctx: &mut WatcherTestContext) {
        ctx.orders.insert(&WorkOrder::new("OS-W", at(13, 0), Some(24.0))).unwrap();
        let done = WorkOrder::new("OS-DONE", at(6, 0), Some(8.0)).complete(Some(at(7, 0))).unwrap();
        ctx.orders.insert(&done).unwrap();

        let mut watcher = SlaWatcher::new(Orders::open(&ctx.db_path).unwrap(), SlaClock::default(), WatchConfig::default());

        assert!(watcher.tick(at(13, 12)).unwrap().is_empty());

        let transitions = watcher.tick(at(13, 19)).unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].to, SlaStatus::NearDue);

        let transitions = watcher.tick(at(14, 1)).unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].to, SlaStatus::Overdue);

        assert!(watcher.tick(at(14, 2)).unwrap().is_empty());
    }

    #[test_context(WatcherTestContext)]
    #[test]
    fn test_tick_sees_pauses_written_by_others(ctx: &mut WatcherTestContext) {
        let order = WorkOrder::new("OS-P", at(13, 0), Some(24.0));
        ctx.orders.insert(&order).unwrap();

        let mut watcher = SlaWatcher::new(Orders::open(&ctx.db_path).unwrap(), SlaClock::default(), WatchConfig::default());
        assert_eq!(watcher.tick(at(13, 20)).unwrap()[0].to, SlaStatus::NearDue);

        // Waiting from 20:00 keeps the order near-due instead of overdue.
        ctx.orders.save(&order.mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(13, 20))).unwrap()).unwrap();
        assert!(watcher.tick(at(14, 8)).unwrap().is_empty());
    }
}
