#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use obras::db::migrations::{get_db_version, init_with_migrations, needs_migration};
    use obras::db::orders::Orders;
    use obras::libs::error::OrderError;
    use obras::libs::order::{WorkOrder, STATUS_AWAITING_DEPENDENCY, STATUS_COMPLETED, STATUS_PENDING};
    use obras::libs::pause::{OpenPause, PauseInterval, PauseKind};
    use obras::libs::sla::{ElapsedMode, SlaClock, SlaStatus};
    use obras::libs::timestamp::Timestamp;
    use rusqlite::Connection;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct OrdersTestContext {
        orders: Orders,
        _temp_dir: TempDir,
    }

    impl TestContext for OrdersTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let orders = Orders::open(&temp_dir.path().join("obras.db")).unwrap();
            OrdersTestContext { orders, _temp_dir: temp_dir }
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn order_error(err: anyhow::Error) -> OrderError {
        err.downcast::<OrderError>().unwrap()
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_insert_and_fetch(ctx: &mut OrdersTestContext) {
        let order = WorkOrder::new("OS-2025-001", at(13, 9), Some(48.0));
        ctx.orders.insert(&order).unwrap();

        let fetched = ctx.orders.fetch("OS-2025-001").unwrap().unwrap();
        assert_eq!(fetched, order);
        assert!(ctx.orders.fetch("OS-404").unwrap().is_none());
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_duplicate_id_rejected(ctx: &mut OrdersTestContext) {
        let order = WorkOrder::new("OS-1", at(13, 9), None);
        ctx.orders.insert(&order).unwrap();

        let err = ctx.orders.insert(&order).unwrap_err();
        assert_eq!(order_error(err), OrderError::DuplicateId("OS-1".to_string()));
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_get_and_save_unknown_order(ctx: &mut OrdersTestContext) {
        let err = ctx.orders.get("OS-404").unwrap_err();
        assert_eq!(order_error(err), OrderError::NotFound("OS-404".to_string()));

        let err = ctx.orders.save(&WorkOrder::new("OS-404", at(13, 9), None)).unwrap_err();
        assert_eq!(order_error(err), OrderError::NotFound("OS-404".to_string()));
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_fetch_all_oldest_first(ctx: &mut OrdersTestContext) {
        ctx.orders.insert(&WorkOrder::new("OS-B", at(14, 9), None)).unwrap();
        ctx.orders.insert(&WorkOrder::new("OS-A", at(13, 9), None)).unwrap();
        ctx.orders.insert(&WorkOrder::new("OS-C", at(14, 9), None)).unwrap();

        let ids: Vec<String> = ctx.orders.fetch_all().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["OS-A", "OS-B", "OS-C"]);
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_wait_resume_round_trip(ctx: &mut OrdersTestContext) {
        let mut order = WorkOrder::new("OS-W", at(13, 9), Some(72.0));
        order.status = "EM_EXECUCAO".to_string();
        ctx.orders.insert(&order).unwrap();

        let waiting = ctx.orders.get("OS-W").unwrap().mark_waiting(OpenPause::new("SANEAMENTO", "rede de esgoto").at(at(14, 10))).unwrap();
        ctx.orders.save(&waiting).unwrap();

        let stored = ctx.orders.get("OS-W").unwrap();
        assert_eq!(stored.status, STATUS_AWAITING_DEPENDENCY);
        assert_eq!(stored.status_before_pause.as_deref(), Some("EM_EXECUCAO"));
        assert_eq!(stored.pauses.len(), 1);
        assert!(stored.has_open_pause());

        let resumed = stored.resume(Some(at(15, 16)));
        ctx.orders.save(&resumed).unwrap();

        let stored = ctx.orders.get("OS-W").unwrap();
        assert_eq!(stored.status, "EM_EXECUCAO");
        assert!(stored.status_before_pause.is_none());
        assert!(!stored.has_open_pause());
        assert_eq!(stored.pauses[0].ended_at, Some(Timestamp::Plain(at(15, 16))));
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_unknown_kind_survives_storage(ctx: &mut OrdersTestContext) {
        let mut order = WorkOrder::new("OS-U", at(13, 9), None);
        order.pauses = vec![PauseInterval {
            kind: PauseKind::Unknown,
            reason: "CLIMA".to_string(),
            note: "chuva".to_string(),
            started_at: Some(Timestamp::Plain(at(13, 10))),
            ended_at: None,
        }];
        ctx.orders.insert(&order).unwrap();

        let stored = ctx.orders.get("OS-U").unwrap();
        assert_eq!(stored.pauses, order.pauses);
        assert!(!stored.has_open_pause());
    }

    #[test_context(OrdersTestContext)]
    #[test]
    fn test_complete_blocked_while_waiting(ctx: &mut OrdersTestContext) {
        let order = WorkOrder::new("OS-X", at(13, 9), None);
        ctx.orders.insert(&order).unwrap();

        let waiting = order.mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(13, 12))).unwrap();
        ctx.orders.save(&waiting).unwrap();

        let stored = ctx.orders.get("OS-X").unwrap();
        assert!(matches!(stored.complete(Some(at(14, 9))), Err(OrderError::CompletionBlocked { .. })));

        let done = stored.resume(Some(at(13, 15))).complete(Some(at(14, 9))).unwrap();
        ctx.orders.save(&done).unwrap();

        let stored = ctx.orders.get("OS-X").unwrap();
        assert_eq!(stored.status, STATUS_COMPLETED);
        assert_eq!(stored.completed_at, Some(Timestamp::Plain(at(14, 9))));
        assert!(matches!(stored.complete(None), Err(OrderError::CompletionBlocked { .. })));
    }

    #[test]
    fn test_resume_without_remembered_status() {
        let mut order = WorkOrder::new("OS-P", at(13, 9), None);
        order.status = STATUS_AWAITING_DEPENDENCY.to_string();

        let resumed = order.resume(Some(at(13, 10)));
        assert_eq!(resumed.status, STATUS_PENDING);
    }

    #[test]
    fn test_repeated_wait_keeps_original_status() {
        let mut order = WorkOrder::new("OS-R", at(13, 9), None);
        order.status = "EM_EXECUCAO".to_string();

        let waiting = order.mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(13, 10))).unwrap();
        let waiting = waiting.mark_waiting(OpenPause::new("LICENCA", "licença").at(at(13, 11))).unwrap();

        assert_eq!(waiting.status_before_pause.as_deref(), Some("EM_EXECUCAO"));
        assert_eq!(waiting.pauses.len(), 1);
        assert_eq!(waiting.pauses[0].reason, "LICENCA");
    }

    #[test]
    fn test_open_pause_blocks_completion_even_with_stale_status() {
        let mut order = WorkOrder::new("OS-S", at(13, 9), None).mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(13, 10))).unwrap();
        order.status = STATUS_PENDING.to_string();

        assert!(matches!(order.ensure_completable(), Err(OrderError::CompletionBlocked { .. })));
    }

    #[test]
    fn test_completed_order_cannot_wait() {
        // Finished 80 h after creation against a 72 h SLA.
        let done = WorkOrder::new("OS-D", at(13, 0), Some(72.0)).complete(Some(at(16, 8))).unwrap();
        let clock = SlaClock {
            mode: ElapsedMode::Calendar,
            ..SlaClock::default()
        };
        assert_eq!(clock.evaluate(&done, at(21, 8)).status, SlaStatus::Overdue);

        let result = done.mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(16, 9)));
        assert_eq!(result.unwrap_err(), OrderError::AlreadyCompleted("OS-D".to_string()));

        let resumed = done.resume(Some(at(17, 4)));
        assert_eq!(resumed.status, STATUS_COMPLETED);
        assert!(resumed.pauses.is_empty());
        assert_eq!(clock.evaluate(&resumed, at(21, 8)).status, SlaStatus::Overdue);
    }

    #[test]
    fn test_migrations_on_fresh_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_with_migrations(&mut conn).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 2);
        assert!(!needs_migration(&conn).unwrap());

        // Re-running is a no-op.
        init_with_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 2);
    }
}
