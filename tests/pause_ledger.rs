#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
    use obras::libs::pause::{close_dependency_pause, has_open_dependency_pause, open_dependency_pause, OpenPause, PauseGroup, PauseInterval, PauseKind};
    use obras::libs::timestamp::Timestamp;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(hour, min, 0).unwrap()
    }

    fn open_count(pauses: &[PauseInterval]) -> usize {
        pauses.iter().filter(|p| p.is_open_dependency()).count()
    }

    #[test]
    fn test_open_twice_keeps_single_open_pause() {
        let once = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "rede").at(at(9, 0)));
        let twice = open_dependency_pause(&once, OpenPause::new("SANEAMENTO", "rede").at(at(10, 0)));

        assert_eq!(once.len(), 1);
        assert_eq!(twice.len(), 1);
        assert_eq!(open_count(&twice), 1);
        assert_eq!(twice[0].started_at, Some(Timestamp::Plain(at(9, 0))));
    }

    #[test]
    fn test_reopen_updates_reason_and_keeps_start() {
        let pauses = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "aguardando rede").at(at(9, 0)));
        let pauses = open_dependency_pause(&pauses, OpenPause::new("LICENCA", "aguardando licença").at(at(11, 0)));

        assert_eq!(pauses.len(), 1);
        assert_eq!(pauses[0].reason, "LICENCA");
        assert_eq!(pauses[0].note, "aguardando licença");
        assert_eq!(pauses[0].kind, PauseKind::ExternalDependency);
        assert_eq!(pauses[0].started_at, Some(Timestamp::Plain(at(9, 0))));
        assert!(pauses[0].is_open());
    }

    #[test]
    fn test_close_without_open_pause_is_noop() {
        assert!(close_dependency_pause(&[], Some(at(12, 0))).is_empty());

        let closed = vec![PauseInterval {
            kind: PauseKind::ExternalDependency,
            reason: "SANEAMENTO".to_string(),
            note: "rede".to_string(),
            started_at: Some(Timestamp::Plain(at(8, 0))),
            ended_at: Some(Timestamp::Plain(at(9, 0))),
        }];
        assert_eq!(close_dependency_pause(&closed, Some(at(12, 0))), closed);
    }

    #[test]
    fn test_close_sets_end_once() {
        let pauses = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "rede").at(at(9, 0)));
        let closed = close_dependency_pause(&pauses, Some(at(10, 30)));
        let closed_again = close_dependency_pause(&closed, Some(at(15, 0)));

        assert_eq!(closed[0].ended_at, Some(Timestamp::Plain(at(10, 30))));
        assert_eq!(closed_again, closed);
        assert!(!has_open_dependency_pause(&closed_again));
    }

    #[test]
    fn test_ledger_does_not_mutate_input() {
        let original = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "rede").at(at(9, 0)));
        let snapshot = original.clone();

        let _ = open_dependency_pause(&original, OpenPause::new("OUTRO", "outra nota"));
        let _ = close_dependency_pause(&original, Some(at(10, 0)));

        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_history_is_kept_after_reopen() {
        let pauses = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "primeira").at(at(8, 0)));
        let pauses = close_dependency_pause(&pauses, Some(at(9, 0)));
        let pauses = open_dependency_pause(&pauses, OpenPause::new("SANEAMENTO", "segunda").at(at(10, 0)));

        assert_eq!(pauses.len(), 2);
        assert_eq!(open_count(&pauses), 1);
        assert_eq!(pauses[0].note, "primeira");
        assert!(!pauses[0].is_open());
        assert!(pauses[1].is_open());
    }

    #[test]
    fn test_open_pause_of_unknown_kind_does_not_block() {
        let pauses = vec![PauseInterval {
            kind: PauseKind::Unknown,
            reason: "CLIMA".to_string(),
            note: String::new(),
            started_at: Some(Timestamp::Plain(at(8, 0))),
            ended_at: None,
        }];
        assert!(!has_open_dependency_pause(&pauses));

        let pauses = open_dependency_pause(&pauses, OpenPause::new("SANEAMENTO", "rede").at(at(9, 0)));
        assert_eq!(pauses.len(), 2);
        assert_eq!(pauses[0].kind, PauseKind::Unknown);
        assert!(has_open_dependency_pause(&pauses));
    }

    #[test]
    fn test_kind_tags_deserialize() {
        let kind: PauseKind = serde_json::from_str("\"SANEAR\"").unwrap();
        assert_eq!(kind, PauseKind::ExternalDependency);

        let kind: PauseKind = serde_json::from_str("\"EXTERNAL_DEPENDENCY\"").unwrap();
        assert_eq!(kind, PauseKind::ExternalDependency);

        let kind: PauseKind = serde_json::from_str("\"CHUVA\"").unwrap();
        assert_eq!(kind, PauseKind::Unknown);

        assert_eq!(PauseKind::from_tag("SANEAR"), PauseKind::ExternalDependency);
        assert_eq!(PauseKind::from_tag("CHUVA"), PauseKind::Unknown);
    }

    #[test]
    fn test_pause_document_with_server_timestamp() {
        let json = r#"{
            "kind": "SANEAR",
            "reason": "SANEAMENTO",
            "note": "rede de esgoto",
            "startedAt": { "seconds": 1736935200, "nanoseconds": 0 },
            "endedAt": "2025-01-15 18:00:00"
        }"#;
        let pause: PauseInterval = serde_json::from_str(json).unwrap();

        let server = DateTime::<Utc>::from_timestamp(1736935200, 0).unwrap();
        assert_eq!(pause.started_at, Some(Timestamp::from(server)));

        let expected = server.with_timezone(&Local).naive_local();
        assert_eq!(pause.started_at.and_then(|s| s.to_local()), Some(expected));
        assert_eq!(pause.ended_at, Some(Timestamp::Plain(at(18, 0))));
        assert!(!pause.is_open_dependency());
    }

    #[test]
    fn test_pause_document_missing_fields() {
        let pause: PauseInterval = serde_json::from_str(r#"{ "kind": "SANEAR" }"#).unwrap();
        assert!(pause.started_at.is_none());
        assert!(pause.is_open_dependency());
        assert_eq!(pause.bounds(at(12, 0)), None);
    }

    #[test]
    fn test_format_pauses() {
        let pauses = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "rede").at(at(9, 0)));
        let rows = pauses.format(at(11, 15));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].kind, "SANEAR");
        assert_eq!(rows[0].start, "2025-01-15 09:00:00");
        assert_eq!(rows[0].end, "-");
        assert_eq!(rows[0].duration, "02:15");
    }
}
