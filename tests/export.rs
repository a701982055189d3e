#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use obras::libs::export::{ExportFormat, ExportOrder, Exporter};
    use obras::libs::order::WorkOrder;
    use obras::libs::pause::OpenPause;
    use obras::libs::sla::{SlaClock, SlaReport};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        reports: Vec<SlaReport>,
        now: NaiveDateTime,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let at = |day: u32, hour: u32| NaiveDate::from_ymd_opt(2025, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap();
            let now = at(16, 12);
            let orders = vec![
                WorkOrder::new("OS-1", at(13, 0), Some(24.0)),
                WorkOrder::new("OS-2", at(16, 0), Some(72.0)).mark_waiting(OpenPause::new("SANEAMENTO", "rede").at(at(16, 6))).unwrap(),
            ];
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                reports: SlaClock::default().evaluate_all(&orders, now),
                now,
            }
        }
    }

    #[test]
    fn test_default_file_name() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("obras_sla_"));
        assert!(name.ends_with(".json"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("sla.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone())).export(&ctx.reports, ctx.now).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("ID,Status,SLA (h)"));
        assert!(lines[1].starts_with("OS-1,overdue,24,84.00,84:00"));
        assert!(lines[2].starts_with("OS-2,on-track,72,6.00,06:00"));
        assert!(lines[2].ends_with("true"));
        assert!(content.contains("Compliance,50.0%"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("sla.json");
        Exporter::new(ExportFormat::Json, Some(path.clone())).export(&ctx.reports, ctx.now).unwrap();

        let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["generated_at"], "2025-01-16 12:00:00");
        assert_eq!(document["summary"]["total"], 2);
        assert_eq!(document["summary"]["overdue"], 1);
        assert_eq!(document["summary"]["paused"], 1);
        assert_eq!(document["compliance"], 50.0);

        let orders: Vec<ExportOrder> = serde_json::from_value(document["orders"].clone()).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "OS-1");
        assert_eq!(orders[0].status, "overdue");
        assert_eq!(orders[0].remaining, "00:00");
        assert_eq!(orders[1].status, "on-track");
        assert_eq!(orders[1].chargeable, "06:00");
        assert!(orders[1].paused_now);
    }
}
