use super::formatter::{format_duration, format_hours};
use super::order::WorkOrder;
use super::pause::{PauseGroup, PauseInterval};
use super::sla::{SlaReport, SlaSummary};
use super::timestamp::TIMESTAMP_FORMAT;
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Dashboard table, one row per evaluated order.
    pub fn reports(reports: &[SlaReport]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "SLA", "STATUS", "CHARGEABLE", "PAUSED", "REMAINING", "WAITING"]);
        for report in reports {
            table.add_row(row![
                report.order_id,
                format_hours(report.sla_hours),
                report.status,
                format_duration(&report.chargeable),
                format_duration(&report.paused),
                format_duration(&report.remaining),
                if report.paused_now { "yes" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Plain list of orders with their workflow status.
    pub fn orders(orders: &[WorkOrder]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "CREATED", "SLA (H)", "STATUS", "PAUSES"]);
        for order in orders {
            table.add_row(row![
                order.id,
                order
                    .created_at
                    .and_then(|c| c.to_local())
                    .map_or_else(|| "-".to_string(), |c| c.format(TIMESTAMP_FORMAT).to_string()),
                order.sla_hours.map_or_else(|| "-".to_string(), |h| h.to_string()),
                order.status,
                order.pauses.len()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn pauses(pauses: &[PauseInterval], now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "KIND", "REASON", "NOTE", "START", "END", "DURATION"]);
        for pause in pauses.format(now) {
            table.add_row(row![pause.id, pause.kind, pause.reason, pause.note, pause.start, pause.end, pause.duration]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &SlaSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "ON TRACK", "NEAR DUE", "OVERDUE", "WAITING", "COMPLIANCE"]);
        table.add_row(row![
            summary.total,
            summary.on_track,
            summary.near_due,
            summary.overdue,
            summary.paused,
            format!("{:.1}%", summary.compliance())
        ]);
        table.printstd();

        Ok(())
    }

    /// Key/value view of a single order and its SLA position.
    pub fn report(order: &WorkOrder, report: &SlaReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Status", order.status]);
        if let Some(previous) = &order.status_before_pause {
            table.add_row(row!["Status before pause", previous]);
        }
        table.add_row(row!["SLA", format_hours(report.sla_hours)]);
        table.add_row(row!["Classification", report.status]);
        table.add_row(row!["Elapsed", format_duration(&report.elapsed)]);
        table.add_row(row!["Paused", format_duration(&report.paused)]);
        table.add_row(row!["Chargeable", format_duration(&report.chargeable)]);
        table.add_row(row!["Remaining", format_duration(&report.remaining)]);
        if let Some(completed) = order.completed_at.and_then(|c| c.to_local()) {
            table.add_row(row!["Completed", completed.format(TIMESTAMP_FORMAT)]);
        }
        table.printstd();

        Ok(())
    }
}
