//! Export of SLA reports to CSV and JSON.
//!
//! Managers pull the same figures the dashboard shows into spreadsheets or
//! other tools. Every row is produced from an [`SlaReport`], so an export
//! always agrees with what `status` displays at the same reference time.
//!
//! ## Formats
//!
//! - **CSV**: one row per order followed by a summary section
//! - **JSON**: `{ "generated_at", "summary", "orders": [...] }`

use crate::libs::formatter::format_duration;
use crate::libs::sla::{to_hours, SlaReport, SlaSummary};
use crate::libs::timestamp::TIMESTAMP_FORMAT;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// One exported order.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExportOrder {
    pub id: String,
    /// "on-track", "near-due" or "overdue"
    pub status: String,
    pub sla_hours: f64,
    /// Chargeable hours, two decimals
    pub chargeable_hours: f64,
    pub chargeable: String,
    pub paused: String,
    pub remaining: String,
    pub paused_now: bool,
}

impl From<&SlaReport> for ExportOrder {
    fn from(report: &SlaReport) -> Self {
        ExportOrder {
            id: report.order_id.clone(),
            status: serde_json::to_value(report.status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_else(|| report.status.to_string()),
            sla_hours: report.sla_hours,
            chargeable_hours: (to_hours(report.chargeable) * 100.0).round() / 100.0,
            chargeable: format_duration(&report.chargeable),
            paused: format_duration(&report.paused),
            remaining: format_duration(&report.remaining),
            paused_now: report.paused_now,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    generated_at: String,
    summary: &'a SlaSummary,
    compliance: f64,
    orders: Vec<ExportOrder>,
}

/// Writes SLA reports to a file.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; without a path the file is named after the current time.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path
            .unwrap_or_else(|| PathBuf::from(format!("obras_sla_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), extension)));

        Exporter { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, reports: &[SlaReport], generated_at: NaiveDateTime) -> Result<()> {
        let summary = SlaSummary::from_reports(reports);
        let orders: Vec<ExportOrder> = reports.iter().map(ExportOrder::from).collect();
        match self.format {
            ExportFormat::Csv => self.export_csv(&orders, &summary),
            ExportFormat::Json => self.export_json(orders, &summary, generated_at),
        }
    }

    fn export_csv(&self, orders: &[ExportOrder], summary: &SlaSummary) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(["ID", "Status", "SLA (h)", "Chargeable (h)", "Chargeable", "Paused", "Remaining", "Paused now"])?;
        for order in orders {
            wtr.write_record([
                order.id.clone(),
                order.status.clone(),
                order.sla_hours.to_string(),
                format!("{:.2}", order.chargeable_hours),
                order.chargeable.clone(),
                order.paused.clone(),
                order.remaining.clone(),
                order.paused_now.to_string(),
            ])?;
        }

        let blank = ["", "", "", "", "", "", "", ""];
        wtr.write_record(blank)?;
        wtr.write_record(["SUMMARY", "", "", "", "", "", "", ""])?;
        for (label, value) in [
            ("Total", summary.total.to_string()),
            ("On track", summary.on_track.to_string()),
            ("Near due", summary.near_due.to_string()),
            ("Overdue", summary.overdue.to_string()),
            ("Paused", summary.paused.to_string()),
            ("Compliance", format!("{:.1}%", summary.compliance())),
        ] {
            wtr.write_record([label, value.as_str(), "", "", "", "", "", ""])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, orders: Vec<ExportOrder>, summary: &SlaSummary, generated_at: NaiveDateTime) -> Result<()> {
        let document = ExportDocument {
            generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            summary,
            compliance: summary.compliance(),
            orders,
        };
        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(file, &document)?;
        Ok(())
    }
}
