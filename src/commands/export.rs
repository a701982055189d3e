//! SLA report export command.
//!
//! Writes the same per-order figures the dashboard shows, plus the summary,
//! to a CSV or JSON file for use in spreadsheets and other tools.

use crate::{
    db::orders::Orders,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        sla::SlaClock,
    },
    msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported data
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path
    ///
    /// Defaults to `obras_sla_<YYYYMMDD_HHMMSS>.<ext>` in the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let clock = SlaClock::from(&Config::read()?.sla.unwrap_or_default());
    let reports = clock.evaluate_all(&Orders::new()?.fetch_all()?, now);

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(&reports, now)?;

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
