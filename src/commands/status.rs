//! SLA dashboard command.
//!
//! Evaluates every work order with the configured clock and prints the
//! classification table followed by the aggregate summary. Looking at the
//! dashboard moves the session's "last seen" watermark forward; orders that
//! crossed their deadline since the previous look are announced first.

use crate::{
    db::orders::Orders,
    libs::{
        config::Config,
        messages::Message,
        session::UserSession,
        sla::{SlaClock, SlaReport, SlaStatus, SlaSummary},
        timestamp::{Timestamp, TIMESTAMP_FORMAT},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Show only orders with this classification
    #[arg(long, value_enum)]
    only: Option<SlaStatus>,

    /// Reference time for the evaluation; defaults to now
    #[arg(long, default_value = "now")]
    at: String,
}

pub fn cmd(args: StatusArgs) -> Result<()> {
    let now = Timestamp::parse(&args.at)?.to_local().unwrap_or_else(|| chrono::Local::now().naive_local());
    let clock = SlaClock::from(&Config::read()?.sla.unwrap_or_default());
    let orders = Orders::new()?.fetch_all()?;

    if orders.is_empty() {
        msg_info!(Message::OrdersNotFound);
        return Ok(());
    }

    let mut session = UserSession::load()?;
    if let Some(since) = session.last_seen {
        let fresh = clock.newly_overdue(&orders, since, now);
        if !fresh.is_empty() {
            msg_warning!(Message::NewOverdueSinceLastSeen(fresh.len()));
        }
    }

    let reports = clock.evaluate_all(&orders, now);
    let shown: Vec<SlaReport> = reports
        .iter()
        .filter(|report| args.only.map_or(true, |only| report.status == only))
        .cloned()
        .collect();

    msg_print!(Message::DashboardHeader(now.format(TIMESTAMP_FORMAT).to_string()), true);
    View::reports(&shown)?;
    View::summary(&SlaSummary::from_reports(&reports))?;

    session.touch(now);
    session.save()?;

    Ok(())
}
