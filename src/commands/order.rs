//! Work order registration and inspection.
//!
//! Orders are normally created by the intake system; `order add` stands in
//! for it so the SLA clock has something to measure. `order show` prints the
//! pause ledger of a single order next to its SLA position.

use crate::{
    db::orders::Orders,
    libs::{
        config::Config,
        messages::Message,
        order::WorkOrder,
        sla::SlaClock,
        timestamp::Timestamp,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    command: OrderCommand,
}

#[derive(Debug, Subcommand)]
enum OrderCommand {
    /// Register a new work order
    Add {
        /// Unique order identifier, e.g. OS-2025-001
        id: String,

        /// Hours allowed before the order is overdue; the configured default when omitted
        #[arg(long)]
        sla_hours: Option<f64>,

        /// Creation time ('now', 'YYYY-MM-DD HH:MM[:SS]' or RFC 3339)
        #[arg(long, default_value = "now")]
        created_at: String,

        /// Initial workflow status
        #[arg(long)]
        status: Option<String>,
    },
    /// List all work orders
    List,
    /// Show one work order with its pauses and SLA position
    Show {
        id: String,
    },
}

pub fn cmd(args: OrderArgs) -> Result<()> {
    let orders = Orders::new()?;

    match args.command {
        OrderCommand::Add {
            id,
            sla_hours,
            created_at,
            status,
        } => {
            if let Some(hours) = sla_hours.filter(|h| !h.is_finite() || *h <= 0.0) {
                msg_bail_anyhow!(Message::InvalidSlaHours(hours));
            }
            let mut order = WorkOrder::new(&id, Local::now().naive_local(), sla_hours);
            order.created_at = Some(Timestamp::parse(&created_at)?);
            if let Some(status) = status {
                order.status = status;
            }
            orders.insert(&order)?;
            msg_success!(Message::OrderCreated(id));
        }
        OrderCommand::List => {
            let all = orders.fetch_all()?;
            if all.is_empty() {
                msg_info!(Message::OrdersNotFound);
                return Ok(());
            }
            View::orders(&all)?;
        }
        OrderCommand::Show { id } => {
            let order = orders.get(&id)?;
            let now = Local::now().naive_local();
            let clock = SlaClock::from(&Config::read()?.sla.unwrap_or_default());
            let report = clock.evaluate(&order, now);

            msg_print!(Message::OrderDetailsHeader(order.id.clone()), true);
            View::report(&order, &report)?;

            msg_print!(Message::PausesHeader, true);
            if order.pauses.is_empty() {
                msg_info!(Message::NoPauses);
            } else {
                View::pauses(&order.pauses, order.clock_end(now))?;
            }
        }
    }

    Ok(())
}
