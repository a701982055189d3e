//! Polling loop that re-evaluates open work orders and alerts on transitions.
//!
//! Classification is relative to "now", so an order turns overdue without any
//! record changing. The watcher re-reads the order store every poll interval,
//! evaluates each open order with the configured [`SlaClock`] and raises an
//! alert whenever an order's classification changes.
//!
//! ## Alerts
//!
//! - **Overdue**: always reported, as a warning
//! - **Near-due**: reported when `notify_near_due` is set
//! - **Back on track**: reported after a resumed or reconfigured order drops
//!   out of near-due or overdue
//!
//! Orders seen for the first time are compared against "on track", so an
//! order that is already overdue when the watch starts is reported once.
//!
//! The loop runs until Ctrl+C.

use crate::db::orders::Orders;
use crate::libs::config::WatchConfig;
use crate::libs::formatter::{format_duration, format_hours};
use crate::libs::messages::Message;
use crate::libs::sla::{SlaClock, SlaReport, SlaStatus};
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use tokio::time::{self, Duration, MissedTickBehavior};

/// A change in an order's classification between two polls.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub order_id: String,
    /// `None` when the order was not seen before.
    pub from: Option<SlaStatus>,
    pub to: SlaStatus,
    pub elapsed_hours: f64,
    pub remaining: chrono::Duration,
}

/// Compares fresh reports against the previously observed classifications.
///
/// New orders count as a transition only when they are not on track.
pub fn detect_transitions(previous: &HashMap<String, SlaStatus>, reports: &[SlaReport]) -> Vec<Transition> {
    reports
        .iter()
        .filter_map(|report| {
            let from = previous.get(&report.order_id).copied();
            let changed = match from {
                Some(status) => status != report.status,
                None => report.status != SlaStatus::OnTrack,
            };
            changed.then(|| Transition {
                order_id: report.order_id.clone(),
                from,
                to: report.status,
                elapsed_hours: report.elapsed_hours,
                remaining: report.remaining,
            })
        })
        .collect()
}

pub struct SlaWatcher {
    orders: Orders,
    clock: SlaClock,
    config: WatchConfig,
    last_status: HashMap<String, SlaStatus>,
}

impl SlaWatcher {
    pub fn new(orders: Orders, clock: SlaClock, config: WatchConfig) -> Self {
        SlaWatcher {
            orders,
            clock,
            config,
            last_status: HashMap::new(),
        }
    }

    /// Evaluates all open orders at `now` and returns the transitions since the
    /// previous tick.
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<Vec<Transition>> {
        let open: Vec<_> = self.orders.fetch_all()?.into_iter().filter(|order| !order.is_completed()).collect();
        let reports = self.clock.evaluate_all(&open, now);
        let transitions = detect_transitions(&self.last_status, &reports);

        self.last_status = reports.iter().map(|report| (report.order_id.clone(), report.status)).collect();
        msg_debug!(Message::WatchTick(reports.len()));

        Ok(transitions)
    }

    fn alert(&self, transition: &Transition) {
        match transition.to {
            SlaStatus::Overdue => {
                msg_warning!(Message::OrderBecameOverdue(
                    transition.order_id.clone(),
                    format_hours(transition.elapsed_hours)
                ));
            }
            SlaStatus::NearDue if self.config.notify_near_due => {
                msg_info!(Message::OrderBecameNearDue(
                    transition.order_id.clone(),
                    format_duration(&transition.remaining)
                ));
            }
            SlaStatus::NearDue => {}
            SlaStatus::OnTrack => {
                msg_info!(Message::OrderBackOnTrack(transition.order_id.clone()));
            }
        }
    }

    /// Runs the polling loop until Ctrl+C.
    pub async fn run(&mut self) -> Result<()> {
        let mut interval = time::interval(Duration::from_secs(self.config.poll_interval.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        msg_info!(Message::WatchStarted(self.config.poll_interval.max(1)));

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    for transition in self.tick(Local::now().naive_local())? {
                        self.alert(&transition);
                    }
                }
                signal = &mut shutdown => {
                    if let Err(e) = signal {
                        msg_error!(Message::WatchCtrlCListenFailed(e.to_string()));
                    }
                    break;
                }
            }
        }

        msg_info!(Message::WatchStopped);
        Ok(())
    }
}
