//! SLA clock: chargeable elapsed time and deadline classification.
//!
//! Every function here is a pure calculation over a work order snapshot and a
//! reference time. Absent or malformed inputs degrade to zero instead of
//! failing, since the clock is re-evaluated on every refresh of a dashboard.
//!
//! ## Key Concepts
//!
//! - **Raw elapsed time**: wall-clock time since the order was created
//! - **Business elapsed time**: only the parts of that span falling on Monday
//!   through Friday (local time)
//! - **Paused time**: intervals whose kind stops the clock (see
//!   [`PauseKind::policy`](crate::libs::pause::PauseKind::policy))
//! - **Chargeable time**: elapsed time minus paused time, clamped at zero
//!
//! ## Classification
//!
//! ```text
//! Overdue  : elapsed >= sla
//! Near-due : sla * 0.75 <= elapsed < sla
//! On track : elapsed < sla * 0.75
//! ```
//!
//! ## Elapsed Mode
//!
//! Classification, dashboards and exports all go through [`SlaClock`], which
//! applies a single [`ElapsedMode`]. The business-day mode is the default and
//! measures pauses on the same business-day basis as the elapsed span, so a
//! pause over a weekend is not subtracted twice.

use crate::libs::config::SlaConfig;
use crate::libs::order::WorkOrder;
use crate::libs::pause::{has_open_dependency_pause, PauseInterval, PausePolicy};
use crate::libs::timestamp::Timestamp;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours allowed before an order is overdue when none is configured.
pub const DEFAULT_SLA_HOURS: f64 = 72.0;

/// Fraction of the SLA after which an order counts as near-due.
pub const NEAR_DUE_RATIO: f64 = 0.75;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Which elapsed-time basis the clock charges against the SLA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElapsedMode {
    /// Weekends excluded from both elapsed and paused time.
    #[default]
    Business,
    /// Plain wall-clock time.
    Calendar,
}

/// Deadline classification of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    OnTrack,
    NearDue,
    Overdue,
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SlaStatus::OnTrack => "on track",
            SlaStatus::NearDue => "near due",
            SlaStatus::Overdue => "overdue",
        };
        write!(f, "{}", label)
    }
}

/// Result of an overdue check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overdue {
    pub overdue: bool,
    pub elapsed_hours: f64,
}

/// Effective SLA in hours: the given value when positive, else `default`.
pub fn resolve_sla_hours(sla_hours: Option<f64>, default: f64) -> f64 {
    match sla_hours {
        Some(hours) if hours.is_finite() && hours > 0.0 => hours,
        _ => default,
    }
}

/// Converts a duration to fractional hours.
pub fn to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_HOUR
}

fn stops_clock(pause: &PauseInterval) -> bool {
    pause.kind.policy() == PausePolicy::StopsClock
}

/// Total wall-clock time covered by clock-stopping pauses.
///
/// Open pauses run up to `now`; entries without a start are skipped.
pub fn paused_duration(pauses: &[PauseInterval], now: NaiveDateTime) -> Duration {
    pauses.iter().filter(|p| stops_clock(p)).map(|p| p.duration(now)).sum()
}

/// Wall-clock time since creation minus paused time, never negative.
pub fn chargeable_elapsed(created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> Duration {
    let Some(created) = created_at.and_then(|c| c.to_local()) else {
        return Duration::zero();
    };
    ((now - created) - paused_duration(pauses, now)).max(Duration::zero())
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business-day time between two local instants.
///
/// Walks calendar days from `from` to `to`, counting each day's portion of
/// the span only when that day is a weekday.
pub fn business_span(from: NaiveDateTime, to: NaiveDateTime) -> Duration {
    let mut total = Duration::zero();
    let mut cursor = from;
    while cursor < to {
        let next_midnight = cursor
            .date()
            .succ_opt()
            .map(|day| day.and_time(NaiveTime::MIN))
            .unwrap_or(to);
        let segment_end = next_midnight.min(to);
        if is_business_day(cursor.date()) {
            total = total + (segment_end - cursor);
        }
        cursor = segment_end;
    }
    total
}

/// Business-day time since creation, ignoring pauses.
pub fn business_elapsed(created_at: Option<Timestamp>, now: NaiveDateTime) -> Duration {
    match created_at.and_then(|c| c.to_local()) {
        Some(created) => business_span(created, now),
        None => Duration::zero(),
    }
}

/// Business-day time covered by clock-stopping pauses within `[created, now]`.
///
/// Intervals are clipped to the order's lifetime and merged where they
/// overlap, so no instant is subtracted more than once.
pub fn business_paused_duration(pauses: &[PauseInterval], created: NaiveDateTime, now: NaiveDateTime) -> Duration {
    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> = pauses
        .iter()
        .filter(|p| stops_clock(p))
        .filter_map(|p| p.bounds(now))
        .map(|(start, end)| (start.max(created), end.min(now)))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort();

    let mut merged: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged.into_iter().map(|(start, end)| business_span(start, end)).sum()
}

/// Business-day elapsed time minus business-day paused time, never negative.
pub fn business_chargeable_elapsed(created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> Duration {
    let Some(created) = created_at.and_then(|c| c.to_local()) else {
        return Duration::zero();
    };
    (business_span(created, now) - business_paused_duration(pauses, created, now)).max(Duration::zero())
}

/// Classifies chargeable hours against the SLA.
pub fn classify(elapsed_hours: f64, sla_hours: f64, near_due_ratio: f64) -> SlaStatus {
    if elapsed_hours >= sla_hours {
        SlaStatus::Overdue
    } else if elapsed_hours >= sla_hours * near_due_ratio {
        SlaStatus::NearDue
    } else {
        SlaStatus::OnTrack
    }
}

/// Overdue check with the default clock (business-day mode, 72 h default).
pub fn is_overdue(sla_hours: Option<f64>, created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> Overdue {
    SlaClock::default().is_overdue(sla_hours, created_at, pauses, now)
}

/// Snapshot of a work order's SLA position at a reference time.
#[derive(Debug, Clone)]
pub struct SlaReport {
    pub order_id: String,
    pub status: SlaStatus,
    /// Effective SLA after defaulting.
    pub sla_hours: f64,
    /// Elapsed time before pauses, on the clock's basis.
    pub elapsed: Duration,
    /// Paused time subtracted, on the clock's basis.
    pub paused: Duration,
    pub chargeable: Duration,
    pub elapsed_hours: f64,
    /// Time left until the deadline, zero once overdue.
    pub remaining: Duration,
    pub overdue: bool,
    /// A dependency pause is currently open.
    pub paused_now: bool,
}

/// SLA clock bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct SlaClock {
    pub default_sla_hours: f64,
    pub near_due_ratio: f64,
    pub mode: ElapsedMode,
}

impl Default for SlaClock {
    fn default() -> Self {
        SlaClock {
            default_sla_hours: DEFAULT_SLA_HOURS,
            near_due_ratio: NEAR_DUE_RATIO,
            mode: ElapsedMode::Business,
        }
    }
}

impl From<&SlaConfig> for SlaClock {
    fn from(config: &SlaConfig) -> Self {
        let defaults = SlaClock::default();
        SlaClock {
            default_sla_hours: resolve_sla_hours(Some(config.default_sla_hours), defaults.default_sla_hours),
            near_due_ratio: if config.near_due_ratio > 0.0 && config.near_due_ratio < 1.0 {
                config.near_due_ratio
            } else {
                defaults.near_due_ratio
            },
            mode: config.mode,
        }
    }
}

impl SlaClock {
    /// Elapsed and paused time on the clock's basis.
    fn measure(&self, created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> (Duration, Duration) {
        let Some(created) = created_at.and_then(|c| c.to_local()) else {
            return (Duration::zero(), Duration::zero());
        };
        match self.mode {
            ElapsedMode::Business => (business_span(created, now), business_paused_duration(pauses, created, now)),
            ElapsedMode::Calendar => ((now - created).max(Duration::zero()), paused_duration(pauses, now)),
        }
    }

    /// Chargeable time on the clock's basis.
    pub fn chargeable(&self, created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> Duration {
        let (elapsed, paused) = self.measure(created_at, pauses, now);
        (elapsed - paused).max(Duration::zero())
    }

    pub fn is_overdue(&self, sla_hours: Option<f64>, created_at: Option<Timestamp>, pauses: &[PauseInterval], now: NaiveDateTime) -> Overdue {
        let sla_hours = resolve_sla_hours(sla_hours, self.default_sla_hours);
        let elapsed_hours = to_hours(self.chargeable(created_at, pauses, now));
        Overdue {
            overdue: elapsed_hours >= sla_hours,
            elapsed_hours,
        }
    }

    /// Evaluates a work order at `now`.
    ///
    /// Completed orders are measured up to their completion time.
    pub fn evaluate(&self, order: &WorkOrder, now: NaiveDateTime) -> SlaReport {
        let now = order.clock_end(now);
        let sla_hours = resolve_sla_hours(order.sla_hours, self.default_sla_hours);
        let (elapsed, paused) = self.measure(order.created_at, &order.pauses, now);
        let chargeable = (elapsed - paused).max(Duration::zero());
        let elapsed_hours = to_hours(chargeable);
        let deadline = Duration::milliseconds((sla_hours * MS_PER_HOUR) as i64);

        SlaReport {
            order_id: order.id.clone(),
            status: classify(elapsed_hours, sla_hours, self.near_due_ratio),
            sla_hours,
            elapsed,
            paused,
            chargeable,
            elapsed_hours,
            remaining: (deadline - chargeable).max(Duration::zero()),
            overdue: elapsed_hours >= sla_hours,
            paused_now: has_open_dependency_pause(&order.pauses),
        }
    }

    pub fn evaluate_all(&self, orders: &[WorkOrder], now: NaiveDateTime) -> Vec<SlaReport> {
        orders.iter().map(|order| self.evaluate(order, now)).collect()
    }

    /// Ids of open orders that are overdue at `now` but were not at `since`.
    pub fn newly_overdue(&self, orders: &[WorkOrder], since: NaiveDateTime, now: NaiveDateTime) -> Vec<String> {
        orders
            .iter()
            .filter(|order| !order.is_completed())
            .filter(|order| self.evaluate(order, now).overdue && !self.evaluate(order, since).overdue)
            .map(|order| order.id.clone())
            .collect()
    }
}

/// Dashboard aggregate over a set of reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlaSummary {
    pub total: usize,
    pub on_track: usize,
    pub near_due: usize,
    pub overdue: usize,
    /// Orders with an open dependency pause.
    pub paused: usize,
}

impl SlaSummary {
    pub fn from_reports(reports: &[SlaReport]) -> Self {
        reports.iter().fold(SlaSummary::default(), |mut summary, report| {
            summary.total += 1;
            match report.status {
                SlaStatus::OnTrack => summary.on_track += 1,
                SlaStatus::NearDue => summary.near_due += 1,
                SlaStatus::Overdue => summary.overdue += 1,
            }
            if report.paused_now {
                summary.paused += 1;
            }
            summary
        })
    }

    /// Share of orders within their SLA, in percent. 100 for an empty set.
    pub fn compliance(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.total - self.overdue) as f64 / self.total as f64 * 100.0
    }
}
