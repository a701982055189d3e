//! Work order state as seen by the SLA engine.
//!
//! Only the fields the clock and the ledger touch are modeled. State changes
//! return a new [`WorkOrder`]; the caller persists it.
//!
//! ## Status Transitions
//!
//! ```text
//! <open> ─mark_waiting──▶ AGUARDANDO_SANEAR ──resume──▶ status_before_pause
//!   │                                                     (or PENDENTE)
//!   └──complete (no open pause, not awaiting)──▶ CONCLUIDA
//! ```

use crate::libs::error::OrderError;
use crate::libs::pause::{close_dependency_pause, has_open_dependency_pause, open_dependency_pause, OpenPause, PauseInterval};
use crate::libs::timestamp::Timestamp;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Status of an order blocked on an external dependency.
pub const STATUS_AWAITING_DEPENDENCY: &str = "AGUARDANDO_SANEAR";
/// Initial status, also restored when no previous status was remembered.
pub const STATUS_PENDING: &str = "PENDENTE";
pub const STATUS_COMPLETED: &str = "CONCLUIDA";

/// Minimum length of a pause note accepted from the CLI.
pub const MIN_NOTE_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Allowed hours before overdue; absent or non-positive means the default.
    #[serde(default)]
    pub sla_hours: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub status_before_pause: Option<String>,
    #[serde(default)]
    pub pauses: Vec<PauseInterval>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl WorkOrder {
    pub fn new(id: &str, created_at: NaiveDateTime, sla_hours: Option<f64>) -> Self {
        WorkOrder {
            id: id.to_string(),
            created_at: Some(Timestamp::Plain(created_at)),
            sla_hours,
            status: STATUS_PENDING.to_string(),
            status_before_pause: None,
            pauses: Vec::new(),
            completed_at: None,
        }
    }

    pub fn is_awaiting_dependency(&self) -> bool {
        self.status == STATUS_AWAITING_DEPENDENCY
    }

    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    pub fn has_open_pause(&self) -> bool {
        has_open_dependency_pause(&self.pauses)
    }

    /// Reference time for the clock: completion time if completed, else `now`.
    pub fn clock_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.completed_at.and_then(|c| c.to_local()).map_or(now, |done| done.min(now))
    }

    /// Marks the order as waiting on an external dependency.
    ///
    /// Opens a dependency pause (or updates the open one) and moves the status
    /// to `AGUARDANDO_SANEAR`, remembering the status to restore. Calling it
    /// again while waiting keeps the originally remembered status.
    ///
    /// Completed orders are rejected: their clock is frozen.
    pub fn mark_waiting(&self, request: OpenPause) -> Result<WorkOrder, OrderError> {
        if self.is_completed() || self.completed_at.is_some() {
            return Err(OrderError::AlreadyCompleted(self.id.clone()));
        }
        let mut next = self.clone();
        next.pauses = open_dependency_pause(&self.pauses, request);
        if !self.is_awaiting_dependency() {
            next.status_before_pause = Some(self.status.clone());
            next.status = STATUS_AWAITING_DEPENDENCY.to_string();
        }
        Ok(next)
    }

    /// Resumes the order after its dependency is resolved.
    ///
    /// Closes the latest open dependency pause and, when the status still says
    /// awaiting, restores `status_before_pause`.
    pub fn resume(&self, ended_at: Option<NaiveDateTime>) -> WorkOrder {
        let mut next = self.clone();
        next.pauses = close_dependency_pause(&self.pauses, ended_at);
        if self.is_awaiting_dependency() {
            next.status = self
                .status_before_pause
                .clone()
                .filter(|status| status != STATUS_AWAITING_DEPENDENCY)
                .unwrap_or_else(|| STATUS_PENDING.to_string());
        }
        next.status_before_pause = None;
        next
    }

    /// Checks that the order may be marked complete.
    ///
    /// The awaiting status and the open pause are checked separately since the
    /// status field may lag behind the pause list.
    pub fn ensure_completable(&self) -> Result<(), OrderError> {
        let blocked = |reason: &str| OrderError::CompletionBlocked {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.is_completed() {
            return Err(blocked("already completed"));
        }
        if self.is_awaiting_dependency() {
            return Err(blocked("status is awaiting external dependency"));
        }
        if self.has_open_pause() {
            return Err(blocked("a dependency pause is still open"));
        }
        Ok(())
    }

    /// Marks the order complete, freezing its SLA clock at `at` (default now).
    pub fn complete(&self, at: Option<NaiveDateTime>) -> Result<WorkOrder, OrderError> {
        self.ensure_completable()?;
        let mut next = self.clone();
        next.status = STATUS_COMPLETED.to_string();
        next.completed_at = Some(Timestamp::Plain(at.unwrap_or_else(|| Local::now().naive_local())));
        Ok(next)
    }
}
