//! Dependency pause ledger for work orders.
//!
//! A work order blocked on an external party ("awaiting dependency") carries a
//! pause interval that stops its SLA clock. The ledger computes the next value
//! of an order's pause list in response to "mark as waiting" and "resume"
//! actions; it never mutates its input and never fails.
//!
//! ## Invariants
//!
//! - At most one open [`PauseKind::ExternalDependency`] pause exists per order.
//!   Opening while one is open updates that entry's `reason`/`note` in place.
//! - `ended_at` is written once, when the pause closes, and never changes.
//! - Entries are never removed.
//!
//! ## Usage
//!
//! ```rust
//! use obras::libs::pause::{close_dependency_pause, has_open_dependency_pause, open_dependency_pause, OpenPause};
//!
//! let pauses = open_dependency_pause(&[], OpenPause::new("SANEAMENTO", "Aguardando rede de esgoto"));
//! assert!(has_open_dependency_pause(&pauses));
//! let pauses = close_dependency_pause(&pauses, None);
//! assert!(!has_open_dependency_pause(&pauses));
//! ```

use crate::libs::formatter::{format_duration, FormattedPause};
use crate::libs::timestamp::{Timestamp, TIMESTAMP_FORMAT};
use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Kind of pause attached to a work order.
///
/// Tags other than the known ones deserialize as [`PauseKind::Unknown`] so that
/// records written by newer clients still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseKind {
    /// Order is blocked on an external party (sanitation utility, permits, ...).
    #[serde(rename = "SANEAR", alias = "EXTERNAL_DEPENDENCY")]
    ExternalDependency,
    /// Any tag this version does not know about.
    #[serde(other)]
    Unknown,
}

/// How a pause kind affects the SLA clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausePolicy {
    /// The interval is excluded from chargeable time.
    StopsClock,
    /// The interval is charged like normal time; elapsed-time math ignores it.
    Charged,
}

impl PauseKind {
    /// Per-kind policy table consulted by every elapsed-time calculation.
    pub fn policy(self) -> PausePolicy {
        match self {
            PauseKind::ExternalDependency => PausePolicy::StopsClock,
            PauseKind::Unknown => PausePolicy::Charged,
        }
    }

    /// Storage tag for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            PauseKind::ExternalDependency => "SANEAR",
            PauseKind::Unknown => "UNKNOWN",
        }
    }

    /// Maps a storage tag back to a kind.
    pub fn from_tag(tag: &str) -> PauseKind {
        match tag {
            "SANEAR" | "EXTERNAL_DEPENDENCY" => PauseKind::ExternalDependency,
            _ => PauseKind::Unknown,
        }
    }
}

/// A single pause period attached to a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseInterval {
    pub kind: PauseKind,
    /// Short classification code.
    #[serde(default)]
    pub reason: String,
    /// Free-text justification.
    #[serde(default)]
    pub note: String,
    /// When the pause opened. Entries without it are malformed and skipped.
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    /// When the pause closed; `None` while open.
    #[serde(default)]
    pub ended_at: Option<Timestamp>,
}

impl PauseInterval {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn is_open_dependency(&self) -> bool {
        self.kind == PauseKind::ExternalDependency && self.is_open()
    }

    /// Local start and end of the interval, with open pauses running to `now`.
    ///
    /// Returns `None` for malformed entries: a missing start, or a start or end
    /// that cannot be resolved to the local clock.
    pub fn bounds(&self, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.started_at?.to_local()?;
        let end = match self.ended_at {
            Some(ended_at) => ended_at.to_local()?,
            None => now,
        };
        Some((start, end))
    }

    /// Wall-clock length of the interval, never negative.
    pub fn duration(&self, now: NaiveDateTime) -> Duration {
        self.bounds(now)
            .map(|(start, end)| (end - start).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }
}

/// Metadata for opening (or re-asserting) a dependency pause.
#[derive(Debug, Clone)]
pub struct OpenPause {
    pub reason: String,
    pub note: String,
    /// Defaults to the current local time.
    pub started_at: Option<NaiveDateTime>,
}

impl OpenPause {
    pub fn new(reason: &str, note: &str) -> Self {
        OpenPause {
            reason: reason.to_string(),
            note: note.to_string(),
            started_at: None,
        }
    }

    pub fn at(mut self, started_at: NaiveDateTime) -> Self {
        self.started_at = Some(started_at);
        self
    }
}

/// Index of the most recent open dependency pause.
fn last_open_dependency(pauses: &[PauseInterval]) -> Option<usize> {
    pauses.iter().rposition(PauseInterval::is_open_dependency)
}

/// Opens a dependency pause, or updates the one already open.
///
/// Repeated "mark as waiting" calls (double submits, reason changes) land on
/// the same open entry: only its `reason` and `note` change, `started_at` and
/// `kind` stay as they were.
pub fn open_dependency_pause(pauses: &[PauseInterval], request: OpenPause) -> Vec<PauseInterval> {
    let mut next = pauses.to_vec();
    match last_open_dependency(&next) {
        Some(index) => {
            let open = &mut next[index];
            open.reason = request.reason;
            open.note = request.note;
        }
        None => {
            let started_at = request.started_at.unwrap_or_else(|| Local::now().naive_local());
            next.push(PauseInterval {
                kind: PauseKind::ExternalDependency,
                reason: request.reason,
                note: request.note,
                started_at: Some(Timestamp::Plain(started_at)),
                ended_at: None,
            });
        }
    }
    next
}

/// Closes the most recent open dependency pause.
///
/// With nothing open the list is returned unchanged.
pub fn close_dependency_pause(pauses: &[PauseInterval], ended_at: Option<NaiveDateTime>) -> Vec<PauseInterval> {
    let mut next = pauses.to_vec();
    if let Some(index) = last_open_dependency(&next) {
        let ended_at = ended_at.unwrap_or_else(|| Local::now().naive_local());
        next[index].ended_at = Some(Timestamp::Plain(ended_at));
    }
    next
}

/// True when any dependency pause is still open.
pub fn has_open_dependency_pause(pauses: &[PauseInterval]) -> bool {
    pauses.iter().any(PauseInterval::is_open_dependency)
}

/// A trait for formatting a collection of `PauseInterval` instances.
pub trait PauseGroup {
    /// Formats pauses into display rows, with open pauses measured up to `now`.
    fn format(&self, now: NaiveDateTime) -> Vec<FormattedPause>;
}

impl PauseGroup for [PauseInterval] {
    fn format(&self, now: NaiveDateTime) -> Vec<FormattedPause> {
        self.iter()
            .enumerate()
            .map(|(index, p)| FormattedPause {
                id: (index + 1) as i32,
                kind: p.kind.as_str().to_string(),
                reason: p.reason.clone(),
                note: p.note.clone(),
                start: p
                    .started_at
                    .and_then(|s| s.to_local())
                    .map_or_else(|| "-".to_string(), |s| s.format(TIMESTAMP_FORMAT).to_string()),
                end: p
                    .ended_at
                    .and_then(|e| e.to_local())
                    .map_or_else(|| "-".to_string(), |e| e.format(TIMESTAMP_FORMAT).to_string()),
                duration: match p.bounds(now) {
                    Some(_) => format_duration(&p.duration(now)),
                    None => "--:--".to_string(),
                },
            })
            .collect()
    }
}
