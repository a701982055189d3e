//! Database operations for work orders and their pause lists.
//!
//! This is the host record store the SLA engine reads snapshots from and the
//! place ledger results are written back to. Each order's pause list is kept
//! in `order_pauses`, one row per interval, in list order.
//!
//! ## Write Model
//!
//! [`Orders::save`] rewrites an order row and its full pause list inside one
//! transaction, so a reader never observes a status change without the
//! matching pause change. Concurrent writers are serialized by the connection
//! mutex.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obras::db::orders::Orders;
//! use obras::libs::order::WorkOrder;
//! use chrono::Local;
//!
//! let orders = Orders::new()?;
//! orders.insert(&WorkOrder::new("OS-2025-001", Local::now().naive_local(), Some(48.0)))?;
//! let order = orders.fetch("OS-2025-001")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::error::OrderError;
use crate::libs::order::WorkOrder;
use crate::libs::pause::{PauseInterval, PauseKind};
use crate::libs::timestamp::{Timestamp, TIMESTAMP_FORMAT};
use anyhow::Result;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;

const INSERT_ORDER: &str =
    "INSERT INTO orders (id, created_at, sla_hours, status, status_before_pause, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const UPDATE_ORDER: &str = "UPDATE orders SET status = ?1, status_before_pause = ?2, completed_at = ?3 WHERE id = ?4";

const SELECT_ORDER: &str = "SELECT id, created_at, sla_hours, status, status_before_pause, completed_at FROM orders WHERE id = ?1";

const SELECT_ORDERS: &str = "SELECT id, created_at, sla_hours, status, status_before_pause, completed_at FROM orders ORDER BY created_at, id";

const SELECT_PAUSES: &str = "SELECT kind, reason, note, started_at, ended_at FROM order_pauses WHERE order_id = ?1 ORDER BY position";

const DELETE_PAUSES: &str = "DELETE FROM order_pauses WHERE order_id = ?1";

const INSERT_PAUSE: &str =
    "INSERT INTO order_pauses (order_id, position, kind, reason, note, started_at, ended_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// Converts a timestamp to its local storage string.
fn to_column(timestamp: Option<Timestamp>) -> Option<String> {
    timestamp.and_then(|t| t.to_local()).map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Reads a stored timestamp; unparseable values load as missing.
fn from_column(value: Option<String>) -> Option<Timestamp> {
    value
        .and_then(|raw| NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).ok())
        .map(Timestamp::Plain)
}

fn order_from_row(row: &Row) -> rusqlite::Result<WorkOrder> {
    Ok(WorkOrder {
        id: row.get(0)?,
        created_at: from_column(row.get(1)?),
        sla_hours: row.get(2)?,
        status: row.get(3)?,
        status_before_pause: row.get(4)?,
        pauses: Vec::new(),
        completed_at: from_column(row.get(5)?),
    })
}

fn load_pauses(conn: &Connection, order_id: &str) -> Result<Vec<PauseInterval>> {
    let mut stmt = conn.prepare(SELECT_PAUSES)?;
    let pause_iter = stmt.query_map([order_id], |row| {
        Ok(PauseInterval {
            kind: PauseKind::from_tag(&row.get::<_, String>(0)?),
            reason: row.get(1)?,
            note: row.get(2)?,
            started_at: from_column(row.get(3)?),
            ended_at: from_column(row.get(4)?),
        })
    })?;

    let mut pauses = Vec::new();
    for pause in pause_iter {
        pauses.push(pause?);
    }
    Ok(pauses)
}

/// Database manager for work orders.
pub struct Orders {
    pub conn: Arc<Mutex<Connection>>,
}

impl Orders {
    /// Opens the order store in the application data directory.
    pub fn new() -> Result<Orders> {
        Ok(Self::from_db(Db::new()?))
    }

    /// Opens the order store at an explicit database path.
    pub fn open(path: &Path) -> Result<Orders> {
        Ok(Self::from_db(Db::open(path)?))
    }

    fn from_db(db: Db) -> Orders {
        Orders {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }

    /// Registers a new work order together with any pauses it already carries.
    pub fn insert(&self, order: &WorkOrder) -> Result<()> {
        let mut conn = self.conn.lock();
        let exists = conn.query_row(SELECT_ORDER, [&order.id], |_| Ok(())).optional()?.is_some();
        if exists {
            return Err(OrderError::DuplicateId(order.id.clone()).into());
        }

        let tx = conn.transaction()?;
        tx.execute(
            INSERT_ORDER,
            params![
                order.id,
                to_column(order.created_at),
                order.sla_hours,
                order.status,
                order.status_before_pause,
                to_column(order.completed_at),
            ],
        )?;
        for (position, pause) in order.pauses.iter().enumerate() {
            insert_pause(&tx, &order.id, position, pause)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Loads a work order with its pause list.
    pub fn fetch(&self, id: &str) -> Result<Option<WorkOrder>> {
        let conn = self.conn.lock();
        let order = conn.query_row(SELECT_ORDER, [id], order_from_row).optional()?;
        match order {
            Some(mut order) => {
                order.pauses = load_pauses(&conn, &order.id)?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Loads a work order or fails with [`OrderError::NotFound`].
    pub fn get(&self, id: &str) -> Result<WorkOrder> {
        self.fetch(id)?.ok_or_else(|| OrderError::NotFound(id.to_string()).into())
    }

    /// Loads all work orders, oldest first.
    pub fn fetch_all(&self) -> Result<Vec<WorkOrder>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_ORDERS)?;
        let order_iter = stmt.query_map([], order_from_row)?;

        let mut orders = Vec::new();
        for order in order_iter {
            let mut order = order?;
            order.pauses = load_pauses(&conn, &order.id)?;
            orders.push(order);
        }
        Ok(orders)
    }

    /// Writes back the status fields and the full pause list of an order.
    pub fn save(&self, order: &WorkOrder) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let updated = tx.execute(
            UPDATE_ORDER,
            params![order.status, order.status_before_pause, to_column(order.completed_at), order.id],
        )?;
        if updated == 0 {
            return Err(OrderError::NotFound(order.id.clone()).into());
        }

        tx.execute(DELETE_PAUSES, [&order.id])?;
        for (position, pause) in order.pauses.iter().enumerate() {
            insert_pause(&tx, &order.id, position, pause)?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn insert_pause(conn: &Connection, order_id: &str, position: usize, pause: &PauseInterval) -> Result<()> {
    conn.execute(
        INSERT_PAUSE,
        params![
            order_id,
            position as i64,
            pause.kind.as_str(),
            pause.reason,
            pause.note,
            to_column(pause.started_at),
            to_column(pause.ended_at),
        ],
    )?;
    Ok(())
}
