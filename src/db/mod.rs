//! Database layer for the obras application.
//!
//! A local SQLite store that plays the role of the record store feeding the
//! SLA engine. Work orders and their pause lists are persisted here; the
//! engine itself never touches the database.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obras::db::orders::Orders;
//!
//! let orders = Orders::new()?;
//! for order in orders.fetch_all()? {
//!     println!("{} {}", order.id, order.status);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup; applies migrations on open.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Work orders and their pause intervals.
pub mod orders;
