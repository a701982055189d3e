//! Core library modules for the obras application.
//!
//! Groups the SLA engine, the dependency pause ledger and the supporting
//! infrastructure used by the command-line surface.
//!
//! ## Features
//!
//! - **SLA Engine**: chargeable elapsed time, business-day clock, classification
//! - **Pause Ledger**: opening and closing external-dependency pauses
//! - **Work Orders**: status transitions and the completion guard
//! - **Core Infrastructure**: configuration, data storage, session, messaging
//! - **User Interface**: console tables, export, formatting, watch loop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obras::db::orders::Orders;
//! use obras::libs::sla::SlaClock;
//! use chrono::Local;
//!
//! let orders = Orders::new()?.fetch_all()?;
//! let reports = SlaClock::default().evaluate_all(&orders, Local::now().naive_local());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod order;
pub mod pause;
pub mod session;
pub mod sla;
pub mod timestamp;
pub mod view;
pub mod watcher;
