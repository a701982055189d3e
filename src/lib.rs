//! # Obras - SLA clock for municipal public-works orders
//!
//! A command-line utility for tracking work orders against their service
//! level agreement, pausing the clock while an order waits on an external
//! dependency such as the sanitation utility.
//!
//! ## Features
//!
//! - **SLA Clock**: business-day elapsed time with dependency pauses excluded
//! - **Pause Ledger**: idempotent "mark as waiting" and "resume" actions
//! - **Dashboard**: on track / near due / overdue classification and compliance
//! - **Watch**: periodic re-evaluation with alerts on transitions
//! - **Data Export**: SLA reports as CSV or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obras::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
