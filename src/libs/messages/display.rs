//! Display implementation for obras application messages.
//!
//! All user-facing text lives here so that commands only deal with the
//! structured [`Message`] values.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ORDER MESSAGES ===
            Message::OrderCreated(id) => format!("Work order '{}' registered", id),
            Message::OrdersNotFound => "No work orders registered".to_string(),
            Message::InvalidSlaHours(hours) => format!("SLA hours must be a positive number, got {}", hours),
            Message::OrderDetailsHeader(id) => format!("Work order {}", id),
            Message::OrderMarkedWaiting(id) => format!("Work order '{}' is now awaiting an external dependency; SLA clock paused", id),
            Message::OrderPauseUpdated(id) => format!("Open dependency pause of '{}' updated", id),
            Message::OrderResumed(id, status) => format!("Work order '{}' resumed with status {}", id, status),
            Message::OrderNoOpenPause(id) => format!("Work order '{}' has no open dependency pause", id),
            Message::OrderCompleted(id) => format!("Work order '{}' completed", id),
            Message::PausesHeader => "Pauses:".to_string(),
            Message::NoPauses => "No pauses recorded".to_string(),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader(now) => format!("SLA dashboard at {}", now),
            Message::NewOverdueSinceLastSeen(count) => format!("{} order(s) became overdue since you last looked", count),

            // === WATCH MESSAGES ===
            Message::WatchStarted(interval) => format!("Watching work orders every {}s (Ctrl+C to stop)", interval),
            Message::WatchStopped => "Watch stopped".to_string(),
            Message::WatchTick(count) => format!("Evaluated {} work order(s)", count),
            Message::OrderBecameOverdue(id, hours) => format!("Work order '{}' is overdue ({} chargeable)", id, hours),
            Message::OrderBecameNearDue(id, remaining) => format!("Work order '{}' is near its deadline ({} left)", id, remaining),
            Message::OrderBackOnTrack(id) => format!("Work order '{}' is back on track", id),
            Message::WatchCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),

            // === SESSION MESSAGES ===
            Message::SessionRole(role) => format!("Current role: {}", role),
            Message::SessionUpdated(role) => format!("Session role set to {}", role),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleSla => "SLA settings".to_string(),
            Message::ConfigModuleWatch => "Watch settings".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("SLA report exported to: {}", path),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptElapsedMode => "Elapsed time basis".to_string(),
            Message::PromptDefaultSlaHours => "Default SLA (hours)".to_string(),
            Message::PromptNearDueRatio => "Near-due threshold (fraction of SLA)".to_string(),
            Message::PromptPollInterval => "Watch poll interval (seconds)".to_string(),
            Message::PromptNotifyNearDue => "Alert on near-due orders (true/false)".to_string(),
        };
        write!(f, "{}", text)
    }
}
