//! Current user session: role and "last seen" watermark.
//!
//! The session is loaded once per command and passed explicitly to the code
//! that needs it. It is stored as JSON next to the configuration file.

use crate::libs::data_storage::DataStorage;
use crate::libs::error::OrderError;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Registers orders and manages dependency pauses.
    #[default]
    Operator,
    /// Contracted execution crew; completes orders.
    Crew,
    /// Full access, views dashboards.
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Operator => "operator",
            Role::Crew => "crew",
            Role::Manager => "manager",
        };
        write!(f, "{}", label)
    }
}

/// Actions guarded by the role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManagePauses,
    Complete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ManagePauses => write!(f, "pause or resume orders"),
            Action::Complete => write!(f, "complete orders"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub role: Role,
    /// Last time the user looked at the dashboard.
    #[serde(default)]
    pub last_seen: Option<NaiveDateTime>,
}

impl UserSession {
    pub fn new(role: Role) -> Self {
        UserSession { role, last_seen: None }
    }

    pub fn can(&self, action: Action) -> bool {
        match action {
            Action::ManagePauses => matches!(self.role, Role::Operator | Role::Manager),
            Action::Complete => matches!(self.role, Role::Crew | Role::Manager),
        }
    }

    pub fn authorize(&self, action: Action) -> Result<(), OrderError> {
        if self.can(action) {
            Ok(())
        } else {
            Err(OrderError::PermissionDenied {
                role: self.role.to_string(),
                action: action.to_string(),
            })
        }
    }

    /// Moves the watermark forward; it never goes back.
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_seen = Some(self.last_seen.map_or(now, |seen| seen.max(now)));
    }

    /// Reads the session from the data directory, or a default operator session.
    pub fn load() -> Result<UserSession> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<UserSession> {
        if !path.exists() {
            return Ok(UserSession::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &self)?;
        Ok(())
    }
}
