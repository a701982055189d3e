//! Configuration management for the obras application.
//!
//! Holds the SLA clock settings and the behaviour of the `watch` loop. The
//! configuration is stored as pretty-printed JSON in the platform data
//! directory and can be edited through an interactive wizard.
//!
//! ## Configuration Structure
//!
//! - **SLA Config**: default deadline, near-due threshold and elapsed-time mode
//! - **Watch Config**: polling interval and which transitions raise alerts
//!
//! Both modules are optional; a missing module resolves to its defaults.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use obras::libs::config::Config;
//!
//! let config = Config::read()?;
//! let sla = config.sla.unwrap_or_default();
//! println!("Default SLA: {}h", sla.default_sla_hours);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::sla::{ElapsedMode, DEFAULT_SLA_HOURS, NEAR_DUE_RATIO};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// SLA clock settings.
///
/// These values apply uniformly to the dashboard, the watch loop and exports,
/// so every surface classifies an order the same way.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlaConfig {
    /// Hours allowed for orders without their own positive `sla_hours`.
    pub default_sla_hours: f64,

    /// Fraction of the SLA after which an order is near-due (0 < ratio < 1).
    pub near_due_ratio: f64,

    /// Elapsed-time basis charged against the SLA.
    #[serde(default)]
    pub mode: ElapsedMode,
}

/// Settings for the `watch` polling loop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WatchConfig {
    /// Seconds between evaluations.
    ///
    /// Classification is relative to "now", so the loop re-evaluates even when
    /// no record changed.
    pub poll_interval: u64,

    /// Also alert when an order becomes near-due, not only overdue.
    pub notify_near_due: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla: Option<SlaConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchConfig>,
}

impl Default for SlaConfig {
    fn default() -> Self {
        SlaConfig {
            default_sla_hours: DEFAULT_SLA_HOURS,
            near_due_ratio: NEAR_DUE_RATIO,
            mode: ElapsedMode::Business,
        }
    }
}

impl Default for WatchConfig {
    /// Re-evaluates once a minute and alerts on near-due orders.
    fn default() -> Self {
        WatchConfig {
            poll_interval: 60,
            notify_near_due: true,
        }
    }
}

impl Config {
    /// Reads configuration from the data directory.
    ///
    /// A missing file yields the default configuration; a corrupted file is an
    /// error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Existing values are offered as defaults; modules not selected keep
    /// their current settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "sla".to_string(),
                name: "SLA".to_string(),
            },
            ConfigModule {
                key: "watch".to_string(),
                name: "Watch".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "sla" => {
                    let default = config.sla.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleSla);
                    let modes = [ElapsedMode::Business, ElapsedMode::Calendar];
                    let mode_index = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptElapsedMode.to_string())
                        .items(&["business days", "calendar"])
                        .default(if default.mode == ElapsedMode::Calendar { 1 } else { 0 })
                        .interact()?;
                    config.sla = Some(SlaConfig {
                        default_sla_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultSlaHours.to_string())
                            .default(default.default_sla_hours)
                            .interact_text()?,
                        near_due_ratio: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptNearDueRatio.to_string())
                            .default(default.near_due_ratio)
                            .interact_text()?,
                        mode: modes[mode_index],
                    });
                }
                "watch" => {
                    let default = config.watch.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleWatch);
                    config.watch = Some(WatchConfig {
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                        notify_near_due: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptNotifyNearDue.to_string())
                            .default(default.notify_near_due)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
