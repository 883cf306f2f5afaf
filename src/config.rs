//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{NpadError, Result};
use crate::pad::{NpadIdType, NpadStyleSet};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub pad: PadConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

/// Process-wide input negotiation
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Number of player slots to negotiate (1-8)
    #[serde(default = "default_max_players")]
    pub max_players: u8,

    /// Accepted style names; single styles or the "full-ctrl"/"standard" presets
    #[serde(default = "default_styles")]
    pub styles: Vec<String>,
}

/// Which logical ids the demo pad listens to
#[derive(Debug, Deserialize, Clone)]
pub struct PadConfig {
    #[serde(default = "default_ids")]
    pub ids: Vec<String>,
}

/// Demo loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    /// Polling rate of the frame loop
    #[serde(default = "default_poll_rate_hz")]
    pub poll_rate_hz: u32,

    /// Frames between periodic status log lines
    #[serde(default = "default_log_interval_frames")]
    pub log_interval_frames: u64,
}

/// Input trace recording configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TraceConfig {
    #[serde(default = "default_trace_enabled")]
    pub enabled: bool,

    #[serde(default = "default_trace_dir")]
    pub dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,
}

// Default value functions
fn default_max_players() -> u8 { 1 }
fn default_styles() -> Vec<String> { vec!["standard".to_string()] }

fn default_ids() -> Vec<String> { vec!["no1".to_string(), "handheld".to_string()] }

fn default_poll_rate_hz() -> u32 { 60 }
fn default_log_interval_frames() -> u64 { 60 }

fn default_trace_enabled() -> bool { false }
fn default_trace_dir() -> String { "./traces".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
            styles: default_styles(),
        }
    }
}

impl Default for PadConfig {
    fn default() -> Self {
        Self { ids: default_ids() }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            poll_rate_hz: default_poll_rate_hz(),
            log_interval_frames: default_log_interval_frames(),
        }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: default_trace_enabled(),
            dir: default_trace_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            pad: PadConfig::default(),
            demo: DemoConfig::default(),
            trace: TraceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configured style names into one accepted style set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty list or an unknown name.
    pub fn style_set(&self) -> Result<NpadStyleSet> {
        if self.input.styles.is_empty() {
            return Err(NpadError::InvalidArgument(
                "input.styles must not be empty".to_string(),
            ));
        }
        let mut set = NpadStyleSet::empty();
        for name in &self.input.styles {
            let style = NpadStyleSet::from_name(name).ok_or_else(|| {
                NpadError::InvalidArgument(format!("unknown style name: {name:?}"))
            })?;
            set |= style;
        }
        Ok(set)
    }

    /// Resolve the configured id names into logical ids.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty list or an unknown name.
    pub fn id_list(&self) -> Result<Vec<NpadIdType>> {
        if self.pad.ids.is_empty() {
            return Err(NpadError::InvalidArgument(
                "pad.ids must not be empty".to_string(),
            ));
        }
        self.pad
            .ids
            .iter()
            .map(|name| {
                NpadIdType::from_name(name).ok_or_else(|| {
                    NpadError::InvalidArgument(format!("unknown pad id: {name:?}"))
                })
            })
            .collect()
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.input.max_players == 0 || self.input.max_players > 8 {
            return Err(NpadError::Config(toml::de::Error::custom(
                "max_players must be between 1 and 8",
            )));
        }

        // Name resolution doubles as validation
        self.style_set()?;
        self.id_list()?;

        if self.demo.poll_rate_hz == 0 || self.demo.poll_rate_hz > 240 {
            return Err(NpadError::Config(toml::de::Error::custom(
                "poll_rate_hz must be between 1 and 240",
            )));
        }

        if self.demo.log_interval_frames == 0 {
            return Err(NpadError::Config(toml::de::Error::custom(
                "log_interval_frames must be greater than 0",
            )));
        }

        if self.trace.enabled && self.trace.dir.is_empty() {
            return Err(NpadError::Config(toml::de::Error::custom(
                "trace dir cannot be empty when enabled",
            )));
        }

        if self.trace.max_records_per_file == 0 {
            return Err(NpadError::Config(toml::de::Error::custom(
                "max_records_per_file must be greater than 0",
            )));
        }

        if self.trace.max_files_to_keep == 0 {
            return Err(NpadError::Config(toml::de::Error::custom(
                "max_files_to_keep must be greater than 0",
            )));
        }

        Ok(())
    }
}
