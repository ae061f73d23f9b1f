//! Configuration management for pipe-weight
//!
//! Config stored at: ~/.config/pipe-weight/config.json

use pipeweight_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the calculation endpoint binds to
    #[serde(default = "default_server_host")]
    pub server_host: String,

    /// Port the calculation endpoint listens on
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Origins allowed to call the endpoint cross-origin ("*" = any)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Base URL clients send calculation requests to
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Spec table TOML replacing the built-in catalogue
    #[serde(default)]
    pub spec_table: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Currency shown next to prices
    #[serde(default = "default_currency_label")]
    pub currency_label: String,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3001
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_endpoint_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_currency_label() -> String {
    "Rs.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: default_server_host(),
            server_port: default_server_port(),
            allowed_origins: default_allowed_origins(),
            endpoint_url: default_endpoint_url(),
            spec_table: None,
            output_format: OutputFormat::default(),
            currency_label: default_currency_label(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("pipe-weight");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// True when cross-origin calls are allowed from anywhere
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pipe Weight Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Listen address:  {}", self.bind_addr())?;
        writeln!(f, "Allowed origins: {}", self.allowed_origins.join(", "))?;
        writeln!(f, "Endpoint URL:    {}", self.endpoint_url)?;
        writeln!(
            f,
            "Spec table:      {}",
            self.spec_table
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Currency:        {}", self.currency_label)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
