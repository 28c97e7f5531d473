//! Configuration management for snowmap.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SnowmapError};

/// Command-line arguments for snowmap
#[derive(Parser, Debug)]
#[command(name = "snowmap")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the boundary and statistics files
    pub data_dir: PathBuf,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "SNOWMAP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SNOWMAP_PORT", default_value = "8000")]
    pub port: u16,

    /// Number of worker threads
    #[arg(short, long, env = "SNOWMAP_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SNOWMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SNOWMAP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default palette for the choropleth and legend
    #[serde(default = "default_palette")]
    pub palette: String,

    /// Default number of discrete colors (2-20)
    #[serde(default = "default_n_colors")]
    pub n_colors: usize,

    /// Path to the data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();

        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.server.host = args.host;
        config.server.port = args.port;
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        config.log_level = args.log_level;

        // Data directory from the command line takes precedence
        let data_dir = args.data_dir;

        Ok((config, data_dir))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.render = other.render;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate server host (must be a valid IP or hostname)
        if self.server.host.is_empty() {
            return Err(SnowmapError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(SnowmapError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SnowmapError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Validate the default palette
        if crate::colormaps::get_gradient(&self.render.palette).is_err() {
            return Err(SnowmapError::Config {
                message: format!(
                    "Invalid palette: {}. Available palettes: {}",
                    self.render.palette,
                    crate::colormaps::available_palettes().join(", ")
                ),
            });
        }

        // Validate the color count range
        if !(2..=20).contains(&self.render.n_colors) {
            return Err(SnowmapError::Config {
                message: format!(
                    "Invalid color count: {}. Must be between 2 and 20",
                    self.render.n_colors
                ),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            n_colors: default_n_colors(),
            data_dir: None,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_palette() -> String {
    "viridis".to_string()
}

fn default_n_colors() -> usize {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}
