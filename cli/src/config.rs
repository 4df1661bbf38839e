//! Configuration file management.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! url = "http://localhost:8080/api"   # sales backend base URL
//! timeout = 30                        # request timeout in seconds
//!
//! [session]
//! inactivity_timeout_minutes = 15     # forced logout after this much idle time
//! check_interval_secs = 30            # how often the monitor polls
//!
//! [ui]
//! format = "table"                    # table, json
//! color = true
//! page_size = 10
//! truncate = 49                       # cell character limit before "show more"
//! theme = "light"                     # light, dark
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CLIError, Result};

/// Console configuration loaded from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Server connection settings
    pub server: Option<ServerConfig>,

    /// Session monitoring settings
    pub session: Option<SessionConfig>,

    /// UI preferences
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API base URL (e.g. http://localhost:8080/api)
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle minutes before the session is forcibly ended
    #[serde(default = "default_inactivity_minutes")]
    pub inactivity_timeout_minutes: u64,

    /// Seconds between inactivity checks
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Output format: table, json
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Rows per table page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Cell character limit before truncation
    #[serde(default = "default_truncate")]
    pub truncate: usize,

    /// Theme preference: light, dark
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_inactivity_minutes() -> u64 {
    15
}

fn default_check_interval() -> u64 {
    30
}

fn default_format() -> String {
    "table".to_string()
}

fn default_color() -> bool {
    true
}

fn default_page_size() -> u32 {
    10
}

fn default_truncate() -> usize {
    49
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig {
                url: Some("http://localhost:8080/api".to_string()),
                timeout: default_timeout(),
            }),
            session: Some(SessionConfig {
                inactivity_timeout_minutes: default_inactivity_minutes(),
                check_interval_secs: default_check_interval(),
            }),
            ui: Some(UiConfig {
                format: default_format(),
                color: default_color(),
                page_size: default_page_size(),
                truncate: default_truncate(),
                theme: default_theme(),
            }),
        }
    }
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or("~/.config/sales-console/config.toml");
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

pub fn default_config_path() -> PathBuf {
    expand_config_path(Path::new("~/.config/sales-console/config.toml"))
}

impl ConsoleConfig {
    /// Load configuration from file.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CLIError::Configuration(format!("Failed to read config file: {e}"))
        })?;

        let config: ConsoleConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CLIError::Configuration(format!("Failed to serialize: {e}")))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn resolved_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or(ServerConfig {
            url: None,
            timeout: default_timeout(),
        })
    }

    pub fn resolved_session(&self) -> SessionConfig {
        self.session.clone().unwrap_or(SessionConfig {
            inactivity_timeout_minutes: default_inactivity_minutes(),
            check_interval_secs: default_check_interval(),
        })
    }

    pub fn resolved_ui(&self) -> UiConfig {
        self.ui.clone().unwrap_or(UiConfig {
            format: default_format(),
            color: default_color(),
            page_size: default_page_size(),
            truncate: default_truncate(),
            theme: default_theme(),
        })
    }
}
