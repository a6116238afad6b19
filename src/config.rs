//! Configuration file support for folio.
//!
//! The page reads its settings once at start-up: from `localStorage` in the
//! browser, from a JSON file on native. Page interaction never writes it back.

use std::time::Duration;

use folio_ui::Key;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOAD_TIMEOUT_MS, DEFAULT_PRELOAD_RADIUS, DEFAULT_SUBSCRIBE_ENDPOINT, PLACEHOLDER_IMAGE,
};
use crate::gallery::{GalleryOptions, StaleLoadPolicy};
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Parse a level name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Gallery and logging preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Popup key bindings
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,

    /// Subscription form settings
    #[serde(default)]
    pub subscription: SubscriptionConfig,
}

fn default_app_name() -> String {
    "folio".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of images to preload on each side of the current one
    #[serde(default = "default_preload_radius")]
    pub preload_radius: usize,

    /// Image load timeout in milliseconds, 0 disables it
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// Which late image loads may still update the popup
    #[serde(default)]
    pub stale_load_policy: StaleLoadPolicy,

    /// Image shown while nothing is loaded; the built-in blank GIF if unset
    #[serde(default)]
    pub placeholder_image: Option<String>,
}

fn default_preload_radius() -> usize {
    DEFAULT_PRELOAD_RADIUS
}

fn default_load_timeout_ms() -> u64 {
    DEFAULT_LOAD_TIMEOUT_MS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            preload_radius: default_preload_radius(),
            load_timeout_ms: default_load_timeout_ms(),
            stale_load_policy: StaleLoadPolicy::default(),
            placeholder_image: None,
        }
    }
}

/// Keybinding configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Hotkey that closes the popup
    pub close: Key,
    /// Hotkey for the next image
    pub next: Key,
    /// Hotkey for the previous image
    pub previous: Key,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from(&KeyBindings::default())
    }
}

impl From<&KeyBindings> for KeyBindingsConfig {
    fn from(bindings: &KeyBindings) -> Self {
        Self {
            close: bindings.close,
            next: bindings.next,
            previous: bindings.previous,
        }
    }
}

impl KeyBindingsConfig {
    /// Convert back to KeyBindings. Duplicate keys fall back to the defaults.
    pub fn to_keybindings(&self) -> KeyBindings {
        let bindings = KeyBindings {
            close: self.close,
            next: self.next,
            previous: self.previous,
        };
        if let Some((key, used_by)) = bindings.first_conflict() {
            log::warn!(
                "Key {} is also bound to '{}' in config, using default popup keybindings",
                key.label(),
                used_by
            );
            return KeyBindings::default();
        }
        bindings
    }
}

/// Subscription section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    /// URL the form posts to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_SUBSCRIBE_ENDPOINT.to_string()
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            keybindings: KeyBindingsConfig::default(),
            subscription: SubscriptionConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Gallery controller options derived from the preferences.
    pub fn gallery_options(&self) -> GalleryOptions {
        let prefs = &self.preferences;
        GalleryOptions {
            placeholder: prefs
                .placeholder_image
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            preload_radius: prefs.preload_radius,
            policy: prefs.stale_load_policy,
            load_timeout: (prefs.load_timeout_ms > 0)
                .then(|| Duration::from_millis(prefs.load_timeout_ms)),
        }
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "folio-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("folio").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("folio")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// LocalStorage key for WASM config.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "folio-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
