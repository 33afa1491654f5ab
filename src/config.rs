//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default delay before a synthesized reply lands in the transcript
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Chat configuration
    pub chat: ChatConfig,
    /// Catalog configuration
    pub catalog: CatalogConfig,
    /// Window configuration
    pub window: WindowConfig,
}

/// Chat configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Delay before the responder's reply is appended (in milliseconds)
    pub reply_delay_ms: u64,
}

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON catalog to load instead of the built-in sample data
    pub path: Option<PathBuf>,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Initial window width in points
    pub width: f32,
    /// Initial window height in points
    pub height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Missing or unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            chat: ChatConfig {
                reply_delay_ms: lookup("REPLY_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REPLY_DELAY_MS),
            },
            catalog: CatalogConfig {
                path: lookup("CATALOG_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
            },
            window: WindowConfig {
                width: lookup("WINDOW_WIDTH")
                    .and_then(|v| v.parse().ok())
                    .filter(|v: &f32| v.is_finite() && *v > 0.0)
                    .unwrap_or(1280.0),
                height: lookup("WINDOW_HEIGHT")
                    .and_then(|v| v.parse().ok())
                    .filter(|v: &f32| v.is_finite() && *v > 0.0)
                    .unwrap_or(800.0),
            },
        }
    }

    /// Get the reply delay as a `Duration`
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat.reply_delay_ms)
    }
}
