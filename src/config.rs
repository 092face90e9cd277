//! Configuration shared by the language server and the CLI.
//!
//! Editors send settings as JSON, either under a `clarity` section or as a bare object. Every field has a default,
//! so `{}` is a complete configuration.
//!
//! ## Examples
//! ```rust
//! use clarion::config::ServerConfig;
//!
//! let config = ServerConfig::from_settings(&serde_json::json!({
//!     "clarity": { "clarinetPath": "/opt/clarinet", "debounceMs": 150 }
//! }))
//! .unwrap();
//! assert_eq!(config.clarinet_path, "/opt/clarinet");
//! assert_eq!(config.debounce_ms, 150);
//! assert!(config.clear_on_change);
//! ```

use clarion_syntax::ScanConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLARINET: &str = "clarinet";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-oss:120b";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ============================================================================
// Server configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Executable used for every toolchain command.
    pub clarinet_path: String,
    /// Delay before a scan runs after the last edit.
    pub debounce_ms: u64,
    /// Drop a document's diagnostics as soon as it changes, before the debounced rescan.
    pub clear_on_change: bool,
    pub scan: ScanConfig,
    pub test_gen: TestGenConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            clarinet_path: DEFAULT_CLARINET.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            clear_on_change: true,
            scan: ScanConfig::default(),
            test_gen: TestGenConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn with_clarinet_path(mut self, path: impl Into<String>) -> Self {
        self.clarinet_path = path.into();
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_clear_on_change(mut self, clear: bool) -> Self {
        self.clear_on_change = clear;
        self
    }

    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_test_gen(mut self, test_gen: TestGenConfig) -> Self {
        self.test_gen = test_gen;
        self
    }

    /// Parse editor settings: a `clarity` section if present, otherwise the object itself.
    ///
    /// `null` yields the defaults.
    pub fn from_settings(settings: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let section = settings.get("clarity").unwrap_or(settings);
        if section.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(section)
    }
}

// ============================================================================
// Test generation
// ============================================================================

/// Settings for the chat-completion backend that drafts test files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestGenConfig {
    /// Bearer credential. Falls back to `OPENAI_API_KEY` when absent.
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for TestGenConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl TestGenConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The configured key, or the value of `env(API_KEY_ENV)`. Blank keys count as missing.
    pub fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env(API_KEY_ENV))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}
