// src/config/gemini.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const ENV_CONFIG_PATH: &str = "GEMINI_CONFIG_PATH";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_TEST_MODE: &str = "AI_TEST_MODE";

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_item_cap() -> usize {
    crate::assemble::DEFAULT_ITEM_CAP
}
fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Empty or "ENV" means: read from GOOGLE_API_KEY.
    #[serde(default)]
    pub api_key: String,
    /// Records returned per fetch. Clamped to 1..=20.
    #[serde(default = "default_item_cap")]
    pub item_cap: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            item_cap: default_item_cap(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `AI_TEST_MODE=mock` swaps the real model for a canned answer.
pub fn mock_mode() -> bool {
    env::var(ENV_TEST_MODE)
        .map(|v| v.trim().eq_ignore_ascii_case("mock"))
        .unwrap_or(false)
}

impl GeminiConfig {
    /// Load from an explicit TOML or JSON file, then apply env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading gemini config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let cfg: GeminiConfig = match ext.as_str() {
            "toml" => toml::from_str(&content).context("parsing gemini config toml")?,
            _ => serde_json::from_str(&content).context("parsing gemini config json")?,
        };
        cfg.finalize()
    }

    /// Defaults + environment only.
    pub fn from_env() -> Result<Self> {
        Self::default().finalize()
    }

    /// Resolution order:
    /// 1) $GEMINI_CONFIG_PATH
    /// 2) config/gemini.toml
    /// 3) config/gemini.json
    /// 4) environment only
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        for candidate in ["config/gemini.toml", "config/gemini.json"] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
        }
        Self::from_env()
    }

    fn finalize(mut self) -> Result<Self> {
        if let Ok(m) = env::var(ENV_MODEL) {
            if !m.trim().is_empty() {
                self.model = m.trim().to_string();
            }
        }
        if self.model.trim().is_empty() {
            self.model = default_model();
        }

        let key = self.api_key.trim();
        if key.is_empty() || key.eq_ignore_ascii_case("env") {
            self.api_key = match env::var(ENV_API_KEY) {
                Ok(k) if !k.trim().is_empty() => k.trim().to_string(),
                _ if mock_mode() => String::new(),
                _ => {
                    return Err(anyhow!(
                        "Missing {ENV_API_KEY} in environment. Create a .env with {ENV_API_KEY}=..."
                    ))
                }
            };
        }

        self.item_cap = self.item_cap.clamp(1, crate::assemble::MAX_ITEM_CAP);
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        Ok(self)
    }
}
