use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendlens_ai::{DEFAULT_ANALYSIS_MODEL, DEFAULT_EXTRACTION_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSection {
    /// API key; the GEMINI_API_KEY env var takes precedence.
    pub api_key: Option<String>,
    pub base_url: String,
    pub extraction_model: String,
    pub analysis_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiSection {
                api_key: None,
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
                analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            },
        }
    }
}

pub fn spendlens_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens"))
}

pub fn ensure_spendlens_home() -> Result<PathBuf> {
    let dir = spendlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    let mut rendered = toml::to_string_pretty(&cfg).context("serialize config")?;
    if std::env::var("GEMINI_API_KEY").is_ok_and(|k| !k.is_empty()) {
        rendered.push_str("\n# GEMINI_API_KEY is set and overrides api_key\n");
    }
    print!("{rendered}");
    Ok(())
}

/// Resolve the API key: env var first, then the config file.
pub fn resolve_api_key(cfg: &Config) -> Result<String> {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }
    cfg.gemini.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "missing Gemini API key; set GEMINI_API_KEY or add api_key under [gemini] in ~/.spendlens/config.toml"
        )
    })
}
