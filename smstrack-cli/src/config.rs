use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use smstrack_core::{DEFAULT_SYMBOL, StaticCredentials};

use crate::state::{ensure_smstrack_home, smstrack_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub auth: AuthSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Symbol used both to find amounts in messages and to print totals
    pub currency_symbol: String,
    /// Rows shown by `list` when --limit is not given
    pub list_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub default_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSection {
    /// username -> sha256 hex of the password. Empty disables the login gate.
    #[serde(default)]
    pub users: BTreeMap<String, String>,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.to_string(),
            list_limit: 50,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            default_file: "filtered_expenses.csv".to_string(),
        }
    }
}

impl AuthSection {
    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::new(self.users.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(smstrack_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_smstrack_home()?.join("config.toml");
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
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
