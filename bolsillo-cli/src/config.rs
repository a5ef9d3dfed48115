use anyhow::{Context, Result};
use bolsillo_core::{CategoryRecord, FixedRates, StaticCategories};
use bolsillo_parser::{AccountTable, Lexicon};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_bolsillo_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub rates: RatesSection,
    /// Bank/wallet names and the words that identify them, in match order.
    #[serde(default)]
    pub accounts: AccountTable,
    /// User-defined categories, matched by name after the built-in keywords.
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatesSection {
    /// Bolívares per dollar, used to show USD equivalents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ves_per_usd: Option<f64>,
}

impl Config {
    pub fn lexicon(&self) -> Lexicon {
        Lexicon::new(self.accounts.clone())
    }

    pub fn category_registry(&self) -> StaticCategories {
        StaticCategories(self.categories.clone())
    }

    /// Rates from config, with `override_ves` taking precedence.
    pub fn rates(&self, override_ves: Option<f64>) -> FixedRates {
        FixedRates {
            ves_per_usd: override_ves.or(self.rates.ves_per_usd),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_bolsillo_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Defaults when the file does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    save_config_to(&config_path()?, cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
