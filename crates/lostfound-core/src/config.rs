//! Layered configuration and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`APP_MATCHING__THRESHOLD=0.6`), plus `~`/`${VAR}`
//! expansion for user-supplied paths.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Weights and cut-offs used by the match ranker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub threshold: f64,
    pub name_weight: f64,
    pub desc_weight: f64,
    pub color_weight: f64,
    pub category_bonus: f64,
    pub synonym_floor: f64,
    pub synonym_floor_trigger: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            name_weight: 0.5,
            desc_weight: 0.3,
            color_weight: 0.1,
            category_bonus: 0.1,
            synonym_floor: 0.7,
            synonym_floor_trigger: 0.85,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("threshold", self.threshold),
            ("name_weight", self.name_weight),
            ("desc_weight", self.desc_weight),
            ("color_weight", self.color_weight),
            ("category_bonus", self.category_bonus),
            ("synonym_floor", self.synonym_floor),
            ("synonym_floor_trigger", self.synonym_floor_trigger),
        ];
        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "matching.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Sizing of the chained hash index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub initial_size: usize,
    pub max_load_factor: f64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self { initial_size: 50, max_load_factor: 0.75 }
    }
}

impl IndexSettings {
    pub fn validate(&self) -> Result<()> {
        if self.initial_size == 0 {
            return Err(Error::InvalidConfig("index.initial_size must be at least 1".to_string()));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "index.max_load_factor must be a positive number, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

/// Bound on the board's action history; the oldest entry is dropped first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

impl HistorySettings {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig("history.capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub matching: MatchSettings,
    pub index: IndexSettings,
    pub history: HistorySettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        self.index.validate()?;
        self.history.validate()
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Self::defaults().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            other => tracing::warn!(env = other, "unknown RUST_ENV, using config.toml only"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Self { figment: Self::defaults().merge(Toml::string(toml)) };
        config.settings()?;
        Ok(config)
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> Result<()> {
        let settings = self.settings()?;
        if matches!(env, "prod" | "production") && settings.matching.threshold == 0.0 {
            return Err(Error::InvalidConfig(
                "matching.threshold of 0 would surface every candidate in production".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expands `${VAR}`, `$VAR` and a leading `~`. The result is not
/// canonicalized.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
