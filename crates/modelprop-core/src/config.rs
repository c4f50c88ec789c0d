//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `modelprop.toml` +
//! `modelprop.<env>.toml` + `MODELPROP_*` env vars. Relative directories
//! resolve against `root` after `~` and `${VAR}` expansion.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Where schemas are read from and where the query result goes.
///
/// `schema_dir` and `output_dir` are resolved against `root` unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub root: String,
    pub schema_dir: String,
    pub output_dir: String,
    pub output_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            schema_dir: "schemas".to_string(),
            output_dir: "output".to_string(),
            output_file: "query_output.json".to_string(),
        }
    }
}

impl Settings {
    pub fn with_root<S: Into<String>>(mut self, root: S) -> Self {
        self.root = root.into();
        self
    }

    pub fn root_dir(&self) -> PathBuf {
        expand_path(&self.root)
    }

    pub fn schema_dir(&self) -> PathBuf {
        resolve_with_base(&self.root_dir(), &self.schema_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        resolve_with_base(&self.root_dir(), &self.output_dir).join(&self.output_file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_file.trim().is_empty() {
            return Err(Error::InvalidConfig("output_file must not be empty".to_string()));
        }
        let mut components = Path::new(&self.output_file).components();
        if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
            return Err(Error::InvalidConfig(format!(
                "output_file must be a bare file name, got '{}'",
                self.output_file
            )));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("modelprop.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("modelprop.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("modelprop.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("modelprop.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("MODELPROP_"));

        tracing::debug!(env = %env_name, "loaded configuration");
        Ok(Self { figment })
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
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
