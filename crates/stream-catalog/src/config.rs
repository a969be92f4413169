use anyhow::{bail, Result};
use std::{env, path::PathBuf};

pub const CATALOG_PATH_VAR: &str = "STREAM_CATALOG_PATH";
pub const DEFAULT_CATALOG_PATH: &str = "./streams.yml";

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    pub catalog_path: PathBuf,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog_path = match lookup(CATALOG_PATH_VAR) {
            Some(path) if path.trim().is_empty() => bail!("{CATALOG_PATH_VAR} is set but empty"),
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CATALOG_PATH),
        };
        Ok(Self { catalog_path })
    }

    /// An explicit path given on the command line wins over the environment.
    pub fn with_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog_path = path;
        }
        self
    }
}
