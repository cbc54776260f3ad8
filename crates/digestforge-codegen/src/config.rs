//! Generator configuration.
//!
//! Loaded from three sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `digestforge.toml` in the directory the loader points at (optional)
//! 3. Environment variables with the `DIGESTFORGE_` prefix

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CodegenError, FamilyOptions};

/// File name looked up by [`ConfigLoader`].
pub const CONFIG_FILE: &str = "digestforge.toml";

/// What to generate and where to write it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// File name of the emitted source inside the output directory.
    pub output: String,
    /// Attach doc comments to generated public functions.
    pub docs: bool,
    /// Families to emit, in order.
    pub families: Vec<FamilyRequest>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: "digest_families.rs".to_string(),
            docs: true,
            families: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Top-level keys, as read from the file and the environment.
    pub const KEYS: [&'static str; 3] = ["output", "docs", "families"];

    pub fn family_options(&self) -> FamilyOptions {
        FamilyOptions { docs: self.docs }
    }
}

/// One family: which algorithm, under which base name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRequest {
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,
}

impl FamilyRequest {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            base_name: None,
        }
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = Some(base_name.into());
        self
    }

    /// The base name, defaulting to the algorithm name.
    pub fn base_name(&self) -> &str {
        self.base_name.as_deref().unwrap_or(&self.algorithm)
    }
}

/// Configuration loader with builder pattern.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading `digestforge.toml` from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            env_prefix: "DIGESTFORGE".to_string(),
        }
    }

    /// Set the environment variable prefix (default: "DIGESTFORGE")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Environment variables [`load`](Self::load) can read, e.g.
    /// `DIGESTFORGE_OUTPUT`.
    pub fn env_vars(&self) -> Vec<String> {
        GeneratorConfig::KEYS
            .iter()
            .map(|key| format!("{}_{}", self.env_prefix, key.to_ascii_uppercase()))
            .collect()
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(&self) -> Result<GeneratorConfig, CodegenError> {
        let defaults = GeneratorConfig::default();
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&defaults)?);

        let file = self.config_file();
        if file.exists() {
            builder = builder.add_source(
                config::File::from(file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;
        tracing::debug!(
            file = %file.display(),
            families = config.families.len(),
            output = %config.output,
            "loaded generator configuration"
        );
        Ok(config)
    }
}
