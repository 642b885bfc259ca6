//! Resolver configuration, typically from `witness.config.json`.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```json
//! {
//!   "markers": {
//!     "given": "acme.Given",
//!     "coercion": "acme.Coercion",
//!     "extension": "acme.Extension",
//!     "refinement": "acme.Refinement"
//!   },
//!   "max_match_depth": 32,
//!   "strict_scan": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use witness_repr::{ProofMarkers, Symbol};

use crate::error::ConfigError;

/// File name searched for by [`ResolverConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "witness.config.json";

/// Fully-qualified annotation names that mark proof declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerNames {
    #[serde(default = "default_given")]
    pub given: String,

    #[serde(default = "default_coercion")]
    pub coercion: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_refinement")]
    pub refinement: String,
}

fn default_given() -> String {
    "witness.Given".to_string()
}

fn default_coercion() -> String {
    "witness.Coercion".to_string()
}

fn default_extension() -> String {
    "witness.Extension".to_string()
}

fn default_refinement() -> String {
    "witness.Refinement".to_string()
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            given: default_given(),
            coercion: default_coercion(),
            extension: default_extension(),
            refinement: default_refinement(),
        }
    }
}

impl MarkerNames {
    /// Names in `MarkerKind::ALL` order.
    pub fn as_array(&self) -> [&str; 4] {
        [
            &self.given,
            &self.coercion,
            &self.extension,
            &self.refinement,
        ]
    }

    /// Intern the names through the host interner.
    pub fn intern<F>(&self, intern: F) -> ProofMarkers
    where
        F: FnMut(&str) -> Symbol,
    {
        ProofMarkers::intern(self.as_array(), intern)
    }
}

/// Proof resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub markers: MarkerNames,

    /// Recursion bound for type matching; deeper candidates are rejected.
    #[serde(default = "default_max_match_depth")]
    pub max_match_depth: usize,

    /// Fail the catalogue build on a malformed marked declaration instead
    /// of skipping it.
    #[serde(default)]
    pub strict_scan: bool,
}

fn default_max_match_depth() -> usize {
    witness_repr::types::DEFAULT_MAX_DEPTH
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            markers: MarkerNames::default(),
            max_match_depth: default_max_match_depth(),
            strict_scan: false,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Find and load the config file by searching up the directory tree
    /// from `start_dir`. Returns `None` when no directory has one.
    pub fn discover(start_dir: &Path) -> Result<Option<(Self, PathBuf)>, ConfigError> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                debug!("Found config file: {}", config_path.display());
                let config = Self::load(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Reject settings no resolver can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_match_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_match_depth must be positive".to_string(),
            ));
        }

        let names = self.markers.as_array();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "marker #{} has an empty name",
                    i
                )));
            }
            if names[..i].contains(name) {
                return Err(ConfigError::Invalid(format!(
                    "marker name {:?} is used for more than one proof kind",
                    name
                )));
            }
        }

        Ok(())
    }
}
