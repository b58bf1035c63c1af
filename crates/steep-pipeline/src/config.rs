//! Pipeline configuration: the client scope schema and the ordered stage
//! list, each stage bound to its own storage root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use steep_types::{Result, SteepError};

/// Client-identifying dimension a scope segment is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Agent,
    Os,
    Device,
}

/// Version component included in a scope segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Major,
    Minor,
    Patch,
}

/// One dimension of the scope schema, e.g. agent family at major.minor
/// precision. The number of dimensions is the depth of the scope prefix in
/// every stage's tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDimension {
    pub dimension: Dimension,
    pub precision: Vec<Precision>,
}

/// One ordered pipeline position. Index 0 is the pipeline's origin and can
/// never be an update target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scope: Vec<ScopeDimension>,
    pub stages: Vec<StageConfig>,
}

impl Config {
    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural requirements: at least one stage, and stage names
    /// non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(SteepError::InvalidConfig(
                "at least one stage is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if stage.name.is_empty() {
                return Err(SteepError::InvalidConfig(
                    "stage names must be non-empty".into(),
                ));
            }
            if !seen.insert(stage.name.as_str()) {
                return Err(SteepError::InvalidConfig(format!(
                    "duplicate stage name {:?}",
                    stage.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    /// Built-in fallback configuration: a canary/staging/production
    /// pipeline under `data/`, scoped by agent and operating system.
    fn default() -> Self {
        Config {
            scope: vec![
                ScopeDimension {
                    dimension: Dimension::Agent,
                    precision: vec![Precision::Major, Precision::Minor, Precision::Patch],
                },
                ScopeDimension {
                    dimension: Dimension::Os,
                    precision: vec![Precision::Major, Precision::Minor],
                },
            ],
            stages: vec![
                StageConfig {
                    name: "canary".into(),
                    root: "data/canary".into(),
                },
                StageConfig {
                    name: "staging".into(),
                    root: "data/staging".into(),
                },
                StageConfig {
                    name: "production".into(),
                    root: "data/production".into(),
                },
            ],
        }
    }
}
