//! Stage promotion: copy a filtered subset of one stage's tree into the
//! next stage's tree.
//!
//! A promotion loads the full tree from the stage preceding the target,
//! applies up to two filter passes (a scope-restriction pass, then a
//! suite-restriction pass that skips the scope levels), and persists the
//! result into the target stage's storage.

pub mod config;

pub use config::{Config, Dimension, Precision, ScopeDimension, StageConfig};

use steep_store::{filter, FileSystemStorage, FilterPass, Storage};
use steep_types::{Result, SteepError};

/// Options for a promotion run.
#[derive(Debug, Clone, Default)]
pub struct PromoteOptions {
    /// Glob pattern restricting which scope instances are promoted,
    /// matched from the root of the source tree.
    pub scope: Option<String>,
}

/// A validated promotion pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Update `stage` with data from its preceding stage.
    ///
    /// `suite`, when given, is a glob pattern matched against suite paths
    /// below the scope levels, so it selects the same suites under every
    /// concrete scope instance. `options.scope` restricts which scope
    /// instances are copied at all. With neither, the promotion is a full
    /// unfiltered copy.
    ///
    /// Fails with [`SteepError::UnknownStage`] for a name outside the
    /// pipeline and [`SteepError::CannotPromoteOrigin`] for the first
    /// stage. Failure at any step aborts the whole promotion; data already
    /// written to the target is not rolled back.
    pub async fn promote(
        &self,
        stage: &str,
        suite: Option<&str>,
        options: &PromoteOptions,
    ) -> Result<()> {
        let index = self
            .config
            .stages
            .iter()
            .position(|s| s.name == stage)
            .ok_or_else(|| SteepError::UnknownStage(stage.to_string()))?;
        if index == 0 {
            return Err(SteepError::CannotPromoteOrigin(stage.to_string()));
        }
        let source_stage = &self.config.stages[index - 1];
        let target_stage = &self.config.stages[index];

        let (source, target) = tokio::try_join!(
            FileSystemStorage::create(&source_stage.root),
            FileSystemStorage::create(&target_stage.root),
        )?;

        let mut passes = Vec::new();
        if let Some(scope) = &options.scope {
            passes.push(FilterPass {
                pattern: scope.clone(),
                skip: 0,
            });
        }
        if let Some(suite) = suite {
            passes.push(FilterPass {
                pattern: suite.to_string(),
                skip: self.config.scope.len(),
            });
        }

        tracing::info!(
            target_stage = stage,
            source_stage = source_stage.name.as_str(),
            passes = passes.len(),
            "promoting stage"
        );

        let mut data = source.export().await?;
        for pass in &passes {
            data = filter(&data, &pass.pattern, pass.skip)?;
        }
        target.import(&data).await
    }
}
