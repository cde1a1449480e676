use anyhow::{Context, Result};
use std::fmt;

use crate::assembler::assemble_header;
use crate::config::ReleaseConfig;
use crate::preflight::preflight;
use crate::publisher::publish;
use crate::runner::CommandRunner;
use crate::starter::update_starter_project;
use crate::verifier::{verify_build, StopReason, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Assemble,
    UpdateStarter,
    VerifyBuild,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Assemble => "assemble header",
            Stage::UpdateStarter => "update starter project",
            Stage::VerifyBuild => "verify starter build",
            Stage::Publish => "publish",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published,
    Stopped(StopReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Stages that were started, in order
    pub stages: Vec<Stage>,
    pub outcome: Outcome,
}

/// Drives one release from header assembly to publication.
pub struct ReleasePipeline<R> {
    config: ReleaseConfig,
    runner: R,
}

impl<R: CommandRunner> ReleasePipeline<R> {
    pub fn new(config: ReleaseConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineReport> {
        tracing::info!("Releasing version {}", self.config.version);

        if self.config.preflight {
            preflight(&self.config)?;
        } else {
            tracing::info!("Skipping preflight checks");
        }

        let mut stages = Vec::new();

        self.enter(&mut stages, Stage::Assemble);
        let assembled = assemble_header(&self.config, &self.runner)
            .with_context(|| format!("Stage '{}' failed", Stage::Assemble))?;
        tracing::info!("Wrote {}", assembled.header.display());

        self.enter(&mut stages, Stage::UpdateStarter);
        let update = update_starter_project(&self.config, &self.runner)
            .with_context(|| format!("Stage '{}' failed", Stage::UpdateStarter))?;
        tracing::debug!("Starter project update: {:?}", update);

        self.enter(&mut stages, Stage::VerifyBuild);
        let verdict = verify_build(&self.config, &self.runner)
            .with_context(|| format!("Stage '{}' failed", Stage::VerifyBuild))?;

        if let Verdict::Stop(reason) = verdict {
            tracing::info!("Stopping before publish: {}", reason);
            return Ok(PipelineReport {
                stages,
                outcome: Outcome::Stopped(reason),
            });
        }

        self.enter(&mut stages, Stage::Publish);
        publish(&self.config, &self.runner)
            .with_context(|| format!("Stage '{}' failed", Stage::Publish))?;

        tracing::info!("Release {} completed successfully!", self.config.version);
        Ok(PipelineReport {
            stages,
            outcome: Outcome::Published,
        })
    }

    fn enter(&self, stages: &mut Vec<Stage>, stage: Stage) {
        tracing::info!("==> {}", stage);
        stages.push(stage);
    }
}
