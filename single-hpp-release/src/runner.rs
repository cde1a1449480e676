use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ReleaseError, Result};

/// An external command together with the directory it must run in.
///
/// Commands never change the working directory of this process; the
/// directory is scoped to the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, current_dir: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.as_ref().to_path_buf(),
        }
    }

    /// Build a spec from a `[program, args...]` list as found in the config.
    pub fn from_argv(argv: &[String], current_dir: impl AsRef<Path>) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ReleaseError::Config("empty command".to_string()))?;
        Ok(Self::new(program.clone(), current_dir).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands. Every invocation either returns the captured
/// output of a successful run or an error.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        (**self).run(spec)
    }
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::info!("Running `{}` in {}", spec, spec.current_dir.display());

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.current_dir)
            .output()
            .map_err(|source| ReleaseError::CommandSpawn {
                command: spec.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            return Err(ReleaseError::CommandFailed {
                command: spec.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
