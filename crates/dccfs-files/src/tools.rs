//! External programs: editors and the Qt UI compiler.
//!
//! Entities never spawn processes themselves. [`crate::File::open`] and
//! [`crate::Compilable::compile`] take these collaborators as arguments, so
//! tests can substitute stubs and callers choose the programs.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use dccfs_common::{Error, Result};

/// Opens files for interactive editing.
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Compiles a Qt Designer `.ui` file into a Python module.
pub trait UiCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<()>;
}

/// An [`Editor`] that launches `<program> [args...] <path>` detached.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Locate `command` on `PATH` (or use it directly when it is a path).
    pub fn discover(command: &str, args: Vec<String>) -> Result<Self> {
        let program = which::which(command).map_err(|e| {
            Error::tool(command, format!("{command} not found; is it installed and in PATH? ({e})"))
        })?;
        Ok(Self::new(program, args))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Editor for CommandEditor {
    fn open(&self, path: &Path) -> Result<()> {
        tracing::debug!("opening {} with {}", path.display(), self.program.display());

        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                Error::tool(
                    self.program.display().to_string(),
                    format!("failed to launch editor: {e}"),
                )
            })?;

        Ok(())
    }
}

/// A [`UiCompiler`] running `<program> <source> -o <target>` to completion.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: PathBuf,
}

impl CommandCompiler {
    /// Compiler looked up on `PATH` when no override is configured.
    pub const DEFAULT_PROGRAM: &'static str = "pyside2-uic";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `custom_path` if it exists, else find [`Self::DEFAULT_PROGRAM`] on
    /// `PATH`.
    pub fn discover(custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            if path.exists() {
                return Ok(Self::new(path));
            }
            tracing::warn!(
                "configured UI compiler {} does not exist, searching PATH",
                path.display()
            );
        }

        let program = which::which(Self::DEFAULT_PROGRAM).map_err(|_| {
            Error::tool(
                "uic",
                format!(
                    "{} not found; is it installed and in PATH?",
                    Self::DEFAULT_PROGRAM
                ),
            )
        })?;
        Ok(Self::new(program))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl UiCompiler for CommandCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .arg(source)
            .arg("-o")
            .arg(target)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::tool("uic", format!("failed to run {}: {e}", self.program.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool(
                "uic",
                format!("{} exited with {}: {}", self.program.display(), output.status, stderr.trim()),
            ));
        }

        Ok(())
    }
}
