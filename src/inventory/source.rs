//! Where the Terraform output JSON comes from

use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::errors::{Result, ServiceError};

/// A producer of `terraform output -json` style documents.
pub trait OutputSource {
    fn fetch(&self) -> Result<String>;

    /// Human-readable origin, for log lines.
    fn describe(&self) -> String;
}

/// Runs `<program> output -json` inside the Terraform working directory.
pub struct TerraformCommand {
    program: String,
    dir: PathBuf,
}

impl TerraformCommand {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            program: "terraform".to_string(),
            dir: dir.into(),
        }
    }

    /// Use a different executable, e.g. a wrapper or `tofu`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl OutputSource for TerraformCommand {
    fn fetch(&self) -> Result<String> {
        debug!("Running `{} output -json` in {}", self.program, self.dir.display());

        let output = Command::new(&self.program)
            .args(["output", "-json"])
            .current_dir(&self.dir)
            .output()
            .map_err(|e| {
                ServiceError::command_failed(format!(
                    "Error running {} output: {}",
                    self.program, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::command_failed(format!(
                "Error running {} output ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            ServiceError::serialization(format!("Error parsing {} output: {}", self.program, e))
        })
    }

    fn describe(&self) -> String {
        format!("{} output ({})", self.program, self.dir.display())
    }
}

/// Reads a previously saved `terraform output -json` document.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSource for JsonFile {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            ServiceError::file_operation(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_command_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = TerraformCommand::new(dir.path()).with_program("definitely-not-terraform-xyz");
        assert!(matches!(source.fetch(), Err(ServiceError::CommandFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_command_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = TerraformCommand::new(dir.path()).with_program("false");
        assert!(matches!(source.fetch(), Err(ServiceError::CommandFailed(_))));
    }

    #[test]
    fn test_json_file_missing_is_file_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = JsonFile::new(dir.path().join("nope.json"));
        assert!(matches!(source.fetch(), Err(ServiceError::FileOperation(_))));
    }
}
