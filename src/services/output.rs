use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Where the action reports its result.
pub trait ActionOutput: Send + Sync {
    /// Publish a named output value for later workflow steps.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Mark the run as failed with a user visible message.
    fn set_failed(&self, message: &str);
}

/// Workflow-command based output for GitHub Actions runners.
///
/// Outputs go to the `$GITHUB_OUTPUT` file when the runner provides one and
/// fall back to the legacy `::set-output` command otherwise.
pub struct GithubActionsOutput {
    output_file: Option<PathBuf>,
}

impl GithubActionsOutput {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }
}

impl ActionOutput for GithubActionsOutput {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;
                file.write_all(file_command(name, value).as_bytes())
                    .with_context(|| format!("Failed to write output file {}", path.display()))?;
            }
            None => {
                println!("{}", set_output_command(name, value));
            }
        }
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        println!("{}", error_command(message));
    }
}

/// Multiline-safe `name<<delimiter` entry for the `$GITHUB_OUTPUT` file.
fn file_command(name: &str, value: &str) -> String {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Legacy `::set-output` workflow command.
fn set_output_command(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", escape_property(name), escape_data(value))
}

fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
