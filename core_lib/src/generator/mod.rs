//! Subprocess-backed phishing template generator.
//!
//! All content generation happens in an external script; this module owns
//! the boundary: argument construction, a bounded wait, and translation of
//! whatever comes back on stdout into a [`GeneratedTemplate`] or an error.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info};

use crate::models::templates::{GenerateTemplateRequest, GeneratedTemplate};

/// Subject lines the external module uses to signal known failure modes.
/// These literals are part of the script's contract and must match exactly.
const SENTINEL_ERROR_SUBJECTS: [&str; 4] = [
    "AI Generation Failed",
    "Error: API Key Not Set",
    "Error: Configuration File Missing",
    "Error: AI Module Not Configured",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub command: String,
    pub script: PathBuf,
    pub timeout_seconds: u64,
    pub default_target_company: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            script: PathBuf::from("ai_module/generate_phishing.py"),
            timeout_seconds: 30,
            default_target_company: "Your Organization".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("failed to spawn generator command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("generator did not finish within {0} seconds")]
    Timeout(u64),

    #[error("failed to read generator output: {0}")]
    Io(#[from] std::io::Error),

    #[error("AI module execution failed (exit code {code:?}): {stderr}")]
    ExecutionFailed { code: Option<i32>, stderr: String },

    #[error("failed to parse AI response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("{0}")]
    Module(String),
}

#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    config: GeneratorConfig,
}

impl TemplateGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn target_company<'a>(&'a self, request: &'a GenerateTemplateRequest) -> &'a str {
        if request.target_company.trim().is_empty() {
            &self.config.default_target_company
        } else {
            &request.target_company
        }
    }

    fn build_args(&self, request: &GenerateTemplateRequest) -> Vec<String> {
        let mut args = vec![
            self.config.script.display().to_string(),
            "--scenario".to_string(),
            request.scenario.clone(),
            "--target".to_string(),
            self.target_company(request).to_string(),
            "--format".to_string(),
            "json".to_string(),
        ];

        if request.include_landing_page {
            args.push("--include-landing-page".to_string());
        }

        args
    }

    /// Run the external generator for a single request.
    ///
    /// Stdout and stderr are fully buffered and logged verbatim whether or
    /// not the invocation succeeds.
    pub async fn generate(
        &self,
        request: &GenerateTemplateRequest,
    ) -> std::result::Result<GeneratedTemplate, GeneratorError> {
        let args = self.build_args(request);
        info!(command = %self.config.command, ?args, "invoking template generator");

        let child = Command::new(&self.config.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GeneratorError::Spawn {
                command: self.config.command.clone(),
                source,
            })?;

        let timeout = Duration::from_secs(self.config.timeout_seconds);

        // On expiry the wait future is dropped, and kill_on_drop reaps the
        // child, so a stuck script cannot outlive the request.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                error!(
                    timeout_seconds = self.config.timeout_seconds,
                    "template generator timed out, killing subprocess"
                );
                return Err(GeneratorError::Timeout(self.config.timeout_seconds));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        info!("generator stdout: {}", stdout);
        if !stderr.is_empty() {
            info!("generator stderr: {}", stderr);
        }

        // The script emits structured error details as JSON even when it
        // exits non-zero, so parsing comes before the exit status check.
        let template: GeneratedTemplate = match serde_json::from_slice(&output.stdout) {
            Ok(template) => template,
            Err(parse_err) => {
                if !output.status.success() {
                    error!(code = ?output.status.code(), stderr = %stderr, "generator exited with failure");
                    return Err(GeneratorError::ExecutionFailed {
                        code: output.status.code(),
                        stderr: stderr.trim().to_string(),
                    });
                }
                error!("failed to parse generator output: {}", parse_err);
                return Err(GeneratorError::InvalidResponse(parse_err));
            }
        };

        if SENTINEL_ERROR_SUBJECTS.contains(&template.subject.as_str()) {
            error!(subject = %template.subject, "generator reported a module error");
            return Err(GeneratorError::Module(template.text.clone()));
        }

        Ok(template)
    }
}
