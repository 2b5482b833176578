//! `workflowos config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use workflowos_core::config::WorkflowConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// Unlike the other commands, a missing file is reported as invalid here.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match WorkflowConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = WorkflowConfig::load_or_default(config_path).await?;
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "defaults".to_owned()
    };

    let report = build_report(&config, source, section)?;
    writer.render(&report)?;

    Ok(())
}

/// Serialize the whole configuration or one section of it.
pub fn build_report(
    config: &WorkflowConfig,
    source: String,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section.as_deref() {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("runner") => toml::to_string_pretty(&config.runner),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: general, runner)"
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("failed to serialize config: {e}")))?;

    Ok(ConfigReport {
        source,
        section,
        config: config.clone(),
        config_toml,
    })
}

/// Configuration display report.
///
/// The `config_toml` field is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: WorkflowConfig,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{section}]");
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.valid {
            writeln!(w, "{} {} is valid", "✔".green(), self.source)?;
        } else {
            writeln!(w, "{} {} is invalid", "✖".red(), self.source)?;
            for error in &self.errors {
                writeln!(w, "  - {error}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report_full_config() {
        let report = build_report(&WorkflowConfig::default(), "defaults".to_owned(), None)
            .expect("report should build");
        assert!(report.config_toml.contains("[general]"));
        assert!(report.config_toml.contains("[runner]"));
        assert!(report.config_toml.contains("pass_probability = 0.85"));
    }

    #[test]
    fn test_build_report_single_section() {
        let report = build_report(
            &WorkflowConfig::default(),
            "defaults".to_owned(),
            Some("runner".to_owned()),
        )
        .expect("report should build");
        assert!(report.config_toml.contains("min_duration_ms = 500"));
        assert!(!report.config_toml.contains("log_level"));
    }

    #[test]
    fn test_build_report_unknown_section() {
        let err = build_report(
            &WorkflowConfig::default(),
            "defaults".to_owned(),
            Some("ebpf".to_owned()),
        )
        .err()
        .expect("unknown section should fail");
        assert!(err.to_string().contains("unknown section: ebpf"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_report_lists_errors() {
        colored::control::set_override(false);
        let report = ConfigValidationReport {
            source: "workflowos.toml".to_owned(),
            valid: false,
            errors: vec!["invalid config value for 'pass_probability'".to_owned()],
        };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("workflowos.toml is invalid"));
        assert!(output.contains("- invalid config value for 'pass_probability'"));
    }
}
