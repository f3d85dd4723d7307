//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "nbfolio";
const ENV_PREFIX: &str = "NBFOLIO";
const DEFAULT_OUTPUT_DIR: &str = "notebook-export";
const DEFAULT_EXCERPT_CHARS: usize = 400;

/// Command-line arguments for the nbfolio binary.
#[derive(Debug, Parser)]
#[command(
    name = "nbfolio",
    version,
    about = "Preview Jupyter notebooks and export them into a web project scaffold"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "NBFOLIO_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the display payload of every cell.
    Preview(PreviewArgs),
    /// Generate the project scaffold files for a notebook.
    Export(ExportArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    /// Notebook to preview.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output format for the cell listing.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<PreviewFormat>,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Notebook to export.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Directory the generated files are written under.
    #[arg(long = "out-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,

    /// Also write every code cell as `cell-<index>.py`.
    #[arg(long = "with-cells", action = clap::ArgAction::SetTrue)]
    pub with_cells: bool,

    /// Number of characters shown per generated file in the summary.
    #[arg(long = "excerpt-chars", value_name = "COUNT")]
    pub excerpt_chars: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    Json,
    Text,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub export: ExportSettings,
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub excerpt_chars: NonZeroUsize,
    pub write_cells: bool,
}

#[derive(Debug, Clone)]
pub struct PreviewSettings {
    pub format: PreviewFormat,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);
    match &cli.command {
        Command::Preview(args) => raw.apply_preview_overrides(args),
        Command::Export(args) => raw.apply_export_overrides(args),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    export: RawExportSettings,
    preview: RawPreviewSettings,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_preview_overrides(&mut self, overrides: &PreviewArgs) {
        if let Some(format) = overrides.format {
            self.preview.format = Some(
                match format {
                    PreviewFormat::Json => "json",
                    PreviewFormat::Text => "text",
                }
                .to_string(),
            );
        }
    }

    fn apply_export_overrides(&mut self, overrides: &ExportArgs) {
        if let Some(dir) = overrides.out_dir.as_ref() {
            self.export.output_dir = Some(dir.clone());
        }
        if let Some(chars) = overrides.excerpt_chars {
            self.export.excerpt_chars = Some(chars);
        }
        if overrides.with_cells {
            self.export.write_cells = Some(true);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            export,
            preview,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let export = build_export_settings(export)?;
        let preview = build_preview_settings(preview)?;

        Ok(Self {
            logging,
            export,
            preview,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_export_settings(export: RawExportSettings) -> Result<ExportSettings, LoadError> {
    let output_dir = export
        .output_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    if output_dir.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "export.output_dir",
            "path must not be empty",
        ));
    }

    let excerpt_chars = NonZeroUsize::new(export.excerpt_chars.unwrap_or(DEFAULT_EXCERPT_CHARS))
        .ok_or_else(|| LoadError::invalid("export.excerpt_chars", "must be greater than zero"))?;

    Ok(ExportSettings {
        output_dir,
        excerpt_chars,
        write_cells: export.write_cells.unwrap_or(false),
    })
}

fn build_preview_settings(preview: RawPreviewSettings) -> Result<PreviewSettings, LoadError> {
    let format = match preview.format {
        Some(format) => <PreviewFormat as ValueEnum>::from_str(format.trim(), true)
            .map_err(|_| {
                LoadError::invalid(
                    "preview.format",
                    format!("unknown preview format `{format}`, expected json or text"),
                )
            })?,
        None => PreviewFormat::Json,
    };

    Ok(PreviewSettings { format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawExportSettings {
    output_dir: Option<PathBuf>,
    excerpt_chars: Option<usize>,
    write_cells: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPreviewSettings {
    format: Option<String>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
