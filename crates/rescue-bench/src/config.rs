use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_SEARCHES: u32 = 200;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub policies: Vec<PolicyConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.outputs.validate()?;
        self.metrics.validate(&self.policies)?;
        self.logging.validate()?;
        validate_policies(&self.policies)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            plots_dir: resolve_template(&self.run_id, &self.outputs.plots_dir),
        }
    }
}

/// Game sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_max_searches")]
    pub max_searches: u32,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::GameCount);
        }
        if self.max_searches == 0 {
            return Err(ValidationError::MaxSearches);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PolicyConfig {
    pub name: String,
    pub kind: PolicyKind,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Greedy,
    Sweep,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    /// Empty string disables plot rendering.
    #[serde(default)]
    pub plots_dir: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonl.is_empty() {
            return Err(ValidationError::EmptyOutput("jsonl"));
        }
        if self.summary_md.is_empty() {
            return Err(ValidationError::EmptyOutput("summary_md"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct MetricsConfig {
    /// Policy the summary compares the others against.
    pub baseline: Option<String>,
}

impl MetricsConfig {
    fn validate(&self, policies: &[PolicyConfig]) -> Result<(), ValidationError> {
        if let Some(baseline) = &self.baseline {
            if !policies.iter().any(|policy| &policy.name == baseline) {
                return Err(ValidationError::UnknownBaseline(baseline.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub level: Option<String>,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.level {
            if parse_level(level).is_none() {
                return Err(ValidationError::LogLevel(level.clone()));
            }
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        self.level.as_deref().and_then(parse_level)
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub plots_dir: PathBuf,
}

fn default_max_searches() -> u32 {
    DEFAULT_MAX_SEARCHES
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() || !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::RunId(run_id.to_string()));
    }
    Ok(())
}

fn validate_policies(policies: &[PolicyConfig]) -> Result<(), ValidationError> {
    if policies.is_empty() {
        return Err(ValidationError::NoPolicies);
    }
    let mut seen = HashSet::new();
    for policy in policies {
        if !seen.insert(policy.name.as_str()) {
            return Err(ValidationError::DuplicatePolicy(policy.name.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration at {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("run_id may only contain [A-Za-z0-9._-], got '{0}'")]
    RunId(String),
    #[error("games.count must be greater than zero")]
    GameCount,
    #[error("games.max_searches must be greater than zero")]
    MaxSearches,
    #[error("at least one policy must be configured")]
    NoPolicies,
    #[error("duplicate policy name '{0}'")]
    DuplicatePolicy(String),
    #[error("metrics.baseline '{0}' does not name a configured policy")]
    UnknownBaseline(String),
    #[error("outputs.{0} must not be empty")]
    EmptyOutput(&'static str),
    #[error("unrecognized logging.level '{0}'")]
    LogLevel(String),
}
