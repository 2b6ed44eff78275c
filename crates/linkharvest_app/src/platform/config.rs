use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use harvest_logging::harvest_warn;
use linkharvest_engine::{FetchSettings, DEFAULT_EXPORT_FILENAME, DEFAULT_USER_AGENT};
use log::LevelFilter;
use serde::Deserialize;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILE: &str = "linkharvest.ron";

pub const USAGE: &str = "\
Usage: linkharvest [OPTIONS]

Options:
  --config <path>      Read settings from this RON file (default ./linkharvest.ron)
  --state-dir <dir>    Directory holding the persisted selection
  --export-dir <dir>   Directory for exported link files
  --base-url <url>     Initial base URL for building full links
  --html <file>        Load and parse this HTML file at startup
  -h, --help           Print this help";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub state_dir: PathBuf,
    pub export_dir: PathBuf,
    pub export_filename: String,
    pub fetch_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_page_bytes: u64,
    pub rate_limit_per_minute: u32,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from("."),
            export_dir: PathBuf::from("."),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            fetch_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_page_bytes: 10 * 1024 * 1024,
            rate_limit_per_minute: 10,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_bytes: self.max_page_bytes,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn level(&self) -> LevelFilter {
        harvest_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Command-line switches; anything set here overrides the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub html_file: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("Missing value for {name}"))
            };
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
                "--state-dir" => parsed.state_dir = Some(PathBuf::from(value("--state-dir")?)),
                "--export-dir" => parsed.export_dir = Some(PathBuf::from(value("--export-dir")?)),
                "--base-url" => parsed.base_url = Some(value("--base-url")?),
                "--html" => parsed.html_file = Some(PathBuf::from(value("--html")?)),
                "-h" | "--help" => parsed.help = true,
                other => bail!("Unknown argument: {other}"),
            }
        }
        Ok(parsed)
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.state_dir {
            config.state_dir = dir.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
    }
}

/// Loads the configuration. The default file is optional and falls back to
/// defaults when broken; an explicit `--config` path must be readable.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    match explicit {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Ok(parse_or_default(&text, path))
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(path) {
                Ok(text) => Ok(parse_or_default(&text, path)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
                Err(err) => {
                    harvest_warn!("Failed to read config {:?}: {}", path, err);
                    Ok(AppConfig::default())
                }
            }
        }
    }
}

fn parse_or_default(text: &str, path: &Path) -> AppConfig {
    match ron::from_str(text) {
        Ok(config) => config,
        Err(err) => {
            harvest_warn!("Failed to parse config {:?}: {}; using defaults", path, err);
            AppConfig::default()
        }
    }
}
