use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::domain::ClientVariant;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
pub const CONFIG_FILE_NAME: &str = "veritas.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid analysis endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub variant: ClientVariant,
    /// Zero disables the timeout. Ignored by the basic variant.
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            variant: ClientVariant::Hardened,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    variant: Option<ClientVariant>,
    timeout_seconds: Option<u64>,
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        if !self.variant.enforces_timeout() || self.timeout_seconds == 0 {
            return None;
        }
        Some(Duration::from_secs(self.timeout_seconds))
    }

    pub fn endpoint_url(&self) -> Result<Url, SettingsError> {
        parse_endpoint(&self.endpoint)
    }

    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.endpoint {
            self.endpoint = v;
        }
        if let Some(v) = file.variant {
            self.variant = v;
        }
        if let Some(v) = file.timeout_seconds {
            self.timeout_seconds = v;
        }
    }

    /// Applies `VERITAS_*` variables, then their `APP__*` aliases.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in ["VERITAS_ENDPOINT", "APP__ENDPOINT"] {
            if let Some(v) = lookup(name) {
                self.endpoint = v;
            }
        }

        for name in ["VERITAS_VARIANT", "APP__VARIANT"] {
            if let Some(v) = lookup(name) {
                match v.parse::<ClientVariant>() {
                    Ok(variant) => self.variant = variant,
                    Err(err) => tracing::warn!(var = name, "ignoring {err}"),
                }
            }
        }

        for name in ["VERITAS_TIMEOUT_SECONDS", "APP__TIMEOUT_SECONDS"] {
            if let Some(v) = lookup(name) {
                match v.trim().parse::<u64>() {
                    Ok(parsed) => self.timeout_seconds = parsed,
                    Err(err) => tracing::warn!(var = name, value = %v, "ignoring timeout: {err}"),
                }
            }
        }
    }
}

/// Loads settings: defaults, then the config file, then the environment.
///
/// An explicit path must exist. Otherwise `veritas.toml` in the working
/// directory is tried, then `<config dir>/veritas/veritas.toml`.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };
    if let Some(path) = path {
        settings.apply_file(read_config_file(&path)?);
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    settings.apply_env(|name| {
        std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
    });

    parse_endpoint(&settings.endpoint)?;
    Ok(settings)
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("veritas").join(CONFIG_FILE_NAME);
    user.is_file().then_some(user)
}

fn read_config_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_endpoint(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}
