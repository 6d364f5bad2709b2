//! # Config Module
//!
//! Per-user credential and preference store backed by a single JSON file
//! (`~/.tfrc` by default). The whole document is read once at startup and
//! rewritten on every `set`. There is no locking: two concurrent invocations
//! race and the last writer wins.

pub mod credentials;
pub mod types;

use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{ConfigDocument, CredentialState, Provider, ProviderStatus};

/// Read access to stored settings, as needed by the generators
pub trait ConfigSource {
    /// Value at a dotted path such as `aws.region`
    fn get(&self, key: &str) -> Option<&Value>;

    /// Whether the provider has stored settings or detectable credentials
    fn is_configured(&self, provider: Provider) -> bool;

    /// Non-empty string value at a dotted path
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// JSON-backed configuration store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    home: PathBuf,
    document: ConfigDocument,
}

/// Load configuration from the given file, or from `~/.tfrc`
pub fn load_config(path: Option<&Path>) -> ConfigStore {
    match path {
        Some(path) => ConfigStore::load_from(path),
        None => ConfigStore::load(),
    }
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    home_dir().join(types::CONFIG_FILE_NAME)
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl ConfigStore {
    /// Load from the default per-user path
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    /// Load from an explicit path. A missing or unreadable file yields an
    /// empty document; this never fails.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = read_document(&path);

        Self {
            path,
            home: home_dir(),
            document,
        }
    }

    /// Use a different home directory for credential detection
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn all(&self) -> &ConfigDocument {
        &self.document
    }

    /// Traverse the document by dot-separated segments
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut value = self.document.get(segments.next()?)?;

        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }

        Some(value)
    }

    /// Set a value at a dotted path and persist the whole document.
    ///
    /// Missing intermediate sections are created. An intermediate value that
    /// is not an object is replaced by a new section (with a warning), so
    /// `aws.region` can always be written even if `aws` held a plain string.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ConfigError::InvalidKey(key.to_string()).into());
        }

        let Some((leaf, parents)) = segments.split_last() else {
            return Err(ConfigError::InvalidKey(key.to_string()).into());
        };

        let mut current = &mut self.document;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = current
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(ConfigDocument::new()));

            if !entry.is_object() {
                log::warn!(
                    "Replacing non-object value at '{}' to store '{}'",
                    parents[..=depth].join("."),
                    key
                );
                *entry = Value::Object(ConfigDocument::new());
            }

            current = match entry {
                Value::Object(map) => map,
                _ => return Err(ConfigError::InvalidKey(key.to_string()).into()),
            };
        }

        current.insert((*leaf).to_string(), value.into());
        log::debug!("Set {} in {}", key, self.path.display());

        self.save()
    }

    /// Write the whole document to disk
    pub fn save(&self) -> Result<()> {
        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let mut contents = serde_json::to_string_pretty(&self.document)?;
        contents.push('\n');

        fs::write(&self.path, contents).map_err(write_error)?;
        restrict_permissions(&self.path).map_err(write_error)?;

        Ok(())
    }

    /// True iff the provider has a non-empty section in the document
    pub fn has_provider(&self, provider: Provider) -> bool {
        self.document
            .get(provider.as_str())
            .and_then(Value::as_object)
            .is_some_and(|section| !section.is_empty())
    }

    /// Credentials available outside this tool, per provider
    pub fn detect_external_credentials(&self) -> BTreeMap<Provider, bool> {
        credentials::detect(&self.home)
    }

    /// Stored settings mapped to the provider's conventional environment variables
    pub fn environment_variables_for(&self, provider: Provider) -> BTreeMap<&'static str, String> {
        credentials::env_var_table(provider)
            .iter()
            .filter_map(|(field, env_name)| {
                let key = format!("{}.{}", provider.as_str(), field);
                ConfigSource::get_str(self, &key).map(|value| (*env_name, value.to_string()))
            })
            .collect()
    }

    /// Summarise how a provider is configured, masking secrets
    pub fn provider_status(&self, provider: Provider) -> ProviderStatus {
        let state = if self.has_provider(provider) {
            CredentialState::Configured
        } else if self
            .detect_external_credentials()
            .get(&provider)
            .copied()
            .unwrap_or(false)
        {
            CredentialState::Detected
        } else {
            CredentialState::NotConfigured
        };

        let fields = match (state, self.document.get(provider.as_str())) {
            (CredentialState::Configured, Some(Value::Object(section))) => section
                .iter()
                .map(|(key, value)| {
                    let shown = if credentials::is_secret_field(key) {
                        "***".to_string()
                    } else {
                        display_value(value)
                    };
                    (key.clone(), shown)
                })
                .collect(),
            _ => Vec::new(),
        };

        ProviderStatus {
            provider,
            state,
            fields,
        }
    }
}

impl ConfigSource for ConfigStore {
    fn get(&self, key: &str) -> Option<&Value> {
        ConfigStore::get(self, key)
    }

    fn is_configured(&self, provider: Provider) -> bool {
        self.has_provider(provider)
            || self
                .detect_external_credentials()
                .get(&provider)
                .copied()
                .unwrap_or(false)
    }
}

/// Render a stored value for terminal output; strings are shown unquoted
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn read_document(path: &Path) -> ConfigDocument {
    if !path.exists() {
        log::info!("No config file at {}, starting empty", path.display());
        return ConfigDocument::new();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("Could not read config file {}: {}, using defaults", path.display(), e);
            return ConfigDocument::new();
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(document)) => document,
        Ok(_) => {
            log::warn!(
                "Config file {} is not a JSON object, using defaults",
                path.display()
            );
            ConfigDocument::new()
        }
        Err(e) => {
            log::warn!("Could not parse config file {}: {}, using defaults", path.display(), e);
            ConfigDocument::new()
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
