use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The on-disk configuration document: provider name -> flat settings map.
pub type ConfigDocument = serde_json::Map<String, serde_json::Value>;

/// File name of the per-user configuration, relative to the home directory
pub const CONFIG_FILE_NAME: &str = ".tfrc";

/// Infrastructure platforms the generator knows about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Vercel,
    Gcp,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Vercel, Provider::Gcp];

    /// Key used in the configuration document and in output file names
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Vercel => "vercel",
            Provider::Gcp => "gcp",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Vercel => "Vercel",
            Provider::Gcp => "GCP",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_string()))
    }
}

/// How a provider's credentials were found, as reported by `config status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// Settings stored in the config file
    Configured,
    /// Nothing stored, but environment variables or CLI files are present
    Detected,
    NotConfigured,
}

/// Status line for one provider, with secret-looking values masked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub provider: Provider,
    pub state: CredentialState,
    pub fields: Vec<(String, String)>,
}
