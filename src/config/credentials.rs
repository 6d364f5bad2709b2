//! Credential discovery and environment variable mapping per provider.

use super::types::Provider;
use std::collections::BTreeMap;
use std::path::Path;

/// Stored config field -> conventional environment variable name
pub fn env_var_table(provider: Provider) -> &'static [(&'static str, &'static str)] {
    match provider {
        Provider::Aws => &[
            ("access_key_id", "AWS_ACCESS_KEY_ID"),
            ("secret_access_key", "AWS_SECRET_ACCESS_KEY"),
            ("region", "AWS_DEFAULT_REGION"),
            ("profile", "AWS_PROFILE"),
        ],
        Provider::Vercel => &[
            ("api_token", "VERCEL_API_TOKEN"),
            ("team_id", "VERCEL_TEAM_ID"),
        ],
        Provider::Gcp => &[
            ("project_id", "GOOGLE_CLOUD_PROJECT"),
            ("service_account_path", "GOOGLE_APPLICATION_CREDENTIALS"),
        ],
    }
}

/// Environment variables whose presence means the provider is usable
pub fn detection_env_vars(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Aws => &["AWS_ACCESS_KEY_ID", "AWS_PROFILE"],
        Provider::Vercel => &["VERCEL_API_TOKEN"],
        Provider::Gcp => &["GOOGLE_APPLICATION_CREDENTIALS", "GOOGLE_CLOUD_PROJECT"],
    }
}

/// Files or directories, relative to the home directory, left behind by the provider's own CLI
pub fn detection_paths(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Aws => &[".aws/credentials"],
        Provider::Vercel => &[".vercel"],
        Provider::Gcp => &[".config/gcloud"],
    }
}

/// Probe every provider using the process environment
pub fn detect(home: &Path) -> BTreeMap<Provider, bool> {
    detect_with(home, |name| {
        std::env::var_os(name).is_some_and(|value| !value.is_empty())
    })
}

/// Probe every provider with an injectable environment lookup
pub fn detect_with<F>(home: &Path, is_set: F) -> BTreeMap<Provider, bool>
where
    F: Fn(&str) -> bool,
{
    Provider::ALL
        .into_iter()
        .map(|provider| {
            let from_env = detection_env_vars(provider).iter().any(|name| is_set(name));
            let from_files = detection_paths(provider)
                .iter()
                .any(|rel| home.join(rel).exists());
            log::debug!(
                "Credential probe for {}: env={}, files={}",
                provider,
                from_env,
                from_files
            );
            (provider, from_env || from_files)
        })
        .collect()
}

/// Whether a stored setting should be hidden in status output
pub fn is_secret_field(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["secret", "token", "key"].iter().any(|marker| key.contains(marker))
}
