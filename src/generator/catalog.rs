//! Static description of every provider the generator supports.
//!
//! Adding a resource kind means adding a row here and a template under
//! `templates/<provider>/<kind>.tf.tera`.

use crate::config::Provider;

#[derive(Debug)]
pub struct ProviderSpec {
    pub provider: Provider,
    /// Resource kinds, in the order they are listed to users
    pub resources: &'static [&'static str],
    /// Region used when neither the request nor the config supplies one.
    /// `None` means the provider has no notion of region.
    pub default_region: Option<&'static str>,
    pub default_runtime: Option<&'static str>,
    /// Stored settings copied into the render context when present
    pub context_fields: &'static [&'static str],
    /// Environment variables suggested when the provider is not configured
    pub credential_env_vars: &'static [&'static str],
}

pub static CATALOG: [ProviderSpec; 3] = [
    ProviderSpec {
        provider: Provider::Aws,
        resources: &["lambda", "s3", "ec2"],
        default_region: Some("us-east-1"),
        default_runtime: Some("nodejs18.x"),
        context_fields: &["profile"],
        credential_env_vars: &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"],
    },
    ProviderSpec {
        provider: Provider::Vercel,
        resources: &["app", "domain"],
        default_region: None,
        default_runtime: None,
        context_fields: &["team_id"],
        credential_env_vars: &["VERCEL_API_TOKEN"],
    },
    ProviderSpec {
        provider: Provider::Gcp,
        resources: &["storage", "function", "compute"],
        default_region: Some("us-central1"),
        default_runtime: Some("nodejs18"),
        context_fields: &["project_id"],
        credential_env_vars: &["GOOGLE_APPLICATION_CREDENTIALS", "GOOGLE_CLOUD_PROJECT"],
    },
];

/// Catalog entry for a provider
pub fn spec_for(provider: Provider) -> &'static ProviderSpec {
    match provider {
        Provider::Aws => &CATALOG[0],
        Provider::Vercel => &CATALOG[1],
        Provider::Gcp => &CATALOG[2],
    }
}

impl ProviderSpec {
    pub fn supports(&self, kind: &str) -> bool {
        self.resources.contains(&kind)
    }

    pub fn supported_kinds(&self) -> Vec<&'static str> {
        self.resources.to_vec()
    }
}
