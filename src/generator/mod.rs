use crate::config::Provider;
use crate::error::Result;
use std::path::PathBuf;

pub mod catalog;
pub mod terraform_gen;

pub use terraform_gen::ResourceGenerator;

/// Directory, relative to the invocation directory, receiving generated files
pub const DEFAULT_OUTPUT_DIR: &str = "terraform";

/// Caller-supplied values for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    pub name: Option<String>,
    pub region: Option<String>,
    pub runtime: Option<String>,
    pub domain: Option<String>,
}

impl ResourceOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Result of a generation: where the file goes and what it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
    /// Non-blocking notice shown when the provider has no credentials
    pub advisory: Option<String>,
}

/// Something that turns a resource request into a Terraform file
pub trait Generator {
    fn provider(&self) -> Provider;

    /// Validate, render and write the resource; returns the written artifact
    fn generate(&self, kind: &str, options: &ResourceOptions) -> Result<GeneratedArtifact>;
}
