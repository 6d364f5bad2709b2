//! # tfgen
//!
//! A command-line generator that turns resource descriptions (provider,
//! resource kind, name, region, ...) into Terraform configuration files, plus
//! a small local credential store in `~/.tfrc`.
//!
//! ## Features
//!
//! - **Providers**: AWS (lambda, s3, ec2), Vercel (app, domain), GCP (storage, function, compute)
//! - **Config Store**: dotted-path get/set over a JSON document, credential detection
//! - **Templates**: Tera templates with `kebab_case`, `snake_case` and `pascal_case` filters
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfgen::{ConfigStore, Generator, Provider, ResourceGenerator, ResourceOptions, TemplateRenderer};
//!
//! # fn main() -> tfgen::Result<()> {
//! let store = ConfigStore::load();
//! let renderer = TemplateRenderer::discover();
//! let generator = ResourceGenerator::new(Provider::Aws, &store, &renderer);
//!
//! let artifact = generator.generate("lambda", &ResourceOptions::named("thumbnailer"))?;
//! println!("Generated: {}", artifact.path.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;
pub mod setup;
pub mod template;

// Re-export commonly used types and functions
pub use config::{ConfigSource, ConfigStore, Provider};
pub use error::{Result, TfError};
pub use generator::{GeneratedArtifact, Generator, ResourceGenerator, ResourceOptions};
pub use template::{RenderContext, TemplateRenderer};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
