//! # Template Module
//!
//! Renders `templates/<provider>/<kind>.tf.tera` files with Tera. Templates
//! see a flat string context and the case filters from [`filters`].

pub mod filters;

use crate::common::file_utils;
use crate::error::{Result, TemplateError};
use std::collections::BTreeMap;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Flat variable name -> value mapping handed to a template
pub type RenderContext = BTreeMap<String, String>;

/// Extension shared by every bundled template
pub const TEMPLATE_EXTENSION: &str = "tf.tera";

/// Loads and renders templates from a root directory
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    root: PathBuf,
}

impl TemplateRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the bundled templates: `templates/` next to the executable,
    /// then the templates shipped with the crate. An explicit directory
    /// (`--templates-dir` or `TF_TEMPLATES_DIR`) goes through [`Self::new`].
    pub fn discover() -> Self {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.is_dir());

        match beside_exe {
            Some(dir) => Self::new(dir),
            None => Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_path(&self, provider: &str, kind: &str) -> PathBuf {
        self.root
            .join(provider)
            .join(format!("{}.{}", kind, TEMPLATE_EXTENSION))
    }

    /// Render the template for a provider and resource kind
    pub fn render(&self, provider: &str, kind: &str, context: &RenderContext) -> Result<String> {
        let path = self.template_path(provider, kind);
        if !file_utils::is_readable_file(&path) {
            return Err(TemplateError::NotFound { path }.into());
        }

        let source = std::fs::read_to_string(&path)?;
        log::debug!("Rendering template {}", path.display());

        self.render_str(&format!("{}/{}", provider, kind), &source, context)
    }

    /// Render template source held in memory
    pub fn render_str(&self, name: &str, source: &str, context: &RenderContext) -> Result<String> {
        let render_error = |e: tera::Error| TemplateError::Render {
            template: name.to_string(),
            message: describe_tera_error(&e),
        };

        let mut tera = Tera::default();
        filters::register(&mut tera);
        tera.add_raw_template(name, source).map_err(render_error)?;

        let mut ctx = Context::new();
        for (key, value) in context {
            ctx.insert(key.as_str(), value);
        }

        let rendered = tera.render(name, &ctx).map_err(render_error)?;
        Ok(rendered)
    }
}

/// Tera nests the useful detail (undefined variable, unknown filter) in the
/// source chain; flatten it into one line.
fn describe_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
