use super::catalog::{self, ProviderSpec};
use super::{GeneratedArtifact, Generator, ResourceOptions, DEFAULT_OUTPUT_DIR};
use crate::common::file_utils;
use crate::config::{ConfigSource, Provider};
use crate::error::{GeneratorError, Result};
use crate::template::{filters, RenderContext, TemplateRenderer};
use std::path::{Path, PathBuf};

/// Catalog-driven generator shared by every provider
pub struct ResourceGenerator<'a> {
    spec: &'static ProviderSpec,
    config: &'a dyn ConfigSource,
    renderer: &'a TemplateRenderer,
    output_dir: PathBuf,
}

impl<'a> ResourceGenerator<'a> {
    pub fn new(
        provider: Provider,
        config: &'a dyn ConfigSource,
        renderer: &'a TemplateRenderer,
    ) -> Self {
        Self {
            spec: catalog::spec_for(provider),
            config,
            renderer,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Validate and render without touching the filesystem
    pub fn preview(&self, kind: &str, options: &ResourceOptions) -> Result<GeneratedArtifact> {
        let provider = self.spec.provider;

        if !self.spec.supports(kind) {
            return Err(GeneratorError::UnsupportedResource {
                provider: provider.display_name().to_string(),
                kind: kind.to_string(),
                supported: self.spec.supported_kinds().join(", "),
            }
            .into());
        }

        let name = options
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(GeneratorError::MissingName)?;

        if let Some(reason) = name_problem(name) {
            return Err(GeneratorError::InvalidName {
                name: name.to_string(),
                reason,
            }
            .into());
        }

        let context = self.build_context(kind, name, options);
        log::debug!("Render context for {}/{}: {:?}", provider, kind, context.keys());

        let advisory = self.advisory();
        if advisory.is_some() {
            log::debug!("{} is not configured; generating anyway", provider);
        }

        let content = self.renderer.render(provider.as_str(), kind, &context)?;
        let path = self
            .output_dir
            .join(artifact_file_name(provider, kind, name));

        Ok(GeneratedArtifact {
            path,
            content,
            advisory,
        })
    }

    /// Request values win over stored settings, which win over catalog defaults
    fn build_context(&self, kind: &str, name: &str, options: &ResourceOptions) -> RenderContext {
        let provider = self.spec.provider.as_str();
        let mut context = RenderContext::new();

        context.insert("provider".to_string(), provider.to_string());
        context.insert("resource".to_string(), kind.to_string());
        context.insert("name".to_string(), name.to_string());

        if let Some(default_region) = self.spec.default_region {
            let region = non_empty(&options.region)
                .or_else(|| self.config.get_str(&format!("{}.region", provider)))
                .or_else(|| self.config.get_str("defaults.region"))
                .unwrap_or(default_region);
            context.insert("region".to_string(), region.to_string());
        }

        if let Some(default_runtime) = self.spec.default_runtime {
            let runtime = non_empty(&options.runtime).unwrap_or(default_runtime);
            context.insert("runtime".to_string(), runtime.to_string());
        }

        if let Some(domain) = non_empty(&options.domain) {
            context.insert("domain".to_string(), domain.to_string());
        }

        if let Some(environment) = self.config.get_str("defaults.environment") {
            context.insert("environment".to_string(), environment.to_string());
        }

        for field in self.spec.context_fields {
            if let Some(value) = self.config.get_str(&format!("{}.{}", provider, field)) {
                context.insert((*field).to_string(), value.to_string());
            }
        }

        context
    }

    fn advisory(&self) -> Option<String> {
        let provider = self.spec.provider;
        if self.config.is_configured(provider) {
            return None;
        }

        let vars = self.spec.credential_env_vars;
        let noun = if vars.len() == 1 { "variable" } else { "variables" };

        Some(format!(
            "{} credentials not configured. Run: tf config setup --provider {}\n   Or set environment {}: {}",
            provider.display_name(),
            provider,
            noun,
            vars.join(", ")
        ))
    }
}

impl Generator for ResourceGenerator<'_> {
    fn provider(&self) -> Provider {
        self.spec.provider
    }

    fn generate(&self, kind: &str, options: &ResourceOptions) -> Result<GeneratedArtifact> {
        let artifact = self.preview(kind, options)?;
        file_utils::write_output_file(&artifact.path, &artifact.content)?;
        log::info!("Generated {}", artifact.path.display());
        Ok(artifact)
    }
}

/// `<provider>-<kind>-<name>.tf`
pub fn artifact_file_name(provider: Provider, kind: &str, name: &str) -> String {
    format!("{}-{}-{}.tf", provider, kind, name)
}

/// Names end up in a file name, in HCL identifiers and inside quoted HCL strings
fn name_problem(name: &str) -> Option<&'static str> {
    if !file_utils::is_safe_file_component(name) {
        Some("must not contain path separators or '..'")
    } else if filters::snake_case(name).is_empty() {
        Some("must contain at least one letter or digit")
    } else if name.contains(['"', '$', '%', '{', '}']) {
        Some("must not contain quotes or interpolation characters")
    } else {
        None
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfError;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    /// In-memory stand-in for the JSON config store
    struct FakeConfig {
        document: Value,
        configured: bool,
    }

    impl FakeConfig {
        fn empty() -> Self {
            Self {
                document: json!({}),
                configured: false,
            }
        }

        fn with(document: Value) -> Self {
            Self {
                document,
                configured: true,
            }
        }
    }

    impl ConfigSource for FakeConfig {
        fn get(&self, key: &str) -> Option<&Value> {
            key.split('.')
                .try_fold(&self.document, |value, segment| value.as_object()?.get(segment))
        }

        fn is_configured(&self, _provider: Provider) -> bool {
            self.configured
        }
    }

    fn templates() -> TemplateRenderer {
        TemplateRenderer::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    fn options(name: &str) -> ResourceOptions {
        ResourceOptions::named(name)
    }

    #[test]
    fn test_generate_writes_named_artifact() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());

        let artifact = generator.generate("lambda", &options("foo")).unwrap();

        assert_eq!(artifact.path, out.path().join("aws-lambda-foo.tf"));
        assert_eq!(fs::read_to_string(&artifact.path).unwrap(), artifact.content);
        assert!(artifact.content.contains("resource \"aws_lambda_function\" \"lambda_foo\""));
        assert!(artifact.content.contains("function_name    = \"foo\""));
        assert!(artifact.content.contains("us-east-1"));
        assert!(artifact.content.contains("nodejs18.x"));
    }

    #[test]
    fn test_unconfigured_provider_gets_advisory() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());

        let artifact = generator.generate("s3", &options("assets")).unwrap();
        let advisory = artifact.advisory.expect("advisory for unconfigured provider");
        assert!(advisory.contains("tf config setup --provider aws"));
        assert!(advisory.contains("AWS_ACCESS_KEY_ID"));
        assert!(artifact.path.exists());
    }

    #[test]
    fn test_configured_provider_has_no_advisory() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::with(json!({ "vercel": { "api_token": "tok" } }));
        let renderer = templates();
        let generator = ResourceGenerator::new(Provider::Vercel, &config, &renderer)
            .with_output_dir(out.path());

        let artifact = generator.generate("app", &options("site")).unwrap();
        assert_eq!(artifact.advisory, None);
    }

    #[test]
    fn test_unsupported_resource_lists_allowed_kinds() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());

        let err = generator.generate("rds", &options("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported AWS resource: rds. Supported: lambda, s3, ec2"
        );
        assert!(!out.path().join("aws-rds-x.tf").exists());
    }

    #[test]
    fn test_missing_or_blank_name() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Gcp, &config, &renderer).with_output_dir(out.path());

        for opts in [ResourceOptions::default(), options("   ")] {
            let err = generator.generate("storage", &opts).unwrap_err();
            assert!(matches!(err, TfError::Generation(GeneratorError::MissingName)));
        }
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_name_cannot_escape_output_dir() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());

        let err = generator.generate("s3", &options("../../etc")).unwrap_err();
        assert!(matches!(err, TfError::Generation(GeneratorError::InvalidName { .. })));
    }

    #[test]
    fn test_name_without_identifier_characters_is_rejected() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator =
            ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());

        for name in ["--", "_ _", "-.-", "say\"hi\"", "${var.x}"] {
            let err = generator.preview("s3", &options(name)).unwrap_err();
            assert!(
                matches!(err, TfError::Generation(GeneratorError::InvalidName { .. })),
                "{name} was accepted"
            );
        }
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_dotted_name_yields_valid_identifiers() {
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator = ResourceGenerator::new(Provider::Aws, &config, &renderer);

        let artifact = generator.preview("s3", &options("api.v2")).unwrap();
        assert!(artifact.path.ends_with("aws-s3-api.v2.tf"));
        assert!(artifact.content.contains("resource \"aws_s3_bucket\" \"s3_api_v2\" {"));
        assert!(artifact.content.contains("aws_s3_bucket.s3_api_v2.id"));
        assert!(artifact.content.contains("bucket   = \"api-v2\""));
        assert!(!artifact.content.contains("api.v2."));
    }

    #[test]
    fn test_same_name_across_kinds_does_not_collide() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let aws = ResourceGenerator::new(Provider::Aws, &config, &renderer).with_output_dir(out.path());
        let gcp = ResourceGenerator::new(Provider::Gcp, &config, &renderer).with_output_dir(out.path());

        let lambda = aws.generate("lambda", &options("api")).unwrap();
        let bucket = aws.generate("s3", &options("api")).unwrap();
        let function = gcp.generate("function", &options("api")).unwrap();

        assert!(lambda.content.contains("alias  = \"lambda_api\""));
        assert!(bucket.content.contains("alias  = \"s3_api\""));
        assert!(!bucket.content.contains("alias  = \"lambda_api\""));

        assert!(lambda.content.contains("data \"archive_file\" \"lambda_api_source\""));
        assert!(function.content.contains("data \"archive_file\" \"function_api_source\""));

        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_region_precedence() {
        let config = FakeConfig::with(json!({
            "gcp": { "region": "europe-west4", "project_id": "acme-prod" },
            "defaults": { "region": "asia-east1", "environment": "prod" }
        }));
        let renderer = templates();
        let generator = ResourceGenerator::new(Provider::Gcp, &config, &renderer);

        let from_config = generator.build_context("compute", "vm", &options("vm"));
        assert_eq!(from_config["region"], "europe-west4");
        assert_eq!(from_config["project_id"], "acme-prod");
        assert_eq!(from_config["environment"], "prod");
        assert_eq!(from_config["runtime"], "nodejs18");

        let mut explicit = options("vm");
        explicit.region = Some("us-west1".to_string());
        let from_request = generator.build_context("compute", "vm", &explicit);
        assert_eq!(from_request["region"], "us-west1");
    }

    #[test]
    fn test_region_falls_back_to_defaults_then_catalog() {
        let renderer = templates();

        let defaults_only = FakeConfig::with(json!({ "defaults": { "region": "eu-north-1" } }));
        let generator = ResourceGenerator::new(Provider::Aws, &defaults_only, &renderer);
        let context = generator.build_context("ec2", "web", &options("web"));
        assert_eq!(context["region"], "eu-north-1");

        let empty = FakeConfig::empty();
        let generator = ResourceGenerator::new(Provider::Aws, &empty, &renderer);
        let context = generator.build_context("ec2", "web", &options("web"));
        assert_eq!(context["region"], "us-east-1");
        assert!(!context.contains_key("profile"));
    }

    #[test]
    fn test_vercel_context_has_no_region_or_runtime() {
        let config = FakeConfig::with(json!({ "vercel": { "team_id": "team_9" } }));
        let renderer = templates();
        let generator = ResourceGenerator::new(Provider::Vercel, &config, &renderer);

        let mut opts = options("site");
        opts.region = Some("iad1".to_string());
        opts.domain = Some("example.com".to_string());
        let context = generator.build_context("domain", "site", &opts);

        assert!(!context.contains_key("region"));
        assert!(!context.contains_key("runtime"));
        assert_eq!(context["domain"], "example.com");
        assert_eq!(context["team_id"], "team_9");
    }

    #[test]
    fn test_preview_does_not_write() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator = ResourceGenerator::new(Provider::Vercel, &config, &renderer)
            .with_output_dir(out.path().join("terraform"));

        let artifact = generator.preview("domain", &options("shop")).unwrap();
        assert!(artifact.path.ends_with("terraform/vercel-domain-shop.tf"));
        assert!(!out.path().join("terraform").exists());
    }

    #[test]
    fn test_every_catalog_resource_renders() {
        let config = FakeConfig::with(json!({
            "aws": { "profile": "dev" },
            "vercel": { "team_id": "team_1" },
            "gcp": { "project_id": "proj-1" },
            "defaults": { "environment": "dev" }
        }));
        let renderer = templates();

        for spec in catalog::CATALOG.iter() {
            let generator = ResourceGenerator::new(spec.provider, &config, &renderer);
            for resource in spec.resources {
                let mut opts = options("demo-app");
                opts.domain = Some("demo.example.com".to_string());
                let artifact = generator
                    .preview(*resource, &opts)
                    .unwrap_or_else(|e| panic!("{}/{}: {}", spec.provider, resource, e));
                assert!(artifact.content.contains("demo"), "{}", resource);

                let bare = generator.preview(*resource, &options("demo-app"));
                assert!(bare.is_ok(), "{}/{} without optional values", spec.provider, resource);
            }
        }
    }

    #[test]
    fn test_generate_through_trait_object() {
        let out = TempDir::new().unwrap();
        let config = FakeConfig::empty();
        let renderer = templates();
        let generator: Box<dyn Generator + '_> = Box::new(
            ResourceGenerator::new(Provider::Gcp, &config, &renderer).with_output_dir(out.path()),
        );

        assert_eq!(generator.provider(), Provider::Gcp);
        let artifact = generator.generate("function", &options("thumbnailer")).unwrap();
        assert!(artifact.path.ends_with("gcp-function-thumbnailer.tf"));
    }
}
