use crate::config::Provider;
use crate::generator::ResourceOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terraform boilerplate generator")]
#[command(long_about = "Generate ready-to-edit Terraform configurations for AWS, Vercel and GCP resources, with provider credentials and defaults kept in ~/.tfrc.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (defaults to ~/.tfrc)
    #[arg(long, global = true, value_name = "FILE", env = "TFRC_PATH")]
    pub config_path: Option<PathBuf>,

    /// Directory containing provider templates
    #[arg(long, global = true, value_name = "DIR", env = "TF_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate AWS Terraform configurations
    Aws {
        /// AWS resource type (lambda, s3, ec2)
        #[arg(value_name = "RESOURCE")]
        resource: String,

        #[command(flatten)]
        args: AwsArgs,
    },

    /// Generate Vercel Terraform configurations
    Vercel {
        /// Vercel resource type (app, domain)
        #[arg(value_name = "RESOURCE")]
        resource: String,

        #[command(flatten)]
        args: VercelArgs,
    },

    /// Generate GCP Terraform configurations
    Gcp {
        /// GCP resource type (storage, function, compute)
        #[arg(value_name = "RESOURCE")]
        resource: String,

        #[command(flatten)]
        args: GcpArgs,
    },

    /// Manage provider configurations
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AwsArgs {
    /// Resource name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Runtime (for Lambda)
    #[arg(short, long)]
    pub runtime: Option<String>,

    /// AWS region
    #[arg(short = 'R', long)]
    pub region: Option<String>,

    /// Print the configuration instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct VercelArgs {
    /// Resource name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Custom domain
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Print the configuration instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GcpArgs {
    /// Resource name
    #[arg(short, long)]
    pub name: Option<String>,

    /// GCP region
    #[arg(short, long)]
    pub region: Option<String>,

    /// Runtime (for Cloud Functions)
    #[arg(long)]
    pub runtime: Option<String>,

    /// Print the configuration instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Set configuration values (interactive setup when no key is given)
    Set {
        /// Configuration key (e.g., aws.access_key_id)
        key: Option<String>,

        /// Configuration value
        value: Option<String>,
    },

    /// Get configuration values
    Get {
        /// Configuration key to retrieve
        key: Option<String>,
    },

    /// List all configuration
    List,

    /// Interactive setup for provider credentials
    Setup {
        /// Specific provider to setup
        #[arg(short, long, value_enum)]
        provider: Option<Provider>,
    },

    /// Show configuration and credential status
    Status,

    /// Print stored credentials as shell export statements
    Env {
        #[arg(value_enum)]
        provider: Provider,
    },
}

impl From<AwsArgs> for ResourceOptions {
    fn from(args: AwsArgs) -> Self {
        Self {
            name: args.name,
            region: args.region,
            runtime: args.runtime,
            domain: None,
        }
    }
}

impl From<VercelArgs> for ResourceOptions {
    fn from(args: VercelArgs) -> Self {
        Self {
            name: args.name,
            region: None,
            runtime: None,
            domain: args.domain,
        }
    }
}

impl From<GcpArgs> for ResourceOptions {
    fn from(args: GcpArgs) -> Self {
        Self {
            name: args.name,
            region: args.region,
            runtime: args.runtime,
            domain: None,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
