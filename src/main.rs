use clap::Parser;
use colored::*;
use std::process;
use tfgen::{
    cli::{Cli, Commands, ConfigCommand},
    config::{self, credentials, ConfigStore, CredentialState, Provider},
    error::ConfigError,
    generator::{Generator, ResourceGenerator, ResourceOptions},
    setup,
    template::TemplateRenderer,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> tfgen::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let mut store = config::load_config(cli.config_path.as_deref());
    let renderer = match cli.templates_dir {
        Some(dir) => TemplateRenderer::new(dir),
        None => TemplateRenderer::discover(),
    };
    log::debug!("Using templates from {}", renderer.root().display());

    match cli.command {
        Commands::Aws { resource, args } => {
            let dry_run = args.dry_run;
            handle_generate(Provider::Aws, &resource, args.into(), dry_run, &store, &renderer)
        }
        Commands::Vercel { resource, args } => {
            let dry_run = args.dry_run;
            handle_generate(Provider::Vercel, &resource, args.into(), dry_run, &store, &renderer)
        }
        Commands::Gcp { resource, args } => {
            let dry_run = args.dry_run;
            handle_generate(Provider::Gcp, &resource, args.into(), dry_run, &store, &renderer)
        }
        Commands::Config { command } => handle_config(command, &mut store),
    }
}

fn handle_generate(
    provider: Provider,
    resource: &str,
    options: ResourceOptions,
    dry_run: bool,
    store: &ConfigStore,
    renderer: &TemplateRenderer,
) -> tfgen::Result<()> {
    let generator = ResourceGenerator::new(provider, store, renderer);

    if dry_run {
        let artifact = generator.preview(resource, &options)?;
        print_advisory(artifact.advisory.as_deref());
        println!("--- {} (dry run) ---", artifact.path.display());
        println!("{}", artifact.content);
        return Ok(());
    }

    let artifact = generator.generate(resource, &options)?;
    print_advisory(artifact.advisory.as_deref());
    println!("Generated: {}", artifact.path.display());

    Ok(())
}

fn print_advisory(advisory: Option<&str>) {
    if let Some(advisory) = advisory {
        println!("\n{}  {}\n", "⚠️".yellow(), advisory.yellow());
    }
}

fn handle_config(command: ConfigCommand, store: &mut ConfigStore) -> tfgen::Result<()> {
    match command {
        ConfigCommand::Set {
            key: Some(key),
            value: Some(value),
        } if !value.trim().is_empty() => {
            let shown = if credentials::is_secret_field(key.rsplit('.').next().unwrap_or(&key)) {
                "***".to_string()
            } else {
                value.clone()
            };
            store.set(&key, value)?;
            println!("{} Set {} = {}", "✓".green(), key, shown);
            Ok(())
        }
        ConfigCommand::Set { key: Some(key), .. } => Err(ConfigError::MissingValue(key).into()),
        ConfigCommand::Set { key: None, .. } => setup::run(store, None),
        ConfigCommand::Get { key: Some(key) } => {
            match store.get(&key) {
                Some(value) => println!("{} = {}", key, config::display_value(value)),
                None => println!("{} is not set", key),
            }
            Ok(())
        }
        ConfigCommand::Get { key: None } => {
            println!("{}", serde_json::to_string_pretty(store.all())?);
            Ok(())
        }
        ConfigCommand::List => {
            println!("\n📋 Current Configuration ({}):", store.path().display());
            println!("{}", serde_json::to_string_pretty(store.all())?);
            Ok(())
        }
        ConfigCommand::Setup { provider } => setup::run(store, provider),
        ConfigCommand::Status => {
            show_config_status(store);
            Ok(())
        }
        ConfigCommand::Env { provider } => {
            let vars = store.environment_variables_for(provider);
            if vars.is_empty() {
                eprintln!("# No stored {} settings", provider.display_name());
            }
            for (name, value) in vars {
                println!("export {}={}", name, shell_quote(&value));
            }
            Ok(())
        }
    }
}

fn show_config_status(store: &ConfigStore) {
    println!("\n{}\n", "📊 Configuration Status".bright_white().bold());

    for provider in Provider::ALL {
        let status = store.provider_status(provider);
        let label = match status.state {
            CredentialState::Configured => {
                format!("✅ Configured in {}", store.path().display()).green()
            }
            CredentialState::Detected => "🔍 Detected in environment".cyan(),
            CredentialState::NotConfigured => "❌ Not configured".red(),
        };

        println!("{:<7} {}", provider.display_name().to_uppercase(), label);
        for (key, value) in &status.fields {
            println!("         {}: {}", key, value);
        }
        println!();
    }
}

/// Single-quote a value for POSIX shells
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
