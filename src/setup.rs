//! Interactive credential setup using cliclack prompts

use crate::config::{ConfigStore, Provider};
use crate::error::Result;

/// Walk the user through configuring one provider, or a chosen set of them
pub fn run(store: &mut ConfigStore, provider: Option<Provider>) -> Result<()> {
    cliclack::intro("Terraform CLI configuration setup")?;

    let providers = match provider {
        Some(provider) => vec![provider],
        None => select_providers()?,
    };

    if providers.is_empty() {
        cliclack::outro("Nothing selected, configuration unchanged.")?;
        return Ok(());
    }

    for provider in providers {
        setup_provider(store, provider)?;
    }

    cliclack::outro(format!(
        "Configuration setup complete! Saved to {}",
        store.path().display()
    ))?;
    Ok(())
}

fn select_providers() -> Result<Vec<Provider>> {
    let mut multi = cliclack::multiselect("Which providers would you like to configure?");
    for provider in Provider::ALL {
        multi = multi.item(provider, long_name(provider), "");
    }

    Ok(multi.required(false).interact()?)
}

fn setup_provider(store: &mut ConfigStore, provider: Provider) -> Result<()> {
    cliclack::log::step(format!("Setting up {}", provider.display_name()))?;

    let detected = store
        .detect_external_credentials()
        .get(&provider)
        .copied()
        .unwrap_or(false);

    if detected {
        cliclack::log::success(format!(
            "Existing {} credentials detected",
            provider.display_name()
        ))?;

        let use_existing: bool = cliclack::confirm(format!(
            "Use existing {} credentials?",
            provider.display_name()
        ))
        .initial_value(true)
        .interact()?;

        if use_existing {
            cliclack::log::info(format!(
                "Using existing {} credentials",
                provider.display_name()
            ))?;
            return Ok(());
        }
    }

    let saved = match provider {
        Provider::Aws => setup_aws(store)?,
        Provider::Vercel => setup_vercel(store)?,
        Provider::Gcp => setup_gcp(store)?,
    };

    if saved {
        cliclack::log::success(format!("{} configuration saved", provider.display_name()))?;
    } else {
        cliclack::log::info(format!(
            "Skipped {}; environment variables will be used",
            provider.display_name()
        ))?;
    }

    Ok(())
}

fn setup_aws(store: &mut ConfigStore) -> Result<bool> {
    let method: &str = cliclack::select("How would you like to configure AWS?")
        .item("keys", "Access Keys (Access Key ID + Secret)", "")
        .item("profile", "AWS Profile (use existing profile)", "")
        .item("skip", "Skip (use environment variables)", "")
        .interact()?;

    match method {
        "keys" => {
            let access_key_id: String = cliclack::input("AWS Access Key ID")
                .validate(required("Access Key ID"))
                .interact()?;
            let secret_access_key: String = cliclack::password("AWS Secret Access Key")
                .mask('▪')
                .validate(required("Secret Access Key"))
                .interact()?;
            let region: String = cliclack::input("Default AWS Region")
                .default_input("us-east-1")
                .interact()?;

            store.set("aws.access_key_id", access_key_id)?;
            store.set("aws.secret_access_key", secret_access_key)?;
            store.set("aws.region", region)?;
            Ok(true)
        }
        "profile" => {
            let profile: String = cliclack::input("AWS Profile name")
                .default_input("default")
                .interact()?;

            store.set("aws.profile", profile)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn setup_vercel(store: &mut ConfigStore) -> Result<bool> {
    let api_token: String =
        cliclack::password("Vercel API Token (get from https://vercel.com/account/tokens)")
            .mask('▪')
            .validate(required("API Token"))
            .interact()?;
    let team_id: String = cliclack::input("Vercel Team ID (optional)")
        .required(false)
        .interact()?;

    store.set("vercel.api_token", api_token)?;
    if !team_id.trim().is_empty() {
        store.set("vercel.team_id", team_id.trim())?;
    }
    Ok(true)
}

fn setup_gcp(store: &mut ConfigStore) -> Result<bool> {
    let method: &str = cliclack::select("How would you like to configure GCP?")
        .item("service_account", "Service Account Key File", "")
        .item("project_only", "Project ID only (use gcloud CLI)", "")
        .item("skip", "Skip (use environment variables)", "")
        .interact()?;

    if method == "skip" {
        return Ok(false);
    }

    let project_id: String = cliclack::input("GCP Project ID")
        .validate(required("Project ID"))
        .interact()?;

    let service_account_path = if method == "service_account" {
        let path: String = cliclack::input("Path to Service Account Key file")
            .validate(required("Service Account path"))
            .interact()?;
        Some(path)
    } else {
        None
    };

    let region: String = cliclack::input("Default GCP Region")
        .default_input("us-central1")
        .interact()?;

    store.set("gcp.project_id", project_id)?;
    if let Some(path) = service_account_path {
        store.set("gcp.service_account_path", path)?;
    }
    store.set("gcp.region", region)?;
    Ok(true)
}

fn required(label: &'static str) -> impl Fn(&String) -> std::result::Result<(), String> {
    move |input: &String| {
        if input.trim().is_empty() {
            Err(format!("{} is required", label))
        } else {
            Ok(())
        }
    }
}

fn long_name(provider: Provider) -> &'static str {
    match provider {
        Provider::Aws => "AWS",
        Provider::Vercel => "Vercel",
        Provider::Gcp => "Google Cloud Platform",
    }
}
