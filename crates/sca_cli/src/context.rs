//! Builds a connected client from the config file, flags and environment.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use dialoguer::Password;
use dialoguer::theme::ColorfulTheme;
use sca_api::{CONFIG_FILENAME, Config, Credentials, ScaClient};

use crate::ConnectionArgs;
use crate::ui::print_warning;

/// Returns the config path named by `--config`, or `.sca.toml`.
pub fn config_path(args: &ConnectionArgs) -> PathBuf {
    args.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config file and applies flag and environment overrides.
pub fn load_config(args: &ConnectionArgs) -> anyhow::Result<Config> {
    let path = config_path(args);
    let mut config = Config::load(&path)?;
    apply_overrides(&mut config, args);

    #[cfg(feature = "tracing")]
    tracing::debug!(config = %path.display(), api = %config.endpoints.api, "loaded configuration");

    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &ConnectionArgs) {
    if let Some(tenant) = &args.tenant {
        config.tenant = Some(tenant.clone());
    }
    if let Some(username) = &args.username {
        config.username = Some(username.clone());
    }
    if let Some(password) = &args.password {
        config.password = Some(password.clone());
    }
    if let Some(url) = &args.api_url {
        config.endpoints.api.clone_from(url);
    }
    if let Some(url) = &args.ac_url {
        config.endpoints.access_control.clone_from(url);
    }
}

/// Builds a client for the configured tenant. Authentication happens on the
/// first request.
pub fn connect(args: &ConnectionArgs) -> anyhow::Result<ScaClient> {
    let path = config_path(args);
    let mut config = load_config(args)?;

    if config.password.is_some() && args.password.is_none() {
        print_warning(&format!("password read from {}; prefer SCA_PASSWORD", path.display()));
    }

    let tenant = required(config.tenant.clone(), "tenant", "SCA_TENANT", &path)?;
    let username = required(config.username.clone(), "username", "SCA_USERNAME", &path)?;

    if config.password.is_none() {
        config.password = prompt_password(&tenant, &username)?;
    }
    let password = required(config.password.clone(), "password", "SCA_PASSWORD", &path)?;

    let credentials = Credentials::new(tenant, username, password)?;
    let client = config.client_builder(credentials).build()?;
    Ok(client)
}

fn required(value: Option<String>, field: &str, env: &str, path: &Path) -> anyhow::Result<String> {
    value.ok_or_else(|| {
        anyhow::anyhow!(
            "no {field} configured - pass --{field}, set {env} or add it to {}",
            path.display()
        )
    })
}

fn prompt_password(tenant: &str, username: &str) -> anyhow::Result<Option<String>> {
    if !console::Term::stderr().is_term() {
        return Ok(None);
    }

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Password for {username}@{tenant}"))
        .interact()
        .context("failed to read password")?;

    Ok(Some(password))
}
