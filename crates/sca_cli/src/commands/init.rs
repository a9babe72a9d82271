//! Init command - creates a `.sca.toml` configuration file.

use std::path::Path;

use console::style;
use sca_api::Config;

use crate::context::{config_path, load_config};
use crate::ui::{colors, indicators, print_command_header, print_info};
use crate::{ConnectionArgs, InitArgs};

/// Writes the tenant, user name and endpoints currently in effect to a new
/// config file. The password is never written.
pub fn run(connection: &ConnectionArgs, args: &InitArgs) -> super::Result {
    print_command_header("init");

    let output_path = args.output.clone().unwrap_or_else(|| config_path(connection));

    if output_path.exists() && !args.force {
        print_existing(&output_path);
        return Ok(());
    }

    let config = template(connection)?;
    config.save(&output_path)?;

    println!(
        "{} {}",
        colors::success().apply_to(indicators::ADDED),
        style(output_path.display()).bold()
    );
    println!();
    print_info("Set SCA_PASSWORD, then run `sca projects`");

    Ok(())
}

fn template(connection: &ConnectionArgs) -> super::Result<Config> {
    let mut config = load_config(connection)?;
    config.password = None;
    config.tenant.get_or_insert_with(|| "my-tenant".to_string());
    config.username.get_or_insert_with(|| "my-user".to_string());
    Ok(config)
}

fn print_existing(path: &Path) {
    println!(
        "{} {} already exists",
        colors::warning().apply_to(indicators::WARNING),
        style(path.display()).bold()
    );
    println!("  {}", colors::secondary().apply_to("use --force to overwrite"));
    println!();
}
