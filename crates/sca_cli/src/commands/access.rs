//! Teams and users commands - inspect the access-control API.

use sca_api::ScaClient;
use sca_api::models::User;

use crate::output::emit_json;
use crate::ui::{colors, format_timestamp, indicators, print_count, print_none};
use crate::{OutputFormat, UsersArgs};

/// Lists teams by full path.
pub async fn teams(client: &ScaClient, format: OutputFormat) -> super::Result {
    let teams: Vec<_> = client.teams_by_full_name().await?.into_values().collect();

    if emit_json(format, "teams", &teams)? {
        return Ok(());
    }

    if teams.is_empty() {
        print_none("teams");
        return Ok(());
    }

    print_count(teams.len(), "team", "teams");
    println!();

    for team in &teams {
        println!(
            "  {}  {}",
            colors::muted().apply_to(format!("{:>6}", team.id)),
            colors::emphasis().apply_to(&team.full_name)
        );
    }

    Ok(())
}

/// Lists users, or with `--active` only enabled accounts.
pub async fn users(client: &ScaClient, args: &UsersArgs, format: OutputFormat) -> super::Result {
    let users = if args.active {
        client.active_users().await?
    } else {
        client.access_control().await?.users().await?
    };

    if emit_json(format, "users", &users)? {
        return Ok(());
    }

    if users.is_empty() {
        print_none("users");
        return Ok(());
    }

    print_count(users.len(), "user", "users");
    println!();

    for user in &users {
        print_user(user);
    }

    Ok(())
}

fn print_user(user: &User) {
    let indicator = if user.active {
        colors::success().apply_to(indicators::SUCCESS)
    } else {
        colors::muted().apply_to(indicators::NONE)
    };

    println!(
        "{} {}  {}  {}",
        indicator,
        colors::accent().apply_to(&user.user_name),
        colors::secondary().apply_to(user.full_name()),
        colors::muted().apply_to(format!("expires {}", format_timestamp(user.expiration_date)))
    );
}
