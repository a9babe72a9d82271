//! States command - lists a project's vulnerability triage states.

use sca_api::ScaClient;
use sca_api::models::PackageState;

use crate::output::emit_json;
use crate::ui::{colors, print_count, print_none};
use crate::{OutputFormat, StatesArgs};

/// Lists triage states. With `--not-exploitable`, only those marked not
/// exploitable, one per vulnerability, each with a web console link.
pub async fn run(client: &ScaClient, args: &StatesArgs, format: OutputFormat) -> super::Result {
    let states = if args.not_exploitable {
        client.not_exploitable_states(args.project).await?
    } else {
        client.sca().await?.package_states(args.project).await?
    };

    if emit_json(format, "states", &states)? {
        return Ok(());
    }

    if states.is_empty() {
        print_none("triage states");
        return Ok(());
    }

    print_count(states.len(), "state", "states");
    println!();

    for state in &states {
        print_row(state, client.web_url());
    }

    Ok(())
}

fn print_row(state: &PackageState, web_url: &str) {
    println!(
        "  {}  {}  {}",
        colors::info().apply_to(&state.state),
        colors::accent().apply_to(&state.vulnerability_id),
        colors::secondary().apply_to(&state.package_id)
    );
    println!("    {}", colors::muted().apply_to(state.web_link(web_url)));
}
