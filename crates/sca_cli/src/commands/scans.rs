//! Scans command - lists a project's scans.

use sca_api::ScaClient;
use sca_api::models::Scan;

use crate::output::emit_json;
use crate::ui::{colors, format_timestamp, indicators, print_count, print_none};
use crate::{OutputFormat, ScansArgs};

/// Lists the project's successful scans, or every scan with `--all`.
pub async fn run(client: &ScaClient, args: &ScansArgs, format: OutputFormat) -> super::Result {
    let scans = if args.all {
        client.sca().await?.scans_for_project(args.project).await?
    } else {
        client.successful_scans(args.project).await?
    };

    if emit_json(format, "scans", &scans)? {
        return Ok(());
    }

    if scans.is_empty() {
        print_none(if args.all { "scans" } else { "successful scans" });
        return Ok(());
    }

    print_count(scans.len(), "scan", "scans");
    println!();

    for scan in &scans {
        print_row(scan);
    }

    Ok(())
}

fn print_row(scan: &Scan) {
    let status = scan.status.as_ref().map_or("unknown", |s| s.name.as_str());
    let indicator = if scan.is_done() {
        colors::success().apply_to(indicators::SUCCESS)
    } else {
        colors::warning().apply_to(indicators::WARNING)
    };

    println!(
        "{} {}  {}  {}",
        indicator,
        colors::accent().apply_to(scan.scan_id),
        colors::muted().apply_to(format_timestamp(scan.created_on)),
        colors::secondary().apply_to(status)
    );
}
