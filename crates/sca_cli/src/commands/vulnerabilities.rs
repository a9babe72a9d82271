//! Vulnerabilities command - lists the vulnerabilities a scan found.

use sca_api::ScaClient;
use sca_api::models::Vulnerability;

use crate::output::emit_json;
use crate::ui::{colors, print_count, print_none, severity_style, truncate_with_ellipsis};
use crate::{OutputFormat, VulnerabilitiesArgs};

const DESCRIPTION_WIDTH: usize = 70;

/// Lists the scan's vulnerabilities, optionally only those of one package.
pub async fn run(client: &ScaClient, args: &VulnerabilitiesArgs, format: OutputFormat) -> super::Result {
    let vulnerabilities = client.sca().await?.vulnerabilities(args.scan).await?;
    let vulnerabilities: Vec<_> = match args.package.as_deref() {
        Some(package) => vulnerabilities.into_iter().filter(|v| v.package_id == package).collect(),
        None => vulnerabilities,
    };

    if emit_json(format, "vulnerabilities", &vulnerabilities)? {
        return Ok(());
    }

    if vulnerabilities.is_empty() {
        print_none("vulnerabilities");
        return Ok(());
    }

    print_count(vulnerabilities.len(), "vulnerability", "vulnerabilities");

    for vulnerability in &vulnerabilities {
        print_detail(vulnerability);
    }

    Ok(())
}

fn print_detail(vulnerability: &Vulnerability) {
    let severity = vulnerability.severity.as_deref();
    let name = vulnerability.cve_name.as_deref().unwrap_or(&vulnerability.id);

    println!();
    println!(
        "{} {} {}",
        severity_style(severity).apply_to(severity.unwrap_or("unrated")),
        console::style(name).bold(),
        colors::muted().apply_to(format!("· {}", vulnerability.package_id))
    );

    if let Some(description) = &vulnerability.description {
        println!(
            "  {}",
            colors::secondary().apply_to(truncate_with_ellipsis(description, DESCRIPTION_WIDTH))
        );
    }
}
