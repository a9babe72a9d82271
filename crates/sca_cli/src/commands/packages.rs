//! Packages command - lists the packages a scan found.

use sca_api::models::Package;
use sca_api::{ScaClient, development_packages};

use crate::output::emit_json;
use crate::ui::{colors, print_count, print_none, severity_style};
use crate::{OutputFormat, PackagesArgs};

/// Lists the scan's packages, or with `--dev` only the ids of
/// development-only packages.
pub async fn run(client: &ScaClient, args: &PackagesArgs, format: OutputFormat) -> super::Result {
    let packages = client.sca().await?.packages(args.scan).await?;

    if args.dev {
        return print_development(&packages, format);
    }

    if emit_json(format, "packages", &packages)? {
        return Ok(());
    }

    if packages.is_empty() {
        print_none("packages");
        return Ok(());
    }

    print_count(packages.len(), "package", "packages");
    println!();

    for package in &packages {
        print_row(package);
    }

    Ok(())
}

fn print_development(packages: &[Package], format: OutputFormat) -> super::Result {
    let ids = development_packages(packages);

    if emit_json(format, "packages --dev", &ids)? {
        return Ok(());
    }

    if ids.is_empty() {
        print_none("development packages");
        return Ok(());
    }

    print_count(ids.len(), "development package", "development packages");
    println!();

    for id in &ids {
        println!("  {}", colors::accent().apply_to(id));
    }

    Ok(())
}

fn print_row(package: &Package) {
    let count = package.vulnerability_count();
    let vulnerabilities = if count == 0 {
        colors::muted().apply_to("clean".to_string())
    } else {
        severity_style(package.severity.as_deref()).apply_to(format!(
            "{} high · {} medium · {} low",
            package.high_vulnerability_count, package.medium_vulnerability_count, package.low_vulnerability_count
        ))
    };

    let dev = if package.is_development { " (dev)" } else { "" };

    println!(
        "  {}{}  {}",
        colors::accent().apply_to(&package.id),
        colors::muted().apply_to(dev),
        vulnerabilities
    );
}
