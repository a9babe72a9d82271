//! Secure command - marks a package's vulnerabilities as not exploitable.

use serde::Serialize;
use uuid::Uuid;

use sca_api::ScaClient;

use crate::output::emit_json;
use crate::ui::{pluralise_word, print_info, print_success};
use crate::{OutputFormat, SecureArgs};

#[derive(Serialize)]
struct SecureReport<'a> {
    project_id: Uuid,
    package_id: &'a str,
    updated: usize,
}

/// Marks every vulnerability of the package, across the project's successful
/// scans, as not exploitable.
pub async fn run(client: &ScaClient, args: &SecureArgs, format: OutputFormat) -> super::Result {
    let updated = client.set_package_as_secure(args.project, &args.package).await?;

    let report = SecureReport {
        project_id: args.project,
        package_id: &args.package,
        updated,
    };
    if emit_json(format, "secure", &report)? {
        return Ok(());
    }

    if updated == 0 {
        print_info(&format!("no vulnerabilities of {} found", args.package));
    } else {
        print_success(&format!(
            "marked {updated} {} of {} as not exploitable",
            pluralise_word(updated, "vulnerability", "vulnerabilities"),
            args.package
        ));
    }

    Ok(())
}
