//! Scan command - starts a scan from a source archive or a git repository.

use sca_api::ScaClient;

use crate::output::emit_json;
use crate::ui::{colors, indicators};
use crate::{OutputFormat, ScanArgs};

/// Uploads `--archive` or points the service at `--git`, then starts a scan.
pub async fn run(client: &ScaClient, args: &ScanArgs, format: OutputFormat) -> super::Result {
    let started = match (&args.archive, &args.git) {
        (Some(archive), _) => client.scan_with_source_code(args.project, archive).await?,
        (None, Some(repository)) => {
            client
                .scan_with_git_repository(args.project, repository, args.api_key.as_deref())
                .await?
        }
        (None, None) => anyhow::bail!("pass --archive <zip> or --git <url>"),
    };

    if emit_json(format, "scan", &started)? {
        return Ok(());
    }

    println!(
        "{} {} {}",
        colors::success().apply_to(indicators::SUCCESS),
        colors::secondary().apply_to("scan started"),
        colors::accent().apply_to(started.scan_id)
    );

    Ok(())
}
