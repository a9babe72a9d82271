//! Exploitable-path command - shows or enables exploitable-path analysis.

use serde::Serialize;
use uuid::Uuid;

use sca_api::ScaClient;

use crate::output::emit_json;
use crate::ui::{colors, indicators, pluralise_word, print_none, print_success};
use crate::{ExploitablePathArgs, OutputFormat};

#[derive(Serialize)]
struct ProjectSetting {
    project_id: Uuid,
    name: String,
    enable_exploitable_path: bool,
}

/// Lists each project's exploitable-path setting, or with `--enable` turns
/// it on for every project.
pub async fn run(client: &ScaClient, args: &ExploitablePathArgs, format: OutputFormat) -> super::Result {
    if args.enable {
        let updated = client.enable_exploitable_path_for_all_projects().await?;
        if !emit_json(format, "exploitable-path", &serde_json::json!({ "updated": updated }))? {
            print_success(&format!(
                "enabled exploitable path on {updated} {}",
                pluralise_word(updated, "project", "projects")
            ));
        }
        return Ok(());
    }

    let settings = collect(client).await?;

    if emit_json(format, "exploitable-path", &settings)? {
        return Ok(());
    }

    if settings.is_empty() {
        print_none("projects");
        return Ok(());
    }

    for setting in &settings {
        let indicator = if setting.enable_exploitable_path {
            colors::success().apply_to(indicators::SUCCESS)
        } else {
            colors::muted().apply_to(indicators::NONE)
        };
        println!(
            "{} {}  {}",
            indicator,
            colors::accent().apply_to(setting.project_id),
            colors::secondary().apply_to(&setting.name)
        );
    }

    Ok(())
}

async fn collect(client: &ScaClient) -> super::Result<Vec<ProjectSetting>> {
    let api = client.sca().await?;
    let mut settings = Vec::new();

    for project in api.projects().await? {
        let current = api.project_settings(project.id).await?;
        settings.push(ProjectSetting {
            project_id: project.id,
            name: project.name,
            enable_exploitable_path: current.enable_exploitable_path,
        });
    }

    Ok(settings)
}
