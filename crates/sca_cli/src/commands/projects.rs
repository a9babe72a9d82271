//! Projects command - lists the tenant's projects.

use sca_api::ScaClient;
use sca_api::models::Project;

use crate::output::emit_json;
use crate::ui::{colors, format_timestamp, print_count, print_none, truncate_with_ellipsis};
use crate::{OutputFormat, ProjectsArgs};

const NAME_WIDTH: usize = 40;

/// Lists projects, optionally filtered by a case-insensitive name fragment.
pub async fn run(client: &ScaClient, args: &ProjectsArgs, format: OutputFormat) -> super::Result {
    let projects = client.sca().await?.projects().await?;
    let projects = filter_by_name(projects, args.name.as_deref());

    if emit_json(format, "projects", &projects)? {
        return Ok(());
    }

    if projects.is_empty() {
        print_none("projects");
        return Ok(());
    }

    print_count(projects.len(), "project", "projects");
    println!();

    for project in &projects {
        print_row(project);
    }

    Ok(())
}

fn filter_by_name(projects: Vec<Project>, fragment: Option<&str>) -> Vec<Project> {
    let Some(fragment) = fragment.map(str::to_lowercase) else {
        return projects;
    };

    projects
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&fragment))
        .collect()
}

fn print_row(project: &Project) {
    println!(
        "  {}  {:<NAME_WIDTH$}  {}",
        colors::accent().apply_to(project.id),
        colors::emphasis().apply_to(truncate_with_ellipsis(&project.name, NAME_WIDTH)),
        colors::muted().apply_to(format_timestamp(project.created_on))
    );
}
