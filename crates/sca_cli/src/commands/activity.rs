//! Activity command - reports who last scanned recently created projects.

use std::fmt::Write as _;

use anyhow::Context as _;
use chrono::{Duration, Utc};
use sca_api::{ProjectActivity, ScaClient};

use crate::ActivityArgs;
use crate::ui::print_success;

const HEADER: &str = "sep=;\nId;Name;Teams;CreationDate;User;Username\n";

/// Writes a semicolon-separated report, one row per scanned project created
/// within the last `--days` days.
pub async fn run(client: &ScaClient, args: &ActivityArgs) -> super::Result {
    let cutoff = Utc::now() - Duration::days(i64::from(args.days));
    let activity = client.project_activity(cutoff).await?;
    let report = render(&activity);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report).with_context(|| format!("failed to write {}", path.display()))?;
            print_success(&format!("wrote {} rows to {}", activity.len(), path.display()));
        }
        None => print!("{report}"),
    }

    Ok(())
}

fn render(activity: &[ProjectActivity]) -> String {
    let mut out = String::from(HEADER);

    for row in activity {
        let created = row
            .project
            .created_on
            .map(|c| c.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let fields = [
            row.project.id.to_string(),
            row.project.name.clone(),
            row.project.assigned_teams.join(","),
            created,
            row.user_display_name(),
            row.username.clone().unwrap_or_default(),
        ];

        let line: Vec<_> = fields.iter().map(|f| quote(f)).collect();
        let _ = writeln!(out, "{}", line.join(";"));
    }

    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn activity(name: &str, username: Option<&str>) -> ProjectActivity {
        ProjectActivity {
            project: serde_json::from_value(serde_json::json!({
                "id": Uuid::nil(),
                "name": name,
                "createdOn": "2024-05-01T08:00:00Z",
                "assignedTeams": ["/CxServer/A", "/CxServer/B"]
            }))
            .unwrap(),
            last_scan: serde_json::from_value(serde_json::json!({"scanId": Uuid::nil()})).unwrap(),
            username: username.map(str::to_string),
            user: None,
        }
    }

    #[test]
    fn render_starts_with_separator_hint() {
        assert!(render(&[]).starts_with("sep=;\nId;Name;"));
    }

    #[test]
    fn render_quotes_every_field() {
        let report = render(&[activity("web \"goat\"", Some("alice"))]);
        let row = report.lines().nth(2).unwrap();

        assert_eq!(
            row,
            "\"00000000-0000-0000-0000-000000000000\";\"web \"\"goat\"\"\";\"/CxServer/A,/CxServer/B\";\"2024-05-01\";\"Not found\";\"alice\""
        );
    }
}
