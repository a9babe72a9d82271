use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::null_as_default;
use crate::SCAN_DONE;

/// A project registered in the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub id: Uuid,
    /// Display name. Not guaranteed unique within a tenant.
    pub name: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    /// Full team paths the project is assigned to (e.g. `/CxServer/Team`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_teams: Vec<String>,
    /// Branch the project tracks, if any.
    #[serde(default)]
    pub branch: Option<String>,
    /// Scan id of the most recent successful scan, if any.
    #[serde(default)]
    pub last_successful_scan_id: Option<Uuid>,
    /// Whether the project is managed by an integration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_managed: bool,
    /// Free-form tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}

/// Body for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Name of the new project.
    pub name: String,
    /// Full team paths to assign.
    #[serde(default)]
    pub assigned_teams: Vec<String>,
}

/// Per-project settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Whether exploitable-path analysis runs on new scans.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_exploitable_path: bool,
}

/// Processing status of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatus {
    /// Status name, e.g. `Done`, `Running`, `Failed`.
    pub name: String,
    /// Optional detail from the server.
    #[serde(default)]
    pub message: Option<String>,
}

/// A scan of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    /// Scan identifier.
    pub scan_id: Uuid,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<Uuid>,
    /// When the scan was created.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    /// Processing status.
    #[serde(default)]
    pub status: Option<ScanStatus>,
    /// Undocumented properties, e.g. `username` of whoever launched the scan.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Scan {
    /// Returns `true` when the scan finished successfully.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.name == SCAN_DONE)
    }

    /// Returns the user name that launched the scan, if the server sent one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.extra.get("username").and_then(serde_json::Value::as_str)
    }
}

/// A risk report produced for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Report identifier (same value as the scan id).
    pub risk_report_id: Uuid,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<Uuid>,
    /// Owning project name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// When the report was produced.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    /// Summary counters and anything else the server sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
