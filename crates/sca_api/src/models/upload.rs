use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pre-signed URL to upload a source archive to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLink {
    /// Upload target. Requests to it carry no bearer token.
    pub url: String,
}

/// Where a scan takes its sources from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    /// A previously uploaded archive.
    Upload,
    /// A git repository cloned by the service.
    Git,
}

/// Source location handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHandler {
    /// Uploaded archive URL or repository URL.
    pub url: String,
}

/// Project part of a [`ScanRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProject {
    /// Project to scan.
    pub id: Uuid,
    /// Source kind.
    #[serde(rename = "type")]
    pub kind: ScanType,
    /// Source location.
    pub handler: ScanHandler,
}

/// Body for starting a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// What to scan.
    pub project: ScanProject,
}

impl ScanRequest {
    /// Builds a request for scanning an uploaded archive.
    #[must_use]
    pub fn upload(project_id: Uuid, uploaded_url: impl Into<String>) -> Self {
        Self::new(project_id, ScanType::Upload, uploaded_url.into())
    }

    /// Builds a request for scanning a git repository.
    #[must_use]
    pub fn git(project_id: Uuid, repository_url: impl Into<String>) -> Self {
        Self::new(project_id, ScanType::Git, repository_url.into())
    }

    fn new(id: Uuid, kind: ScanType, url: String) -> Self {
        Self {
            project: ScanProject {
                id,
                kind,
                handler: ScanHandler { url },
            },
        }
    }
}

/// Response to a started scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStarted {
    /// Identifier of the new scan.
    pub scan_id: Uuid,
}
