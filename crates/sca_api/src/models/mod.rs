//! Wire types for the SCA REST and access-control APIs.
//!
//! Field names follow the vendor's camelCase JSON. Properties the vendor adds
//! without documenting them are kept in `extra` on the types that carry them.

mod access;
mod package;
mod project;
mod upload;

pub use access::{Role, Team, UpdateUser, User};
pub use package::{DependencyNode, Package, PackageState, Vulnerability, dedup_by_vulnerability};
pub use project::{CreateProject, Project, ProjectSettings, RiskReport, Scan, ScanStatus};
pub use upload::{ScanHandler, ScanProject, ScanRequest, ScanStarted, ScanType, UploadLink};

use serde::{Deserialize, Deserializer};

/// Deserialises `null` as the type's default instead of failing.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
