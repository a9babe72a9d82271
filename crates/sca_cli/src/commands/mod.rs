//! CLI command handlers.

/// Team and user listings.
pub mod access;
/// Semicolon-separated report of who scanned recently created projects.
pub mod activity;
/// Exploitable-path settings across projects.
pub mod exploitable_path;
/// `.sca.toml` creation.
pub mod init;
/// Packages found by a scan.
pub mod packages;
/// Project listing.
pub mod projects;
/// Starting scans from archives or git repositories.
pub mod scan;
/// Scan listing for one project.
pub mod scans;
/// Marking a package as not exploitable.
pub mod secure;
/// Vulnerability triage states.
pub mod states;
/// Vulnerabilities found by a scan.
pub mod vulnerabilities;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
