//! # Commands
//!
//! - `sca projects` - List projects
//! - `sca scans` - List a project's scans
//! - `sca packages` - List the packages found by a scan
//! - `sca vulnerabilities` - List the vulnerabilities found by a scan
//! - `sca states` - List a project's vulnerability triage states
//! - `sca secure` - Mark every vulnerability of a package as not exploitable
//! - `sca scan` - Start a scan from an archive or a git repository
//! - `sca exploitable-path` - Show or enable exploitable-path analysis
//! - `sca teams` / `sca users` - Inspect access control
//! - `sca activity` - Report who scanned recently created projects
//! - `sca init` - Create configuration file

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod context;
mod output;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
use uuid::Uuid;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/spikermint/sca";

#[derive(Debug, Parser)]
#[command(
    name = "sca",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List projects
    #[command(visible_alias = "p")]
    Projects(ProjectsArgs),

    /// List a project's scans
    Scans(ScansArgs),

    /// List the packages found by a scan
    Packages(PackagesArgs),

    /// List the vulnerabilities found by a scan
    #[command(visible_alias = "vulns")]
    Vulnerabilities(VulnerabilitiesArgs),

    /// List a project's vulnerability triage states
    States(StatesArgs),

    /// Mark every vulnerability of a package as not exploitable
    Secure(SecureArgs),

    /// Start a scan from a source archive or a git repository
    Scan(ScanArgs),

    /// Show or enable exploitable-path analysis
    ExploitablePath(ExploitablePathArgs),

    /// List access-control teams
    Teams,

    /// List access-control users
    Users(UsersArgs),

    /// Report who last scanned recently created projects
    Activity(ActivityArgs),

    /// Create a .sca.toml configuration file
    Init(InitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for.
        shell: clap_complete::Shell,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Connection settings shared by every network command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConnectionArgs {
    /// Path to `.sca.toml` configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tenant name.
    #[arg(long, env = "SCA_TENANT", global = true)]
    pub tenant: Option<String>,

    /// User name.
    #[arg(short, long, env = "SCA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password. Read from the environment only.
    #[arg(long, env = "SCA_PASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// REST API base URL.
    #[arg(long, env = "SCA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Access-control base URL.
    #[arg(long, env = "SCA_AC_URL", global = true)]
    pub ac_url: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,
}

/// Arguments for the `sca projects` command.
#[derive(Debug, Parser)]
pub struct ProjectsArgs {
    /// Only show projects whose name contains this text (case-insensitive).
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the `sca scans` command.
#[derive(Debug, Parser)]
pub struct ScansArgs {
    /// Project id.
    pub project: Uuid,

    /// Include scans that did not finish successfully.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `sca packages` command.
#[derive(Debug, Parser)]
pub struct PackagesArgs {
    /// Scan id.
    pub scan: Uuid,

    /// Only list development-only packages.
    #[arg(long)]
    pub dev: bool,
}

/// Arguments for the `sca vulnerabilities` command.
#[derive(Debug, Parser)]
pub struct VulnerabilitiesArgs {
    /// Scan id.
    pub scan: Uuid,

    /// Only list vulnerabilities of this package id.
    #[arg(long)]
    pub package: Option<String>,
}

/// Arguments for the `sca states` command.
#[derive(Debug, Parser)]
pub struct StatesArgs {
    /// Project id.
    pub project: Uuid,

    /// Only list states marked not exploitable, one per vulnerability.
    #[arg(long)]
    pub not_exploitable: bool,
}

/// Arguments for the `sca secure` command.
#[derive(Debug, Parser)]
pub struct SecureArgs {
    /// Project id.
    pub project: Uuid,

    /// Package id, e.g. `Maven-org.yaml:snakeyaml-1.26`.
    pub package: String,
}

/// Arguments for the `sca scan` command.
#[derive(Debug, Parser)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["archive", "git"])))]
pub struct ScanArgs {
    /// Project id.
    pub project: Uuid,

    /// Zip archive of the source tree to upload.
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Git repository URL to scan.
    #[arg(long, value_name = "URL")]
    pub git: Option<String>,

    /// API key for a private repository.
    #[arg(long, env = "SCA_GIT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the `sca exploitable-path` command.
#[derive(Debug, Parser)]
pub struct ExploitablePathArgs {
    /// Enable exploitable-path analysis on every project.
    #[arg(long)]
    pub enable: bool,
}

/// Arguments for the `sca users` command.
#[derive(Debug, Parser)]
pub struct UsersArgs {
    /// Only list enabled accounts.
    #[arg(long)]
    pub active: bool,
}

/// Arguments for the `sca activity` command.
#[derive(Debug, Parser)]
pub struct ActivityArgs {
    /// Only include projects created within this many days.
    #[arg(short, long, default_value_t = 90)]
    pub days: u32,

    /// Write the CSV report to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `sca init` command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Write the config file to a custom path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => commands::init::run(&cli.connection, &args),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sca", &mut std::io::stdout());
            Ok(())
        }
        command => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| anyhow::anyhow!("failed to create async runtime: {e}"))?;

            rt.block_on(dispatch(&cli.connection, command))
        }
    }
}

async fn dispatch(connection: &ConnectionArgs, command: Command) -> anyhow::Result<()> {
    let client = context::connect(connection)?;
    let format = connection.format;

    match command {
        Command::Projects(args) => commands::projects::run(&client, &args, format).await,
        Command::Scans(args) => commands::scans::run(&client, &args, format).await,
        Command::Packages(args) => commands::packages::run(&client, &args, format).await,
        Command::Vulnerabilities(args) => commands::vulnerabilities::run(&client, &args, format).await,
        Command::States(args) => commands::states::run(&client, &args, format).await,
        Command::Secure(args) => commands::secure::run(&client, &args, format).await,
        Command::Scan(args) => commands::scan::run(&client, &args, format).await,
        Command::ExploitablePath(args) => commands::exploitable_path::run(&client, &args, format).await,
        Command::Teams => commands::access::teams(&client, format).await,
        Command::Users(args) => commands::access::users(&client, &args, format).await,
        Command::Activity(args) => commands::activity::run(&client, &args).await,
        Command::Init(_) | Command::Completions { .. } => Ok(()),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} is a command-line client for the SCA cloud service.

  Lists projects, scans, packages and vulnerabilities, triages
  packages, starts scans and inspects access control.",
        colors::accent().apply_to("sca").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    sca init                                Create config file
    sca projects                            List projects
    sca scans <project>                     List successful scans
    sca packages <scan> --dev               List development packages
    sca secure <project> <package>          Mark a package as not exploitable
    sca scan <project> --archive src.zip    Upload and scan sources
    sca activity --days 30                  Who scanned new projects

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
