//! Subcommand handlers
//!
//! Each handler resolves its report against the matrix and renders it. The
//! caller prints the returned text.

use tracing::info;

use crate::cli::{CheckArgs, Command, UpgradeArgs, VersionsArgs};
use crate::compatibility::Matrix;
use crate::compatibility::check::check_release;
use crate::compatibility::history::{component_detail, component_history, supported_versions};
use crate::compatibility::upgrade::plan_upgrade;
use crate::error::Error;
use crate::output::{OutputFormat, render};

/// Build information, filled in by the release pipeline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: Option<&str> = option_env!("KDC_GIT_COMMIT");
pub const BUILD_DATE: Option<&str> = option_env!("KDC_BUILD_DATE");

pub fn run(command: &Command, matrix: &Matrix, format: OutputFormat) -> Result<String, Error> {
    match command {
        Command::Check(args) => check(args, matrix, format),
        Command::Upgrade(args) => upgrade(args, matrix, format),
        Command::Versions(args) => versions(args, matrix, format),
        Command::Version => Ok(version()),
    }
}

pub fn check(args: &CheckArgs, matrix: &Matrix, format: OutputFormat) -> Result<String, Error> {
    info!("Checking compatibility for Kubernetes {}", args.k8s_version);
    let result = check_release(matrix, &args.k8s_version, &args.current)?;
    render(&result, format)
}

pub fn upgrade(args: &UpgradeArgs, matrix: &Matrix, format: OutputFormat) -> Result<String, Error> {
    info!("Planning upgrade {} -> {}", args.from, args.to);
    let plan = plan_upgrade(matrix, &args.from, &args.to)?;
    render(&plan, format)
}

pub fn versions(
    args: &VersionsArgs,
    matrix: &Matrix,
    format: OutputFormat,
) -> Result<String, Error> {
    if args.list_k8s {
        return render(&supported_versions(matrix), format);
    }

    let component = args
        .component
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::MissingArgument("--component flag is required".to_string()))?
        .to_lowercase();

    if args.all {
        return render(&component_history(matrix, &component)?, format);
    }

    let k8s_version = args.k8s_version.as_deref().ok_or_else(|| {
        Error::MissingArgument("either --k8s-version or --all flag is required".to_string())
    })?;

    render(&component_detail(matrix, k8s_version, &component)?, format)
}

pub fn version() -> String {
    format!(
        "kube-dependency-checker {}\n  Git Commit: {}\n  Build Date: {}\n",
        VERSION,
        GIT_COMMIT.unwrap_or("unknown"),
        BUILD_DATE.unwrap_or("unknown")
    )
}
