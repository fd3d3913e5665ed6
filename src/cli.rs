use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

const ABOUT: &str = "Check Kubernetes component version compatibility";

const LONG_ABOUT: &str = "\
kube-dependency-checker helps you verify Kubernetes component version compatibility.

It checks:
- Version skew policy compliance for core components
- Dependency component versions (etcd, CoreDNS, etc.)
- Upgrade path recommendations";

const EXAMPLES: &str = "\
Examples:
  # Check compatibility for Kubernetes 1.30
  kube-dependency-checker check --k8s-version 1.30

  # Check installed versions against Kubernetes 1.30
  kube-dependency-checker check --k8s-version 1.30 --current etcd=3.5.9 --current kubelet=1.28.4

  # Show upgrade path from 1.28 to 1.30
  kube-dependency-checker upgrade --from 1.28 --to 1.30

  # List compatible etcd versions for Kubernetes 1.30
  kube-dependency-checker versions --component etcd --k8s-version 1.30";

#[derive(Debug, Parser)]
#[command(name = "kube-dependency-checker")]
#[command(version, about = ABOUT, long_about = LONG_ABOUT, after_help = EXAMPLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (defaults to the config file setting, then table)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check component compatibility for a Kubernetes version
    Check(CheckArgs),

    /// Show upgrade path between Kubernetes versions
    Upgrade(UpgradeArgs),

    /// List compatible versions for a component
    Versions(VersionsArgs),

    /// Print version information
    Version,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Kubernetes version to check (e.g., 1.30)
    #[arg(long)]
    pub k8s_version: String,

    /// Installed component version to evaluate, as COMPONENT=VERSION (repeatable)
    #[arg(long = "current", value_name = "COMPONENT=VERSION", value_parser = parse_component_version)]
    pub current: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct UpgradeArgs {
    /// Starting Kubernetes version
    #[arg(long)]
    pub from: String,

    /// Target Kubernetes version
    #[arg(long)]
    pub to: String,
}

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Component name (etcd, coredns, containerd, etc.)
    #[arg(long)]
    pub component: Option<String>,

    /// Kubernetes version
    #[arg(long, conflicts_with = "all")]
    pub k8s_version: Option<String>,

    /// Show versions for all supported Kubernetes versions
    #[arg(long)]
    pub all: bool,

    /// List all supported Kubernetes versions
    #[arg(long)]
    pub list_k8s: bool,
}

/// Parse a `COMPONENT=VERSION` pair
pub fn parse_component_version(value: &str) -> Result<(String, String), String> {
    let (component, version) = value
        .split_once('=')
        .ok_or_else(|| format!("expected COMPONENT=VERSION, got '{value}'"))?;
    let component = component.trim();
    let version = version.trim();

    if component.is_empty() || version.is_empty() {
        return Err(format!("expected COMPONENT=VERSION, got '{value}'"));
    }

    Ok((component.to_lowercase(), version.to_string()))
}
