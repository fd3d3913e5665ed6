use clap::Parser;
use tracing::{debug, info};

use kube_dependency_checker::cli::Cli;
use kube_dependency_checker::commands;
use kube_dependency_checker::compatibility::Matrix;
use kube_dependency_checker::config::{self, Config};
use kube_dependency_checker::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let log_file = cli.log_file.as_deref().or(config.log.file.as_deref());
    let _guard = logging::init(cli.verbose, config.log.level.as_deref(), log_file)?;

    match &config.source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!(
            "No config file at {}, using defaults",
            config::config_path().display()
        ),
    }

    let matrix = Matrix::builtin().with_overrides(config.releases)?;
    debug!("Loaded compatibility matrix with {} releases", matrix.release_count());

    let format = cli.output.or(config.output).unwrap_or_default();
    let output = commands::run(&cli.command, &matrix, format)?;
    print!("{output}");

    Ok(())
}
