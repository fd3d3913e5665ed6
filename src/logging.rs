//! Tracing subscriber setup
//!
//! Logs go to stderr so reports on stdout stay machine readable. With a log
//! file configured, JSON lines are written there through a non-blocking
//! writer instead.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `KUBE_DEPENDENCY_CHECKER_LOG` wins, then the configured
/// level, then the verbosity flag.
///
/// A directive that fails to parse is replaced by the verbosity default, and
/// the second value carries a notice naming the rejected directive.
pub fn build_filter(
    env: Option<&str>,
    configured: Option<&str>,
    verbosity: u8,
) -> (EnvFilter, Option<String>) {
    let fallback = default_directive(verbosity);
    let (source, directive) = match (env, configured) {
        (Some(env), _) if !env.trim().is_empty() => (LOG_ENV, env),
        (_, Some(configured)) if verbosity == 0 => ("log.level", configured),
        _ => return (EnvFilter::new(fallback), None),
    };

    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(err) => {
            let notice =
                format!("ignoring invalid {source} directive '{directive}' ({err}), using '{fallback}'");
            (EnvFilter::new(fallback), Some(notice))
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held until
/// the program exits.
pub fn init(
    verbosity: u8,
    configured_level: Option<&str>,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let env = std::env::var(LOG_ENV).ok();
    let (filter, notice) = build_filter(env.as_deref(), configured_level, verbosity);
    if let Some(notice) = notice {
        eprintln!("warning: {notice}");
    }

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
        return Ok(None);
    };

    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("invalid log file path: {}", log_file.display()))?;

    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(Some(guard))
}
