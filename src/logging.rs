use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Send tracing output to a log file; the terminal belongs to the TUI.
///
/// `filter` sets the default directive, `RUST_LOG` can still refine it.
pub fn init_tracing(log_file: &Path, filter: Option<&str>) -> Result<()> {
    let directive: Directive = filter
        .unwrap_or("info")
        .parse()
        .context("Invalid log filter")?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_filter() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = init_tracing(&temp_dir.path().join("buddy.log"), Some("buddy=loud"));
        assert!(result.is_err());
    }

    #[test]
    fn test_creates_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = temp_dir.path().join("buddy.log");
        init_tracing(&log, Some("debug")).unwrap();
        assert!(log.exists());
    }
}
