use crate::error::Result;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;

/// Target prefix shared by the library and the binary.
const CRATE_TARGET: &str = "ljbaseline";

/// Maps `-q` and the `-v` count to a level; warnings are shown by default.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `-v` only raises our own events; other crates stay at warnings or quieter.
pub fn filter_for(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(level.min(LevelFilter::WARN))
}

/// Installs the global subscriber. The terminal gets compact events. The
/// optional log file is at least at info level and also records every closing
/// span (`evaluation_workflow`, `lj_evaluate`, ...) with its busy and idle time.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let level = level_for(verbosity, quiet);
    let terminal = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(filter_for(level));

    let file_layer = log_file
        .map(File::create)
        .transpose()?
        .map(|file| {
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(filter_for(level.max(LevelFilter::INFO)))
        });

    tracing_subscriber::registry()
        .with(terminal)
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{Level, debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(0, true), LevelFilter::ERROR);
    }

    #[test]
    fn verbosity_only_raises_our_own_targets() {
        let filter = filter_for(LevelFilter::DEBUG);
        assert!(filter.would_enable("ljbaseline::engine::evaluator", &Level::DEBUG));
        assert!(!filter.would_enable("rayon_core", &Level::INFO));
        assert!(filter.would_enable("rayon_core", &Level::WARN));

        let quiet = filter_for(level_for(0, true));
        assert!(!quiet.would_enable("ljbaseline", &Level::WARN));
        assert!(!quiet.would_enable("csv", &Level::WARN));
        assert!(quiet.would_enable("csv", &Level::ERROR));
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!(n_frames = 3, "This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_records_spans_and_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter_for(LevelFilter::DEBUG));
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!(
                target: "ljbaseline::workflows",
                "evaluation_workflow",
                n_frames = 2
            );
            let _guard = span.enter();
            debug!(target: "ljbaseline::engine", cutoff = 6.0, "Evaluator ready.");
            debug!(target: "other_crate", "Dependency chatter.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Evaluator ready."));
        assert!(content.contains("evaluation_workflow"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(content.contains("close"));
        assert!(!content.contains("Dependency chatter."));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(temp_dir.path()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
