//! Logging setup

use std::fmt;
use std::fs::File;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Wall-clock timestamps truncated to whole seconds (HH:MM:SS, UTC)
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        write!(
            w,
            "{:02}:{:02}:{:02}",
            (elapsed / 3600) % 24,
            (elapsed / 60) % 60,
            elapsed % 60
        )
    }
}

/// Route the log to `output_path` when given, stdout otherwise
pub fn setup_output(output_path: Option<&String>, verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false)
                    .with_filter(level);
                Registry::default().with(file_layer).init();
                info!("Log written to: {}", path);
            }
            Err(err) => eprintln!("Could not create log file {}: {}", path, err),
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }
}
