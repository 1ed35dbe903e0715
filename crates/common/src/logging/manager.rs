//! Logging initialization.

use std::io;

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{layer, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::{LoggerConfig, StdoutConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    FileAppender(#[from] InitError),

    #[error("failed to install global subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Initializes the logging subsystem with the provided config.
///
/// Installs the global subscriber, so only the first call in a process succeeds.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    // `RUST_LOG` overrides the configured default level.
    let filt = EnvFilter::builder()
        .with_default_directive(config.default_level.into())
        .from_env_lossy();

    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_writer(console_writer(&config.stdout_config))
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(console_writer(&config.stdout_config))
            .with_ansi(config.stdout_config.ansi)
            .with_filter(filt.clone())
            .boxed()
    };

    let file_layer = config
        .file_logging_config
        .as_ref()
        .map(|file_config| {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(file_config.file_name_prefix.as_str())
                .filename_suffix("log")
                .build(&file_config.directory)?;

            let layer = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt.clone())
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt.clone())
                    .boxed()
            };
            Ok::<_, LoggingError>(layer)
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        service_version = ?config.service_version,
        "logging initialized"
    );
    if let Some(file_config) = &config.file_logging_config {
        info!(
            log_dir = %file_config.directory.display(),
            log_prefix = %file_config.file_name_prefix,
            "file logging enabled"
        );
    }

    Ok(())
}

fn console_writer(config: &StdoutConfig) -> BoxMakeWriter {
    if config.use_stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    }
}
