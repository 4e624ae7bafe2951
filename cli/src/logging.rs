use anyhow::{bail, Result};
use init_settings::LoggingSettings;
use std::path::Path;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, EnvFilter};

use crate::errors::{InitError, InitErrorCodes};

/// # Sets up logging
///
/// Installs the global subscriber with a console layer on stderr and an
/// optional file layer. The returned guard must stay alive until the
/// process is done logging, dropping it flushes the file writer.
pub fn set_logging(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    // Optional layer for logging to a file
    let (file_layer, guard) = if !settings.path.is_empty() {
        let path = Path::new(settings.path.as_str());
        let directory = match path.parent() {
            Some(directory) if !directory.as_os_str().is_empty() => directory,
            _ => Path::new("."),
        };
        let file_name = match path.file_name().and_then(|file_name| file_name.to_str()) {
            Some(file_name) => file_name,
            None => bail!(InitError::new(
                InitErrorCodes::InitLoggerError,
                format!("invalid log file path - {}", settings.path),
            )),
        };
        let file_appender = match RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(directory)
        {
            Ok(file_appender) => file_appender,
            Err(e) => bail!(InitError::new(
                InitErrorCodes::InitLoggerError,
                format!("error creating log file appender - {}", e),
            )),
        };
        let (non_blocking_writer, guard) = non_blocking(file_appender);
        let layer = Layer::new()
            .with_writer(non_blocking_writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::new(settings.level.as_str()))
        .with(Layer::new().with_writer(std::io::stderr));

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(_) => (),
        Err(e) => bail!(InitError::new(
            InitErrorCodes::InitLoggerError,
            format!("error setting global subscriber - {}", e),
        )),
    };

    tracing::info!(
        //sample log
        task = "logging_setup",
        result = "success",
        "logging set up",
    );
    Ok(guard)
}
