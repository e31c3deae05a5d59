use std::path::Path;

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    Handle,
};

use crate::error::CliError;
use crate::structs::LogLevel;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} - {m}{n}";

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Log records go to stderr, and to `log_file` as well when given, so stdout
/// carries only parse output.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<Handle, CliError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut config = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = log_file {
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path)
            .map_err(|err| CliError::Logging(format!("failed to build log file appender: {}", err)))?;
        config = config.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(level.into()))
        .map_err(|err| CliError::Logging(format!("failed to build logger configuration: {}", err)))?;

    log4rs::init_config(config).map_err(|err| CliError::Logging(format!("failed to initialize logger: {}", err)))
}
