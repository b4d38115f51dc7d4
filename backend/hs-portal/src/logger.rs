use crate::error::{PortalError, Result as PortalErrorResult};

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Crates whose debug output drowns the portal's own records
const NOISY_TARGETS: [&str; 3] = ["sqlx", "reqwest", "hyper"];

/// Where log records end up
enum Sink {
    File(File),
    ColoredStderr(ColoredLevelConfig),
    Stderr,
}

impl Sink {
    fn open(log_file: Option<&Path>, colored: bool) -> PortalErrorResult<Self> {
        let Some(path) = log_file else {
            return Ok(if colored {
                Self::ColoredStderr(
                    ColoredLevelConfig::new()
                        .trace(Color::Magenta)
                        .debug(Color::Blue)
                        .info(Color::Green)
                        .warn(Color::Yellow)
                        .error(Color::Red),
                )
            } else {
                Self::Stderr
            });
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortalError::logger(format!(
                    "Failed to create log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(Self::File)
            .map_err(|e| {
                PortalError::logger(format!("Failed to open log file {}: {}", path.display(), e))
            })
    }

    fn dispatch(self) -> Dispatch {
        match self {
            Self::File(file) => Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}:{}]",
                        humantime::format_rfc3339(SystemTime::now()),
                        record.level(),
                        message,
                        record.file().unwrap_or("unknown"),
                        record.line().unwrap_or(0),
                    ))
                })
                .chain(file),
            Self::ColoredStderr(colors) => Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {}",
                        humantime::format_rfc3339(SystemTime::now()),
                        colors.color(record.level()),
                        message,
                    ))
                })
                .chain(std::io::stderr()),
            Self::Stderr => Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {}",
                        humantime::format_rfc3339(SystemTime::now()),
                        record.level(),
                        message,
                    ))
                })
                .chain(std::io::stderr()),
        }
    }
}

/// Install the global fern logger for the portal.
///
/// Console records go to stderr so they never interleave with shell replies
/// on stdout. `colored` is ignored when `log_file` is set.
#[track_caller]
pub fn initialize(
    log_level: hs_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> PortalErrorResult<()> {
    let level_filter = log_level.0;
    let sink = Sink::open(log_file.as_deref(), colored)?;

    let dependency_level = level_filter.min(LevelFilter::Warn);
    let base = NOISY_TARGETS
        .iter()
        .fold(Dispatch::new().level(level_filter), |dispatch, target| {
            dispatch.level_for(*target, dependency_level)
        });

    base.chain(sink.dispatch())
        .apply()
        .map_err(|e| PortalError::logger(format!("Failed to initialize logger: {e}")))?;

    match &log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stderr", level_filter),
    }

    // Forward log records to tracing when no other logger claimed the facade
    tracing_log::LogTracer::init().ok();

    Ok(())
}
