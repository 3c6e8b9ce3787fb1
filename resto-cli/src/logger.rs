//! Logging setup for the `resto` binary
//!
//! Console output goes to stderr so command output stays pipeable. With a
//! log directory, three daily files are written:
//! - `app/`: everything except audit and security events (kept 14 days)
//! - `audit/`: the `audit` target (never deleted)
//! - `security/`: the `security` target, i.e. logins and logouts (never deleted)

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Days application logs are kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

/// Delete `app-YYYY-MM-DD.log` files older than the retention window.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    use chrono::{Local, NaiveDate};

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name.strip_prefix("app.").or_else(|| name.strip_prefix("app-"))
            && let Ok(date) = NaiveDate::parse_from_str(date_part.trim_end_matches(".log"), "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn file_layer<S>(
    dir: &Path,
    prefix: &str,
    json_format: bool,
    keep: fn(&str) -> bool,
) -> anyhow::Result<Box<dyn Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let dir = dir.join(prefix);
    fs::create_dir_all(&dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
    let filter = tracing_subscriber::filter::filter_fn(move |meta| keep(meta.target()));

    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));
    Ok(if json_format {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    })
}

/// Initialize logging.
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset (e.g. "warn")
/// * `json_format` - JSON lines instead of the human format
/// * `log_dir` - optional directory for the daily log files
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .without_time()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let mut file_layers = Vec::new();
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        file_layers.push(file_layer(dir, "app", json_format, |t| {
            t != "audit" && t != "security"
        })?);
        file_layers.push(file_layer(dir, "audit", json_format, |t| t == "audit")?);
        file_layers.push(file_layer(dir, "security", json_format, |t| t == "security")?);
    }

    tracing_subscriber::registry()
        .with(console_layer.with_filter(env_filter))
        .with(file_layers)
        .try_init()?;

    if let Some(dir) = log_dir {
        let removed = cleanup_old_logs(dir)?;
        if removed > 0 {
            tracing::info!(removed, "Deleted old log files");
        }
    }
    Ok(())
}
