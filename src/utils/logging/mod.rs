//! Log output of the gateway.
//!
//! Settings come from the environment:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: "trace", "debug", "info", "warn" or "error"; default is "info"
//! - LOG_DATA_DIR: directory for log files; default is "logs/"
//! - LOG_MAX_SIZE: bytes a log file may reach before the next one is started; default is 1GB
//! - IN_DOCKER: "true" pins the log directory to "logs/"
//!
//! File mode writes to `<LOG_DATA_DIR>/gateway-<date>.<n>.log`, without ANSI colors.

pub mod error;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
	env,
	fs::{self, create_dir_all},
	path::{Path, PathBuf},
};
use tracing::{info, Level, Subscriber};
use tracing_subscriber::{
	filter::EnvFilter,
	fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
	prelude::*,
	registry::LookupSpan,
};

const LOG_FILE_STEM: &str = "gateway";
const DEFAULT_LOG_DIR: &str = "logs/";
const DEFAULT_LOG_MAX_SIZE: u64 = 1_073_741_824;

lazy_static! {
	static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	File,
}

/// Where and how verbosely the gateway logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
	pub mode: LogMode,
	pub level: Level,
	pub dir: PathBuf,
	pub max_size: u64,
}

impl LogSettings {
	pub fn from_env() -> Result<Self, String> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Reads the settings through `lookup`; unknown levels fall back to info
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
		let mode = match lookup("LOG_MODE") {
			Some(mode) if mode.eq_ignore_ascii_case("file") => LogMode::File,
			_ => LogMode::Stdout,
		};
		let level = lookup("LOG_LEVEL")
			.and_then(|level| level.trim().parse::<Level>().ok())
			.unwrap_or(Level::INFO);
		let in_docker = lookup("IN_DOCKER").is_some_and(|value| value == "true");
		let dir = match lookup("LOG_DATA_DIR") {
			Some(dir) if !in_docker => PathBuf::from(dir),
			_ => PathBuf::from(DEFAULT_LOG_DIR),
		};
		let max_size = match lookup("LOG_MAX_SIZE") {
			None => DEFAULT_LOG_MAX_SIZE,
			Some(raw) => raw
				.trim()
				.parse::<u64>()
				.map_err(|e| format!("LOG_MAX_SIZE must be a valid u64 if set: {}", e))?,
		};

		Ok(Self {
			mode,
			level,
			dir,
			max_size,
		})
	}

	/// First file of the day in `dir` that is still below `max_size`
	pub fn log_file_for(&self, date: &str) -> PathBuf {
		let mut index = 1;
		loop {
			let candidate = rolled_file_name(&self.dir, date, index);
			match fs::metadata(&candidate) {
				Ok(existing) if existing.len() > self.max_size => index += 1,
				_ => return candidate,
			}
		}
	}
}

/// `<dir>/gateway-<date>.<index>.log`
pub fn rolled_file_name(dir: &Path, date: &str, index: u32) -> PathBuf {
	dir.join(format!("{}-{}.{}.log", LOG_FILE_STEM, date, index))
}

/// Wraps a formatter and removes color codes from what it writes
struct PlainText<T>(T);

impl<S, N, T> FormatEvent<S, N> for PlainText<T>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
	T: FormatEvent<S, N>,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &tracing::Event<'_>,
	) -> std::fmt::Result {
		let mut buf = String::new();
		self.0.format_event(ctx, Writer::new(&mut buf), event)?;
		write!(writer, "{}", strip_ansi_escapes(&buf))
	}
}

fn strip_ansi_escapes(s: &str) -> String {
	ANSI_ESCAPE.replace_all(s, "").into_owned()
}

fn log_format(with_ansi: bool) -> fmt::format::Format<fmt::format::Compact> {
	fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_ansi(with_ansi)
		.compact()
}

/// Installs the global subscriber described by the environment
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
	let settings = LogSettings::from_env()?;
	let subscriber =
		tracing_subscriber::registry().with(EnvFilter::new(settings.level.to_string()));

	match settings.mode {
		LogMode::Stdout => subscriber
			.with(
				fmt::layer()
					.event_format(log_format(true))
					.fmt_fields(fmt::format::PrettyFields::new()),
			)
			.try_init()?,
		LogMode::File => {
			create_dir_all(&settings.dir)?;
			let date = Utc::now().format("%Y-%m-%d").to_string();
			let path = settings.log_file_for(&date);
			let file_name = path.file_name().unwrap_or_default().to_owned();
			let appender = tracing_appender::rolling::never(&settings.dir, file_name);

			subscriber
				.with(
					fmt::layer()
						.event_format(PlainText(log_format(false)))
						.with_writer(appender)
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
			info!("Logging to {}", path.display());
		}
	}

	info!(
		"Logging is configured (mode: {:?}, level: {})",
		settings.mode, settings.level
	);
	Ok(())
}
