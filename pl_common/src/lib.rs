#![doc(
  html_playground_url = "https://play.rust-lang.org/",
  test(no_crate_inject, attr(deny(warnings)))
)]

#[macro_use]
extern crate log;

use log::LevelFilter;

pub mod color;
pub mod config;
pub mod math;
pub mod util;
pub mod version;

pub use color::Color;
pub use version::Version;

/// Initializes logger at the info level. Might do more things in the future.
pub fn init(name: &str) { init_with_level(name, LevelFilter::Info) }

/// Initializes the logger with the given level. The particle library is
/// almost always embedded in a larger process, so this silently does nothing
/// if a logger is already installed.
pub fn init_with_level(name: &str, level: LevelFilter) {
  use log::{Level, Metadata, Record};

  struct Logger {
    level: LevelFilter,
  }

  impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= self.level }

    fn log(&self, record: &Record) {
      if self.enabled(record.metadata()) {
        #[cfg(feature = "utclogs")]
        let now = chrono::Utc::now();
        #[cfg(not(feature = "utclogs"))]
        let now = chrono::Local::now();
        print!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
        #[cfg(debug_assertions)]
        {
          if let Some(path) = record.module_path() {
            print!("{path}");
          }
          if let Some(line) = record.line() {
            print!(":{line}");
          }
          print!(" ");
        }
        match record.level() {
          Level::Trace => print!("[\x1b[36mTRACE\x1b[0m]"),
          Level::Debug => print!("[\x1b[34mDEBUG\x1b[0m]"),
          Level::Info => print!("[\x1b[32mINFO\x1b[0m]"),
          Level::Warn => print!("[\x1b[33mWARN\x1b[0m]"),
          Level::Error => print!("[\x1b[31m\x1b[1mERROR\x1b[0m]"),
        }
        println!(" {}", record.args());
      }
    }

    fn flush(&self) {}
  }

  let logger = Box::new(Logger { level });
  if log::set_boxed_logger(logger).is_ok() {
    log::set_max_level(level);
    debug!("logger for {name} installed at {level}");
  }
}
