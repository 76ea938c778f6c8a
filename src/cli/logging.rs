//! Diagnostic logging to stderr

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger
///
/// With `debug` everything down to debug level is shown, otherwise only
/// warnings and errors. Calling it again only changes the level.
pub fn init(debug: bool) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed");
    }

    log::set_max_level(if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
}
