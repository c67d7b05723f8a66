//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(record.level(), record.target(), &record.args().to_string()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug => web_sys::console::debug_1(&line),
            Level::Trace => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{} {}] {}", level, target, message)
}

/// Level used when nothing was configured
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Route `log` records to the console.
///
/// An explicit `level` always applies. Without one, the default is only set
/// when this call installs the logger, so a configured level survives.
pub fn init(level: Option<LevelFilter>) {
    let first_install = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(resolve_level(first_install, level, log::max_level()));
}

fn resolve_level(first_install: bool, requested: Option<LevelFilter>, current: LevelFilter) -> LevelFilter {
    match requested {
        Some(level) => level,
        None if first_install => DEFAULT_LEVEL,
        None => current,
    }
}
