use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

thread_local! {
    static MAX_LEVEL: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

/// Component-tagged logger writing to the browser console
pub struct Logger;

impl Logger {
    /// Set the minimum level that reaches the console
    pub fn init(level: LogLevel) {
        MAX_LEVEL.with(|max| max.set(level));
    }

    pub fn enabled(level: LogLevel) -> bool {
        MAX_LEVEL.with(|max| level >= max.get())
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, message, component);
    }

    fn log(level: LogLevel, message: &str, component: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format_line(component, message);

        // The console only exists in the browser; native test runs stay quiet.
        if !cfg!(target_arch = "wasm32") {
            return;
        }
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}
