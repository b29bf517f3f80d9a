#![allow(clippy::unused_unit)]

use rustc_hash::FxHashMap;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// Configure the logs output.
/// Every line starts with the UTC time `[year]-[month]-[day] [hour]:[minutes]:[seconds]`
/// followed by the target and the level.
#[derive(Clone, Debug)]
pub struct LogConfig {
    level: log::LevelFilter,
    levels_for: FxHashMap<String, log::LevelFilter>,
    colored: bool,
    verbose: bool,
}

/// Targets always shown at the configured level
const OWN_TARGETS: &[&str] = &["canvas_watch", "corelib"];

impl Default for LogConfig {
    fn default() -> Self {
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        Self {
            level,
            levels_for: Default::default(),
            colored: cfg!(all(debug_assertions, not(target_arch = "wasm32"))),
            verbose: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Parses level names like `"info"` or `"TRACE"`, falls back to the default level
    pub fn from_level_name(name: &str) -> Self {
        match name.parse::<log::LevelFilter>() {
            Ok(level) => Self::new(level),
            Err(_) => Self::default(),
        }
    }

    pub fn debug() -> Self {
        Self::new(log::LevelFilter::Debug)
    }

    pub fn info() -> Self {
        Self::new(log::LevelFilter::Info)
    }

    pub fn warn() -> Self {
        Self::new(log::LevelFilter::Warn)
    }

    pub fn level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn current_level(&self) -> log::LevelFilter {
        self.level
    }

    /// Change the filter level for a specific target
    pub fn level_for(mut self, id: &str, level: log::LevelFilter) -> Self {
        self.levels_for.insert(id.to_string(), level);
        self
    }

    /// Use ansi colors for the level (native only)
    pub fn use_colors(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Log everything including dependencies.
    /// Otherwise targets not set with `level_for` only show warnings and errors.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn is_visible(&self, metadata: &log::Metadata) -> bool {
        if self.verbose || metadata.level() <= log::Level::Warn {
            return true;
        }

        let root = metadata.target().split("::").next().unwrap_or_default();
        OWN_TARGETS.contains(&root) || self.levels_for.contains_key(root)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_time() -> String {
    let Ok(format) = time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
    else {
        return String::new();
    };
    time::OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn get_time() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        now.get_utc_full_year(),
        now.get_utc_month() + 1,
        now.get_utc_date(),
        now.get_utc_hours(),
        now.get_utc_minutes(),
        now.get_utc_seconds()
    )
}

#[cfg(target_arch = "wasm32")]
fn chain_output(dispatch: fern::Dispatch) -> fern::Dispatch {
    dispatch.chain(fern::Output::call(console_log::log))
}

#[cfg(not(target_arch = "wasm32"))]
fn chain_output(dispatch: fern::Dispatch) -> fern::Dispatch {
    dispatch.chain(std::io::stdout())
}

#[cfg(target_arch = "wasm32")]
fn print_apply_error(e: &str) {
    console_error(&format!("Error initializing logs: {e}"));
}

#[cfg(not(target_arch = "wasm32"))]
fn print_apply_error(e: &str) {
    eprintln!("Error initializing logs: {e}");
}

#[cfg(target_arch = "wasm32")]
fn set_panic_hook() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[cfg(not(target_arch = "wasm32"))]
fn set_panic_hook() {
    use std::panic::{self, PanicHookInfo};

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        let payload = if let Some(payload) = info.payload().downcast_ref::<&str>() {
            payload
        } else if let Some(payload) = info.payload().downcast_ref::<String>() {
            payload.as_str()
        } else {
            "Unknown"
        };

        match info.location() {
            Some(location) => log::error!(
                "Panic at '{}:{}': {payload}",
                location.file(),
                location.line()
            ),
            None => log::error!("Panic: {payload}"),
        }

        default_hook(info);
    }));
}

/// Installs the global logger. Calling it twice only reports the error,
/// the first logger stays active.
pub fn init_logs(config: LogConfig) {
    set_panic_hook();

    let mut dispatch = fern::Dispatch::new().level(config.level);
    for (id, lvl) in config.levels_for.iter() {
        dispatch = dispatch.level_for(id.clone(), *lvl);
    }

    if !config.verbose {
        let filter = config.clone();
        dispatch = dispatch.filter(move |metadata| filter.is_visible(metadata));
    }

    dispatch = chain_output(dispatch);

    if config.colored {
        use fern::colors::{Color, ColoredLevelConfig};

        let color_level = ColoredLevelConfig::new()
            .error(Color::BrightRed)
            .warn(Color::BrightYellow)
            .info(Color::BrightGreen)
            .debug(Color::BrightCyan)
            .trace(Color::BrightBlack);

        dispatch = dispatch.format(move |out, message, record| {
            out.finish(format_args!(
                "\x1b[0m{date} [{target}] {level}: {message}",
                date = get_time(),
                target = record.target(),
                level = format_args!(
                    "{}\x1b[{}m",
                    color_level.color(record.level()),
                    Color::White.to_fg_str()
                ),
            ))
        });
    } else {
        dispatch = dispatch.format(move |out, message, record| {
            out.finish(format_args!(
                "{date} [{target}] {level}: {message}",
                date = get_time(),
                target = record.target(),
                level = record.level(),
            ))
        });
    }

    if let Err(e) = dispatch.apply() {
        print_apply_error(&e.to_string());
    }
}
