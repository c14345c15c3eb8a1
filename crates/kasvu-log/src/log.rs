use std::{
    io::Write,
    sync::{OnceLock, Mutex, PoisonError},
};

use core::str::FromStr;

use termcolor::{StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color, WriteColor};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use paste::paste;

use crate::*;

use crate::fmt::SegmentSpec;

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Per target maximum levels, in `RUST_LOG` syntax.
///
/// Entries are comma separated and are either a bare level, which sets the
/// base level, or `target=level`. A target matches itself and every module
/// below it; the longest matching prefix wins. Unparsable entries are
/// skipped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Filters {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filters {

    pub fn parse(spec: &str) -> Self {
        let mut filters = Self::default();
        for arg in spec.split(',') {
            let arg = arg.trim();
            if arg.is_empty() {
                continue
            }
            let (module, level) = match arg.find('=') {
                Some(j) => (Some(arg[0..j].trim()), arg[j + 1..].trim()),
                None => (None, arg),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            if let Some(module) = module {
                let entry = filters.target_levels
                    .entry(CompactString::new(module))
                    .or_insert(level);
                *entry = (*entry).min(level);
            } else {
                filters.base_level = level;
            }
        }
        filters
    }

    /// Reads `RUST_LOG`, falling back to errors only.
    pub fn from_env() -> Self {
        std::env::var("RUST_LOG")
            .map(|env| Self::parse(&env))
            .unwrap_or_default()
    }

    #[inline(always)]
    pub fn base_level(&self) -> Level {
        self.base_level
    }

    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.target_level(target)
    }
}

pub struct Logger<W: WriteColor> {
    sink: W,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    filters: Filters,
}

impl<W: WriteColor> Logger<W> {

    pub fn new(sink: W, filters: Filters) -> Self {
        Self {
            sink,
            error_fmt: LogFmt::tagged(Level::Error),
            warn_fmt: LogFmt::tagged(Level::Warn),
            info_fmt: LogFmt::tagged(Level::Info),
            debug_fmt: LogFmt::tagged(Level::Debug),
            trace_fmt: LogFmt::tagged(Level::Trace),
            filters,
        }
    }

    #[inline(always)]
    pub fn sink(&self) -> &W {
        &self.sink
    }

    #[inline(always)]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    fn level_fmt_mut(&mut self, level: Level) -> &mut LogFmt {
        match level {
            Level::Error => &mut self.error_fmt,
            Level::Warn => &mut self.warn_fmt,
            Level::Info => &mut self.info_fmt,
            Level::Debug => &mut self.debug_fmt,
            Level::Trace => &mut self.trace_fmt,
        }
    }

    /// Writes one record, returning whether it passed the filters.
    pub fn log(&mut self, target: &str, level: Level, msg: core::fmt::Arguments) -> Result<bool> {
        if !self.filters.enabled(target, level) {
            return Ok(false)
        }
        let fmt = match level {
            Level::Error => &self.error_fmt,
            Level::Warn => &self.warn_fmt,
            Level::Info => &self.info_fmt,
            Level::Debug => &self.debug_fmt,
            Level::Trace => &self.trace_fmt,
        };
        for segment in fmt {
            match segment {
                SegmentSpec::Message(log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.sink.set_color(color_spec)?;
                        write!(self.sink, "{}", msg)?;
                        self.sink.reset()?;
                    } else {
                        write!(self.sink, "{}", msg)?;
                    }
                },
                SegmentSpec::Text(text, log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.sink.set_color(color_spec)?;
                        self.sink.write_all(text.as_bytes())?;
                        self.sink.reset()?;
                    } else {
                        self.sink.write_all(text.as_bytes())?;
                    }
                },
            }
        }
        self.sink.write_all(b"\n")?;
        Ok(true)
    }
}

type Sink = Box<dyn WriteColor + Send>;

static LOGGER: OnceLock<Mutex<Logger<Sink>>> = OnceLock::new();

/// Installs the global stderr logger with filters from `RUST_LOG`.
///
/// Returns whether this call installed it; later calls are ignored.
pub fn init() -> bool {
    init_with_sink(StandardStream::stderr(ColorChoice::Auto), Filters::from_env())
}

/// Installs the global stderr logger with explicit filters.
///
/// Returns whether this call installed it; later calls are ignored.
pub fn init_with_filters(spec: &str) -> bool {
    init_with_sink(StandardStream::stderr(ColorChoice::Auto), Filters::parse(spec))
}

/// Installs the global logger writing to `sink`.
///
/// Returns whether this call installed it. When a logger is already
/// installed, `sink` is dropped unused.
pub fn init_with_sink<W>(sink: W, filters: Filters) -> bool
    where
        W: WriteColor + Send + 'static,
{
    let mut installed = false;
    LOGGER.get_or_init(|| {
        installed = true;
        Mutex::new(Logger::new(Box::new(sink) as Sink, filters))
    });
    installed
}

#[inline(always)]
fn with_logger<R>(f: impl FnOnce(&mut Logger<Sink>) -> R) -> Option<R> {
    let logger = LOGGER.get()?;
    let mut guard = logger
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Some(f(&mut guard))
}

macro_rules! level_fmt_fns {
    ($($level:ident => $variant:ident),+ $(,)?) => {
        paste! {
            $(
                #[doc = concat!("Replaces the `", stringify!($level), "` format of the global logger.")]
                #[inline(always)]
                pub fn [<$level _fmt>](f: impl FnOnce(&mut LogFmtBuilder)) -> Result<()> {
                    with_logger(|logger| {
                        let mut builder = LogFmtBuilder::new(logger.level_fmt_mut(Level::$variant));
                        f(&mut builder);
                    }).ok_or(LogError::Uninitialized)
                }
            )+
        }
    };
}

level_fmt_fns! {
    error => Error,
    warn => Warn,
    info => Info,
    debug => Debug,
    trace => Trace,
}

/// Whether a record from `target` at `level` would be written.
pub fn enabled(target: &str, level: Level) -> bool {
    with_logger(|logger| logger.filters.enabled(target, level)).unwrap_or(false)
}

#[inline(always)]
pub fn log(target: &str, level: Level, args: core::fmt::Arguments) -> Result<bool> {
    with_logger(|logger| logger.log(target, level, args))
        .unwrap_or(Ok(false))
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}
