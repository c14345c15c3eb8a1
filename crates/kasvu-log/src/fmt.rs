//! Per level output formats.

use termcolor::{Color, ColorSpec};

use compact_str::CompactString;

use crate::Level;

/// Ordered output segments of one log record.
#[derive(Default, Clone, Debug)]
pub struct LogFmt {
    segments: Vec<SegmentSpec>,
}

impl LogFmt {

    /// `[level] message`, with the level tag bold and colored.
    pub fn tagged(level: Level) -> Self {
        let color = match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Magenta,
        };
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text("[", |spec| spec)
            .text(level.as_str(), |spec| spec.with_color_spec(|color_spec| {
                color_spec.set_fg(Some(color)).set_bold(true);
            }))
            .text("] ", |spec| spec)
            .message(|spec| spec);
        fmt
    }

    #[inline(always)]
    pub fn segments(&self) -> &[SegmentSpec] {
        &self.segments
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = core::slice::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, f: impl FnOnce(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

#[derive(Clone, Debug)]
pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
}

/// Rebuilds a [`LogFmt`] from scratch.
pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Clears `fmt`; segments are appended in call order.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())));
        self
    }
}
