//! Leveled line sink the comparison core reports through.
//!
//! The core never decides where lines go (stdout vs stderr, file vs
//! console); callers supply the routing.

/// Line level. Failing results are emitted at `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Destination for report lines.
pub trait Sink {
    fn info(&mut self, line: &str);
    fn error(&mut self, line: &str);
}

/// Captures lines in memory. Used by tests to assert on report output.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<(Level, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured text, one line per entry, levels dropped.
    pub fn text(&self) -> Vec<&str> {
        self.lines.iter().map(|(_, l)| l.as_str()).collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|(lv, _)| *lv == Level::Error)
            .map(|(_, l)| l.as_str())
    }
}

impl Sink for MemorySink {
    fn info(&mut self, line: &str) {
        self.lines.push((Level::Info, line.to_owned()));
    }

    fn error(&mut self, line: &str) {
        self.lines.push((Level::Error, line.to_owned()));
    }
}
