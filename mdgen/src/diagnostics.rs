//! Diagnostics collaborator
//!
//! The builder reports shape problems, default-value notices and fallbacks
//! through a [`Diagnostics`] implementation. Reports never influence what is
//! written to the document.

use log::Level;
use std::cell::RefCell;

/// Receiver for non-fatal builder diagnostics
pub trait Diagnostics {
    /// Record one diagnostic message at the given severity
    fn report(&self, level: Level, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: "mdgen", level, "{}", message);
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: RefCell<Vec<(Level, String)>>,
}

impl RecordingDiagnostics {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded diagnostics in report order
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Number of diagnostics recorded at exactly `level`
    pub fn count(&self, level: Level) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .count()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_counts_by_level() {
        let diagnostics = RecordingDiagnostics::new();
        diagnostics.report(Level::Warn, "first");
        diagnostics.report(Level::Error, "second");
        diagnostics.report(Level::Warn, "third");

        assert_eq!(diagnostics.count(Level::Warn), 2);
        assert_eq!(diagnostics.count(Level::Error), 1);
        assert_eq!(diagnostics.count(Level::Debug), 0);
        assert_eq!(diagnostics.entries()[1], (Level::Error, "second".to_string()));
    }
}
