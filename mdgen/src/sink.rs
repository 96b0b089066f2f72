//! Destinations for emitted fragments
//!
//! A [`Sink`] receives every fragment in emission order. [`BufferedSink`]
//! holds fragments until [`Sink::finish`] and writes the document in one go;
//! [`PassThroughSink`] forwards each fragment to its writer immediately and
//! keeps nothing in memory.

use std::io::{self, Write};

/// Receiver of document fragments
pub trait Sink {
    /// Accept one fragment
    fn append(&mut self, fragment: &str);

    /// Insert fragments before the fragment at `index` (clamped to the end)
    ///
    /// Returns `false` when earlier fragments have already left the sink and
    /// can no longer be reordered.
    fn insert(&mut self, index: usize, fragments: Vec<String>) -> bool;

    /// Complete the document, returning the text the sink still holds
    ///
    /// Buffering sinks return the full document; streaming sinks have already
    /// handed everything to their writer and return an empty string.
    fn finish(&mut self) -> io::Result<String>;
}

/// Holds fragments in memory and writes them once at finalization
pub struct BufferedSink<W: Write> {
    fragments: Vec<String>,
    destination: Option<W>,
}

impl BufferedSink<io::Sink> {
    /// A sink that only keeps the text in memory
    pub fn in_memory() -> Self {
        Self {
            fragments: Vec::new(),
            destination: None,
        }
    }
}

impl<W: Write> BufferedSink<W> {
    /// A sink that writes the finished document to `destination`
    pub fn new(destination: W) -> Self {
        Self {
            fragments: Vec::new(),
            destination: Some(destination),
        }
    }
}

impl<W: Write> Sink for BufferedSink<W> {
    fn append(&mut self, fragment: &str) {
        self.fragments.push(fragment.to_string());
    }

    fn insert(&mut self, index: usize, fragments: Vec<String>) -> bool {
        let index = index.min(self.fragments.len());
        self.fragments.splice(index..index, fragments);
        true
    }

    fn finish(&mut self) -> io::Result<String> {
        let document = self.fragments.concat();
        if let Some(destination) = self.destination.as_mut() {
            destination.write_all(document.as_bytes())?;
            destination.flush()?;
        }
        Ok(document)
    }
}

/// Writes each fragment to its writer as soon as it arrives
///
/// Write errors are kept and reported by [`Sink::finish`]; fragments after
/// the first failure are dropped.
pub struct PassThroughSink<W: Write> {
    destination: W,
    error: Option<io::Error>,
}

impl<W: Write> PassThroughSink<W> {
    /// Create a sink streaming to `destination`
    pub fn new(destination: W) -> Self {
        Self {
            destination,
            error: None,
        }
    }
}

impl<W: Write> Sink for PassThroughSink<W> {
    fn append(&mut self, fragment: &str) {
        if self.error.is_none() {
            if let Err(e) = self.destination.write_all(fragment.as_bytes()) {
                self.error = Some(e);
            }
        }
    }

    fn insert(&mut self, _index: usize, _fragments: Vec<String>) -> bool {
        false
    }

    fn finish(&mut self) -> io::Result<String> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.destination.flush()?;
        Ok(String::new())
    }
}
