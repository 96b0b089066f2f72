//! State shared by every builder writing into one logical document
//!
//! Root and nested builders hold the same [`SharedContext`], so footnote
//! indices stay unique across sub-sections and every heading lands in one
//! table of contents. The sharing is single-threaded (`Rc<RefCell<_>>`).

use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::escape::{self, Escaper};
use crate::options::Options;
use crate::sink::Sink;
use std::cell::RefCell;
use std::rc::Rc;

/// Reference-counted handle to a document context
pub type SharedContext = Rc<RefCell<DocumentContext>>;

/// A heading recorded for the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Heading level, 1 to 6
    pub level: usize,
    /// Heading text as emitted
    pub text: String,
    /// Position among all headings of the document
    pub sequence_index: usize,
}

/// A footnote waiting to be rendered at the end of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    /// Number used in the `[^index]` marker
    pub index: usize,
    /// Footnote body
    pub reference_text: String,
}

/// Fragment sink, collaborators, and the bookkeeping rendered at finalization
pub struct DocumentContext {
    sink: Box<dyn Sink>,
    options: Options,
    diagnostics: Rc<dyn Diagnostics>,
    escaper: Escaper,
    footnote_index: usize,
    pending_footnotes: Vec<Footnote>,
    headers: Vec<HeaderEntry>,
}

impl DocumentContext {
    /// Create a context writing into `sink`
    pub fn new(options: Options, sink: Box<dyn Sink>) -> Self {
        Self {
            sink,
            options,
            diagnostics: Rc::new(LogDiagnostics),
            escaper: escape::html,
            footnote_index: 0,
            pending_footnotes: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Wrap the context for sharing between builders
    pub fn shared(self) -> SharedContext {
        Rc::new(RefCell::new(self))
    }

    /// Options the document was created with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Diagnostics collaborator used by every builder of the document
    pub fn diagnostics(&self) -> Rc<dyn Diagnostics> {
        Rc::clone(&self.diagnostics)
    }

    /// Replace the diagnostics collaborator for every builder of the document
    pub fn set_diagnostics(&mut self, diagnostics: Rc<dyn Diagnostics>) {
        self.diagnostics = diagnostics;
    }

    /// Escaping function applied to escapable text
    pub fn escaper(&self) -> Escaper {
        self.escaper
    }

    /// Replace the escaping function for every builder of the document
    pub fn set_escaper(&mut self, escaper: Escaper) {
        self.escaper = escaper;
    }

    pub(crate) fn sink_mut(&mut self) -> &mut dyn Sink {
        self.sink.as_mut()
    }

    /// Append a fragment to the document
    pub fn append(&mut self, fragment: &str) {
        self.sink.append(fragment);
    }

    /// Register a footnote and return its index
    pub fn push_footnote(&mut self, reference_text: &str) -> usize {
        self.footnote_index += 1;
        self.pending_footnotes.push(Footnote {
            index: self.footnote_index,
            reference_text: reference_text.to_string(),
        });
        self.footnote_index
    }

    /// Highest footnote index handed out so far
    pub fn footnote_index(&self) -> usize {
        self.footnote_index
    }

    /// Footnotes not yet rendered
    pub fn pending_footnotes(&self) -> &[Footnote] {
        &self.pending_footnotes
    }

    /// Remove and return the pending footnotes
    pub fn take_footnotes(&mut self) -> Vec<Footnote> {
        std::mem::take(&mut self.pending_footnotes)
    }

    /// Record a heading and return its sequence index
    pub fn push_header(&mut self, level: usize, text: &str) -> usize {
        let sequence_index = self.headers.len();
        self.headers.push(HeaderEntry {
            level,
            text: text.to_string(),
            sequence_index,
        });
        sequence_index
    }

    /// Headings recorded so far, in emission order
    pub fn headers(&self) -> &[HeaderEntry] {
        &self.headers
    }
}
