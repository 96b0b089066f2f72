//! Incremental Markdown document builder
//!
//! [`MarkdownBuilder`] appends formatted fragments to a shared document and,
//! on [`MarkdownBuilder::finish`], renders the deferred parts (footnotes and
//! the table of contents) before handing the text to its sink.
//!
//! Every construct is assembled from two primitives, [`MarkdownBuilder::write_fragment`]
//! and [`MarkdownBuilder::write_line`], so escaping is decided in one place.

use crate::context::{DocumentContext, SharedContext};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::error::MarkdownError;
use crate::escape::Escaper;
use crate::inline;
use crate::options::{Options, WriteMode};
use crate::sink::{BufferedSink, PassThroughSink, Sink};
use crate::toc;
use log::Level;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::rc::Rc;

/// Markdown hard line break: two spaces and a newline
pub const HARD_BREAK: &str = "  \n";

/// Lowest heading level
pub const MIN_HEADER_LEVEL: usize = 1;

/// Highest heading level
pub const MAX_HEADER_LEVEL: usize = 6;

const HORIZONTAL_RULE: &str = "---";
const SINGLE_LINE_BLOCKQUOTE: &str = "> ";
const MULTILINE_BLOCKQUOTE: &str = ">>>";
const CODE_FENCE: &str = "```";

/// Builder emitting Markdown into a (possibly shared) document
pub struct MarkdownBuilder {
    context: SharedContext,
    root: bool,
}

impl MarkdownBuilder {
    /// Create a root builder that keeps the document in memory
    pub fn new(options: Options) -> Self {
        Self::with_sink(options, Box::new(BufferedSink::in_memory()))
    }

    /// Create a root builder writing to `writer`
    ///
    /// The sink follows `options.write_mode`: buffered documents are written
    /// once by [`MarkdownBuilder::finish`], immediate ones fragment by fragment.
    pub fn to_writer<W: Write + 'static>(options: Options, writer: W) -> Self {
        let sink: Box<dyn Sink> = match options.write_mode {
            WriteMode::Buffered => Box::new(BufferedSink::new(writer)),
            WriteMode::Immediate => Box::new(PassThroughSink::new(writer)),
        };
        Self::with_sink(options, sink)
    }

    /// Create a root builder around an arbitrary sink
    pub fn with_sink(options: Options, sink: Box<dyn Sink>) -> Self {
        Self {
            context: DocumentContext::new(options, sink).shared(),
            root: true,
        }
    }

    /// Create a nested builder writing into an existing document context
    ///
    /// Nested builders share footnote numbering, headings and output with
    /// every other builder holding the same context, including its
    /// diagnostics and escaper. They cannot finalize.
    pub fn nested(context: SharedContext) -> Self {
        Self {
            context,
            root: false,
        }
    }

    /// A nested builder for a sub-section of this document
    pub fn child(&self) -> Self {
        Self::nested(Rc::clone(&self.context))
    }

    /// Replace the diagnostics collaborator of the whole document
    ///
    /// The collaborator lives in the shared context, so children created
    /// before this call report into it as well.
    pub fn with_diagnostics(self, diagnostics: Rc<dyn Diagnostics>) -> Self {
        self.context.borrow_mut().set_diagnostics(diagnostics);
        self
    }

    /// Replace the escaping function applied to escapable text
    ///
    /// Shared with every builder of the document.
    pub fn with_escaper(self, escaper: Escaper) -> Self {
        self.context.borrow_mut().set_escaper(escaper);
        self
    }

    /// Handle to the shared document context
    pub fn context(&self) -> SharedContext {
        Rc::clone(&self.context)
    }

    /// Whether this builder owns finalization of the document
    pub fn is_root(&self) -> bool {
        self.root
    }

    pub(crate) fn report(&self, level: Level, message: &str) {
        // Release the borrow before reporting; a collaborator may inspect the context
        let diagnostics = self.context.borrow().diagnostics();
        diagnostics.report(level, message);
    }

    pub(crate) fn escaper(&self) -> Escaper {
        self.context.borrow().escaper()
    }

    fn encode<'a>(&self, text: &'a str, html_escape: bool) -> Cow<'a, str> {
        if html_escape {
            (self.escaper())(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn line_fragment(&self, text: &str, html_escape: bool) -> String {
        format!("{}{}", self.encode(text, html_escape), HARD_BREAK)
    }

    /// Append text without a line terminator
    pub fn write_fragment(&mut self, text: &str, html_escape: bool) {
        let fragment = self.encode(text, html_escape);
        self.context.borrow_mut().append(&fragment);
    }

    /// Append text followed by a hard line break
    pub fn write_line(&mut self, text: &str, html_escape: bool) {
        let fragment = self.line_fragment(text, html_escape);
        self.context.borrow_mut().append(&fragment);
    }

    /// Append only a hard line break
    pub fn line_break(&mut self) {
        self.context.borrow_mut().append(HARD_BREAK);
    }

    /// Bold text, optionally also written as a line
    pub fn add_bold(&mut self, text: &str, write_as_line: bool) -> String {
        self.emit_inline(inline::bold(text), write_as_line)
    }

    /// Italic text, optionally also written as a line
    pub fn add_italic(&mut self, text: &str, write_as_line: bool) -> String {
        self.emit_inline(inline::italic(text), write_as_line)
    }

    /// Bold and italic text, optionally also written as a line
    pub fn add_bold_italic(&mut self, text: &str, write_as_line: bool) -> String {
        self.emit_inline(inline::bold_italic(text), write_as_line)
    }

    fn emit_inline(&mut self, formatted: String, write_as_line: bool) -> String {
        if write_as_line {
            self.write_line(&formatted, true);
        }
        formatted
    }

    /// Link notation, see [`inline::link`]
    pub fn link(&self, text: &str, url: &str, title: Option<&str>) -> String {
        inline::link(text, url, title)
    }

    /// Image notation, see [`inline::image`]
    pub fn image(&self, uri: &str, alt_text: &str, title: Option<&str>) -> String {
        inline::image(uri, alt_text, title)
    }

    /// Blank line, rule marker, blank line
    pub fn add_horizontal_rule(&mut self) {
        self.write_line(&format!("\n{}\n", HORIZONTAL_RULE), true);
    }

    /// Fenced code block
    ///
    /// Backticks inside `text` are escaped so the content cannot close the
    /// fence. Fenced content is normally left unescaped (`escape_html = false`).
    pub fn add_code_block(&mut self, text: &str, syntax: Option<&str>, escape_html: bool) {
        let block = format!(
            "{fence}{}\n{}\n{fence}",
            syntax.unwrap_or(""),
            inline::escape_backticks(text),
            fence = CODE_FENCE
        );
        self.write_line(&block, escape_html);
    }

    /// Inline code span; written as a fragment when `write` is set
    pub fn add_inline_code(&mut self, text: &str, escape_html: bool, write: bool) -> String {
        let code = inline::code(text);
        if write {
            self.write_fragment(&code, escape_html);
        }
        code
    }

    /// `> text`, the text escaped before the marker is attached
    pub fn add_single_line_quote(&mut self, text: &str) {
        let quote = format!(
            "{}{}",
            SINGLE_LINE_BLOCKQUOTE,
            self.encode(text.trim(), true)
        );
        self.write_line(&quote, false);
    }

    /// Text between two `>>>` fences
    ///
    /// GitLab-only construct; nothing stops it being used for GitHub output.
    pub fn add_multi_line_quote(&mut self, text: &str) {
        let quote = format!(
            "{fence}\n{}\n{fence}",
            self.encode(text.trim(), true),
            fence = MULTILINE_BLOCKQUOTE
        );
        self.write_line(&quote, false);
    }

    /// ATX heading, recorded for the table of contents
    ///
    /// Levels outside 1 to 6 are clamped with a warning. A heading without
    /// text is still written but left out of the table of contents.
    pub fn add_header(&mut self, level: usize, text: &str) {
        let clamped = level.clamp(MIN_HEADER_LEVEL, MAX_HEADER_LEVEL);
        if clamped != level {
            self.report(
                Level::Warn,
                &format!("Invalid header level {}, using {}", level, clamped),
            );
        }

        let text = text.trim();
        let heading = format!("{} {}", "#".repeat(clamped), self.encode(text, true));
        self.write_line(&heading, false);

        if text.is_empty() {
            self.report(
                Level::Warn,
                "Empty header text, leaving it out of the table of contents",
            );
            return;
        }
        self.context.borrow_mut().push_header(clamped, text);
    }

    /// Register a footnote and return its `[^index]` marker
    ///
    /// The footnote body is written at the end of the document.
    pub fn add_footnote(&mut self, reference_text: &str) -> String {
        let index = self
            .context
            .borrow_mut()
            .push_footnote(reference_text.trim());
        format!("[^{}]", index)
    }

    /// Render footnotes and the table of contents and complete the document
    ///
    /// Returns the full document text for buffered documents and an empty
    /// string for immediate ones, whose text already went to the writer. Only
    /// the root builder may finalize.
    pub fn finish(mut self) -> Result<String, MarkdownError> {
        if !self.root {
            return Err(MarkdownError::NestedFinish);
        }

        self.write_footnotes();
        self.write_table_of_contents();

        let text = self.context.borrow_mut().sink_mut().finish()?;
        Ok(text)
    }

    fn write_footnotes(&mut self) {
        let footnotes = self.context.borrow_mut().take_footnotes();
        if footnotes.is_empty() {
            return;
        }

        self.line_break();
        for footnote in footnotes {
            let line = format!(
                "[^{}]: {}",
                footnote.index,
                self.encode(&footnote.reference_text, true)
            );
            self.write_line(&line, false);
        }
    }

    fn write_table_of_contents(&mut self) {
        let (enabled, position, headers) = {
            let ctx = self.context.borrow();
            (
                ctx.options().enable_toc,
                ctx.options().toc_position,
                ctx.headers().to_vec(),
            )
        };
        if !enabled || headers.is_empty() {
            return;
        }

        let mut fragments = vec![self.line_fragment(toc::TOC_TITLE, false)];
        fragments.extend(
            toc::render(&headers, self.escaper())
                .iter()
                .map(|line| self.line_fragment(line, false)),
        );
        fragments.push(HARD_BREAK.to_string());

        let inserted = self
            .context
            .borrow_mut()
            .sink_mut()
            .insert(position, fragments.clone());
        if !inserted {
            self.report(
                Level::Debug,
                "Body already streamed, appending table of contents at the end",
            );
            let mut ctx = self.context.borrow_mut();
            for fragment in &fragments {
                ctx.append(fragment);
            }
        }
    }
}

/// Write a document to its destination inside a scoped block
///
/// Opens the destination from `options`, runs `body`, then finalizes and
/// closes the file whether or not `body` failed. An error from `body` takes
/// precedence over a finalization error.
pub fn write_document<F, E>(options: Options, body: F) -> Result<(), E>
where
    F: FnOnce(&mut MarkdownBuilder) -> Result<(), E>,
    E: From<MarkdownError>,
{
    write_document_with(options, Rc::new(LogDiagnostics), body)
}

/// [`write_document`] with an explicit diagnostics collaborator
pub fn write_document_with<F, E>(
    options: Options,
    diagnostics: Rc<dyn Diagnostics>,
    body: F,
) -> Result<(), E>
where
    F: FnOnce(&mut MarkdownBuilder) -> Result<(), E>,
    E: From<MarkdownError>,
{
    let (path, defaulted) = options.destination_path();
    if defaulted {
        diagnostics.report(
            Level::Info,
            &format!(
                "No file location given. Using default '{}'. Overwriting existing file.",
                path.display()
            ),
        );
    }
    diagnostics.report(Level::Debug, &format!("Writing document to {}", path.display()));

    let file = File::create(&path).map_err(MarkdownError::from)?;
    let mut builder =
        MarkdownBuilder::to_writer(options, BufWriter::new(file)).with_diagnostics(diagnostics);

    let outcome = body(&mut builder);
    let finished = builder.finish();
    outcome?;
    finished.map(|_| ()).map_err(E::from)
}
