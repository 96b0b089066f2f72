//! Document scripts
//!
//! A script is a TOML or JSON file listing content blocks in order:
//!
//! ```toml
//! [[blocks]]
//! kind = "header"
//! level = 1
//! text = "Release notes"
//!
//! [[blocks]]
//! kind = "table"
//! headers = ["Version", "Date"]
//! rows = [["1.0", "2024-01-01"]]
//! ```

use crate::builder::MarkdownBuilder;
use crate::error::MarkdownError;
use crate::source::TableSource;
use crate::table::{Alignment, Cell, TableRequest};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered list of blocks making up a document
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Blocks in document order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

fn yes() -> bool {
    true
}

fn center() -> String {
    Alignment::Center.as_str().to_string()
}

/// One content block of a script
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    /// Heading
    Header { level: usize, text: String },
    /// Text without a line terminator
    Text {
        text: String,
        #[serde(default = "yes")]
        escape: bool,
    },
    /// Text with a hard line break; no text gives a bare break
    Line {
        text: Option<String>,
        #[serde(default = "yes")]
        escape: bool,
    },
    /// Bold line
    Bold { text: String },
    /// Italic line
    Italic { text: String },
    /// Bold and italic line
    BoldItalic { text: String },
    /// Line holding a link
    Link {
        text: String,
        url: String,
        title: Option<String>,
    },
    /// Line holding an image
    Image {
        uri: String,
        alt: String,
        title: Option<String>,
    },
    /// Horizontal rule
    Rule,
    /// Fenced code block
    Code {
        text: String,
        syntax: Option<String>,
        #[serde(default)]
        escape: bool,
    },
    /// Inline code fragment
    InlineCode {
        text: String,
        #[serde(default)]
        escape: bool,
    },
    /// Single-line block quote
    Quote { text: String },
    /// `>>>` fenced block quote
    MultilineQuote { text: String },
    /// Line of text followed by a footnote marker
    Footnote { text: String, note: String },
    /// Pipe table, inline data or loaded from `source`
    Table {
        headers: Option<Vec<String>>,
        rows: Option<Vec<Vec<Value>>>,
        records: Option<Vec<Value>>,
        source: Option<PathBuf>,
        #[serde(default = "center")]
        align: String,
        #[serde(default = "yes")]
        escape: bool,
        #[serde(default)]
        capitalize: bool,
    },
}

impl Script {
    /// Read a script, JSON for `.json` files and TOML otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MarkdownError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| MarkdownError::Script(e.to_string()))
        } else {
            Self::parse_toml(&content)
        }
    }

    /// Parse a TOML script
    pub fn parse_toml(content: &str) -> Result<Self, MarkdownError> {
        toml::from_str(content).map_err(|e| MarkdownError::Script(e.to_string()))
    }

    /// Emit every block into `builder`
    ///
    /// Table `source` paths are resolved against `base_dir`.
    pub fn apply(&self, builder: &mut MarkdownBuilder, base_dir: &Path) -> Result<(), MarkdownError> {
        for block in &self.blocks {
            block.apply(builder, base_dir)?;
        }
        Ok(())
    }
}

impl Block {
    fn apply(&self, md: &mut MarkdownBuilder, base_dir: &Path) -> Result<(), MarkdownError> {
        match self {
            Block::Header { level, text } => md.add_header(*level, text),
            Block::Text { text, escape } => md.write_fragment(text, *escape),
            Block::Line { text, escape } => match text {
                Some(text) => md.write_line(text, *escape),
                None => md.line_break(),
            },
            Block::Bold { text } => {
                md.add_bold(text, true);
            }
            Block::Italic { text } => {
                md.add_italic(text, true);
            }
            Block::BoldItalic { text } => {
                md.add_bold_italic(text, true);
            }
            Block::Link { text, url, title } => {
                let link = md.link(text, url, title.as_deref());
                md.write_line(&link, false);
            }
            Block::Image { uri, alt, title } => {
                let image = md.image(uri, alt, title.as_deref());
                md.write_line(&image, false);
            }
            Block::Rule => md.add_horizontal_rule(),
            Block::Code {
                text,
                syntax,
                escape,
            } => md.add_code_block(text, syntax.as_deref(), *escape),
            Block::InlineCode { text, escape } => {
                md.add_inline_code(text, *escape, true);
            }
            Block::Quote { text } => md.add_single_line_quote(text),
            Block::MultilineQuote { text } => md.add_multi_line_quote(text),
            Block::Footnote { text, note } => {
                let marker = md.add_footnote(note);
                md.write_fragment(text, true);
                md.write_line(&marker, false);
            }
            Block::Table {
                headers,
                rows,
                records,
                source,
                align,
                escape,
                capitalize,
            } => {
                let mut request = match source {
                    Some(source) => TableSource::load(base_dir.join(source))?.into_request(),
                    None => TableRequest::new(),
                };
                if let Some(headers) = headers {
                    request = request.headers(headers.iter().cloned());
                }
                if let Some(rows) = rows {
                    request = request.rows(
                        rows.iter()
                            .map(|row| row.iter().map(Cell::from_json).collect::<Vec<_>>()),
                    );
                }
                if let Some(records) = records {
                    request = request.records(records.clone());
                }
                md.add_table(
                    request
                        .align(align)
                        .html_escape(*escape)
                        .capitalize_headers(*capitalize),
                )?;
            }
        }
        Ok(())
    }
}
