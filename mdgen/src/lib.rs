//! mdgen - incremental Markdown document builder
//!
//! Builds a GitHub/GitLab flavored Markdown document from a sequence of
//! content calls (headings, emphasis, links, images, rules, quotes, code
//! blocks, tables and footnotes) and writes it to a destination once the
//! document is finished.
//!
//! ```no_run
//! use mdgen::{write_document, MarkdownError, Options, TableRequest};
//!
//! write_document(Options::default(), |md| {
//!     md.add_header(1, "Inventory");
//!     md.add_table(
//!         TableRequest::new()
//!             .headers(["Item", "Count"])
//!             .rows(vec![vec!["bolts", "12"], vec!["nuts", "30"]]),
//!     )?;
//!     Ok::<(), MarkdownError>(())
//! })?;
//! # Ok::<(), MarkdownError>(())
//! ```

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod builder;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod escape;
pub mod inline;
pub mod options;
pub mod script;
pub mod sink;
pub mod source;
pub mod table;
pub mod toc;

pub use builder::{write_document, write_document_with, MarkdownBuilder};
pub use context::{DocumentContext, SharedContext};
pub use diagnostics::{Diagnostics, LogDiagnostics, RecordingDiagnostics};
pub use error::MarkdownError;
pub use options::{Flavor, Options, OptionsError, WriteMode};
pub use script::Script;
pub use sink::{BufferedSink, PassThroughSink, Sink};
pub use source::TableSource;
pub use table::{Alignment, Cell, TableRequest};
