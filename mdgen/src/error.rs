//! Error types for document building

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing a Markdown document
#[derive(Error, Debug)]
pub enum MarkdownError {
    /// Neither row elements nor records were given to a table call
    #[error("Invalid parameters for generating a new table: use either records or row elements")]
    MissingTableInput,

    /// Row elements were given without header names
    #[error("Row elements require header names to define the table width")]
    MissingHeaderNames,

    /// Table input does not have the shape the table emitter needs
    #[error("Table input has an unusable shape: {0}")]
    Shape(String),

    /// A nested builder tried to finalize the shared document
    #[error("Only the root builder can finalize a document")]
    NestedFinish,

    /// IO error when writing the destination
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Table data could not be loaded from a file
    #[error("Failed to load table data from {path}: {message}", path = .path.display())]
    Source {
        /// File that failed to load
        path: PathBuf,
        /// Reason reported by the reader
        message: String,
    },

    /// A document script could not be parsed
    #[error("Invalid document script: {0}")]
    Script(String),
}
