//! Table data loaded from files
//!
//! CSV files are read row-oriented with the first line as header names; JSON
//! files must hold an array of objects and are read record-oriented.

use crate::error::MarkdownError;
use crate::table::{Cell, TableRequest};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A table data file
#[derive(Debug, Clone)]
pub struct TableSource {
    /// Path to the data file
    pub path: PathBuf,

    /// Header names and rows from a CSV file
    pub rows: Option<(Vec<String>, Vec<Vec<Cell>>)>,

    /// Records from a JSON file
    pub records: Option<Vec<Value>>,
}

impl TableSource {
    /// Load a file, choosing the reader from the extension
    ///
    /// `.json` is read as records; anything else as CSV.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MarkdownError> {
        let path = path.as_ref().to_path_buf();
        let mut source = Self {
            path,
            rows: None,
            records: None,
        };

        let is_json = source
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            source.load_json()?;
        } else {
            source.load_csv()?;
        }
        Ok(source)
    }

    fn error(&self, message: impl ToString) -> MarkdownError {
        MarkdownError::Source {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn load_csv(&mut self) -> Result<(), MarkdownError> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.error(e))?;

        // Read the headers as the table header names
        let headers = reader.headers().map_err(|e| self.error(e))?;
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        // Read the data rows
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.error(e))?;
            let row: Vec<Cell> = record.iter().map(Cell::from).collect();
            rows.push(row);
        }

        self.rows = Some((header_row, rows));
        Ok(())
    }

    fn load_json(&mut self) -> Result<(), MarkdownError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| self.error(e))?;

        match value {
            Value::Array(records) => {
                self.records = Some(records);
                Ok(())
            }
            _ => Err(self.error("expected a JSON array of records")),
        }
    }

    /// Table request carrying the loaded data
    pub fn into_request(self) -> TableRequest {
        let mut request = TableRequest::new();
        if let Some((headers, rows)) = self.rows {
            request = request.headers(headers).rows(rows);
        }
        if let Some(records) = self.records {
            request = request.records(records);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,role\nAda,engineer\nGrace,admiral\n").unwrap();

        let source = TableSource::load(&path).unwrap();
        let (headers, rows) = source.rows.unwrap();
        assert_eq!(headers, vec!["name", "role"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], Cell::Scalar("admiral".to_string()));
        assert!(source.records.is_none());
    }

    #[test]
    fn test_load_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, r#"[{"name": "Ada"}, {"name": "Grace"}]"#).unwrap();

        let source = TableSource::load(&path).unwrap();
        assert_eq!(source.records.unwrap().len(), 2);
    }

    #[test]
    fn test_json_must_be_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.json");
        fs::write(&path, r#"{"name": "Ada"}"#).unwrap();

        let err = TableSource::load(&path).unwrap_err();
        assert!(matches!(err, MarkdownError::Source { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TableSource::load("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
