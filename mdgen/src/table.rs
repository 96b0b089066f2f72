//! Pipe tables
//!
//! A table is requested either row-oriented (header names plus rows of cells)
//! or record-oriented (a list of JSON objects whose keys become the header
//! names). Both shapes are resolved into rows of [`Cell`]s before any body row
//! is written, so there is a single cell renderer.

use crate::builder::MarkdownBuilder;
use crate::error::MarkdownError;
use itertools::Itertools;
use log::Level;
use serde_json::Value;

/// Separator placed after each item of a multi-line cell
pub const CELL_LINE_BREAK: &str = "<br> ";

/// Content of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Single value
    Scalar(String),
    /// Several values stacked inside one cell
    MultiLine(Vec<String>),
}

impl Cell {
    /// Convert a JSON value: arrays become multi-line cells, everything else a scalar
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Cell::MultiLine(items.iter().map(json_text).collect()),
            other => Cell::Scalar(json_text(other)),
        }
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Scalar(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Scalar(text.to_string())
    }
}

impl From<&String> for Cell {
    fn from(text: &String) -> Self {
        Cell::Scalar(text.clone())
    }
}

macro_rules! scalar_cell_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Cell {
                fn from(value: $ty) -> Self {
                    Cell::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_cell_from!(i32, i64, u32, u64, usize, f32, f64, bool, char);

impl<T: Into<String>> From<Vec<T>> for Cell {
    fn from(items: Vec<T>) -> Self {
        Cell::MultiLine(items.into_iter().map(Into::into).collect())
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        Cell::from_json(value)
    }
}

/// Column alignment of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// `:---`
    Left,
    /// `:---:`
    #[default]
    Center,
    /// `---:`
    Right,
}

impl Alignment {
    /// Parse `left`, `center` or `right`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// Name accepted by [`Alignment::parse`]
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Alignment::Left => ":---|",
            Alignment::Center => ":---:|",
            Alignment::Right => "---:|",
        }
    }

    /// Separator row for `columns` columns, e.g. `|:---:|:---:|`
    pub fn separator_row(self, columns: usize) -> String {
        format!("|{}", self.marker().repeat(columns))
    }
}

impl AsRef<str> for Alignment {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Input of one table call
#[derive(Debug, Clone)]
pub struct TableRequest {
    header_names: Option<Vec<String>>,
    rows: Option<Vec<Vec<Cell>>>,
    records: Option<Vec<Value>>,
    alignment: String,
    html_escape: bool,
    capitalize_headers: bool,
}

impl Default for TableRequest {
    fn default() -> Self {
        Self {
            header_names: None,
            rows: None,
            records: None,
            alignment: Alignment::Center.as_str().to_string(),
            html_escape: true,
            capitalize_headers: false,
        }
    }
}

impl TableRequest {
    /// Empty request: centered, escaped, no data yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Header names; they define the width of the table
    pub fn headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Row-oriented data
    pub fn rows<R, C, T>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        self.rows = Some(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }

    /// Record-oriented data; takes precedence over rows
    pub fn records(mut self, records: Vec<Value>) -> Self {
        self.records = Some(records);
        self
    }

    /// Alignment of every column; unknown values fall back to center
    pub fn align(mut self, alignment: impl AsRef<str>) -> Self {
        self.alignment = alignment.as_ref().to_string();
        self
    }

    /// Whether scalar cells are HTML-escaped
    pub fn html_escape(mut self, html_escape: bool) -> Self {
        self.html_escape = html_escape;
        self
    }

    /// Capitalize header names
    pub fn capitalize_headers(mut self, capitalize: bool) -> Self {
        self.capitalize_headers = capitalize;
        self
    }
}

enum TableBody {
    Rows(Vec<Vec<Cell>>),
    Records(Vec<Value>),
}

/// First character upper-cased, the rest lower-cased
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn record_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl MarkdownBuilder {
    /// Emit a pipe table
    ///
    /// Missing input (neither rows nor records) and rows without header names
    /// are returned as errors before anything is written. Every other problem
    /// is reported through the diagnostics collaborator and degrades the
    /// output instead: a record list without usable keys aborts the table
    /// after its leading blank line, over-long rows and non-object records are
    /// skipped, and an unknown alignment falls back to center.
    pub fn add_table(&mut self, request: TableRequest) -> Result<(), MarkdownError> {
        let TableRequest {
            header_names,
            rows,
            records,
            alignment,
            html_escape,
            capitalize_headers,
        } = request;
        let header_names = header_names.filter(|names| {
            if names.is_empty() {
                self.report(Level::Debug, "Empty header name list, treating it as absent");
            }
            !names.is_empty()
        });

        let body = match (rows, records) {
            (rows, Some(records)) => {
                if rows.is_some() {
                    self.report(
                        Level::Debug,
                        "Both row elements and records provided, using records",
                    );
                }
                TableBody::Records(records)
            }
            (Some(rows), None) => {
                if header_names.is_none() {
                    self.report(Level::Warn, "Row elements given without header names");
                    return Err(MarkdownError::MissingHeaderNames);
                }
                TableBody::Rows(rows)
            }
            (None, None) => {
                self.report(Level::Warn, "Invalid parameters for generating new table");
                return Err(MarkdownError::MissingTableInput);
            }
        };

        if header_names.is_some() {
            self.report(Level::Debug, "Header names provided, using them");
        } else {
            self.report(Level::Debug, "No header names provided, using record keys");
        }

        self.line_break();
        match self.emit_table(header_names, body, &alignment, html_escape, capitalize_headers) {
            Err(MarkdownError::Shape(message)) => {
                self.report(Level::Error, &format!("Table not generated: {}", message));
                Ok(())
            }
            other => other,
        }
    }

    fn emit_table(
        &mut self,
        header_names: Option<Vec<String>>,
        body: TableBody,
        alignment: &str,
        html_escape: bool,
        capitalize_headers: bool,
    ) -> Result<(), MarkdownError> {
        let headers = match header_names {
            Some(names) => names,
            None => record_keys(&body)?,
        };
        self.report(
            Level::Debug,
            &format!("Header names are: {}", headers.iter().join(", ")),
        );

        for header in &headers {
            let name = if capitalize_headers {
                capitalize(header)
            } else {
                header.clone()
            };
            self.write_fragment(&format!("| {} ", name), true);
        }
        self.write_line("|", true);

        let alignment = Alignment::parse(alignment).unwrap_or_else(|| {
            self.report(
                Level::Warn,
                &format!("Invalid alignment value '{}' for table, using center", alignment),
            );
            Alignment::Center
        });
        self.write_line(&alignment.separator_row(headers.len()), true);

        for row in self.resolve_body(body, headers.len()) {
            for cell in &row {
                self.write_cell(cell, html_escape);
            }
            self.write_line("|", true);
        }

        self.line_break();
        Ok(())
    }

    /// Turn either input shape into rows of cells, dropping unusable rows
    fn resolve_body(&self, body: TableBody, columns: usize) -> Vec<Vec<Cell>> {
        match body {
            TableBody::Rows(rows) => rows
                .into_iter()
                .filter(|row| {
                    let fits = row.len() <= columns;
                    if !fits {
                        self.report(
                            Level::Error,
                            &format!(
                                "There are more row elements than header names (Row: {} - Header: {}), skipping row",
                                row.len(),
                                columns
                            ),
                        );
                    }
                    fits
                })
                .collect(),
            TableBody::Records(records) => records
                .iter()
                .enumerate()
                .filter_map(|(position, record)| match record.as_object() {
                    Some(fields) => Some(fields.values().map(Cell::from_json).collect()),
                    None => {
                        self.report(
                            Level::Error,
                            &format!(
                                "Record {} is {}, not an object, skipping row",
                                position,
                                record_kind(record)
                            ),
                        );
                        None
                    }
                })
                .collect(),
        }
    }

    fn write_cell(&mut self, cell: &Cell, html_escape: bool) {
        match cell {
            Cell::Scalar(text) => self.write_fragment(&format!("| {} ", text), html_escape),
            Cell::MultiLine(items) => {
                self.write_fragment("| ", false);
                for item in items {
                    self.write_fragment(item, true);
                    self.write_fragment(CELL_LINE_BREAK, false);
                }
            }
        }
    }
}

/// Header names taken from the keys of the first record
fn record_keys(body: &TableBody) -> Result<Vec<String>, MarkdownError> {
    let records = match body {
        TableBody::Records(records) => records,
        TableBody::Rows(_) => return Err(MarkdownError::MissingHeaderNames),
    };
    let first = records
        .first()
        .ok_or_else(|| MarkdownError::Shape("record list is empty".to_string()))?;
    let fields = first.as_object().ok_or_else(|| {
        MarkdownError::Shape(format!(
            "first record is {}, not an object",
            record_kind(first)
        ))
    })?;
    Ok(fields.keys().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::options::Options;
    use serde_json::json;
    use std::rc::Rc;

    fn builder() -> (MarkdownBuilder, Rc<RecordingDiagnostics>) {
        let diagnostics = Rc::new(RecordingDiagnostics::new());
        let md = MarkdownBuilder::new(Options {
            enable_toc: false,
            ..Options::default()
        })
        .with_diagnostics(diagnostics.clone());
        (md, diagnostics)
    }

    fn render(request: TableRequest) -> (String, Rc<RecordingDiagnostics>) {
        let (mut md, diagnostics) = builder();
        md.add_table(request).unwrap();
        (md.finish().unwrap(), diagnostics)
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().map(str::trim_end).collect()
    }

    #[test]
    fn test_row_table_layout() {
        let (text, diagnostics) = render(
            TableRequest::new()
                .headers(["x", "y", "z"])
                .rows(vec![vec![1, 2, 3], vec![4, 5]]),
        );

        assert_eq!(
            text,
            "  \n| x | y | z |  \n|:---:|:---:|:---:|  \n| 1 | 2 | 3 |  \n| 4 | 5 |  \n  \n"
        );
        assert_eq!(diagnostics.count(Level::Error), 0);

        let header_row = lines(&text)[1];
        assert_eq!(header_row.matches('|').count(), 4);
        let separator = lines(&text)[2];
        assert_eq!(separator.matches(":---:").count(), 3);
    }

    #[test]
    fn test_pipe_counts_follow_header_width() {
        for width in 1..=4usize {
            let headers: Vec<String> = (0..width).map(|i| format!("h{}", i)).collect();
            let full: Vec<usize> = (0..width).collect();
            let short: Vec<usize> = (0..width.saturating_sub(1).max(1)).collect();
            let (text, diagnostics) =
                render(TableRequest::new().headers(headers).rows(vec![full, short]));

            let rows = lines(&text);
            assert_eq!(rows[1].matches('|').count(), width + 1, "header, width {}", width);
            assert_eq!(rows[2].matches(":---:").count(), width, "separator, width {}", width);
            assert_eq!(rows[2].matches('|').count(), width + 1, "separator, width {}", width);
            assert_eq!(rows[3].matches('|').count(), width + 1, "full row, width {}", width);
            assert_eq!(diagnostics.count(Level::Error), 0);
        }
    }

    #[test]
    fn test_empty_header_list_uses_record_keys() {
        let (text, _) = render(
            TableRequest::new()
                .headers(Vec::<String>::new())
                .records(vec![json!({"a": 1, "b": 2})]),
        );
        assert_eq!(lines(&text)[1], "| a | b |");
        assert_eq!(lines(&text)[3], "| 1 | 2 |");
    }

    #[test]
    fn test_rows_with_empty_header_list_is_an_error() {
        let (mut md, _) = builder();
        let result = md.add_table(
            TableRequest::new()
                .headers(Vec::<String>::new())
                .rows(vec![vec![1]]),
        );
        assert!(matches!(result, Err(MarkdownError::MissingHeaderNames)));
        assert_eq!(md.finish().unwrap(), "");
    }

    #[test]
    fn test_record_table_uses_first_record_keys() {
        let (text, _) = render(
            TableRequest::new().records(vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})]),
        );

        assert_eq!(
            lines(&text),
            vec!["", "| a | b |", "|:---:|:---:|", "| 1 | 2 |", "| 3 | 4 |", ""]
        );
    }

    #[test]
    fn test_record_keys_keep_insertion_order() {
        let (text, _) = render(TableRequest::new().records(vec![json!({"zeta": 1, "alpha": 2})]));
        assert_eq!(lines(&text)[1], "| zeta | alpha |");
    }

    #[test]
    fn test_explicit_headers_override_record_keys() {
        let (text, _) = render(
            TableRequest::new()
                .headers(["First", "Second"])
                .records(vec![json!({"a": "x", "b": "y"})]),
        );
        assert_eq!(lines(&text)[1], "| First | Second |");
        assert_eq!(lines(&text)[3], "| x | y |");
    }

    #[test]
    fn test_overlong_row_skipped_with_error() {
        let (text, diagnostics) = render(
            TableRequest::new()
                .headers(["x", "y"])
                .rows(vec![vec![1, 2], vec![3, 4, 5]]),
        );

        assert_eq!(
            lines(&text),
            vec!["", "| x | y |", "|:---:|:---:|", "| 1 | 2 |", ""]
        );
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_multi_line_cell_stays_in_one_cell() {
        let (text, _) = render(
            TableRequest::new()
                .headers(["items", "note"])
                .rows(vec![vec![Cell::from(vec!["a", "b"]), Cell::from("c")]]),
        );
        assert_eq!(lines(&text)[3], "| a<br> b<br> | c |");
    }

    #[test]
    fn test_record_array_becomes_multi_line_cell() {
        let (text, _) = render(TableRequest::new().records(vec![json!({"tags": ["x", "y"]})]));
        assert_eq!(lines(&text)[3], "| x<br> y<br> |");
    }

    #[test]
    fn test_scalar_escaping_follows_flag() {
        let request = || TableRequest::new().headers(["v"]).rows(vec![vec!["<b>&"]]);

        let (escaped, _) = render(request());
        assert_eq!(lines(&escaped)[3], "| &lt;b&gt;&amp; |");

        let (raw, _) = render(request().html_escape(false));
        assert_eq!(lines(&raw)[3], "| <b>& |");
    }

    #[test]
    fn test_alignment_rows() {
        let request = |align: Alignment| {
            TableRequest::new()
                .headers(["a", "b"])
                .rows(vec![vec!["1", "2"]])
                .align(align)
        };

        assert_eq!(lines(&render(request(Alignment::Left)).0)[2], "|:---|:---|");
        assert_eq!(lines(&render(request(Alignment::Right)).0)[2], "|---:|---:|");
        assert_eq!(lines(&render(request(Alignment::Center)).0)[2], "|:---:|:---:|");
    }

    #[test]
    fn test_unknown_alignment_falls_back_to_center() {
        let request = |align: &str| {
            TableRequest::new()
                .headers(["a", "b"])
                .rows(vec![vec!["1", "2"]])
                .align(align)
        };

        let (centered, quiet) = render(request("center"));
        let (fallback, diagnostics) = render(request("diagonal"));

        assert_eq!(centered, fallback);
        assert_eq!(quiet.count(Level::Warn), 0);
        assert_eq!(diagnostics.count(Level::Warn), 1);
    }

    #[test]
    fn test_capitalized_headers() {
        let (text, _) = render(
            TableRequest::new()
                .headers(["name", "AGE"])
                .rows(vec![vec!["Ada", "36"]])
                .capitalize_headers(true),
        );
        assert_eq!(lines(&text)[1], "| Name | Age |");
    }

    #[test]
    fn test_records_take_precedence_over_rows() {
        let (text, diagnostics) = render(
            TableRequest::new()
                .rows(vec![vec!["ignored"]])
                .records(vec![json!({"k": "used"})]),
        );
        assert_eq!(lines(&text)[3], "| used |");
        assert_eq!(diagnostics.count(Level::Error), 0);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let (mut md, _) = builder();
        let result = md.add_table(TableRequest::new().headers(["a"]));
        assert!(matches!(result, Err(MarkdownError::MissingTableInput)));
        assert_eq!(md.finish().unwrap(), "");
    }

    #[test]
    fn test_rows_without_headers_is_an_error() {
        let (mut md, _) = builder();
        let result = md.add_table(TableRequest::new().rows(vec![vec![1]]));
        assert!(matches!(result, Err(MarkdownError::MissingHeaderNames)));
    }

    #[test]
    fn test_non_object_first_record_aborts_table() {
        let (mut md, diagnostics) = builder();
        md.add_table(TableRequest::new().records(vec![json!(1), json!({"a": 2})]))
            .unwrap();
        md.write_line("after", true);

        assert_eq!(md.finish().unwrap(), "  \nafter  \n");
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_empty_record_list_aborts_table() {
        let (mut md, diagnostics) = builder();
        md.add_table(TableRequest::new().records(Vec::new())).unwrap();
        assert_eq!(md.finish().unwrap(), "  \n");
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_later_non_object_record_skipped() {
        let (text, diagnostics) = render(
            TableRequest::new().records(vec![json!({"a": 1}), json!("oops"), json!({"a": 3})]),
        );
        assert_eq!(
            lines(&text),
            vec!["", "| a |", "|:---:|", "| 1 |", "| 3 |", ""]
        );
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_cell_from_json() {
        assert_eq!(Cell::from_json(&json!("text")), Cell::Scalar("text".to_string()));
        assert_eq!(Cell::from_json(&json!(2.5)), Cell::Scalar("2.5".to_string()));
        assert_eq!(Cell::from_json(&json!(null)), Cell::Scalar(String::new()));
        assert_eq!(
            Cell::from_json(&json!([1, "two"])),
            Cell::MultiLine(vec!["1".to_string(), "two".to_string()])
        );
    }
}
