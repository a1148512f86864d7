//! CSV dataset reader.
//!
//! Reads CSV data where the first row contains column names:
//! ```csv
//! title,year,price,active
//! Rust Programming,2024,19.99,true
//! Python Basics,,15.50,false
//! ```
//!
//! Each record becomes a [`Row`] in header order. Cells are kept as raw
//! text and empty cells become null. Type inference with
//! [`FieldValue::infer`] is opt-in and never applies to the reserved
//! content column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim, WriterBuilder};
use log::info;

use crate::document::converter::RowReader;
use crate::document::field_value::FieldValue;
use crate::document::normalizer::DEFAULT_CONTENT_FIELD;
use crate::document::row::Row;
use crate::error::{HastaError, Result};

/// A row reader for CSV files.
#[derive(Debug, Clone)]
pub struct CsvRowReader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Whether to infer typed values from cells
    infer_types: bool,
    /// Column whose cells always stay raw text
    reserved_field: String,
    /// Whether to allow records with differing field counts
    flexible: bool,
    /// Maximum number of rows to yield
    limit: Option<usize>,
}

impl Default for CsvRowReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowReader {
    /// Create a new CSV reader with comma delimiter.
    ///
    /// Cells are read verbatim: no trimming, no type inference.
    pub fn new() -> Self {
        CsvRowReader {
            delimiter: b',',
            trim: false,
            infer_types: false,
            reserved_field: DEFAULT_CONTENT_FIELD.to_string(),
            flexible: false,
            limit: None,
        }
    }

    /// Set a custom delimiter byte.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace from fields.
    ///
    /// Trimming never applies to the reserved column.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether to infer booleans and numbers from cells.
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Set the column that is always kept as raw text.
    pub fn with_reserved_field<S: Into<String>>(mut self, field: S) -> Self {
        self.reserved_field = field.into();
        self
    }

    /// Set whether to allow flexible field counts.
    ///
    /// Short records are padded with nulls; extra cells are dropped.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Only yield the first `limit` rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Read rows from any reader.
    pub fn rows_from_reader<R: Read>(&self, input: R) -> Result<CsvRows<R>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::Headers } else { Trim::None })
            .flexible(self.flexible)
            .from_reader(input);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(HastaError::invalid_row("CSV header is empty"));
        }

        let cells = headers
            .iter()
            .map(|header| {
                if *header == self.reserved_field {
                    CellMode::Raw
                } else {
                    CellMode::Parsed {
                        trim: self.trim,
                        infer: self.infer_types,
                    }
                }
            })
            .collect();

        Ok(CsvRows {
            headers,
            cells,
            records: reader.into_records(),
            remaining: self.limit,
        })
    }

    /// Read all rows from an in-memory CSV string.
    pub fn read_str(&self, input: &str) -> Result<Vec<Row>> {
        self.rows_from_reader(input.as_bytes())?.collect()
    }
}

impl RowReader for CsvRowReader {
    type Iter = CsvRows<File>;

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        let file = File::open(path.as_ref())?;
        self.rows_from_reader(file)
    }
}

/// How the cells of one column are turned into values.
#[derive(Debug, Clone, Copy)]
enum CellMode {
    Raw,
    Parsed { trim: bool, infer: bool },
}

impl CellMode {
    fn value(self, raw: &str) -> FieldValue {
        let cell = match self {
            CellMode::Parsed { trim: true, .. } => raw.trim(),
            _ => raw,
        };
        match self {
            CellMode::Parsed { infer: true, .. } => FieldValue::infer(cell),
            _ if cell.is_empty() => FieldValue::Null,
            _ => FieldValue::Text(cell.to_string()),
        }
    }
}

/// Iterator over the rows of a CSV source.
pub struct CsvRows<R> {
    headers: Vec<String>,
    cells: Vec<CellMode>,
    records: StringRecordsIntoIter<R>,
    remaining: Option<usize>,
}

impl<R> CsvRows<R> {
    /// Column names from the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let row = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record
                    .get(i)
                    .map_or(FieldValue::Null, |raw| self.cells[i].value(raw));
                (header.clone(), value)
            })
            .collect();

        Some(Ok(row))
    }
}

/// Copy the header and the first `limit` records of `input` into `output`.
///
/// Returns the number of records written.
pub fn sample_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    limit: usize,
) -> Result<usize> {
    let mut reader = ReaderBuilder::new().from_path(input.as_ref())?;
    let mut writer = WriterBuilder::new().from_path(output.as_ref())?;

    writer.write_record(reader.headers()?)?;

    let mut written = 0;
    for record in reader.records().take(limit) {
        writer.write_record(&record?)?;
        written += 1;
    }
    writer.flush()?;

    info!(
        "sampled {} records from {} into {}",
        written,
        input.as_ref().display(),
        output.as_ref().display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_basic_parsing() {
        let rows = CsvRowReader::new()
            .with_type_inference(true)
            .read_str("title,year,price\nRust Programming,2024,19.99")
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column_names(), vec!["title", "year", "price"]);
        assert_eq!(
            rows[0].get("title").unwrap().as_text(),
            Some("Rust Programming")
        );
        assert_eq!(rows[0].get("year"), Some(&FieldValue::Integer(2024)));
        assert_eq!(rows[0].get("price"), Some(&FieldValue::Float(19.99)));
    }

    #[test]
    fn test_csv_empty_fields_are_null() {
        let rows = CsvRowReader::new()
            .read_str("title,year,price\nRust Programming,,19.99")
            .unwrap();
        assert_eq!(rows[0].get("year"), Some(&FieldValue::Null));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let csv = r#"title,description
"Rust, Programming","A book about ""Rust"", the language""#;
        let rows = CsvRowReader::new().read_str(csv).unwrap();
        assert_eq!(
            rows[0].get("title").unwrap().as_text(),
            Some("Rust, Programming")
        );
        assert_eq!(
            rows[0].get("description").unwrap().as_text(),
            Some(r#"A book about "Rust", the language"#)
        );
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let rows = CsvRowReader::new()
            .with_delimiter(b'\t')
            .read_str("title\tyear\nRust\t2024")
            .unwrap();
        assert_eq!(rows[0].get("year").unwrap().as_text(), Some("2024"));

        let rows = CsvRowReader::new()
            .with_delimiter(b';')
            .read_str("title;note\nRust;a, b")
            .unwrap();
        assert_eq!(rows[0].get("note").unwrap().as_text(), Some("a, b"));
    }

    #[test]
    fn test_csv_trim() {
        let rows = CsvRowReader::new()
            .with_trim(true)
            .with_type_inference(true)
            .read_str("title, year, content\n  Rust Programming  , 2024 ,  raw  ")
            .unwrap();
        assert_eq!(
            rows[0].get("title").unwrap().as_text(),
            Some("Rust Programming")
        );
        assert_eq!(rows[0].get("year"), Some(&FieldValue::Integer(2024)));
        assert_eq!(rows[0].get("content").unwrap().as_text(), Some("  raw  "));
    }

    #[test]
    fn test_csv_cells_are_verbatim_by_default() {
        let rows = CsvRowReader::new()
            .read_str("code,price,flag,note\n007,1.50,TRUE,  padded  \n")
            .unwrap();
        let cells: Vec<Option<&str>> = ["code", "price", "flag", "note"]
            .iter()
            .map(|c| rows[0].get(c).and_then(FieldValue::as_text))
            .collect();
        assert_eq!(
            cells,
            vec![Some("007"), Some("1.50"), Some("TRUE"), Some("  padded  ")]
        );
    }

    #[test]
    fn test_csv_reserved_column_skips_inference() {
        let rows = CsvRowReader::new()
            .with_type_inference(true)
            .read_str("year,content\n2024,007\n2025,TRUE\n")
            .unwrap();
        assert_eq!(rows[0].get("year"), Some(&FieldValue::Integer(2024)));
        assert_eq!(rows[0].get("content").unwrap().as_text(), Some("007"));
        assert_eq!(rows[1].get("content").unwrap().as_text(), Some("TRUE"));

        let rows = CsvRowReader::new()
            .with_type_inference(true)
            .with_reserved_field("body")
            .read_str("body,content\n007,007\n")
            .unwrap();
        assert_eq!(rows[0].get("body").unwrap().as_text(), Some("007"));
        assert_eq!(rows[0].get("content"), Some(&FieldValue::Integer(7)));
    }

    #[test]
    fn test_csv_limit() {
        let rows = CsvRowReader::new()
            .with_limit(2)
            .read_str("n\n1\n2\n3\n4")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("n").unwrap().as_text(), Some("2"));
    }

    #[test]
    fn test_csv_field_count_mismatch() {
        let result = CsvRowReader::new().read_str("title,year,price\nRust Programming,2024");
        assert!(matches!(result, Err(HastaError::Csv(_))));
    }

    #[test]
    fn test_csv_flexible_pads_with_null() {
        let rows = CsvRowReader::new()
            .with_flexible(true)
            .read_str("title,year,price\nRust Programming,2024")
            .unwrap();
        assert_eq!(rows[0].get("price"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_csv_empty_input() {
        let result = CsvRowReader::new().read_str("");
        assert!(matches!(result, Err(HastaError::InvalidRow(_))));
    }

    #[test]
    fn test_csv_header_only() {
        let rows = CsvRowReader::new().read_str("title,year,price").unwrap();
        assert!(rows.is_empty());
    }
}
