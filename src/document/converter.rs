//! Dataset readers that produce rows.
//!
//! This module provides a [`RowReader`] trait and the CSV implementation used
//! to load the datasets that get normalized and indexed.

use std::path::Path;

use crate::document::row::Row;
use crate::error::Result;

pub mod csv;

/// A trait for reading tabular files into row iterators.
///
/// # Example
///
/// ```no_run
/// use hasta::document::converter::RowReader;
/// use hasta::document::converter::csv::CsvRowReader;
///
/// let reader = CsvRowReader::new().with_limit(1000);
/// for row in reader.read("sample_data.csv").unwrap() {
///     let row = row.unwrap();
///     println!("{:?}", row.column_names());
/// }
/// ```
pub trait RowReader {
    /// The iterator type that yields rows.
    type Iter: Iterator<Item = Result<Row>>;

    /// Open a file and iterate over its rows.
    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter>;
}
