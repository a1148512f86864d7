//! Integration tests for dataset loading and document normalization.

use std::io::Write;

use hasta::document::converter::RowReader;
use hasta::document::converter::csv::{CsvRowReader, sample_csv};
use hasta::document::{DocumentNormalizer, FieldValue, Row, normalize};
use hasta::error::{HastaError, Result};
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_flattened_rows_from_csv() -> Result<()> {
    let file = csv_file("a,b,c\nSingapore,tourist,5\nx,,y\n");
    let rows = CsvRowReader::new()
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id, 0);
    assert_eq!(documents[0].content, "Singapore tourist 5");
    assert_eq!(documents[1].id, 1);
    assert_eq!(documents[1].content, "x y");

    Ok(())
}

#[test]
fn test_content_column_wins() -> Result<()> {
    let file = csv_file("title,content,year\nIgnored,Full article text,2014\n");
    let rows = CsvRowReader::new()
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let document = normalize(&rows[0], 0)?;

    assert_eq!(document.content, "Full article text");

    Ok(())
}

#[test]
fn test_content_column_is_verbatim() -> Result<()> {
    let file = csv_file("title,content\nx,007\ny,1.50\nz,  padded text  \nw,TRUE\nv,1e3\n");
    let rows = CsvRowReader::new()
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;
    let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();

    assert_eq!(contents, vec!["007", "1.50", "  padded text  ", "TRUE", "1e3"]);

    Ok(())
}

#[test]
fn test_content_column_is_verbatim_with_type_inference() -> Result<()> {
    let file = csv_file("year,content\n2024,007\n2025,  False  \n");
    let rows = CsvRowReader::new()
        .with_trim(true)
        .with_type_inference(true)
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;

    assert_eq!(rows[0].get("year"), Some(&FieldValue::Integer(2024)));
    assert_eq!(documents[0].content, "007");
    assert_eq!(documents[1].content, "  False  ");

    Ok(())
}

#[test]
fn test_flattened_cells_are_verbatim() -> Result<()> {
    let file = csv_file("code,price,flag,name\n007,1.50,TRUE,  padded  \n0010,-0.0,fAlSe,x\n");
    let rows = CsvRowReader::new()
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;

    assert_eq!(documents[0].content, "007 1.50 TRUE   padded  ");
    assert_eq!(documents[1].content, "0010 -0.0 fAlSe x");

    Ok(())
}

#[test]
fn test_empty_content_cell_falls_back_to_flattening() -> Result<()> {
    let file = csv_file("title,content\nOnly title,\n");
    let rows = CsvRowReader::new()
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;

    assert_eq!(rows[0].get("content"), Some(&FieldValue::Null));
    assert_eq!(normalize(&rows[0], 0)?.content, "Only title");

    Ok(())
}

#[test]
fn test_custom_reserved_field() -> Result<()> {
    let row = Row::new().with("body", "the body").with("title", "a title");
    let normalizer = DocumentNormalizer::new().with_reserved_field("body");

    assert_eq!(normalizer.normalize(&row, 3)?.content, "the body");
    assert_eq!(normalize(&row, 3)?.content, "the body a title");

    Ok(())
}

#[test]
fn test_row_limit_and_positions() -> Result<()> {
    let file = csv_file("n\n1\n2\n3\n4\n");
    let rows = CsvRowReader::new()
        .with_limit(2)
        .read(file.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;

    let ids: Vec<u64> = documents.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(documents[1].content, "2");

    Ok(())
}

#[test]
fn test_empty_row_fails_batch() {
    let rows = vec![Row::new().with("a", "x"), Row::new()];
    let result = DocumentNormalizer::default().normalize_rows(&rows);

    assert!(matches!(result, Err(HastaError::InvalidRow(_))));
}

#[test]
fn test_normalize_is_deterministic() -> Result<()> {
    let row = Row::new()
        .with("price", 19.99)
        .with("active", true)
        .with("missing", FieldValue::Null)
        .with("name", "Widget");

    let first = normalize(&row, 0)?;
    let second = normalize(&row, 0)?;

    assert_eq!(first, second);
    assert_eq!(first.content, "19.99 true Widget");

    Ok(())
}

#[test]
fn test_sample_then_normalize() -> Result<()> {
    let input = csv_file("title,year\nfirst,2001\nsecond,2002\nthird,2003\n");
    let output = NamedTempFile::new().unwrap();

    let written = sample_csv(input.path(), output.path(), 2)?;
    assert_eq!(written, 2);

    let rows = CsvRowReader::new()
        .read(output.path())?
        .collect::<Result<Vec<Row>>>()?;
    let documents = DocumentNormalizer::default().normalize_rows(&rows)?;
    let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(contents, vec!["first 2001", "second 2002"]);

    Ok(())
}
