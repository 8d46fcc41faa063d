//! In-memory employee table for batch prediction.
//!
//! Cells are kept as the original text so columns the model does not use are
//! written back exactly as they were read.

use crate::error::{ChurnError, Result};
use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// A header row plus string cells, one `Vec` per data row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset, checking that every row matches the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(ChurnError::RaggedRow {
                row: idx + 1,
                found: row.len(),
                expected: headers.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Read a CSV file with a header row
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| ChurnError::CsvRead {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_reader(file, path)
    }

    /// Read CSV data from any reader; `source` names it in errors
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let read_err = |e: csv::Error| ChurnError::CsvRead {
            path: source.to_path_buf(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(read_err)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(ChurnError::EmptyCsv {
                path: source.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(path = %source.display(), columns = headers.len(), rows = rows.len(), "CSV loaded");
        Self::new(headers, rows)
    }

    /// Column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Trim whitespace from every column name, then apply `renames`.
    ///
    /// Renames are matched against the trimmed names.
    pub fn normalize_columns(&mut self, renames: &BTreeMap<String, String>) {
        for header in &mut self.headers {
            let trimmed = header.trim();
            let renamed = renames
                .get(trimmed)
                .map_or(trimmed, String::as_str)
                .to_string();
            if renamed != *header {
                debug!(from = %header, to = %renamed, "Column renamed");
                *header = renamed;
            }
        }
    }

    /// Remove rows identical in every cell to an earlier row.
    ///
    /// Keeps first occurrences in their original order and returns the
    /// number of rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }

    /// Set a column's values, replacing it when it already exists or
    /// appending it otherwise.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(ChurnError::LabelCount {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Write the table as CSV, replacing any existing file
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| ChurnError::CsvWrite {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        self.to_writer(file, path)
    }

    /// Write CSV to any writer; `target` names it in errors
    pub fn to_writer<W: Write>(&self, writer: W, target: &Path) -> Result<()> {
        let write_err = |e: csv::Error| ChurnError::CsvWrite {
            path: target.to_path_buf(),
            source: e,
        };

        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers).map_err(write_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(write_err)?;
        }
        writer.flush().map_err(|e| write_err(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn renames() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("Departments".to_string(), "departments".to_string());
        map
    }

    fn parse(text: &str) -> Dataset {
        Dataset::from_reader(text.as_bytes(), Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn test_read_csv_from_reader() {
        let dataset = parse("a,b\n1,2\n3,4\n");
        assert_eq!(dataset.headers(), &strings(&["a", "b"])[..]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1], strings(&["3", "4"]));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Dataset::from_reader("".as_bytes(), Path::new("empty.csv")).unwrap_err();
        assert!(matches!(err, ChurnError::EmptyCsv { .. }));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let err = Dataset::from_reader("a,b\n1,2\n3\n".as_bytes(), Path::new("ragged.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            ChurnError::RaggedRow {
                row: 2,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_normalize_trims_and_renames() {
        let mut dataset = parse(" salary ,Departments ,emp_id\nlow,sales,7\n");
        dataset.normalize_columns(&renames());
        assert_eq!(
            dataset.headers(),
            &strings(&["salary", "departments", "emp_id"])[..]
        );
    }

    #[test]
    fn test_drop_duplicates_keeps_first_occurrence() {
        let mut dataset = parse("a,b\n1,x\n2,y\n1,x\n3,z\n2,y\n");
        let removed = dataset.drop_duplicates();

        assert_eq!(removed, 2);
        let firsts: Vec<&str> = dataset.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(firsts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_set_column_appends_then_replaces() {
        let mut dataset = parse("a\n1\n2\n");
        dataset
            .set_column("Predicted_target", strings(&["Leave", "Stay"]))
            .unwrap();
        assert_eq!(dataset.headers(), &strings(&["a", "Predicted_target"])[..]);

        dataset
            .set_column("Predicted_target", strings(&["Stay", "Stay"]))
            .unwrap();
        assert_eq!(dataset.headers().len(), 2);
        assert_eq!(dataset.rows()[0], strings(&["1", "Stay"]));
    }

    #[test]
    fn test_set_column_rejects_wrong_length() {
        let mut dataset = parse("a\n1\n2\n");
        assert!(dataset.set_column("x", strings(&["only one"])).is_err());
    }

    #[test]
    fn test_written_csv_reads_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = parse("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\nLee,\n");

        dataset.write_csv(&path).unwrap();
        let reread = Dataset::read_csv(&path).unwrap();

        assert_eq!(reread, dataset);
    }
}
