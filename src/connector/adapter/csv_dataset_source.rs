use std::path::PathBuf;

use tracing::debug;

use crate::application::DatasetSource;
use crate::domain::{Dataset, DomainError};

/// Reads a comma-separated file with a header row.
///
/// Rows shorter than the header are padded with empty cells; rows longer
/// than the header are rejected, as is a file without any columns.
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn error(&self, msg: impl std::fmt::Display) -> DomainError {
        DomainError::dataset_load(format!("{}: {}", self.path.display(), msg))
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<Dataset, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.error(e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.error(e))?
            .iter()
            .map(String::from)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(self.error("no columns to parse from file"));
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.error(e))?;
            if record.len() > headers.len() {
                return Err(self.error(format!(
                    "expected {} fields in data row {}, saw {}",
                    headers.len(),
                    i + 1,
                    record.len()
                )));
            }
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        debug!("Read {} rows from {}", rows.len(), self.path.display());

        Ok(Dataset::new(self.describe(), headers, rows))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_headers_and_rows() {
        let file = csv_file("location,size,price\nWhitefield,2 BHK,39.07\nUttarahalli,3 BHK,62\n");
        let dataset = CsvDatasetSource::new(file.path()).load().unwrap();

        assert_eq!(dataset.headers(), &["location", "size", "price"]);
        assert_eq!(dataset.shape(), (2, 3));
        assert_eq!(dataset.rows()[1][0], "Uttarahalli");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let file = csv_file("name,note\n\"Doe, Jane\",ok\n");
        let dataset = CsvDatasetSource::new(file.path()).load().unwrap();
        assert_eq!(dataset.rows()[0][0], "Doe, Jane");
    }

    #[test]
    fn short_rows_are_padded() {
        let file = csv_file("a,b,c\n1,2\n");
        let dataset = CsvDatasetSource::new(file.path()).load().unwrap();
        assert_eq!(dataset.rows()[0], vec!["1", "2", ""]);
    }

    #[test]
    fn long_rows_are_rejected() {
        let file = csv_file("a,b\n1,2,3\n");
        let err = CsvDatasetSource::new(file.path()).load().unwrap_err();
        assert!(err.is_dataset_load());
        assert!(err.to_string().contains("expected 2 fields"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvDatasetSource::new(dir.path().join("missing.csv"))
            .load()
            .unwrap_err();
        assert!(err.is_dataset_load());
    }

    #[test]
    fn empty_file_is_a_load_error() {
        let file = csv_file("");
        let err = CsvDatasetSource::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("no columns"));
    }
}
