//! CSV loader for the survey dataset.

use crate::models::{Column, Response};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading the survey dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("invalid value in data row {row}")]
    InvalidRow {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
}

/// The survey responses, held in memory for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    responses: Vec<Response>,
    dropped_columns: Vec<String>,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        debug!(
            "Loaded {} responses from {}",
            dataset.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse the dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();

        for column in Column::ALL {
            if !headers.iter().any(|h| h == column.raw_name()) {
                return Err(DatasetError::MissingColumn(column.raw_name().to_string()));
            }
        }

        let dropped_columns: Vec<String> = headers
            .iter()
            .filter(|h| Column::from_raw(h).is_none())
            .map(String::from)
            .collect();

        if !dropped_columns.is_empty() {
            debug!("Dropping columns: {}", dropped_columns.join(", "));
        }

        let mut responses = Vec::new();
        for (index, record) in reader.deserialize::<Response>().enumerate() {
            let response = record.map_err(|source| DatasetError::InvalidRow {
                row: index + 1,
                source,
            })?;
            responses.push(response);
        }

        Ok(Self {
            responses,
            dropped_columns,
        })
    }

    /// Build a dataset from already-parsed responses.
    #[cfg(test)]
    pub fn from_responses(responses: Vec<Response>) -> Self {
        Self {
            responses,
            dropped_columns: Vec::new(),
        }
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<Response> {
        self.responses
    }

    /// Raw headers that were present in the file but are not part of the report.
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Non-missing values of a numeric column, in row order.
    pub fn values(&self, column: Column) -> Vec<f64> {
        self.responses
            .iter()
            .filter_map(|r| r.value(column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "timestamps,nome,email,melhor_praca,nota_parque_infantil,numero_filhos,nota_seguranca,nota_atividades";

    fn parse(body: &str) -> Result<Dataset, DatasetError> {
        let content = format!("{}\n{}", HEADER, body);
        Dataset::from_reader(content.as_bytes())
    }

    #[test]
    fn test_load_sample_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/survey_sample.csv");
        let dataset = Dataset::load(&path).unwrap();

        assert_eq!(dataset.len(), 16);
        assert_eq!(dataset.dropped_columns(), &["email".to_string()]);
        assert_eq!(dataset.responses()[0].preferred_park, "Parque Ecológico");
        assert_eq!(dataset.responses()[0].children, Some(2));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "2024-10-01,Ana,a@example.com,Praça Matriz,9,2,8,7").unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.responses()[0].safety_score, Some(8.0));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_empty_cells_are_missing_values() {
        let dataset = parse("2024-10-01,Ana,,Praça Matriz,,2, 8 ,\n").unwrap();
        let response = &dataset.responses()[0];

        assert_eq!(response.playground_score, None);
        assert_eq!(response.safety_score, Some(8.0));
        assert_eq!(response.activity_score, None);
        assert_eq!(dataset.values(Column::SafetyScore), vec![8.0]);
        assert!(dataset.values(Column::ActivityScore).is_empty());
    }

    #[test]
    fn test_email_column_is_optional() {
        let content = "timestamps,nome,melhor_praca,nota_parque_infantil,numero_filhos,nota_seguranca,nota_atividades\n\
                       2024-10-01,Ana,Praça Matriz,9,2,8,7\n";
        let dataset = Dataset::from_reader(content.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.dropped_columns().is_empty());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let content = "timestamps,nome,melhor_praca,nota_parque_infantil,numero_filhos,nota_seguranca\n\
                       2024-10-01,Ana,Praça Matriz,9,2,8\n";
        let err = Dataset::from_reader(content.as_bytes()).unwrap_err();

        match err {
            DatasetError::MissingColumn(name) => assert_eq!(name, "nota_atividades"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_score_is_an_error() {
        let err = parse("2024-10-01,Ana,,Praça Matriz,9,2,great,7\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_fractional_children_is_an_error() {
        let err = parse(
            "2024-10-01,Ana,,Praça Matriz,9,2,8,7\n2024-10-01,Bia,,Praça Matriz,9,1.5,8,7\n",
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_missing_markers_are_missing_values() {
        let dataset = parse(
            "2024-10-01,Ana,,Praça Matriz,9,1,8,7\n2024-10-01,Bia,,Praça Matriz,NaN,1,NA,null\n",
        )
        .unwrap();
        let response = &dataset.responses()[1];

        assert_eq!(response.playground_score, None);
        assert_eq!(response.safety_score, None);
        assert_eq!(response.activity_score, None);
        assert_eq!(dataset.values(Column::PlaygroundScore), vec![9.0]);
    }

    #[test]
    fn test_whole_float_children_are_accepted() {
        let dataset = parse(
            "2024-10-01,Ana,,Praça Matriz,9,2.0,8,7\n2024-10-01,Bia,,Praça Matriz,9,N/A,8,7\n",
        )
        .unwrap();
        assert_eq!(dataset.responses()[0].children, Some(2));
        assert_eq!(dataset.responses()[1].children, None);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let dataset = parse("").unwrap();
        assert!(dataset.is_empty());
    }
}
