mod parser;

pub use parser::{RawEmployeeRow, RawExitSurveyRow, RawReviewRow, RawTable};

use crate::config::DataConfig;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ImportError::Csv(err) => write!(f, "invalid HR CSV data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// The three source tables, untouched apart from CSV decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    pub employees: RawTable<RawEmployeeRow>,
    pub performance: RawTable<RawReviewRow>,
    pub exit_surveys: RawTable<RawExitSurveyRow>,
}

pub struct DatasetImporter;

impl DatasetImporter {
    pub fn from_config(config: &DataConfig) -> Result<RawDataset, ImportError> {
        Self::from_paths(
            config.employee_path(),
            config.performance_path(),
            config.exit_survey_path(),
        )
    }

    pub fn from_paths<P: AsRef<Path>>(
        employees: P,
        performance: P,
        exit_surveys: P,
    ) -> Result<RawDataset, ImportError> {
        let dataset = Self::from_readers(
            open(employees.as_ref())?,
            open(performance.as_ref())?,
            open(exit_surveys.as_ref())?,
        )?;

        info!(
            employees = dataset.employees.len(),
            performance = dataset.performance.len(),
            exit_surveys = dataset.exit_surveys.len(),
            "loaded raw HR datasets"
        );

        Ok(dataset)
    }

    pub fn from_readers<E: Read, P: Read, X: Read>(
        employees: E,
        performance: P,
        exit_surveys: X,
    ) -> Result<RawDataset, ImportError> {
        Ok(RawDataset {
            employees: Self::employees(employees)?,
            performance: Self::performance(performance)?,
            exit_surveys: Self::exit_surveys(exit_surveys)?,
        })
    }

    pub fn employees<R: Read>(reader: R) -> Result<RawTable<RawEmployeeRow>, ImportError> {
        Ok(parser::parse_table(reader)?)
    }

    pub fn performance<R: Read>(reader: R) -> Result<RawTable<RawReviewRow>, ImportError> {
        Ok(parser::parse_table(reader)?)
    }

    pub fn exit_surveys<R: Read>(reader: R) -> Result<RawTable<RawExitSurveyRow>, ImportError> {
        Ok(parser::parse_table(reader)?)
    }
}

fn open(path: &Path) -> Result<File, ImportError> {
    File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
