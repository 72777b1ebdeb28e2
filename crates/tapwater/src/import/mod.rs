//! CSV import of city water records.

mod normalizer;
mod parser;

pub use normalizer::slugify;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::assessment::validation::validate_identity;
use crate::assessment::{AssessmentError, CityWaterRecord, WaterQualityAssessor};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    InvalidRecord {
        line: usize,
        source: AssessmentError,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read city export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid city CSV data: {}", err),
            ImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: could not parse {} from '{}'",
                line, field, value
            ),
            ImportError::InvalidRecord { line, source } => {
                write!(f, "line {}: rejected city record: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidField { .. } => None,
            ImportError::InvalidRecord { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads city exports, one city per row. Empty cells are absent readings, never zero.
pub struct CityRecordImporter;

impl CityRecordImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        assessor: &WaterQualityAssessor,
    ) -> Result<Vec<CityWaterRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, assessor)
    }

    /// Every row must assess cleanly; the first bad row aborts the import. When a city
    /// appears twice the first row wins.
    pub fn from_reader<R: Read>(
        reader: R,
        assessor: &WaterQualityAssessor,
    ) -> Result<Vec<CityWaterRecord>, ImportError> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for row in parser::parse_rows(reader)? {
            let invalid = |source: AssessmentError| ImportError::InvalidRecord {
                line: row.line,
                source,
            };
            validate_identity(&row.record).map_err(|err| invalid(err.into()))?;
            assessor.assess(&row.record).map_err(invalid)?;

            let key = row.record.key();
            if !seen.insert(key.clone()) {
                warn!(city = %key, line = row.line, "ignoring duplicate city row");
                continue;
            }
            records.push(row.record);
        }

        info!(records = records.len(), "imported city records");
        Ok(records)
    }
}
