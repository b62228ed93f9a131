use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Unsupported statement file [{path}]: expected one of .xls, .xlsx")]
    UnsupportedExtension {
        path: PathBuf
    },
    #[error("Statement file [{path}] could not be opened: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error
    },
    #[error("Statement bytes could not be opened as a workbook: {0}")]
    OpenBytes(#[source] calamine::Error),
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error("First worksheet could not be read: {0}")]
    Worksheet(#[source] calamine::Error)
}

impl GridError {
    pub fn unsupported_extension(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedExtension { path: path.into() }
    }

    pub fn open(path: impl Into<PathBuf>, source: calamine::Error) -> Self {
        Self::Open { path: path.into(), source }
    }
}
