use thiserror::Error;

#[derive(Error, Debug)]
pub enum CasebackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid mapping: {0}")]
    Mapping(String),

    #[error("Trade error: {0}")]
    Trade(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CasebackError>;
