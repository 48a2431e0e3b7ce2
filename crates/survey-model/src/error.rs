use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("duplicate field name in contract: {0}")]
    DuplicateField(String),
    #[error("field {field} declares min {min} greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },
    #[error("unknown quality flag label: {0}")]
    UnknownFlag(String),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
