use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};

/// Declared type of one expected output column, as written in the codebook.
///
/// The closed set covers everything the validator acts on; any other type
/// cell (e.g. a datetime format description) is carried verbatim so the
/// descriptor list round-trips the document without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    Text,
    Categorical,
    Binary,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Text => "text",
            FieldType::Categorical => "categorical",
            FieldType::Binary => "binary",
            FieldType::Other(raw) => raw.as_str(),
        }
    }

    /// True for the numeric declarations the schema check type-verifies.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraints parsed from the free-text constraint cell of the codebook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Constraints {
    pub fn has_range(&self) -> bool {
        self.min.is_some()
    }
}

/// Parsed specification of one expected output column.
///
/// Produced once per contract document and immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Raw source column described by the codebook, if the document names one.
    pub source: Option<String>,
    pub expected_type: FieldType,
    /// Reserved numeric sentinel meaning "respondent did not answer".
    pub missing_code: Option<i64>,
    pub constraints: Constraints,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, expected_type: FieldType) -> Self {
        Self {
            name: name.into(),
            source: None,
            expected_type,
            missing_code: None,
            constraints: Constraints::default(),
        }
    }

    pub fn required(&self) -> bool {
        self.constraints.required
    }
}

/// Enforce the descriptor-list invariants: unique names, min <= max.
///
/// The codebook parser upholds these on its own output; this is the guard for
/// spec lists assembled by hand.
pub fn validate_field_specs(specs: &[FieldSpec]) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(SurveyError::DuplicateField(spec.name.clone()));
        }
        if let (Some(min), Some(max)) = (spec.constraints.min, spec.constraints.max)
            && min > max
        {
            return Err(SurveyError::InvalidRange {
                field: spec.name.clone(),
                min,
                max,
            });
        }
    }
    Ok(())
}
