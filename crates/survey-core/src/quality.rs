//! Record quality flagging.
//!
//! Every record carries exactly one flag. Rules are evaluated in descending
//! precedence and the first matching rule wins:
//!
//! 1. duplicate record
//! 2. test data (department equals the test marker)
//! 3. anomaly (age over 70 or workload over 10)
//! 4. income missing
//! 5. key fields missing (satisfaction or workload null)
//! 6. logic check: student (non-employee, under 18)
//! 7. logic check: retiree (non-employee, 60 or older)
//!
//! The two logic checks only fire when the previous row's employment status
//! was not "non-employee". The check therefore depends on input row order,
//! and consecutive non-employee rows after the first pass unflagged.

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame};

use survey_model::QualityFlag;

use crate::columns::{
    has_column, numeric_column_f64, set_string_column, string_column, truth_value,
};
use crate::schema;

/// Row-indexed snapshot of the columns the flag rules read.
pub struct QualityContext {
    income: Vec<Option<f64>>,
    satisfaction: Vec<Option<f64>>,
    workload: Vec<Option<f64>>,
    age: Vec<Option<f64>>,
    emp_status: Vec<String>,
    dept: Vec<String>,
    duplicate: Vec<bool>,
}

impl QualityContext {
    /// Snapshots the typed columns; a column absent from the frame reads as
    /// all-null (numeric), all-empty (categorical) or all-false (duplicate).
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            income: optional_f64(df, schema::MONTHLY_INCOME)?,
            satisfaction: optional_f64(df, schema::OVERALL_SATIS)?,
            workload: optional_f64(df, schema::WORKLOAD)?,
            age: optional_f64(df, schema::AGE)?,
            emp_status: optional_strings(df, schema::EMP_STATUS)?,
            dept: optional_strings(df, schema::DEPT)?,
            duplicate: optional_bools(df, schema::IS_DUPLICATE)?,
        })
    }

    /// Resolves the flag for one row, first matching rule wins.
    pub fn resolve(&self, idx: usize) -> QualityFlag {
        if self.duplicate[idx] {
            return QualityFlag::Duplicate;
        }
        if self.dept[idx] == schema::TEST_DEPT_LABEL {
            return QualityFlag::TestData;
        }
        let age = self.age[idx];
        let workload = self.workload[idx];
        if age.is_some_and(|v| v > 70.0) || workload.is_some_and(|v| v > 10.0) {
            return QualityFlag::Anomaly;
        }
        if self.income[idx].is_none() {
            return QualityFlag::IncomeMissing;
        }
        if self.satisfaction[idx].is_none() || workload.is_none() {
            return QualityFlag::KeyFieldsMissing;
        }
        if self.non_employee(idx) && !self.previous_non_employee(idx) {
            if age.is_some_and(|v| v < 18.0) {
                return QualityFlag::LogicStudent;
            }
            if age.is_some_and(|v| v >= 60.0) {
                return QualityFlag::LogicRetiree;
            }
        }
        QualityFlag::Normal
    }

    fn non_employee(&self, idx: usize) -> bool {
        self.emp_status[idx] == schema::NON_EMPLOYEE_LABEL
    }

    fn previous_non_employee(&self, idx: usize) -> bool {
        idx > 0 && self.emp_status[idx - 1] == schema::NON_EMPLOYEE_LABEL
    }
}

/// Writes the `data_quality_flag` column from the frame's typed columns.
pub fn assign_quality_flags(df: &mut DataFrame) -> Result<()> {
    let context = QualityContext::from_frame(df)?;
    let flags: Vec<String> = (0..df.height())
        .map(|idx| context.resolve(idx).to_string())
        .collect();
    set_string_column(df, schema::DATA_QUALITY_FLAG, flags)?;
    Ok(())
}

fn optional_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if has_column(df, name) {
        numeric_column_f64(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

fn optional_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    if has_column(df, name) {
        string_column(df, name)
    } else {
        Ok(vec![String::new(); df.height()])
    }
}

fn optional_bools(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    if !has_column(df, name) {
        return Ok(vec![false; df.height()]);
    }
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(truth_value(&series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
