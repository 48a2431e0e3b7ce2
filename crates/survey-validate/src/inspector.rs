//! Contract inspection of cleaned survey frames.
//!
//! The inspector runs three independent check groups against a frame:
//! schema compliance (column sets and declared types), data quality
//! (required fields, numeric ranges, missing-code bookkeeping) and the
//! hand-coded business rules. Every check group is a pure function of the
//! frame; nothing is mutated and nothing fails, violations surface as
//! issue strings in the result.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};

use survey_core::columns::{any_to_f64, format_numeric, has_column, opt_string_column, string_column};
use survey_core::schema;
use survey_model::{CheckResult, FieldSpec, FieldType, InspectionResult};

/// Column holding the free-text explanation for "other" departments. Only
/// checked when a frame carries it alongside the department column.
const OTHER_DEPT_SPECIFY: &str = "other_dept_specify";

/// Validates frames against a parsed field contract.
pub struct Inspector {
    specs: Vec<FieldSpec>,
}

impl Inspector {
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        Self { specs }
    }

    pub fn field_specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Column-set differences and declared-type mismatches.
    ///
    /// Only `integer` and `float` declarations are type-checked; an integer
    /// column that holds no values at all is exempt.
    pub fn check_schema(&self, df: &DataFrame) -> CheckResult {
        let mut issues = Vec::new();
        let mut checks = Vec::new();

        let expected: BTreeSet<&str> = self.specs.iter().map(|s| s.name.as_str()).collect();
        let actual: BTreeSet<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = expected
            .iter()
            .filter(|name| !actual.contains(**name))
            .copied()
            .collect();
        if !missing.is_empty() {
            issues.push(format!("缺失字段: {}", missing.join(", ")));
        }
        checks.push("缺失字段检查".to_string());

        let extra: Vec<&str> = actual
            .iter()
            .filter(|name| !expected.contains(name.as_str()))
            .map(String::as_str)
            .collect();
        if !extra.is_empty() {
            issues.push(format!("多余字段: {}", extra.join(", ")));
        }
        checks.push("多余字段检查".to_string());

        for spec in &self.specs {
            checks.push(format!("字段 {} 类型检查", spec.name));
            let Ok(column) = df.column(&spec.name) else {
                continue;
            };
            let dtype = column.dtype();
            match spec.expected_type {
                FieldType::Integer => {
                    let has_values = column.null_count() < column.len();
                    if !dtype.is_integer() && has_values {
                        issues.push(format!(
                            "字段 {} 类型应为 integer，实际为 {dtype}",
                            spec.name
                        ));
                    }
                }
                FieldType::Float => {
                    if !dtype.is_float() && !dtype.is_integer() {
                        issues.push(format!(
                            "字段 {} 类型应为 float，实际为 {dtype}",
                            spec.name
                        ));
                    }
                }
                _ => {}
            }
        }

        CheckResult::from_parts(issues, checks)
    }

    /// Required-field nulls, numeric range violations and missing-code
    /// bookkeeping entries.
    pub fn check_data_quality(&self, df: &DataFrame) -> CheckResult {
        let mut issues = Vec::new();
        let mut checks = Vec::new();

        for spec in &self.specs {
            if !spec.constraints.required {
                continue;
            }
            if let Ok(column) = df.column(&spec.name) {
                let nulls = column.null_count();
                if nulls > 0 {
                    issues.push(format!("必填字段 {} 有 {nulls} 个空值", spec.name));
                }
            }
            checks.push(format!("必填字段 {}", spec.name));
        }

        for spec in &self.specs {
            let Some(min) = spec.constraints.min else {
                continue;
            };
            let Ok(column) = df.column(&spec.name) else {
                continue;
            };
            let max = spec.constraints.max;
            let mut out_of_range = 0usize;
            for idx in 0..df.height() {
                let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) else {
                    continue;
                };
                if let Some(code) = spec.missing_code
                    && value == code as f64
                {
                    continue;
                }
                if value < min || max.is_some_and(|m| value > m) {
                    out_of_range += 1;
                }
            }
            if out_of_range > 0 {
                let max_str = max.map_or_else(|| "∞".to_string(), format_numeric);
                issues.push(format!(
                    "字段 {} 有 {out_of_range} 个值超出范围 [{}, {max_str}]",
                    spec.name,
                    format_numeric(min)
                ));
            }
            checks.push(format!("字段 {} 范围检查", spec.name));
        }

        for spec in &self.specs {
            if spec.missing_code.is_none() {
                continue;
            }
            let Ok(column) = df.column(&spec.name) else {
                continue;
            };
            let dtype = column.dtype();
            if dtype.is_integer() || dtype.is_float() {
                // Sentinel occurrences are expected, the entry only records
                // that the column was looked at.
                checks.push(format!("字段 {} 缺失编码检查", spec.name));
            }
        }

        CheckResult::from_parts(issues, checks)
    }

    /// Hand-coded rules tied to known column names. Each rule only runs
    /// when the frame carries the columns it reads.
    pub fn check_business_rules(&self, df: &DataFrame) -> CheckResult {
        let mut issues = Vec::new();
        let mut checks = Vec::new();

        if has_column(df, schema::DEPT) && has_column(df, OTHER_DEPT_SPECIFY)
            && let (Ok(depts), Ok(specify)) = (
                string_column(df, schema::DEPT),
                opt_string_column(df, OTHER_DEPT_SPECIFY),
            )
        {
            let invalid = depts
                .iter()
                .zip(&specify)
                .filter(|(dept, note)| {
                    dept.as_str() != "其他"
                        && note
                            .as_deref()
                            .is_some_and(|n| !n.is_empty() && n != "-99")
                })
                .count();
            if invalid > 0 {
                issues.push(format!("有 {invalid} 行：非其他部门但填写了说明"));
            }
            checks.push("部门与说明一致性".to_string());
        }

        if has_column(df, schema::OVERALL_SATIS) {
            let invalid = self.count_outside(df, schema::OVERALL_SATIS, 1.0, 5.0);
            if invalid > 0 {
                issues.push(format!("满意度有 {invalid} 个超出 1-5 范围的值"));
            }
            checks.push("满意度范围检查".to_string());
        }

        if has_column(df, schema::WORKLOAD) {
            let invalid = self.count_outside(df, schema::WORKLOAD, 1.0, 10.0);
            if invalid > 0 {
                issues.push(format!("工作负荷有 {invalid} 个超出 1-10 范围的值"));
            }
            checks.push("工作负荷范围检查".to_string());
        }

        let benefit_columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name.starts_with("benefit_") && name.as_str() != schema::BENEFITS_RAW)
            .collect();
        for name in benefit_columns {
            let Ok(column) = df.column(&name) else {
                continue;
            };
            let mut invalid = 0usize;
            for idx in 0..df.height() {
                match any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) {
                    Some(v) if v == 0.0 || v == 1.0 => {}
                    _ => invalid += 1,
                }
            }
            if invalid > 0 {
                issues.push(format!("字段 {name} 有 {invalid} 个非 0/1 的值"));
            }
            checks.push(format!("{name} 值检查"));
        }

        CheckResult::from_parts(issues, checks)
    }

    /// Runs all three groups and aggregates the summary.
    pub fn inspect(&self, df: &DataFrame) -> InspectionResult {
        let schema_compliance = self.check_schema(df);
        let data_quality = self.check_data_quality(df);
        let business_rules = self.check_business_rules(df);
        InspectionResult::new(
            self.specs.len(),
            schema_compliance,
            data_quality,
            business_rules,
        )
    }

    /// Non-null values outside `[lo, hi]`, excluding the field's declared
    /// missing-code sentinel.
    fn count_outside(&self, df: &DataFrame, name: &str, lo: f64, hi: f64) -> usize {
        let missing_code = self
            .specs
            .iter()
            .find(|spec| spec.name == name)
            .and_then(|spec| spec.missing_code);
        let Ok(column) = df.column(name) else {
            return 0;
        };
        let mut invalid = 0usize;
        for idx in 0..df.height() {
            let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) else {
                continue;
            };
            if let Some(code) = missing_code
                && value == code as f64
            {
                continue;
            }
            if value < lo || value > hi {
                invalid += 1;
            }
        }
        invalid
    }
}
