//! Source-column aliasing.
//!
//! Raw exports name columns in Chinese, earlier cleaning runs leave them
//! canonical. Every stage resolves its input through one alias table so the
//! lookup order lives in exactly one place: legacy names first, canonical
//! output name as the fallback.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::schema;

/// Acceptable source columns for one canonical field, in lookup order.
#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub canonical: &'static str,
    pub sources: &'static [&'static str],
}

/// The alias table injected through [`CleaningConfig`](crate::CleaningConfig).
#[derive(Debug, Clone)]
pub struct SourceAliases {
    entries: Vec<AliasEntry>,
}

impl SourceAliases {
    /// The standard survey-export table.
    pub fn standard() -> Self {
        let entries = [
            (schema::ID, &["id"] as &[&str]),
            (schema::SUBMIT_TIME, &["提交时间", "submit_time"]),
            (schema::AGE, &["年龄", "age"]),
            (schema::TOTAL_EXP, &["工作年限", "total_exp"]),
            (schema::OVERALL_SATIS, &["满意度", "overall_satis"]),
            (schema::WORKLOAD, &["工作负荷", "workload"]),
            (schema::TENURE, &["任期", "tenure"]),
            (schema::MONTHLY_INCOME, &["月收入", "monthly_income"]),
            (schema::DEPT, &["所属部门", "dept"]),
            (schema::GENDER, &["性别", "gender"]),
            (schema::EDU, &["教育程度", "edu"]),
            (schema::EMP_STATUS, &["雇佣状态", "emp_status"]),
            (schema::CITY, &["城市", "city"]),
            (schema::OTHER_NOTES, &["备注", "other_notes"]),
            (schema::BENEFITS_RAW, &["福利选项", "benefits_raw"]),
            (
                schema::BENEFIT_PENSION,
                &["养老金", "养老", "benefit_pension"],
            ),
            (
                schema::BENEFIT_ANNUAL_LEAVE,
                &["年假", "带薪年假", "benefit_annual_leave"],
            ),
            (
                schema::BENEFIT_HEALTH_INS,
                &["医疗", "医保", "医疗保险", "benefit_health_ins"],
            ),
            (
                schema::BENEFIT_OTHER,
                &["其他", "其他福利", "benefit_other"],
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(canonical, sources)| AliasEntry { canonical, sources })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Maps each canonical field to the first alias present in the frame.
    /// Resolved once per run; stages never probe the frame themselves.
    pub fn resolve(&self, df: &DataFrame) -> ResolvedSources {
        let mut map = BTreeMap::new();
        for entry in &self.entries {
            for source in entry.sources {
                if df.column(source).is_ok() {
                    map.insert(entry.canonical.to_string(), (*source).to_string());
                    break;
                }
            }
        }
        ResolvedSources { map }
    }
}

/// Canonical field name to actually-present source column.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSources {
    map: BTreeMap<String, String>,
}

impl ResolvedSources {
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.map.get(canonical).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame};

    use super::*;

    #[test]
    fn legacy_name_wins_over_canonical() {
        let df = DataFrame::new(vec![
            Column::new("年龄".into(), ["28"]),
            Column::new("age".into(), ["30"]),
        ])
        .unwrap();
        let resolved = SourceAliases::standard().resolve(&df);
        assert_eq!(resolved.get(schema::AGE), Some("年龄"));
    }

    #[test]
    fn canonical_name_is_the_fallback() {
        let df = DataFrame::new(vec![Column::new("age".into(), ["28"])]).unwrap();
        let resolved = SourceAliases::standard().resolve(&df);
        assert_eq!(resolved.get(schema::AGE), Some("age"));
    }

    #[test]
    fn absent_fields_stay_unresolved() {
        let df = DataFrame::new(vec![Column::new("age".into(), ["28"])]).unwrap();
        let resolved = SourceAliases::standard().resolve(&df);
        assert_eq!(resolved.get(schema::MONTHLY_INCOME), None);
        assert_eq!(resolved.get(schema::SUBMIT_TIME), None);
    }
}
