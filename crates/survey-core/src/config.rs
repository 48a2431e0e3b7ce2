//! Injected cleaning configuration.
//!
//! Mapping tables, numeric cleaning rules, benefit sources and notes rules
//! are plain data handed to the pipeline, never globals. `CleaningConfig::standard()`
//! carries the tables recovered from the production survey exports.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use crate::aliases::{ResolvedSources, SourceAliases};
use crate::schema;

/// One categorical mapping: a lookup table plus the two defaults that make
/// the transform total.
#[derive(Debug, Clone)]
pub struct ValueMap {
    map: HashMap<String, String>,
    missing_sentinel: String,
    fallback: String,
}

impl ValueMap {
    pub fn new<const N: usize>(
        pairs: [(&str, &str); N],
        missing_sentinel: &str,
        fallback: &str,
    ) -> Self {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            missing_sentinel: missing_sentinel.to_string(),
            fallback: fallback.to_string(),
        }
    }

    /// Total mapping: null takes the missing sentinel's lookup, any key
    /// absent from the table lands on the catch-all.
    pub fn apply(&self, raw: Option<&str>) -> String {
        let key = raw.unwrap_or(self.missing_sentinel.as_str());
        self.map
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Declarative cleaning rule for one numeric field.
#[derive(Debug, Clone)]
pub struct NumericRule {
    pub field: String,
    /// Unit suffixes and decorations removed as substrings.
    pub strip_tokens: Vec<String>,
    /// Full-value placeholders that mean "no answer".
    pub null_tokens: Vec<String>,
    /// Full-value placeholders that mean zero.
    pub zero_tokens: Vec<String>,
    /// `15K` style thousands abbreviations.
    pub thousands_suffix: bool,
    /// Negative parsed values become null after coercion.
    pub negative_to_null: bool,
}

impl NumericRule {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            strip_tokens: Vec::new(),
            null_tokens: Vec::new(),
            zero_tokens: Vec::new(),
            thousands_suffix: false,
            negative_to_null: false,
        }
    }

    pub fn strip(mut self, tokens: &[&str]) -> Self {
        self.strip_tokens = tokens.iter().map(|t| (*t).to_string()).collect();
        self
    }

    pub fn nulls(mut self, tokens: &[&str]) -> Self {
        self.null_tokens = tokens.iter().map(|t| (*t).to_string()).collect();
        self
    }

    pub fn zeros(mut self, tokens: &[&str]) -> Self {
        self.zero_tokens = tokens.iter().map(|t| (*t).to_string()).collect();
        self
    }

    pub fn thousands(mut self) -> Self {
        self.thousands_suffix = true;
        self
    }

    pub fn drop_negative(mut self) -> Self {
        self.negative_to_null = true;
        self
    }
}

/// One benefit output column and the multi-select keyword that can stand in
/// for a direct source column.
#[derive(Debug, Clone)]
pub struct BenefitRule {
    pub field: String,
    pub multiselect_keyword: Option<String>,
}

impl BenefitRule {
    pub fn new(field: &str, multiselect_keyword: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            multiselect_keyword: multiselect_keyword.map(str::to_string),
        }
    }
}

/// Free-text notes cleanup rules.
#[derive(Debug, Clone)]
pub struct NotesRules {
    /// Removed as substrings, in order.
    pub strip_markers: Vec<String>,
    /// Full values mapped to the empty string after stripping.
    pub placeholders: Vec<String>,
}

/// Everything a cleaning run needs to know, injected as one immutable value.
#[derive(Debug, Clone)]
pub struct CleaningConfig {
    pub aliases: SourceAliases,
    pub dept: ValueMap,
    pub gender: ValueMap,
    pub edu: ValueMap,
    pub emp_status: ValueMap,
    pub city: ValueMap,
    pub numeric_rules: Vec<NumericRule>,
    pub benefit_rules: Vec<BenefitRule>,
    pub notes: NotesRules,
}

const SHARED_NULL_TOKENS: [&str; 3] = ["未知", "NULL", "N/A"];

impl CleaningConfig {
    /// Tables for the standard survey export.
    pub fn standard() -> Self {
        Self {
            aliases: SourceAliases::standard(),
            dept: ValueMap::new(
                [
                    ("生产", "生产"),
                    ("生产部", "生产"),
                    ("研发", "研发"),
                    ("研发部", "研发"),
                    ("R&D", "研发"),
                    ("销售", "销售"),
                    ("销售部", "销售"),
                    ("职能", "职能"),
                    ("职能部", "职能"),
                    ("管理", "管理"),
                    ("管理部", "管理"),
                    ("顾问", "其他"),
                    ("其他", "其他"),
                    ("测试部门", "测试部门"),
                ],
                "其他",
                "其他",
            ),
            gender: ValueMap::new(
                [
                    ("男", "male"),
                    ("male", "male"),
                    ("M", "male"),
                    ("1", "male"),
                    ("女", "female"),
                    ("female", "female"),
                    ("F", "female"),
                    ("2", "female"),
                    ("其他", "other"),
                    ("other", "other"),
                    ("未知", "unknown"),
                    ("unknown", "unknown"),
                ],
                "unknown",
                "unknown",
            ),
            edu: ValueMap::new(
                [
                    ("初中", "初中"),
                    ("高中", "高中"),
                    ("大专", "大专"),
                    ("本科", "本科"),
                    ("硕士", "硕士"),
                    ("MBA", "硕士"),
                    ("博士", "博士"),
                    ("其他", "其他"),
                    ("未知", "未知"),
                ],
                "未知",
                "其他",
            ),
            emp_status: ValueMap::new(
                [
                    ("在职", "在职"),
                    ("实习生", "实习生"),
                    ("返聘", "返聘"),
                    ("退休", "非员工"),
                    ("学生", "非员工"),
                    ("非员工", "非员工"),
                    ("其他", "其他"),
                    ("未知", "未知"),
                ],
                "未知",
                "其他",
            ),
            city: ValueMap::new(
                [
                    ("北京", "北京"),
                    ("Beijing", "北京"),
                    ("上海", "上海"),
                    ("Shanghai", "上海"),
                    ("shang hai", "上海"),
                    ("广州", "广州"),
                    ("深圳", "深圳"),
                    ("杭州", "杭州"),
                    ("成都", "成都"),
                    ("重庆", "重庆"),
                    ("其他城市", "其他城市"),
                    ("未知城市", "未知城市"),
                ],
                "未知城市",
                "未知城市",
            ),
            numeric_rules: vec![
                NumericRule::new(schema::AGE)
                    .strip(&["岁"])
                    .nulls(&SHARED_NULL_TOKENS),
                NumericRule::new(schema::TOTAL_EXP)
                    .strip(&["年"])
                    .nulls(&SHARED_NULL_TOKENS)
                    .zeros(&["刚入职"]),
                NumericRule::new(schema::OVERALL_SATIS)
                    .strip(&["分"])
                    .nulls(&SHARED_NULL_TOKENS),
                NumericRule::new(schema::WORKLOAD).nulls(&SHARED_NULL_TOKENS),
                NumericRule::new(schema::TENURE)
                    .strip(&["年"])
                    .nulls(&SHARED_NULL_TOKENS)
                    .zeros(&["刚入职"]),
                NumericRule::new(schema::MONTHLY_INCOME)
                    .strip(&["元"])
                    .nulls(&["保密", "—", "-", "未知", "NULL", "N/A"])
                    .thousands()
                    .drop_negative(),
            ],
            benefit_rules: vec![
                BenefitRule::new(schema::BENEFIT_PENSION, Some("五险一金")),
                BenefitRule::new(schema::BENEFIT_ANNUAL_LEAVE, Some("带薪年假")),
                BenefitRule::new(schema::BENEFIT_HEALTH_INS, Some("补充医疗")),
                BenefitRule::new(schema::BENEFIT_OTHER, None),
            ],
            notes: NotesRules {
                strip_markers: vec!["其他〖".to_string(), "〗".to_string()],
                placeholders: vec![
                    "—".to_string(),
                    "-".to_string(),
                    "nan".to_string(),
                    "NULL".to_string(),
                ],
            },
        }
    }

    /// The five categorical fields, in application order.
    pub fn categorical_fields(&self) -> [(&'static str, &ValueMap); 5] {
        [
            (schema::DEPT, &self.dept),
            (schema::GENDER, &self.gender),
            (schema::EDU, &self.edu),
            (schema::EMP_STATUS, &self.emp_status),
            (schema::CITY, &self.city),
        ]
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-run view handed to every pipeline step: the injected config plus the
/// source columns resolved once against the input frame.
pub struct CleaningContext<'a> {
    pub config: &'a CleaningConfig,
    pub sources: ResolvedSources,
}

impl<'a> CleaningContext<'a> {
    pub fn new(config: &'a CleaningConfig, df: &DataFrame) -> Self {
        Self {
            sources: config.aliases.resolve(df),
            config,
        }
    }
}
