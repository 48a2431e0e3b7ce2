use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// Per-record data-quality verdict.
///
/// Variants are declared in ascending precedence so the derived ordering
/// matches the flag cascade: when a record satisfies several rules, the
/// greatest flag wins. The `as_str` labels are the wire contract stored in
/// the `data_quality_flag` output column and must not change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum QualityFlag {
    Normal,
    LogicRetiree,
    LogicStudent,
    KeyFieldsMissing,
    IncomeMissing,
    Anomaly,
    TestData,
    Duplicate,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::Normal => "正常",
            QualityFlag::LogicRetiree => "逻辑校验_退休",
            QualityFlag::LogicStudent => "逻辑校验_学生",
            QualityFlag::KeyFieldsMissing => "关键字段缺失",
            QualityFlag::IncomeMissing => "收入缺失",
            QualityFlag::Anomaly => "异常值_收入负数_工作负荷越界",
            QualityFlag::TestData => "测试数据",
            QualityFlag::Duplicate => "重复记录",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QualityFlag {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "正常" => Ok(QualityFlag::Normal),
            "逻辑校验_退休" => Ok(QualityFlag::LogicRetiree),
            "逻辑校验_学生" => Ok(QualityFlag::LogicStudent),
            "关键字段缺失" => Ok(QualityFlag::KeyFieldsMissing),
            "收入缺失" => Ok(QualityFlag::IncomeMissing),
            "异常值_收入负数_工作负荷越界" => Ok(QualityFlag::Anomaly),
            "测试数据" => Ok(QualityFlag::TestData),
            "重复记录" => Ok(QualityFlag::Duplicate),
            other => Err(SurveyError::UnknownFlag(other.to_string())),
        }
    }
}
