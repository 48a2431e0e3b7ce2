pub mod error;
pub mod field;
pub mod inspection;
pub mod quality;

pub use error::{Result, SurveyError};
pub use field::{Constraints, FieldSpec, FieldType, validate_field_specs};
pub use inspection::{CheckResult, CheckStatus, InspectionResult, InspectionSummary};
pub use quality::QualityFlag;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn check_result_status_from_issues() {
        let clean = CheckResult::from_parts(vec![], vec!["field age range check".to_string()]);
        assert_eq!(clean.status, CheckStatus::Pass);
        assert!(clean.passed());

        let dirty = CheckResult::from_parts(
            vec!["missing columns: age".to_string()],
            vec!["field age range check".to_string()],
        );
        assert_eq!(dirty.status, CheckStatus::Fail);
        assert_eq!(dirty.issue_count(), 1);
    }

    #[test]
    fn inspection_summary_counts_fields_and_checks() {
        let schema = CheckResult::from_parts(vec!["extra columns: junk".to_string()], vec![]);
        let quality = CheckResult::from_parts(
            vec![],
            vec!["required id".to_string(), "range age".to_string()],
        );
        let business = CheckResult::from_parts(
            vec!["workload out of range: 2 value(s)".to_string()],
            vec!["workload range".to_string()],
        );
        let result = InspectionResult::new(5, schema, quality, business);
        assert_eq!(result.summary.total_checks, 5 + 2 + 1);
        assert_eq!(result.summary.total_issues, 2);
        assert!(!result.passed());
    }

    #[test]
    fn quality_flag_precedence_ordering() {
        assert!(QualityFlag::Duplicate > QualityFlag::TestData);
        assert!(QualityFlag::TestData > QualityFlag::Anomaly);
        assert!(QualityFlag::Anomaly > QualityFlag::IncomeMissing);
        assert!(QualityFlag::IncomeMissing > QualityFlag::KeyFieldsMissing);
        assert!(QualityFlag::KeyFieldsMissing > QualityFlag::LogicStudent);
        assert!(QualityFlag::LogicStudent > QualityFlag::LogicRetiree);
        assert!(QualityFlag::LogicRetiree > QualityFlag::Normal);
    }

    #[test]
    fn quality_flag_labels_round_trip() {
        let flags = [
            QualityFlag::Normal,
            QualityFlag::LogicRetiree,
            QualityFlag::LogicStudent,
            QualityFlag::KeyFieldsMissing,
            QualityFlag::IncomeMissing,
            QualityFlag::Anomaly,
            QualityFlag::TestData,
            QualityFlag::Duplicate,
        ];
        for flag in flags {
            assert_eq!(QualityFlag::from_str(flag.as_str()).expect("label"), flag);
        }
        assert!(QualityFlag::from_str("无效标签").is_err());
    }

    #[test]
    fn validate_field_specs_rejects_duplicates() {
        let specs = vec![
            FieldSpec::new("age", FieldType::Float),
            FieldSpec::new("age", FieldType::Integer),
        ];
        assert!(matches!(
            validate_field_specs(&specs),
            Err(SurveyError::DuplicateField(name)) if name == "age"
        ));
    }

    #[test]
    fn validate_field_specs_rejects_inverted_range() {
        let mut spec = FieldSpec::new("age", FieldType::Float);
        spec.constraints.min = Some(200.0);
        spec.constraints.max = Some(16.0);
        assert!(matches!(
            validate_field_specs(&[spec]),
            Err(SurveyError::InvalidRange { .. })
        ));
    }

    #[test]
    fn inspection_result_serializes_uppercase_status() {
        let result = InspectionResult::new(
            1,
            CheckResult::from_parts(vec![], vec![]),
            CheckResult::from_parts(vec!["required id has 1 null value(s)".to_string()], vec![]),
            CheckResult::from_parts(vec![], vec![]),
        );
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["schema_compliance"]["status"], "PASS");
        assert_eq!(json["data_quality"]["status"], "FAIL");
        assert_eq!(json["summary"]["passed"], false);
        assert_eq!(json["summary"]["total_issues"], 1);
    }
}
