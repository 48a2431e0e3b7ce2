use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Outcome of one check group: the checks that ran and the issues they found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub issues: Vec<String>,
    pub checks: Vec<String>,
}

impl CheckResult {
    /// Status derives from the issue list: any issue fails the group.
    pub fn from_parts(issues: Vec<String>, checks: Vec<String>) -> Self {
        let status = if issues.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };
        Self {
            status,
            issues,
            checks,
        }
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionSummary {
    pub total_checks: usize,
    pub passed: bool,
    pub total_issues: usize,
}

/// Aggregated inspection verdict over the three check groups.
///
/// Built fresh per inspection call and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionResult {
    pub schema_compliance: CheckResult,
    pub data_quality: CheckResult,
    pub business_rules: CheckResult,
    pub summary: InspectionSummary,
}

impl InspectionResult {
    /// `field_count` is the number of declared fields; the summary counts it
    /// in place of the schema group's own check list, alongside the quality
    /// and business check counts.
    pub fn new(
        field_count: usize,
        schema_compliance: CheckResult,
        data_quality: CheckResult,
        business_rules: CheckResult,
    ) -> Self {
        let total_issues = schema_compliance.issue_count()
            + data_quality.issue_count()
            + business_rules.issue_count();
        let total_checks =
            field_count + data_quality.check_count() + business_rules.check_count();
        let summary = InspectionSummary {
            total_checks,
            passed: total_issues == 0,
            total_issues,
        };
        Self {
            schema_compliance,
            data_quality,
            business_rules,
            summary,
        }
    }

    pub fn passed(&self) -> bool {
        self.summary.passed
    }
}
