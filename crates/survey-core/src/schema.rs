//! Canonical output schema shared by the pipeline stages.

pub const ID: &str = "id";
pub const SUBMIT_TIME: &str = "submit_time";
pub const AGE: &str = "age";
pub const TOTAL_EXP: &str = "total_exp";
pub const DEPT: &str = "dept";
pub const OVERALL_SATIS: &str = "overall_satis";
pub const WORKLOAD: &str = "workload";
pub const BENEFIT_PENSION: &str = "benefit_pension";
pub const BENEFIT_ANNUAL_LEAVE: &str = "benefit_annual_leave";
pub const BENEFIT_HEALTH_INS: &str = "benefit_health_ins";
pub const BENEFIT_OTHER: &str = "benefit_other";
pub const OTHER_NOTES: &str = "other_notes";
pub const GENDER: &str = "gender";
pub const EDU: &str = "edu";
pub const EMP_STATUS: &str = "emp_status";
pub const TENURE: &str = "tenure";
pub const MONTHLY_INCOME: &str = "monthly_income";
pub const CITY: &str = "city";
pub const IS_DUPLICATE: &str = "is_duplicate";
pub const DATA_QUALITY_FLAG: &str = "data_quality_flag";

/// Raw multi-select benefits column, kept only as a derivation source.
pub const BENEFITS_RAW: &str = "benefits_raw";

/// Department label identifying synthetic test submissions.
pub const TEST_DEPT_LABEL: &str = "测试部门";

/// Employment status shared by students and retirees after mapping.
pub const NON_EMPLOYEE_LABEL: &str = "非员工";

/// Output column order. Projection keeps exactly these, in this order.
pub const CANONICAL_COLUMNS: [&str; 20] = [
    ID,
    SUBMIT_TIME,
    AGE,
    TOTAL_EXP,
    DEPT,
    OVERALL_SATIS,
    WORKLOAD,
    BENEFIT_PENSION,
    BENEFIT_ANNUAL_LEAVE,
    BENEFIT_HEALTH_INS,
    BENEFIT_OTHER,
    OTHER_NOTES,
    GENDER,
    EDU,
    EMP_STATUS,
    TENURE,
    MONTHLY_INCOME,
    CITY,
    IS_DUPLICATE,
    DATA_QUALITY_FLAG,
];

/// Key tuple for duplicate detection, in comparison order.
pub const DUPLICATE_KEY_COLUMNS: [&str; 4] = [SUBMIT_TIME, AGE, TOTAL_EXP, DEPT];
