use survey_codebook::parse_field_specs;
use survey_model::{FieldType, validate_field_specs};

const CODEBOOK: &str = include_str!("fixtures/codebook.md");

#[test]
fn reference_codebook_yields_all_fields() {
    let specs = parse_field_specs(CODEBOOK);
    assert_eq!(specs.len(), 20);
    validate_field_specs(&specs).expect("spec invariants");
    let names: Vec<&str> = specs.iter().map(|spec| spec.name.as_str()).collect();
    assert_eq!(names[0], "id");
    assert!(names.contains(&"overall_satis"));
    assert!(names.contains(&"data_quality_flag"));
}

#[test]
fn reference_codebook_types_codes_and_constraints() {
    let specs = parse_field_specs(CODEBOOK);
    let by_name = |name: &str| {
        specs
            .iter()
            .find(|spec| spec.name == name)
            .unwrap_or_else(|| panic!("field {name}"))
    };

    let id = by_name("id");
    assert_eq!(id.expected_type, FieldType::Integer);
    assert!(id.constraints.required);
    assert_eq!(id.missing_code, None);

    let age = by_name("age");
    assert_eq!(age.expected_type, FieldType::Float);
    assert_eq!(age.missing_code, Some(-99));
    assert_eq!(age.constraints.min, Some(16.0));
    assert_eq!(age.constraints.max, Some(100.0));

    let total_exp = by_name("total_exp");
    assert_eq!(total_exp.constraints.min, Some(0.0));
    assert_eq!(total_exp.constraints.max, Some(50.0));

    let satis = by_name("overall_satis");
    assert_eq!(satis.constraints.min, Some(1.0));
    assert_eq!(satis.constraints.max, Some(5.0));

    let workload = by_name("workload");
    assert_eq!(workload.missing_code, Some(-88));
    assert_eq!(workload.constraints.min, Some(1.0));
    assert_eq!(workload.constraints.max, Some(10.0));

    let income = by_name("monthly_income");
    assert_eq!(income.constraints.min, Some(0.0));
    assert_eq!(income.constraints.max, None);

    assert_eq!(
        by_name("submit_time").expected_type,
        FieldType::Other("datetime(YYYY-MM-DD HH:MM:SS)".to_string())
    );
    assert_eq!(by_name("benefit_pension").expected_type, FieldType::Binary);
    assert_eq!(by_name("gender").expected_type, FieldType::Categorical);
    assert_eq!(by_name("other_notes").expected_type, FieldType::Text);
}

#[test]
fn source_column_carried_through() {
    let specs = parse_field_specs(CODEBOOK);
    let age = specs.iter().find(|spec| spec.name == "age").expect("age");
    assert_eq!(age.source.as_deref(), Some("年龄"));
    let income = specs
        .iter()
        .find(|spec| spec.name == "monthly_income")
        .expect("income");
    assert_eq!(income.source.as_deref(), Some("月收入"));
}

#[test]
fn document_without_section_yields_empty_list() {
    let specs = parse_field_specs("# 标题\n\n正文，没有数据模型章节。\n");
    assert!(specs.is_empty());

    let specs = parse_field_specs("");
    assert!(specs.is_empty());
}

#[test]
fn parsing_stops_at_next_heading() {
    let doc = "\
## 数据模型

| 字段名 | 类型 |
|--------|------|
| `age` | float |

## 其他章节

| 字段名 | 类型 |
|--------|------|
| `ghost` | float |
";
    let specs = parse_field_specs(doc);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "age");
}

#[test]
fn malformed_rows_are_skipped() {
    let doc = "\
## 数据模型

| 字段名 | 类型 | 逻辑约束 |
|--------|------|----------|
| `age` | float | 必填 |
| 列数不足 | float |
|  | float | 必填 |
不是表格行
";
    let specs = parse_field_specs(doc);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "age");
    assert!(specs[0].constraints.required);
}

#[test]
fn duplicate_field_rows_keep_first_definition() {
    let doc = "\
## 数据模型

| 字段名 | 类型 | 缺失编码 |
|--------|------|----------|
| `age` | float | `-99` |
| `age` | integer | — |
";
    let specs = parse_field_specs(doc);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].expected_type, FieldType::Float);
    assert_eq!(specs[0].missing_code, Some(-99));
}

#[test]
fn table_before_section_is_ignored() {
    let doc = "\
## 引言

| 字段名 | 类型 |
|--------|------|
| `early` | float |

## 数据模型

| 字段名 | 类型 |
|--------|------|
| `age` | float |
";
    let specs = parse_field_specs(doc);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "age");
}
