use anyhow::Result;
use polars::prelude::DataFrame;

use crate::columns::{opt_string_column, set_string_column};
use crate::config::CleaningContext;

/// Maps the five categorical fields through their value tables. Null cells
/// take the field's missing sentinel before lookup and unmapped values land
/// on the field's catch-all, so the output column never contains nulls.
pub fn standardize_categorical_fields(
    df: &mut DataFrame,
    ctx: &CleaningContext<'_>,
) -> Result<()> {
    for (field, map) in ctx.config.categorical_fields() {
        let Some(source) = ctx.sources.get(field) else {
            continue;
        };
        let values: Vec<String> = opt_string_column(df, source)?
            .into_iter()
            .map(|cell| map.apply(cell.as_deref()))
            .collect();
        set_string_column(df, field, values)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame};

    use super::*;
    use crate::columns::string_column;
    use crate::config::CleaningConfig;
    use crate::schema;

    fn run(df: &mut DataFrame) {
        let config = CleaningConfig::standard();
        let ctx = CleaningContext::new(&config, df);
        standardize_categorical_fields(df, &ctx).unwrap();
    }

    #[test]
    fn department_suffix_forms_collapse() {
        let mut df = DataFrame::new(vec![Column::new(
            "所属部门".into(),
            [Some("研发部"), Some("R&D"), Some("顾问"), None, Some("车间")],
        )])
        .unwrap();
        run(&mut df);
        let depts = string_column(&df, schema::DEPT).unwrap();
        assert_eq!(depts, vec!["研发", "研发", "其他", "其他", "其他"]);
    }

    #[test]
    fn gender_accepts_english_and_numeric_codes() {
        let mut df = DataFrame::new(vec![Column::new(
            "性别".into(),
            [Some("男"), Some("F"), Some("1"), None, Some("x")],
        )])
        .unwrap();
        run(&mut df);
        let genders = string_column(&df, schema::GENDER).unwrap();
        assert_eq!(genders, vec!["male", "female", "male", "unknown", "unknown"]);
    }

    #[test]
    fn city_keeps_its_own_catch_all() {
        let mut df = DataFrame::new(vec![Column::new(
            "城市".into(),
            [Some("shang hai"), Some("苏州"), None],
        )])
        .unwrap();
        run(&mut df);
        let cities = string_column(&df, schema::CITY).unwrap();
        assert_eq!(cities, vec!["上海", "未知城市", "未知城市"]);
    }

    #[test]
    fn employment_status_folds_students_and_retirees() {
        let mut df = DataFrame::new(vec![Column::new(
            "雇佣状态".into(),
            [Some("退休"), Some("学生"), Some("在职"), Some("自由职业")],
        )])
        .unwrap();
        run(&mut df);
        let statuses = string_column(&df, schema::EMP_STATUS).unwrap();
        assert_eq!(statuses, vec!["非员工", "非员工", "在职", "其他"]);
    }

    #[test]
    fn mapped_output_is_a_fixed_point() {
        let mut df = DataFrame::new(vec![Column::new(
            "edu".into(),
            [Some("MBA"), Some("本科"), None],
        )])
        .unwrap();
        run(&mut df);
        let first = string_column(&df, schema::EDU).unwrap();
        run(&mut df);
        let second = string_column(&df, schema::EDU).unwrap();
        assert_eq!(first, vec!["硕士", "本科", "未知"]);
        assert_eq!(first, second);
    }
}
