//! Duplicate submission marking.

use std::collections::HashSet;

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::columns::{has_column, set_bool_column, string_column};
use crate::schema;

/// Marks repeat submissions over the (submit_time, age, total_exp, dept)
/// key. The first row of each group keeps `is_duplicate = false`, every
/// later row with the same key is marked true. Row order decides, there is
/// no secondary sort. Null key cells compare equal to each other.
pub fn flag_duplicates(df: &mut DataFrame) -> Result<()> {
    let mut key_columns = Vec::new();
    for name in schema::DUPLICATE_KEY_COLUMNS {
        if has_column(df, name) {
            key_columns.push(string_column(df, name)?);
        }
    }
    let mut marks = vec![false; df.height()];
    if !key_columns.is_empty() {
        let mut seen: HashSet<String> = HashSet::with_capacity(df.height());
        for (idx, mark) in marks.iter_mut().enumerate() {
            let mut key = String::new();
            for column in &key_columns {
                key.push_str(&column[idx]);
                key.push('|');
            }
            *mark = !seen.insert(key);
        }
    }
    set_bool_column(df, schema::IS_DUPLICATE, marks)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, Column, DataFrame};

    use super::*;
    use crate::columns::truth_value;

    fn duplicate_marks(df: &DataFrame) -> Vec<bool> {
        let series = df.column(schema::IS_DUPLICATE).unwrap();
        (0..df.height())
            .map(|idx| truth_value(&series.get(idx).unwrap_or(AnyValue::Null)))
            .collect()
    }

    #[test]
    fn first_occurrence_is_never_marked() {
        let mut df = DataFrame::new(vec![
            Column::new(
                "submit_time".into(),
                ["2024-01-15 10:30:00", "2024-01-15 10:30:00", "2024-01-16 09:00:00"],
            ),
            Column::new("age".into(), [25.0, 25.0, 25.0]),
            Column::new("total_exp".into(), [3.0, 3.0, 3.0]),
            Column::new("dept".into(), ["研发", "研发", "研发"]),
        ])
        .unwrap();
        flag_duplicates(&mut df).unwrap();
        assert_eq!(duplicate_marks(&df), vec![false, true, false]);
    }

    #[test]
    fn any_differing_key_component_breaks_the_group() {
        let mut df = DataFrame::new(vec![
            Column::new(
                "submit_time".into(),
                ["2024-01-15 10:30:00", "2024-01-15 10:30:00"],
            ),
            Column::new("age".into(), [25.0, 26.0]),
            Column::new("total_exp".into(), [3.0, 3.0]),
            Column::new("dept".into(), ["研发", "研发"]),
        ])
        .unwrap();
        flag_duplicates(&mut df).unwrap();
        assert_eq!(duplicate_marks(&df), vec![false, false]);
    }

    #[test]
    fn null_key_cells_compare_equal() {
        let mut df = DataFrame::new(vec![
            Column::new("submit_time".into(), [None::<&str>, None, None]),
            Column::new("age".into(), [Some(25.0), Some(25.0), Some(30.0)]),
            Column::new("total_exp".into(), [None::<f64>, None, None]),
            Column::new("dept".into(), ["研发", "研发", "研发"]),
        ])
        .unwrap();
        flag_duplicates(&mut df).unwrap();
        assert_eq!(duplicate_marks(&df), vec![false, true, false]);
    }

    #[test]
    fn missing_key_columns_mark_nothing() {
        let mut df = DataFrame::new(vec![Column::new("备注".into(), ["a", "b"])]).unwrap();
        flag_duplicates(&mut df).unwrap();
        assert_eq!(duplicate_marks(&df), vec![false, false]);
    }

    #[test]
    fn empty_frame_gets_an_empty_mark_column() {
        let mut df =
            DataFrame::new(vec![Column::new("dept".into(), Vec::<String>::new())]).unwrap();
        flag_duplicates(&mut df).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.column(schema::IS_DUPLICATE).is_ok());
    }
}
