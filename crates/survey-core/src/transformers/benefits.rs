use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame};

use crate::columns::{set_bool_column, string_column, truth_value};
use crate::config::CleaningContext;
use crate::schema;

/// Populates the four benefit boolean columns. A direct source column wins;
/// otherwise the raw multi-select column is scanned for the configured
/// keyword; otherwise the column is false for every row, never null.
pub fn derive_benefit_columns(df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
    let multiselect = ctx.sources.get(schema::BENEFITS_RAW);
    for rule in &ctx.config.benefit_rules {
        let values: Vec<bool> = if let Some(source) = ctx.sources.get(&rule.field) {
            truth_column(df, source)?
        } else if let (Some(raw_col), Some(keyword)) =
            (multiselect, rule.multiselect_keyword.as_deref())
        {
            string_column(df, raw_col)?
                .iter()
                .map(|cell| cell.contains(keyword))
                .collect()
        } else {
            vec![false; df.height()]
        };
        set_bool_column(df, &rule.field, values)?;
    }
    Ok(())
}

fn truth_column(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(truth_value(&series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
