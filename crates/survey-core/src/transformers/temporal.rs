use anyhow::Result;
use polars::prelude::DataFrame;

use crate::columns::{opt_string_column, set_opt_string_column};
use crate::config::CleaningContext;
use crate::datetime::standardize_datetime;
use crate::schema;

/// Rewrites the submission time as a fixed-width `YYYY-MM-DD HH:MM:SS`
/// string. Unparsable or null cells become null.
pub fn standardize_submit_time(df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
    let Some(source) = ctx.sources.get(schema::SUBMIT_TIME) else {
        return Ok(());
    };
    let values: Vec<Option<String>> = opt_string_column(df, source)?
        .into_iter()
        .map(|cell| cell.as_deref().and_then(standardize_datetime))
        .collect();
    set_opt_string_column(df, schema::SUBMIT_TIME, values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame};

    use super::*;
    use crate::config::CleaningConfig;

    #[test]
    fn legacy_column_is_standardized() {
        let mut df = DataFrame::new(vec![Column::new(
            "提交时间".into(),
            [
                Some("2024/01/16 14:20:00"),
                Some("invalid"),
                None,
                Some("2024-01-18"),
            ],
        )])
        .unwrap();
        let config = CleaningConfig::standard();
        let ctx = CleaningContext::new(&config, &df);
        standardize_submit_time(&mut df, &ctx).unwrap();

        let values = opt_string_column(&df, schema::SUBMIT_TIME).unwrap();
        assert_eq!(values[0].as_deref(), Some("2024-01-16 14:20:00"));
        assert_eq!(values[1], None);
        assert_eq!(values[2], None);
        assert_eq!(values[3].as_deref(), Some("2024-01-18 00:00:00"));
    }

    #[test]
    fn missing_source_is_a_no_op() {
        let mut df = DataFrame::new(vec![Column::new("年龄".into(), ["28"])]).unwrap();
        let config = CleaningConfig::standard();
        let ctx = CleaningContext::new(&config, &df);
        standardize_submit_time(&mut df, &ctx).unwrap();
        assert!(df.column(schema::SUBMIT_TIME).is_err());
    }
}
