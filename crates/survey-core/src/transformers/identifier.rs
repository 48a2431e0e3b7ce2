use anyhow::Result;
use polars::prelude::DataFrame;

use crate::columns::{numeric_column_i64, set_i64_column};
use crate::config::CleaningContext;
use crate::schema;

/// Ensures an integer `id` column. Without a source column, rows get a
/// 1-based sequential id; an existing column is coerced cell by cell, with
/// unparsable values becoming null and non-sequential ids passing through.
pub fn assign_identifiers(df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
    let values: Vec<Option<i64>> = match ctx.sources.get(schema::ID) {
        Some(source) => numeric_column_i64(df, source)?,
        None => (1..=df.height() as i64).map(Some).collect(),
    };
    set_i64_column(df, schema::ID, values)?;
    Ok(())
}
