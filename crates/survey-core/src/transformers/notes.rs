use anyhow::Result;
use polars::prelude::DataFrame;

use crate::columns::{opt_string_column, set_string_column};
use crate::config::{CleaningContext, NotesRules};
use crate::schema;

/// Normalizes the free-text notes column. Bracket markers are stripped as
/// substrings first; what remains is checked against the placeholder list
/// and collapses to the empty string on a full match. Missing cells become
/// empty strings, never null.
pub fn standardize_notes(df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
    let values: Vec<String> = match ctx.sources.get(schema::OTHER_NOTES) {
        Some(source) => opt_string_column(df, source)?
            .into_iter()
            .map(|cell| clean_note(cell.as_deref().unwrap_or(""), &ctx.config.notes))
            .collect(),
        None => vec![String::new(); df.height()],
    };
    set_string_column(df, schema::OTHER_NOTES, values)?;
    Ok(())
}

fn clean_note(raw: &str, rules: &NotesRules) -> String {
    let mut value = raw.trim().to_string();
    for marker in &rules.strip_markers {
        value = value.replace(marker.as_str(), "");
    }
    let trimmed = value.trim();
    if rules.placeholders.iter().any(|p| p.as_str() == trimmed) {
        return String::new();
    }
    trimmed.to_string()
}
