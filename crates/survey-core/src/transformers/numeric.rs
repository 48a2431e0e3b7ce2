use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame};

use crate::columns::{any_to_f64, parse_f64, set_f64_column};
use crate::config::{CleaningContext, NumericRule};

/// Applies the configured numeric rules in their declared order. Each source
/// cell is stripped of decorations and coerced to `f64`; failures become
/// null. Out-of-range values are kept as-is, the quality flag reports them.
pub fn standardize_numeric_fields(df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
    for rule in &ctx.config.numeric_rules {
        let Some(source) = ctx.sources.get(&rule.field) else {
            continue;
        };
        let values = {
            let series = df.column(source)?;
            let mut values = Vec::with_capacity(df.height());
            for idx in 0..df.height() {
                let value = series.get(idx).unwrap_or(AnyValue::Null);
                values.push(clean_numeric_value(value, rule));
            }
            values
        };
        set_f64_column(df, &rule.field, values)?;
    }
    Ok(())
}

fn clean_numeric_value(value: AnyValue<'_>, rule: &NumericRule) -> Option<f64> {
    let parsed = match value {
        AnyValue::Null => None,
        AnyValue::String(s) => clean_numeric_text(s, rule),
        AnyValue::StringOwned(s) => clean_numeric_text(&s, rule),
        other => any_to_f64(other),
    };
    match parsed {
        Some(v) if rule.negative_to_null && v < 0.0 => None,
        other => other,
    }
}

fn clean_numeric_text(raw: &str, rule: &NumericRule) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || rule.null_tokens.iter().any(|t| t.as_str() == trimmed) {
        return None;
    }
    if rule.zero_tokens.iter().any(|t| t.as_str() == trimmed) {
        return Some(0.0);
    }
    let mut cleaned = trimmed.to_string();
    for token in &rule.strip_tokens {
        cleaned = cleaned.replace(token.as_str(), "");
    }
    let cleaned = cleaned.trim();
    if rule.thousands_suffix
        && let Some(stem) = cleaned.strip_suffix(['K', 'k'])
    {
        return parse_f64(stem).map(|v| v * 1000.0);
    }
    parse_f64(cleaned)
}
