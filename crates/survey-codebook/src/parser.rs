//! Codebook parsing: extracts the field-definition table from the data-model
//! section of a contract document.
//!
//! The document is markdown; the `## 数据模型` section carries one pipe table
//! whose header row contains the `字段名` column. Everything here degrades
//! instead of failing: a missing section, malformed row, or unparsable cell
//! produces fewer specs, never an error.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::warn;

use survey_model::{Constraints, FieldSpec, FieldType};

/// Heading that opens the data-model section.
pub const DATA_MODEL_HEADING: &str = "## 数据模型";
/// Header cell identifying the field table's header row.
pub const NAME_HEADER: &str = "字段名";

const SOURCE_HEADER: &str = "原始来源";
const TYPE_HEADER: &str = "类型";
const MISSING_HEADER: &str = "缺失编码";
const CONSTRAINT_HEADER: &str = "逻辑约束";

/// Parse the field-definition table out of a codebook document.
///
/// Returns one spec per well-formed table row, in document order. Duplicate
/// field names keep the first occurrence. An absent or malformed section
/// yields an empty list; the validator then reports every observed column as
/// extra relative to an empty expected set.
pub fn parse_field_specs(document: &str) -> Vec<FieldSpec> {
    let mut specs: Vec<FieldSpec> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut in_section = false;
    let mut headers: Option<Vec<String>> = None;

    for line in document.lines() {
        if line.contains(DATA_MODEL_HEADING) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if line.starts_with("##") && !line.contains("数据模型") {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            continue;
        }
        let cells = split_row(trimmed);
        if cells.iter().any(|cell| cell == NAME_HEADER) {
            headers = Some(cells);
            continue;
        }
        let Some(header_cells) = &headers else {
            continue;
        };
        if cells.len() != header_cells.len() {
            continue;
        }
        if cells.iter().any(|cell| cell.starts_with("---")) {
            continue;
        }
        let Some(spec) = parse_row(header_cells, &cells) else {
            continue;
        };
        if seen.insert(spec.name.clone()) {
            specs.push(spec);
        } else {
            warn!(field = %spec.name, "duplicate field name in codebook, keeping first definition");
        }
    }
    specs
}

/// Split a pipe row into trimmed cells, dropping the text outside the
/// first and last pipe.
fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').collect();
    if cells.len() < 2 {
        return Vec::new();
    }
    cells.remove(0);
    cells.pop();
    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}

fn parse_row(headers: &[String], cells: &[String]) -> Option<FieldSpec> {
    let name = extract_name(cells.first().map_or("", |cell| cell.as_str()));
    if name.is_empty() {
        return None;
    }
    let source = cell_for(headers, cells, SOURCE_HEADER).trim();
    Some(FieldSpec {
        name,
        source: if source.is_empty() {
            None
        } else {
            Some(source.to_string())
        },
        expected_type: parse_field_type(cell_for(headers, cells, TYPE_HEADER)),
        missing_code: parse_missing_code(cell_for(headers, cells, MISSING_HEADER)),
        constraints: parse_constraints(cell_for(headers, cells, CONSTRAINT_HEADER)),
    })
}

fn cell_for<'a>(headers: &[String], cells: &'a [String], header: &str) -> &'a str {
    headers
        .iter()
        .position(|h| h == header)
        .and_then(|idx| cells.get(idx))
        .map_or("", |cell| cell.as_str())
}

/// Field names are usually written in backticks; prefer that span, fall back
/// to the raw cell.
fn extract_name(cell: &str) -> String {
    if let Some(caps) = Regex::new(r"`([^`]+)`")
        .ok()
        .and_then(|re| re.captures(cell))
    {
        return caps[1].trim().to_string();
    }
    cell.trim().to_string()
}

/// Substring-based type canonicalization; cells outside the closed set are
/// carried verbatim.
fn parse_field_type(raw: &str) -> FieldType {
    let trimmed = raw.trim();
    if trimmed.contains("binary") {
        FieldType::Binary
    } else if trimmed.contains("text") {
        FieldType::Text
    } else if trimmed.contains("categorical") {
        FieldType::Categorical
    } else {
        match trimmed {
            "integer" => FieldType::Integer,
            "float" => FieldType::Float,
            other => FieldType::Other(other.to_string()),
        }
    }
}

/// An em-dash or empty cell means "no missing code"; anything that does not
/// parse as an integer degrades to the same.
fn parse_missing_code(raw: &str) -> Option<i64> {
    let cleaned = raw.replace('`', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "—" {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

fn parse_constraints(raw: &str) -> Constraints {
    let mut constraints = Constraints::default();
    if raw.contains("必填") {
        constraints.required = true;
    }
    if let Some(min) = capture_number(raw, r"≥(\d+)") {
        constraints.min = Some(min);
    }
    if let Some(max) = capture_number(raw, r"≤(\d+)") {
        constraints.max = Some(max);
    }
    // A bare min–max range only counts when no upper-bound token is present,
    // otherwise the max would be applied twice.
    if !raw.contains('≤')
        && let Some((min, max)) = capture_range(raw)
    {
        constraints.min = Some(min);
        constraints.max = Some(max);
    }
    constraints
}

fn capture_number(text: &str, pattern: &str) -> Option<f64> {
    let caps = Regex::new(pattern).ok()?.captures(text)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

fn capture_range(text: &str) -> Option<(f64, f64)> {
    let caps = Regex::new(r"(\d+)[–-](\d+)").ok()?.captures(text)?;
    let min = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let max = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_cell_composes_required_and_bounds() {
        let constraints = parse_constraints("必填, ≥16, ≤100");
        assert!(constraints.required);
        assert_eq!(constraints.min, Some(16.0));
        assert_eq!(constraints.max, Some(100.0));
    }

    #[test]
    fn range_token_ignored_when_upper_bound_present() {
        let constraints = parse_constraints("≥0, ≤50, 0–50");
        assert_eq!(constraints.min, Some(0.0));
        assert_eq!(constraints.max, Some(50.0));

        let range_only = parse_constraints("1–5");
        assert_eq!(range_only.min, Some(1.0));
        assert_eq!(range_only.max, Some(5.0));
        assert!(!range_only.required);
    }

    #[test]
    fn range_token_accepts_hyphen_and_en_dash() {
        assert_eq!(capture_range("0-50"), Some((0.0, 50.0)));
        assert_eq!(capture_range("0–50"), Some((0.0, 50.0)));
        assert_eq!(capture_range("无范围"), None);
    }

    #[test]
    fn missing_code_cell_degrades_to_none() {
        assert_eq!(parse_missing_code("`-99`"), Some(-99));
        assert_eq!(parse_missing_code("-88"), Some(-88));
        assert_eq!(parse_missing_code("—"), None);
        assert_eq!(parse_missing_code(""), None);
        assert_eq!(parse_missing_code("不适用"), None);
    }

    #[test]
    fn type_cell_canonicalizes_by_substring() {
        assert_eq!(parse_field_type("binary (0/1)"), FieldType::Binary);
        assert_eq!(parse_field_type("text"), FieldType::Text);
        assert_eq!(parse_field_type("categorical"), FieldType::Categorical);
        assert_eq!(parse_field_type("integer"), FieldType::Integer);
        assert_eq!(parse_field_type("float"), FieldType::Float);
        assert_eq!(
            parse_field_type("datetime(YYYY-MM-DD HH:MM:SS)"),
            FieldType::Other("datetime(YYYY-MM-DD HH:MM:SS)".to_string())
        );
    }

    #[test]
    fn backticked_name_preferred_over_raw_cell() {
        assert_eq!(extract_name("`age` (年龄)"), "age");
        assert_eq!(extract_name("age"), "age");
        assert_eq!(extract_name("  "), "");
    }
}
