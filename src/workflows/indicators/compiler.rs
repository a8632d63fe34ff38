use super::classifier::{classify, classify_tier, FieldRule, FieldShape};
use super::domain::{Field, Indicator};
use crate::workflows::spreadsheet::{RowSet, SpreadsheetRow};
use tracing::{debug, info, warn};

const INDICATOR_KEYWORDS: &[&str] = &["indicator", "outcome", "measure"];
const METHOD_KEYWORDS: &[&str] = &["method", "how", "measurement", "approach"];
const NOTES_KEYWORDS: &[&str] = &["note", "description", "comment"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no indicator column found (looked for a header containing \"indicator\", \"outcome\" or \"measure\"); available headers: {}", display_headers(.available))]
pub struct MissingColumnError {
    pub available: Vec<String>,
}

fn display_headers(headers: &[String]) -> String {
    if headers.is_empty() {
        "(none)".to_string()
    } else {
        headers.join(", ")
    }
}

/// Which header plays which role. Only the indicator column is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    pub indicator: String,
    pub method: Option<String>,
    pub notes: Option<String>,
}

impl ColumnRoles {
    /// Keywords are tried in order, each against every header, so "Indicator" beats
    /// "Measurement Method" for the indicator role and an "Indicator" column beats an earlier
    /// "Outcome Area" one. Header order only breaks ties within one keyword. A header claimed by
    /// one role is not offered to the next.
    pub fn resolve(headers: &[String]) -> Result<Self, MissingColumnError> {
        let indicator = find_column(headers, INDICATOR_KEYWORDS, &[]).ok_or_else(|| {
            MissingColumnError {
                available: headers.to_vec(),
            }
        })?;
        let method = find_column(headers, METHOD_KEYWORDS, &[indicator]);
        let notes = find_column(
            headers,
            NOTES_KEYWORDS,
            &[indicator, method.unwrap_or_default()],
        );

        Ok(Self {
            indicator: indicator.to_string(),
            method: method.map(str::to_string),
            notes: notes.map(str::to_string),
        })
    }
}

fn cell<'r>(row: &'r SpreadsheetRow, column: Option<&str>) -> &'r str {
    column
        .and_then(|header| row.get(header))
        .map(str::trim)
        .unwrap_or_default()
}

fn find_column<'h>(headers: &'h [String], keywords: &[&str], claimed: &[&str]) -> Option<&'h str> {
    keywords.iter().find_map(|keyword| {
        headers
            .iter()
            .map(String::as_str)
            .filter(|header| !claimed.contains(header))
            .find(|header| header.to_lowercase().contains(keyword))
    })
}

/// Turns indicator spreadsheets into typed, tiered indicator definitions.
pub struct IndicatorCompiler;

impl IndicatorCompiler {
    pub fn compile(rows: &RowSet) -> Result<Vec<Indicator>, MissingColumnError> {
        let roles = ColumnRoles::resolve(rows.headers())?;
        debug!(?roles, "resolved indicator columns");

        let mut indicators = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in rows.rows().iter().enumerate() {
            let title = cell(row, Some(&roles.indicator));
            if title.is_empty() {
                skipped += 1;
                debug!(row = index, "skipping row without indicator text");
                continue;
            }

            let method = cell(row, roles.method.as_deref());
            let notes = cell(row, roles.notes.as_deref());
            indicators.push(compile_row(index, title, method, notes));
        }

        info!(
            indicators = indicators.len(),
            skipped,
            fields = indicators.iter().map(|i| i.fields.len()).sum::<usize>(),
            "compiled indicator spreadsheet"
        );

        Ok(indicators)
    }
}

pub fn compile(rows: &RowSet) -> Result<Vec<Indicator>, MissingColumnError> {
    IndicatorCompiler::compile(rows)
}

fn compile_row(index: usize, title: &str, method: &str, notes: &str) -> Indicator {
    let id = format!("indicator_{index}");
    let tier = classify_tier(title, method);
    let config = classify(title, method);

    if config.rule() == FieldRule::FreeText {
        warn!(indicator = %id, title, "no structured field matched; using short free text");
    }

    let description = (!notes.is_empty()).then(|| notes.to_string());
    let fields = expand(config.into_shape(), title, description.as_deref())
        .into_iter()
        .map(|field| field.qualify(&id))
        .collect();

    Indicator {
        id,
        title: title.to_string(),
        description: notes.to_string(),
        tier,
        fields,
    }
}

fn expand(shape: FieldShape, title: &str, description: Option<&str>) -> Vec<Field> {
    match shape {
        FieldShape::Simple(mut field) => {
            field.label = title.to_string();
            field.description = description.map(str::to_string);
            vec![field]
        }
        FieldShape::CalculatedGroup { inputs, derived } => {
            inputs.into_iter().chain(derived).collect()
        }
        FieldShape::MultiPart { primary, dependent } => vec![primary, dependent],
    }
}
