use crate::workflows::indicators::domain::{Field, FieldType, Indicator};
use crate::workflows::indicators::responses::{ResponseStore, ResponseValue};
use serde::Serialize;

const COMPLETENESS_WEIGHT: f64 = 0.6;
const STANDARDIZATION_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionScore {
    pub percentage: u8,
    pub completed: usize,
    pub total: usize,
}

/// Progress over user-fillable fields. Calculated fields are never counted.
pub fn score(indicators: &[Indicator], responses: &ResponseStore) -> CompletionScore {
    let (completed, total) = indicators
        .iter()
        .flat_map(|indicator| indicator.input_fields())
        .fold((0, 0), |(completed, total), field| {
            let answered = responses.is_answered(&field.id);
            (completed + usize::from(answered), total + 1)
        });

    CompletionScore {
        percentage: percent(completed as f64, total),
        completed,
        total,
    }
}

/// A response tagged with the type of the field it answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRecord {
    pub field_type: FieldType,
    pub value: Option<ResponseValue>,
}

impl QualityRecord {
    pub fn new(field_type: FieldType, value: Option<ResponseValue>) -> Self {
        Self { field_type, value }
    }

    fn is_completed(&self) -> bool {
        self.value
            .as_ref()
            .map(ResponseValue::is_answered)
            .unwrap_or(false)
    }
}

/// One record per compiled field. Calculated fields carry their computed value once all of
/// their inputs are answered.
pub fn quality_records(indicators: &[Indicator], responses: &ResponseStore) -> Vec<QualityRecord> {
    indicators
        .iter()
        .flat_map(|indicator| &indicator.fields)
        .map(|field| QualityRecord::new(field.field_type, field_value(field, responses)))
        .collect()
}

/// The stored answer, or the computed value for a calculated field.
pub(super) fn field_value(field: &Field, responses: &ResponseStore) -> Option<ResponseValue> {
    if field.is_calculated() {
        field.computed_value(responses).map(ResponseValue::Number)
    } else {
        responses.get(&field.id).cloned()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub completeness: u8,
    pub standardization: u8,
    pub overall_score: u8,
}

pub fn data_quality(records: &[QualityRecord]) -> DataQuality {
    let total = records.len();
    let completed: Vec<&QualityRecord> =
        records.iter().filter(|record| record.is_completed()).collect();
    let standardized = completed
        .iter()
        .filter(|record| record.field_type.is_standardized())
        .count();

    let weighted = completed.len() as f64 * COMPLETENESS_WEIGHT
        + standardized as f64 * STANDARDIZATION_WEIGHT;

    DataQuality {
        completeness: percent(completed.len() as f64, total),
        standardization: percent(standardized as f64, completed.len()),
        overall_score: percent(weighted, total),
    }
}

/// Whole percentage in `[0, 100]`; zero when there is nothing to divide by.
fn percent(numerator: f64, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let ratio = (numerator / denominator as f64 * 100.0).round();
    if ratio.is_finite() {
        ratio.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::indicators::calculations::Formula;
    use crate::workflows::indicators::domain::Tier;

    fn indicator(fields: Vec<Field>) -> Indicator {
        Indicator {
            id: "indicator_0".into(),
            title: "Sample".into(),
            description: String::new(),
            tier: Tier::Operational,
            fields,
        }
    }

    #[test]
    fn zero_false_and_zero_text_count_as_completed() {
        let indicators = vec![indicator(vec![
            Field::new("a", FieldType::Number, "A"),
            Field::new("b", FieldType::Radio, "B"),
            Field::new("c", FieldType::TextShort, "C"),
            Field::new("d", FieldType::TextShort, "D"),
        ])];
        let responses: ResponseStore = [
            ("a", ResponseValue::Number(0.0)),
            ("b", ResponseValue::Bool(false)),
            ("c", ResponseValue::Text("0".into())),
            ("d", ResponseValue::Text(String::new())),
        ]
        .into_iter()
        .collect();

        let result = score(&indicators, &responses);
        assert_eq!(result.completed, 3);
        assert_eq!(result.total, 4);
        assert_eq!(result.percentage, 75);
    }

    #[test]
    fn calculated_fields_are_excluded_from_the_denominator() {
        let indicators = vec![indicator(vec![
            Field::new("left", FieldType::Number, "Left"),
            Field::calculated(
                "ratio",
                "Ratio",
                Formula::FundingRatio {
                    core_funding: "left".into(),
                    project_funding: "left".into(),
                },
            ),
        ])];
        let responses: ResponseStore = [("left", ResponseValue::Number(4.0))].into_iter().collect();

        assert_eq!(
            score(&indicators, &responses),
            CompletionScore {
                percentage: 100,
                completed: 1,
                total: 1,
            }
        );
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(score(&[], &ResponseStore::default()), CompletionScore::default());
        assert_eq!(data_quality(&[]), DataQuality::default());
    }

    #[test]
    fn data_quality_weights_completion_and_structure() {
        let records = vec![
            QualityRecord::new(FieldType::Number, Some(ResponseValue::Number(3.0))),
            QualityRecord::new(FieldType::TextShort, Some(ResponseValue::Text("ok".into()))),
            QualityRecord::new(FieldType::Radio, None),
            QualityRecord::new(FieldType::Checkbox, Some(ResponseValue::Text(String::new()))),
        ];

        let quality = data_quality(&records);
        assert_eq!(quality.completeness, 50);
        assert_eq!(quality.standardization, 50);
        // (2 * 0.6 + 1 * 0.4) / 4 = 0.4
        assert_eq!(quality.overall_score, 40);
    }

    #[test]
    fn unanswered_records_have_zero_standardization() {
        let records = vec![QualityRecord::new(FieldType::Number, None)];
        let quality = data_quality(&records);
        assert_eq!(quality, DataQuality::default());
    }

    #[test]
    fn quality_records_include_computed_values() {
        let indicators = vec![indicator(vec![
            Field::new("core", FieldType::Currency, "Core"),
            Field::new("project", FieldType::Currency, "Project"),
            Field::calculated(
                "total",
                "Total",
                Formula::TotalFunding {
                    core_funding: "core".into(),
                    project_funding: "project".into(),
                },
            ),
        ])];
        let responses: ResponseStore = [
            ("core", ResponseValue::Number(100.0)),
            ("project", ResponseValue::Number(50.0)),
        ]
        .into_iter()
        .collect();

        let records = quality_records(&indicators, &responses);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].field_type, FieldType::Calculated);
        assert_eq!(records[2].value, Some(ResponseValue::Number(150.0)));
        assert_eq!(data_quality(&records).overall_score, 100);
    }
}
