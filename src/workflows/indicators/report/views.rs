use super::scoring::{
    data_quality, field_value, quality_records, score, CompletionScore, DataQuality,
};
use crate::workflows::indicators::domain::{Field, Indicator};
use crate::workflows::indicators::responses::{ResponseStore, ResponseValue};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldResponse {
    #[serde(flatten)]
    pub field: Field,
    pub value: Option<ResponseValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub responses: Vec<FieldResponse>,
}

/// Export payload for one organization's submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub organization: String,
    pub submission_date: DateTime<Utc>,
    pub indicators: Vec<IndicatorReport>,
    pub completion_score: CompletionScore,
    pub data_quality: DataQuality,
}

impl SubmissionReport {
    pub fn build(
        organization: impl Into<String>,
        indicators: &[Indicator],
        responses: &ResponseStore,
        submission_date: DateTime<Utc>,
    ) -> Self {
        let reports = indicators
            .iter()
            .map(|indicator| IndicatorReport {
                indicator: indicator.clone(),
                responses: indicator
                    .fields
                    .iter()
                    .map(|field| FieldResponse {
                        value: field_value(field, responses),
                        field: field.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            organization: organization.into(),
            submission_date,
            indicators: reports,
            completion_score: score(indicators, responses),
            data_quality: data_quality(&quality_records(indicators, responses)),
        }
    }
}

