use super::compiler::{compile, MissingColumnError};
use super::domain::Indicator;
use super::organization::{detect, Organization};
use super::report::{
    data_quality, quality_records, score, CompletionScore, DataQuality, SubmissionReport,
};
use super::responses::ResponseStore;
use crate::workflows::spreadsheet::RowSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Indicators compiled from one upload, with the organization they were detected for.
///
/// A new upload replaces the whole form; responses collected against a previous form should be
/// discarded because indicator ids are positional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledForm {
    pub organization: Option<Organization>,
    pub indicators: Vec<Indicator>,
}

impl CompiledForm {
    pub fn from_rows(rows: &RowSet) -> Result<Self, MissingColumnError> {
        let indicators = compile(rows)?;
        Ok(Self {
            organization: detect(rows),
            indicators,
        })
    }

    pub fn field_count(&self) -> usize {
        self.indicators
            .iter()
            .map(|indicator| indicator.fields.len())
            .sum()
    }

    pub fn score(&self, responses: &ResponseStore) -> CompletionScore {
        score(&self.indicators, responses)
    }

    pub fn data_quality(&self, responses: &ResponseStore) -> DataQuality {
        data_quality(&quality_records(&self.indicators, responses))
    }

    /// `organization_name` overrides the detected organization when set.
    pub fn report(
        &self,
        responses: &ResponseStore,
        organization_name: Option<&str>,
        submission_date: DateTime<Utc>,
    ) -> SubmissionReport {
        let organization = organization_name
            .map(str::to_string)
            .or_else(|| self.organization.as_ref().map(|org| org.name.clone()))
            .unwrap_or_else(|| Organization::fallback().name);

        SubmissionReport::build(organization, &self.indicators, responses, submission_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::indicators::responses::ResponseValue;

    fn form() -> CompiledForm {
        let rows = RowSet::from_records([
            [("Indicator", "CSSC board meetings"), ("Method", "Number of meetings")],
            [("Indicator", "Program outcomes"), ("Method", "Describe")],
        ]);
        CompiledForm::from_rows(&rows).expect("indicator column present")
    }

    #[test]
    fn detects_organization_alongside_indicators() {
        let form = form();
        assert_eq!(form.organization.as_ref().map(|org| org.code.as_str()), Some("CSSC"));
        assert_eq!(form.indicators.len(), 2);
        assert_eq!(form.field_count(), 2);
    }

    #[test]
    fn report_prefers_the_configured_organization_name() {
        let form = form();
        let responses: ResponseStore = [("indicator_0_value", ResponseValue::Number(4.0))]
            .into_iter()
            .collect();

        let detected = form.report(&responses, None, Utc::now());
        assert_eq!(detected.organization, "Community Social Services Coalition");
        assert_eq!(detected.completion_score.percentage, 50);

        let overridden = form.report(&responses, Some("Harbour Services"), Utc::now());
        assert_eq!(overridden.organization, "Harbour Services");
    }

    #[test]
    fn data_quality_penalizes_free_text() {
        let form = form();
        let responses: ResponseStore = [
            ("indicator_0_value", ResponseValue::Number(4.0)),
            ("indicator_1_value", ResponseValue::Text("Improved".into())),
        ]
        .into_iter()
        .collect();

        let quality = form.data_quality(&responses);
        assert_eq!(quality.completeness, 100);
        assert_eq!(quality.standardization, 50);
        assert_eq!(quality.overall_score, 80);
    }
}
