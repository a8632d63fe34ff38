//! Progress scoring and the export report for a compiled form.

mod scoring;
pub mod views;

pub use scoring::{
    data_quality, quality_records, score, CompletionScore, DataQuality, QualityRecord,
};
pub use views::{FieldResponse, IndicatorReport, SubmissionReport};

use super::responses::ResponseStore;
use std::io::{Read, Write};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("responses must be a JSON object keyed by field id: {0}")]
    InvalidResponses(#[source] serde_json::Error),
    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads a response store from JSON such as `{"indicator_0_value": 12}`.
pub fn read_responses<R: Read>(reader: R) -> Result<ResponseStore, ReportError> {
    serde_json::from_reader(reader).map_err(ReportError::InvalidResponses)
}

impl SubmissionReport {
    pub fn to_json(&self, pretty: bool) -> Result<String, ReportError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(ReportError::Serialize)
    }

    pub fn write_json<W: Write>(&self, mut writer: W, pretty: bool) -> Result<(), ReportError> {
        let rendered = self.to_json(pretty)?;
        writer.write_all(rendered.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
