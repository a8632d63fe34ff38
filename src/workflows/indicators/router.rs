use std::io::Cursor;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::form::CompiledForm;
use super::report::{CompletionScore, DataQuality, SubmissionReport};
use super::responses::ResponseStore;
use crate::config::ReportConfig;
use crate::error::AppError;
use crate::workflows::spreadsheet::RowSet;

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    pub csv: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub csv: String,
    #[serde(default)]
    pub responses: ResponseStore,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub completion_score: CompletionScore,
    pub data_quality: DataQuality,
}

/// Stateless endpoints: every request carries its own CSV and responses.
pub fn indicator_router(report: ReportConfig) -> Router {
    Router::new()
        .route("/api/v1/indicators/compile", post(compile_handler))
        .route("/api/v1/indicators/score", post(score_handler))
        .route("/api/v1/indicators/report", post(report_handler))
        .with_state(Arc::new(report))
}

fn compile_csv(csv: String) -> Result<CompiledForm, AppError> {
    let rows = RowSet::from_reader(Cursor::new(csv.into_bytes()))?;
    let form = CompiledForm::from_rows(&rows)?;
    info!(
        indicators = form.indicators.len(),
        fields = form.field_count(),
        "compiled indicator upload"
    );
    Ok(form)
}

pub(crate) async fn compile_handler(
    Json(request): Json<CompileRequest>,
) -> Result<Json<CompiledForm>, AppError> {
    compile_csv(request.csv).map(Json)
}

pub(crate) async fn score_handler(
    Json(request): Json<SubmissionRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let form = compile_csv(request.csv)?;
    Ok(Json(ScoreResponse {
        completion_score: form.score(&request.responses),
        data_quality: form.data_quality(&request.responses),
    }))
}

pub(crate) async fn report_handler(
    State(config): State<Arc<ReportConfig>>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Json<SubmissionReport>, AppError> {
    let form = compile_csv(request.csv)?;
    let report = form.report(
        &request.responses,
        config.organization.as_deref(),
        Utc::now(),
    );
    Ok(Json(report))
}
