use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::dto::analyze_dto::{AnalyzePayload, AnalyzeResponse};
use crate::error::{Error, Result};
use crate::models::answer::AnalysisRequest;
use crate::services::report_service::ReportService;
use crate::AppState;

#[axum::debug_handler]
pub async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzePayload>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        let Json(payload) = payload.map_err(|rej| Error::BadRequest(rej.body_text()))?;
        run_analysis(&state, payload).await
    }
    .instrument(span)
    .await
    .map(Json)
    .inspect_err(|e| tracing::error!(%request_id, error = %e, "api/analyze failed"))
}

pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

async fn run_analysis(state: &AppState, payload: AnalyzePayload) -> Result<AnalyzeResponse> {
    payload.validate()?;
    let request = AnalysisRequest::try_from(payload)?;
    tracing::info!(answers = request.answer_count(), "Analysis requested");

    let prompt = state.prompt_service.build(&request)?;
    let completion = state.completion_service.complete(&prompt).await?;

    let report = ReportService::assemble(&request, &completion.text);
    let doc_base64 = ReportService::render_base64(&report)?;

    tracing::info!(analysis_chars = completion.text.chars().count(), "Analysis complete");
    Ok(AnalyzeResponse {
        analysis: completion.text,
        doc_base64,
    })
}
