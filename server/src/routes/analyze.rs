//! Structural analysis of component source

use axum::extract::rejection::JsonRejection;
use axum::Json;
use component_analysis::{
    analyze as analyze_source, extract_code_block, split_files, MockPropertySet, SourceFile,
    StructuralSummary,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Component source, optionally inside a fenced block
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    /// Source with any surrounding fence removed
    pub code: String,
    pub summary: StructuralSummary,
    /// Shown next to the default summary when analysis failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    pub mock_props: MockPropertySet,
    pub files: Vec<SourceFile>,
}

pub async fn analyze(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    let code = extract_code_block(&request.code);

    let analysis = analyze_source(&code);
    if let Some(e) = &analysis.error {
        log::warn!("Analysis failed, using default summary: {}", e);
    }

    Ok(Json(AnalyzeResponse {
        mock_props: MockPropertySet::from_summary(&analysis.summary),
        files: split_files(&code),
        analysis_error: analysis.error.as_ref().map(|e| e.user_message()),
        summary: analysis.summary,
        code,
    }))
}
