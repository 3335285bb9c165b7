//! Download of the active component

use axum::extract::rejection::JsonRejection;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use component_analysis::{
    archive_or_concatenate, extract_code_block, format_file_size, single_file_download,
    split_files,
};
use serde::Deserialize;

use crate::error::ApiError;

const EXPORT_SIZE_HEADER: &str = "x-export-size";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw text, or concatenated text for several files
    #[default]
    Text,
    Zip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub code: String,
    /// Component description, used for the suggested file name
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: ExportFormat,
}

pub async fn export(payload: Result<Json<ExportRequest>, JsonRejection>) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let code = extract_code_block(&request.code);
    if code.trim().is_empty() {
        return Err(ApiError::BadRequest("code must not be empty".to_string()));
    }

    let files = split_files(&code);
    let download = match request.format {
        ExportFormat::Text => single_file_download(&files, &request.description, &code)?,
        ExportFormat::Zip => archive_or_concatenate(&files)?,
    };

    let size = format_file_size(download.content.len() as u64);
    log::info!("Exporting {} ({})", download.filename, size);

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download.filename))
        .map_err(|e| ApiError::Internal(format!("Invalid download name: {}", e)))?;
    let size = HeaderValue::from_str(&size)
        .map_err(|e| ApiError::Internal(format!("Invalid size header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(download.mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
            (HeaderName::from_static(EXPORT_SIZE_HEADER), size),
        ],
        download.content,
    )
        .into_response())
}
