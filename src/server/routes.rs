//! API route handlers
//!
//! - `GET /api` - liveness probe
//! - `POST /api/anonymize/csv` - multipart CSV upload with column metadata
//! - `POST /api/anonymize/text` - JSON free-text anonymization
//!
//! Validation failures map to 400, everything else to 500; both shapes carry
//! a human-readable message so nothing fails silently.

use crate::adapters::csv::read_records;
use crate::domain::column::ColumnMetadata;
use crate::domain::errors::ShroudError;
use crate::server::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error payload returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    let message = message.into();
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            error: message,
        }),
    )
}

fn internal_error(message: impl Into<String>) -> ApiError {
    let message = message.into();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            error: message,
        }),
    )
}

/// Map a domain error to its transport shape
fn error_response(error: ShroudError) -> ApiError {
    match error {
        ShroudError::Validation(_) | ShroudError::Csv(_) => bad_request(error.to_string()),
        other => internal_error(other.to_string()),
    }
}

/// Liveness probe
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "API is up and running" }))
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub status_code: u16,
    pub text: String,
}

/// Anonymize free text
pub async fn anonymize_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    if request.text.trim().is_empty() {
        return Err(bad_request("Text cannot be empty"));
    }

    tracing::info!(%request_id, chars = request.text.len(), "Anonymizing text");

    match state.text.anonymize(&request.text).await {
        Ok(text) => Ok(Json(TextResponse {
            status_code: StatusCode::OK.as_u16(),
            text,
        })),
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Text anonymization failed");
            Err(internal_error(format!(
                "An error occurred during anonymization: {e}"
            )))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CsvResponse {
    pub status_code: u16,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Anonymize an uploaded CSV file
///
/// Expects a multipart form with a `file` part (`.csv` extension required)
/// and a `column_metadata` part holding the JSON metadata array.
pub async fn anonymize_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CsvResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut metadata_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart request: {e}")))?
    {
        let part_name = field.name().map(str::to_string);
        match part_name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read file upload: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("column_metadata") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read column metadata: {e}")))?;
                metadata_json = Some(text);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| bad_request("Please provide a CSV file"))?;
    validate_csv_file_name(file_name.as_deref()).map_err(bad_request)?;

    let metadata = parse_column_metadata(metadata_json.as_deref()).map_err(bad_request)?;

    tracing::info!(
        %request_id,
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        columns = metadata.len(),
        "Anonymizing CSV upload"
    );

    let records = read_records(&bytes, &metadata).map_err(error_response)?;
    let anonymized = state
        .tabular
        .anonymize(&records, &metadata)
        .await
        .map_err(|e| {
            tracing::error!(%request_id, error = %e, "CSV anonymization failed");
            error_response(e)
        })?;

    Ok(Json(CsvResponse {
        status_code: StatusCode::OK.as_u16(),
        data: anonymized.to_rows(),
    }))
}

/// Require an uploaded file name ending in `.csv`
fn validate_csv_file_name(file_name: Option<&str>) -> Result<(), String> {
    let valid = file_name
        .and_then(|name| name.rsplit('.').next())
        .map(|extension| extension.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err("Please provide a CSV file".to_string())
    }
}

/// Parse and validate the column metadata JSON array
fn parse_column_metadata(json: Option<&str>) -> Result<Vec<ColumnMetadata>, String> {
    let json = json.ok_or_else(|| "Please provide column metadata".to_string())?;

    let metadata: Vec<ColumnMetadata> =
        serde_json::from_str(json).map_err(|e| format!("Invalid column metadata: {e}"))?;

    if metadata.is_empty() {
        return Err("Please provide column metadata".to_string());
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShroudConfig;

    fn state() -> AppState {
        AppState::from_config(&ShroudConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_liveness_message() {
        let response = liveness().await;
        assert_eq!(response.0["message"], "API is up and running");
    }

    #[tokio::test]
    async fn test_anonymize_text_empty_is_client_error() {
        let result = anonymize_text(
            State(state()),
            Json(TextRequest {
                text: "   ".to_string(),
            }),
        )
        .await;

        let (status, body) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Text cannot be empty");
    }

    #[tokio::test]
    async fn test_anonymize_text_passthrough_without_entities() {
        let result = anonymize_text(
            State(state()),
            Json(TextRequest {
                text: "hello world".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(result.0.status_code, 200);
        assert_eq!(result.0.text, "hello world");
    }

    #[tokio::test]
    async fn test_anonymize_text_redacts_email() {
        let result = anonymize_text(
            State(state()),
            Json(TextRequest {
                text: "My email is a@b.com".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(!result.0.text.contains("a@b.com"));
    }

    #[test]
    fn test_validate_csv_file_name() {
        assert!(validate_csv_file_name(Some("data.csv")).is_ok());
        assert!(validate_csv_file_name(Some("DATA.CSV")).is_ok());
        assert!(validate_csv_file_name(Some("data.txt")).is_err());
        assert!(validate_csv_file_name(None).is_err());
    }

    #[test]
    fn test_parse_column_metadata_rejects_empty() {
        assert!(parse_column_metadata(None).is_err());
        assert!(parse_column_metadata(Some("[]")).is_err());
        assert!(parse_column_metadata(Some("not json")).is_err());
    }

    #[test]
    fn test_parse_column_metadata_rejects_unknown_enum() {
        let json = r#"[{"name": "x", "dataType": "blob", "sensitivityType": "sensitive"}]"#;
        assert!(parse_column_metadata(Some(json)).is_err());
    }

    #[test]
    fn test_parse_column_metadata_valid() {
        let json = r#"[{"name": "ssn", "dataType": "string", "sensitivityType": "identifier"}]"#;
        let metadata = parse_column_metadata(Some(json)).unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].name, "ssn");
    }
}
