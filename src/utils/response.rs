use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::utils::error::{ClientError, ClientResult};

/// Error bodies the backend produces: `{"message": ..}`, `{"error": ..}` or plain text.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

pub fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(trimmed) {
        let text = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or(parsed.error.filter(|e| !e.trim().is_empty()));
        if let Some(text) = text {
            return text;
        }
    }

    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unexpected response")
        .to_string()
}

pub async fn into_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        _ => ClientError::Status { status, message },
    }
}

/// Decode a 2xx JSON body, or turn anything else into a `ClientError`.
pub async fn json<T>(response: Response) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(into_error(response).await);
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Accept any 2xx, ignoring the body.
pub async fn empty(response: Response) -> ClientResult<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(into_error(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_body_is_used_verbatim() {
        let msg = error_message(StatusCode::BAD_REQUEST, "Not enough seats available");
        assert_eq!(msg, "Not enough seats available");
    }

    #[test]
    fn test_json_message_wins_over_error() {
        let body = r#"{"message":"boom","error":"java.lang.IllegalStateException"}"#;
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, body), "boom");
    }

    #[test]
    fn test_json_error_used_when_message_missing() {
        let body = r#"{"error":"Organizer ID is required"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Organizer ID is required"
        );
    }

    #[test]
    fn test_empty_body_falls_back_to_reason() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "{}"), "Bad Gateway");
    }
}
