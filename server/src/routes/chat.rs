//! Streaming chat generation

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use component_generation::{fallback_component, GenerationError};
use serde::Deserialize;

use crate::constants::messages;
use crate::error::ApiError;
use crate::state::AppState;

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<ChatMessage>,
}

/// Stream generated text for the last message.
///
/// Without a backend the fallback component is sent as a single fenced
/// block so clients can extract it the same way.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let last = body
        .messages
        .last()
        .filter(|m| !m.content.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("messages must end with a non-empty message".to_string()))?;
    log::debug!("Chat request from {} ({} messages)", last.role, body.messages.len());

    match state.generator.chat_stream(&last.content).await {
        Ok(stream) => Ok(text_response(Body::from_stream(stream))),
        Err(GenerationError::NotConfigured) => {
            let fenced = format!("```tsx\n{}\n```", fallback_component(&last.content));
            Ok(text_response(Body::from(fenced)))
        }
        Err(e) => {
            log::error!("Chat generation failed: {}", e);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, messages::CHAT_FAILED).into_response())
        }
    }
}

fn text_response(body: Body) -> Response {
    ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{offline_state, scripted_state};

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn body(content: &str) -> ChatBody {
        ChatBody {
            messages: vec![
                ChatMessage { role: "user".into(), content: "earlier".into() },
                ChatMessage { role: "user".into(), content: content.into() },
            ],
        }
    }

    #[tokio::test]
    async fn test_streams_backend_text() {
        let state = scripted_state(vec![Ok("```tsx\n"), Ok("export default () => <hr />;\n```")]);
        let response = chat(State(state), Ok(Json(body("a divider")))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
        assert_eq!(body_text(response).await, "```tsx\nexport default () => <hr />;\n```");
    }

    #[tokio::test]
    async fn test_offline_chat_sends_fenced_fallback() {
        let response = chat(State(offline_state()), Ok(Json(body("theme toggle")))).await.unwrap();
        let text = body_text(response).await;

        assert!(text.starts_with("```tsx\nimport React"));
        assert!(text.ends_with("}\n```"));
        assert_eq!(component_analysis::extract_code_block(&text), fallback_component("theme toggle"));
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let result = chat(State(offline_state()), Ok(Json(ChatBody { messages: Vec::new() }))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
