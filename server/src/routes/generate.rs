//! One-shot component generation

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use component_generation::{GeneratedCode, GenerationRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Validate the request, then generate. Provider failures still answer
/// with the fallback component.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GeneratedCode>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    log::info!("Generating component for {} character prompt", request.prompt.chars().count());
    let generated = state.generator.generate(&request).await;
    if generated.fallback {
        log::info!("Answered with fallback component");
    }
    Ok(Json(generated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::offline_state;

    #[tokio::test]
    async fn test_generate_without_backend_returns_fallback() {
        let request = GenerationRequest::new("a newsletter signup form");
        let Json(generated) = generate(State(offline_state()), Ok(Json(request)))
            .await
            .unwrap();

        assert!(generated.fallback);
        assert!(generated.code.contains("export default function ANewsletterSignupForm("));
    }

    #[tokio::test]
    async fn test_generate_rejects_short_prompt() {
        let result = generate(State(offline_state()), Ok(Json(GenerationRequest::new("tiny")))).await;
        match result {
            Err(ApiError::Generation(component_generation::GenerationError::Invalid(issues))) => {
                assert_eq!(issues[0].field, "prompt");
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
