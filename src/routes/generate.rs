//! Script generation endpoint.

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::classify::{QueryKind, classify};
use crate::services::codegen;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateBody {
    pub query: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub kind: QueryKind,
    pub code: String,
}

/// `POST /api/generate` — classify the query and return script text.
///
/// Always 200: generation failures surface as sentinel comment strings in
/// `code`, never as an HTTP error. Without a configured LLM the built-in
/// script for the classified kind is returned.
pub async fn generate_code(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Json<GenerateResponse> {
    let kind = classify(&body.query);
    info!(kind = kind.as_str(), query_len = body.query.len(), "generate: request");

    let code = match &state.llm {
        Some(llm) => codegen::generate(llm, &body.query).await,
        None => codegen::fallback_script(kind).to_string(),
    };

    Json(GenerateResponse { kind, code })
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
