//! services/api/src/web/stages.rs
//!
//! Stage selection and stage entry, delegating to the core stage router.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use std::collections::HashMap;
use std::sync::Arc;

use annotation_study_core::domain::StageDestination;

use crate::web::state::AppState;
use crate::web::{found, pages, require_identity};

/// GET /stage_select - the stages this user's role allows, in order.
pub async fn stage_select_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    let stages = state.stages.available_stages(&identity);
    Html(pages::stage_select(identity.as_str(), &stages)).into_response()
}

/// GET /go_to_stage?stage=N - routes into the reader or the justification
/// view; everything else lands on the placeholder page. A missing or
/// unparsable stage number is just another closed stage.
pub async fn go_to_stage_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    let stage = params
        .get("stage")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);
    let has_justification = state.paragraphs.has_justification(&identity);
    match state.stages.enter(&identity, stage, has_justification) {
        StageDestination::Reader => found("/reader"),
        StageDestination::Justification => found("/justification"),
        StageDestination::NotYetOpen => Html(pages::not_yet_open()).into_response(),
    }
}
