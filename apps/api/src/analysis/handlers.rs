//! Axum route handlers for the session-scoped analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::analyzer::{
    run_match_analysis, run_suggestions, suggestions_available, AnalysisResult,
    SUGGESTION_THRESHOLD,
};
use crate::analysis::scores::{extract_scores, score_percent, ScoreSet};
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::session::{Phase, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub has_resume: bool,
    pub has_job_description: bool,
    pub comparison_visible: bool,
    pub suggestions_visible: bool,
}

impl SessionView {
    fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id,
            created_at: session.created_at,
            phase: session.phase(),
            has_resume: session.resume_text.is_some(),
            has_job_description: session.job_desc_text.is_some(),
            comparison_visible: session.comparison_visible,
            suggestions_visible: session.suggestions_visible,
        }
    }
}

/// One row of the four-row comparison table.
#[derive(Debug, Serialize)]
pub struct ScoreRow {
    pub criteria: &'static str,
    pub openai: String,
    pub claude: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub scores: Vec<ScoreRow>,
    pub openai_overall: u32,
    pub claude_overall: u32,
    pub suggestions_available: bool,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub session_id: Uuid,
    pub openai: AnalysisResult,
    pub claude: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub session_id: Uuid,
    pub visible: bool,
    pub openai: AnalysisResult,
    pub claude: AnalysisResult,
}

fn score_rows(openai: &ScoreSet, claude: &ScoreSet) -> Vec<ScoreRow> {
    vec![
        ScoreRow {
            criteria: "Skills",
            openai: openai.skills.clone(),
            claude: claude.skills.clone(),
        },
        ScoreRow {
            criteria: "Experience",
            openai: openai.experience.clone(),
            claude: claude.experience.clone(),
        },
        ScoreRow {
            criteria: "Education",
            openai: openai.education.clone(),
            claude: claude.education.clone(),
        },
        ScoreRow {
            criteria: "Overall",
            openai: openai.overall.clone(),
            claude: claude.overall.clone(),
        },
    ]
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.sessions.create().await;
    info!("Created session {}", session.id);
    Json(SessionView::from_session(&session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionView::from_session(&session)))
}

/// POST /api/v1/sessions/:id/documents
///
/// Multipart upload with parts named `resume` and/or `job_description`.
/// The file type comes from each part's declared content type, never from
/// byte sniffing. An unsupported type rejects the request with 415 and
/// stores nothing.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    if state.sessions.get(session_id).await.is_none() {
        return Err(session_not_found(session_id));
    }

    let mut resume_text = None;
    let mut job_desc_text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let part = field.name().unwrap_or_default().to_string();
        if part != "resume" && part != "job_description" {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::Validation(format!("Part '{part}' has no declared content type"))
            })?
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read part '{part}': {e}")))?;

        let text = extract_text(&content_type, &data)
            .map_err(|e| AppError::UnsupportedFormat(e.to_string()))?;

        debug!("Extracted {} chars from '{part}' upload", text.len());

        if part == "resume" {
            resume_text = Some(text);
        } else {
            job_desc_text = Some(text);
        }
    }

    if resume_text.is_none() && job_desc_text.is_none() {
        return Err(AppError::Validation(
            "Expected multipart parts named 'resume' and/or 'job_description'".to_string(),
        ));
    }

    let view = state
        .sessions
        .update(session_id, |s| {
            if let Some(text) = resume_text {
                s.resume_text = Some(text);
            }
            if let Some(text) = job_desc_text {
                s.job_desc_text = Some(text);
            }
            SessionView::from_session(s)
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/analyze
///
/// Ready → Analyzed. With a cached result pair this reuses the cache and
/// performs zero backend calls; on failure nothing is cached and the
/// session stays Ready for a retrigger.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    let phase = session.phase();
    let results = match session.results {
        Some(pair) => {
            debug!("Session {session_id}: reusing cached analysis");
            pair
        }
        None if phase == Phase::Ready => {
            let resume_text = session.resume_text.unwrap_or_default();
            let job_desc_text = session.job_desc_text.unwrap_or_default();

            let pair = run_match_analysis(
                state.openai.as_ref(),
                state.claude.as_ref(),
                &resume_text,
                &job_desc_text,
            )
            .await?;

            state
                .sessions
                .update(session_id, |s| s.results = Some(pair.clone()))
                .await
                .ok_or_else(|| session_not_found(session_id))?;
            pair
        }
        None => {
            return Err(AppError::Conflict(
                "Both documents must be uploaded before analysis".to_string(),
            ))
        }
    };

    let openai_scores = extract_scores(&results.openai.raw_text);
    let claude_scores = extract_scores(&results.claude.raw_text);

    Ok(Json(AnalyzeResponse {
        session_id,
        openai_overall: score_percent(&openai_scores.overall),
        claude_overall: score_percent(&claude_scores.overall),
        suggestions_available: suggestions_available(&results),
        scores: score_rows(&openai_scores, &claude_scores),
    }))
}

/// POST /api/v1/sessions/:id/suggestions
///
/// Offered only from Analyzed and only while at least one overall score is
/// below the threshold. Recomputed on every call, never cached.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    let results = session.results.ok_or_else(|| {
        AppError::Conflict("Run the analysis before requesting suggestions".to_string())
    })?;

    if !suggestions_available(&results) {
        return Err(AppError::Conflict(format!(
            "Both overall scores are at or above {SUGGESTION_THRESHOLD}%; no suggestions to offer"
        )));
    }

    let suggestions =
        run_suggestions(state.openai.as_ref(), state.claude.as_ref(), &results).await?;

    state
        .sessions
        .update(session_id, |s| s.suggestions_visible = true)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(SuggestionsResponse {
        session_id,
        openai: suggestions.openai,
        claude: suggestions.claude,
    }))
}

/// POST /api/v1/sessions/:id/comparison
///
/// Pure display toggle, no backend calls. Returns both raw analysis
/// texts for side-by-side rendering.
pub async fn handle_comparison(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let toggled = state
        .sessions
        .update(session_id, |s| {
            s.results.clone().map(|results| {
                s.comparison_visible = !s.comparison_visible;
                (s.comparison_visible, results)
            })
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    let (visible, results) = toggled.ok_or_else(|| {
        AppError::Conflict("Run the analysis before requesting the comparison".to_string())
    })?;

    Ok(Json(ComparisonResponse {
        session_id,
        visible,
        openai: results.openai,
        claude: results.claude,
    }))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |s| {
            s.reset();
            SessionView::from_session(s)
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    info!("Session {session_id} reset");
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(session_id))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
