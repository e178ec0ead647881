//! Match analysis orchestration — builds prompts, drives both completion
//! backends, and gates the improvement-suggestion flow.
//!
//! The two backend calls are issued sequentially. A failure on either side
//! aborts the whole transition: the caller caches nothing and the session
//! stays re-triggerable.

use serde::Serialize;
use tracing::info;

use crate::analysis::prompts::{
    CLAUDE_MATCH_PROMPT_TEMPLATE, OPENAI_MATCH_PROMPT_TEMPLATE, SUGGESTION_PROMPT_TEMPLATE,
};
use crate::analysis::scores::{extract_scores, score_percent};
use crate::errors::AppError;
use crate::providers::{CompletionBackend, ANALYSIS_MAX_TOKENS};

/// Suggestions are offered only while at least one overall score is below
/// this threshold.
pub const SUGGESTION_THRESHOLD: u32 = 95;

/// One backend's identifier plus its raw response text.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub provider: String,
    pub raw_text: String,
}

/// The cached pair of match-analysis results, one per backend.
/// Invariant: computed at most once per session unless the session is reset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisPair {
    pub openai: AnalysisResult,
    pub claude: AnalysisResult,
}

/// Freshly computed improvement suggestions, one per backend. Never cached.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionPair {
    pub openai: AnalysisResult,
    pub claude: AnalysisResult,
}

/// Sends the match prompts to both backends and returns the raw pair.
pub async fn run_match_analysis(
    openai: &dyn CompletionBackend,
    claude: &dyn CompletionBackend,
    resume_text: &str,
    job_desc_text: &str,
) -> Result<AnalysisPair, AppError> {
    let openai_prompt = OPENAI_MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_desc_text}", job_desc_text);
    let claude_prompt = CLAUDE_MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_desc_text}", job_desc_text);

    let openai_text = openai
        .complete(&openai_prompt, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("{} match analysis failed: {e}", openai.name())))?;

    let claude_text = claude
        .complete(&claude_prompt, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("{} match analysis failed: {e}", claude.name())))?;

    info!("Match analysis completed on both backends");

    Ok(AnalysisPair {
        openai: AnalysisResult {
            provider: openai.name().to_string(),
            raw_text: openai_text,
        },
        claude: AnalysisResult {
            provider: claude.name().to_string(),
            raw_text: claude_text,
        },
    })
}

/// Requests improvement suggestions from both backends, each fed its own
/// prior analysis. Recomputed on every call.
pub async fn run_suggestions(
    openai: &dyn CompletionBackend,
    claude: &dyn CompletionBackend,
    results: &AnalysisPair,
) -> Result<SuggestionPair, AppError> {
    let openai_prompt = SUGGESTION_PROMPT_TEMPLATE
        .replace("{provider}", &results.openai.provider)
        .replace("{analysis_text}", &results.openai.raw_text);
    let claude_prompt = SUGGESTION_PROMPT_TEMPLATE
        .replace("{provider}", &results.claude.provider)
        .replace("{analysis_text}", &results.claude.raw_text);

    let openai_text = openai
        .complete(&openai_prompt, openai.suggestion_max_tokens())
        .await
        .map_err(|e| AppError::Llm(format!("{} suggestions failed: {e}", openai.name())))?;

    let claude_text = claude
        .complete(&claude_prompt, claude.suggestion_max_tokens())
        .await
        .map_err(|e| AppError::Llm(format!("{} suggestions failed: {e}", claude.name())))?;

    info!("Improvement suggestions computed on both backends");

    Ok(SuggestionPair {
        openai: AnalysisResult {
            provider: openai.name().to_string(),
            raw_text: openai_text,
        },
        claude: AnalysisResult {
            provider: claude.name().to_string(),
            raw_text: claude_text,
        },
    })
}

/// True while at least one backend's overall score sits below the
/// threshold. Sentinel or malformed overalls coerce to 0 and keep the
/// offer open.
pub fn suggestions_available(results: &AnalysisPair) -> bool {
    let openai_overall = score_percent(&extract_scores(&results.openai.raw_text).overall);
    let claude_overall = score_percent(&extract_scores(&results.claude.raw_text).overall);
    openai_overall < SUGGESTION_THRESHOLD || claude_overall < SUGGESTION_THRESHOLD
}
