//! Per-session state — an explicit state object with an explicit reset,
//! never an ambient global shared across sessions.
//!
//! `Phase` is derived from what the session holds rather than stored, so
//! the machine cannot drift: both documents extracted → `Ready`, cached
//! results present → `Analyzed`. The comparison/suggestion panels are
//! orthogonal visibility flags entered only from `Analyzed`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::analyzer::AnalysisPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Ready,
    Analyzed,
}

/// One interactive user's session. Lives from creation until delete; cached
/// results survive re-renders but never the session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_text: Option<String>,
    pub job_desc_text: Option<String>,
    pub results: Option<AnalysisPair>,
    pub comparison_visible: bool,
    pub suggestions_visible: bool,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            resume_text: None,
            job_desc_text: None,
            results: None,
            comparison_visible: false,
            suggestions_visible: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.results.is_some() {
            Phase::Analyzed
        } else if self.resume_text.is_some() && self.job_desc_text.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Returns the session to `Idle`: documents, cached results, and panel
    /// flags are all cleared.
    pub fn reset(&mut self) {
        self.resume_text = None;
        self.job_desc_text = None;
        self.results = None;
        self.comparison_visible = false;
        self.suggestions_visible = false;
    }
}

/// In-memory session registry. Sessions are fully isolated from one
/// another; nothing here persists past process shutdown.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Returns a snapshot of the session, if it exists.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Applies a mutation to the session and returns its result, or `None`
    /// for an unknown id.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        self.inner.write().await.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::AnalysisResult;

    fn analyzed_pair() -> AnalysisPair {
        AnalysisPair {
            openai: AnalysisResult {
                provider: "OpenAI".to_string(),
                raw_text: "- Overall: 85%".to_string(),
            },
            claude: AnalysisResult {
                provider: "Claude".to_string(),
                raw_text: "- Overall: 90%".to_string(),
            },
        }
    }

    #[test]
    fn test_phase_progression() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);

        session.resume_text = Some("resume".to_string());
        assert_eq!(session.phase(), Phase::Idle);

        session.job_desc_text = Some("jd".to_string());
        assert_eq!(session.phase(), Phase::Ready);

        session.results = Some(analyzed_pair());
        assert_eq!(session.phase(), Phase::Analyzed);
    }

    #[test]
    fn test_empty_extracted_text_still_counts_as_uploaded() {
        // a zero-byte upload extracts to "", which is present, not absent
        let mut session = Session::new();
        session.resume_text = Some(String::new());
        session.job_desc_text = Some("jd".to_string());
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn test_reset_returns_to_idle_and_clears_flags() {
        let mut session = Session::new();
        session.resume_text = Some("resume".to_string());
        session.job_desc_text = Some("jd".to_string());
        session.results = Some(analyzed_pair());
        session.comparison_visible = true;
        session.suggestions_visible = true;

        session.reset();

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.resume_text.is_none());
        assert!(session.results.is_none());
        assert!(!session.comparison_visible);
        assert!(!session.suggestions_visible);
    }

    #[tokio::test]
    async fn test_store_isolates_sessions() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;

        store
            .update(a.id, |s| s.resume_text = Some("resume".to_string()))
            .await
            .unwrap();

        assert!(store.get(a.id).await.unwrap().resume_text.is_some());
        assert!(store.get(b.id).await.unwrap().resume_text.is_none());
    }

    #[tokio::test]
    async fn test_store_remove_destroys_the_session() {
        let store = SessionStore::new();
        let session = store.create().await;

        assert!(store.remove(session.id).await);
        assert!(store.get(session.id).await.is_none());
        assert!(!store.remove(session.id).await);
    }

    #[tokio::test]
    async fn test_update_on_unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.update(Uuid::new_v4(), |s| s.reset()).await.is_none());
    }
}
