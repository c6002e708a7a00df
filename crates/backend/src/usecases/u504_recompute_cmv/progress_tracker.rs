use contracts::usecases::u504_recompute_cmv::progress::{
    RecomputeError, RecomputeProgress, RecomputeStatus,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Tracker de progresso da recomputação (in-memory, consultado por
/// polling)
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, RecomputeProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cria uma nova sessão de recomputação
    pub fn create_session(&self, session_id: String, total: i32) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(
            session_id.clone(),
            RecomputeProgress {
                session_id,
                status: RecomputeStatus::InProgress,
                total,
                processed: 0,
                items_costed: 0,
                items_unmapped: 0,
                items_errored: 0,
                error_list: Vec::new(),
                current_item: None,
                started_at: chrono::Utc::now(),
                completed_at: None,
            },
        );
    }

    pub fn get_progress(&self, session_id: &str) -> Option<RecomputeProgress> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned()
    }

    pub fn update_progress(
        &self,
        session_id: &str,
        processed: i32,
        items_costed: i32,
        items_unmapped: i32,
        items_errored: i32,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.processed = processed;
            progress.items_costed = items_costed;
            progress.items_unmapped = items_unmapped;
            progress.items_errored = items_errored;
        }
    }

    pub fn set_current_item(&self, session_id: &str, label: Option<String>) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.current_item = label;
        }
    }

    pub fn add_error(
        &self,
        session_id: &str,
        message: String,
        details: Option<String>,
        transaction: Option<String>,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.error_list.push(RecomputeError {
                message,
                details,
                transaction,
            });
        }
    }

    pub fn complete_session(&self, session_id: &str, status: RecomputeStatus) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.status = status;
            progress.completed_at = Some(chrono::Utc::now());
            progress.current_item = None;
        }
    }

    /// Remove sessões antigas já concluídas
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) {
        let mut sessions = self.sessions.write().unwrap();
        let now = chrono::Utc::now();
        sessions.retain(|_, progress| {
            if let Some(completed_at) = progress.completed_at {
                (now - completed_at).num_hours() < max_age_hours
            } else {
                true
            }
        });
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
