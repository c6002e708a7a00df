use contracts::usecases::u505_match_skus::progress::{
    ReprocessError, ReprocessProgress, ReprocessStatus,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Tracker de progresso do reprocessamento de mapeamentos (in-memory)
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, ReprocessProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn create_session(&self, session_id: String, total: i32) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(
            session_id.clone(),
            ReprocessProgress {
                session_id,
                status: ReprocessStatus::InProgress,
                total,
                processed: 0,
                items_updated: 0,
                errors: 0,
                error_list: Vec::new(),
                current_item: None,
                started_at: chrono::Utc::now(),
                completed_at: None,
            },
        );
    }

    pub fn get_progress(&self, session_id: &str) -> Option<ReprocessProgress> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned()
    }

    pub fn update_progress(&self, session_id: &str, processed: i32, items_updated: i32) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.processed = processed;
            progress.items_updated = items_updated;
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
        channel_sku: Option<String>,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.errors += 1;
            progress.error_list.push(ReprocessError {
                message,
                details,
                channel_sku,
            });
        }
    }

    pub fn complete_session(&self, session_id: &str, status: ReprocessStatus) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.status = status;
            progress.completed_at = Some(chrono::Utc::now());
            progress.current_item = None;
        }
    }

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
