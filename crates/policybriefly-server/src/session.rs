//! In-memory analysis sessions.
//!
//! A session owns one loaded document and the most recent result produced
//! for it. Nothing here outlives the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use policybriefly_analyze::AnalysisResult;
use policybriefly_ingest::Document;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub document: Arc<Document>,
    pub result: Option<Arc<AnalysisResult>>,
    pub created_at: DateTime<Utc>,
    seq: u64,
}

/// Bounded session map. The lock is never held across an await.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    next_seq: AtomicU64,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Open a session for `document`, evicting the oldest when full.
    pub fn create(&self, document: Document) -> Session {
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            document: Arc::new(document),
            result: None,
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };

        let mut sessions = self.sessions.write();
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.seq)
                .map(|s| s.id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    info!("Evicted session {}", id);
                }
                None => break,
            }
        }
        sessions.insert(session.id.clone(), session.clone());
        debug!("Opened session {} for {}", session.id, session.document.filename());
        session
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().get(id).cloned()
    }

    /// Store the latest result. `None` if the session is gone.
    pub fn set_result(&self, id: &str, result: AnalysisResult) -> Option<Arc<AnalysisResult>> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id)?;
        let result = Arc::new(result);
        session.result = Some(result.clone());
        Some(result)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
