//! Server-side session store for last-prediction replay.
//!
//! Keyed by a `sid` cookie. Entries expire after a TTL and are pruned on
//! every insert, so the map stays bounded on a long-running server. Loss
//! of an entry is non-fatal: the results page simply redirects back to
//! the input form.

use crate::domain::features::FeatureRecord;
use crate::domain::prediction::PredictionResult;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const DEFAULT_TTL_SECS: i64 = 1800;

#[derive(Debug, Clone)]
pub struct LastPrediction {
    pub record: FeatureRecord,
    pub result: PredictionResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, LastPrediction>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn store(&self, session_id: Uuid, record: FeatureRecord, result: PredictionResult) {
        let now = Utc::now();
        let entry = LastPrediction {
            record,
            result,
            created_at: now,
        };
        if let Ok(mut sessions) = self.inner.write() {
            sessions.retain(|_, e| now - e.created_at < self.ttl);
            sessions.insert(session_id, entry);
        }
    }

    /// Returns the live entry for a session. Expired entries are treated
    /// as absent; physical removal happens on the next `store`.
    pub fn get(&self, session_id: &Uuid) -> Option<LastPrediction> {
        let now = Utc::now();
        self.inner.read().ok().and_then(|sessions| {
            sessions
                .get(session_id)
                .filter(|e| now - e.created_at < self.ttl)
                .cloned()
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
