//! In-memory attendance token store
//!
//! Live check-in tokens are short-lived and never persisted; a periodic
//! sweep drops expired entries.

use crate::domain::attendance::AttendanceToken;
use crate::shared::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Store for live attendance tokens
pub struct AttendanceStore {
    tokens: tokio::sync::RwLock<HashMap<String, AttendanceToken>>,
    token_length: usize,
}

impl AttendanceStore {
    pub fn new(token_length: usize) -> Self {
        Self {
            tokens: tokio::sync::RwLock::new(HashMap::new()),
            token_length,
        }
    }

    fn generate_token(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.token_length)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect()
    }

    /// Issue a fresh token for an event
    pub async fn issue(&self, event_id: &str, ttl_minutes: u32) -> AppResult<AttendanceToken> {
        let now = Utc::now();
        let token = AttendanceToken {
            token: self.generate_token(),
            event_id: event_id.to_string(),
            issued_at: now,
            expires_at: now + Duration::minutes(i64::from(ttl_minutes)),
        };

        self.tokens
            .write()
            .await
            .insert(token.token.clone(), token.clone());
        Ok(token)
    }

    /// Resolve a token to its event; expired or unknown tokens fail
    pub async fn validate(&self, token: &str) -> AppResult<AttendanceToken> {
        let guard = self.tokens.read().await;
        match guard.get(token) {
            Some(entry) if !entry.is_expired() => Ok(entry.clone()),
            Some(_) => Err(AppError::Validation("check-in token expired".to_string())),
            None => Err(AppError::Validation("unknown check-in token".to_string())),
        }
    }

    /// Drop a token before its expiry (closing a check-in window)
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        if self.tokens.write().await.remove(token).is_none() {
            return Err(AppError::NotFound("check-in token".to_string()));
        }
        Ok(())
    }

    /// Remove expired tokens; returns how many were dropped
    pub async fn sweep_expired(&self) -> usize {
        let mut guard = self.tokens.write().await;
        let before = guard.len();
        guard.retain(|_, entry| !entry.is_expired());
        before - guard.len()
    }

    pub async fn live_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Spawn the periodic sweep task
    pub fn start_sweeper(self: Arc<Self>, interval_seconds: u64) -> tokio::task::JoinHandle<()> {
        let store = self;
        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_secs(interval_seconds));
            loop {
                ticker.tick().await;
                let removed = store.sweep_expired().await;
                if removed > 0 {
                    debug!(removed = removed, "Swept expired check-in tokens");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_validate() {
        let store = AttendanceStore::new(8);
        let token = store.issue("ev_1", 10).await.unwrap();
        assert_eq!(token.token.len(), 8);

        let resolved = store.validate(&token.token).await.unwrap();
        assert_eq!(resolved.event_id, "ev_1");

        let err = store.validate("NOPE1234").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_and_swept() {
        let store = AttendanceStore::new(8);
        let token = store.issue("ev_1", 10).await.unwrap();

        // force expiry
        {
            let mut guard = store.tokens.write().await;
            let entry = guard.get_mut(&token.token).unwrap();
            entry.expires_at = Utc::now() - Duration::seconds(1);
        }

        let err = store.validate(&token.token).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(store.sweep_expired().await, 1);
        assert_eq!(store.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = AttendanceStore::new(8);
        let token = store.issue("ev_1", 10).await.unwrap();
        store.revoke(&token.token).await.unwrap();
        assert!(store.validate(&token.token).await.is_err());
        assert!(matches!(
            store.revoke(&token.token).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
