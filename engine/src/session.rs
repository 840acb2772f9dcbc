use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lcu_companion_api::{LcuApiResponse, SummonerApi};
use lcu_companion_shared::TeammateRecord;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// State of the logged-in summoner for the lifetime of one client
/// connection.
#[derive(Debug, Default)]
pub struct Session {
    pub display_name: String,
    pub puuid: String,
    pub summoner_id: u64,
    has_picked: AtomicBool,
    game_mode: RwLock<Option<String>>,
    /// Teammates captured during the current champion select, waiting to be
    /// written to the history log.
    teammates: Mutex<Vec<TeammateRecord>>,
    /// Bumped every time the pending log is cleared.
    batch: AtomicU64,
}

impl Session {
    pub fn new(display_name: String, puuid: String, summoner_id: u64) -> Self {
        Self {
            display_name,
            puuid,
            summoner_id,
            ..Default::default()
        }
    }

    /// Build the session from the summoner currently logged in.
    pub async fn establish<A: SummonerApi + ?Sized>(api: &A) -> LcuApiResponse<Self> {
        let summoner = api.get_current_summoner().await?;
        info!(
            summoner_id = summoner.summoner_id,
            "👤 Logged in as {}",
            summoner.name()
        );

        Ok(Self::new(summoner.name(), summoner.puuid, summoner.summoner_id))
    }

    pub fn has_picked(&self) -> bool {
        self.has_picked.load(Ordering::SeqCst)
    }

    pub fn mark_picked(&self) {
        self.has_picked.store(true, Ordering::SeqCst);
    }

    pub fn reset_pick(&self) {
        self.has_picked.store(false, Ordering::SeqCst);
    }

    pub async fn game_mode(&self) -> Option<String> {
        self.game_mode.read().await.clone()
    }

    pub async fn set_game_mode(&self, game_mode: Option<String>) {
        *self.game_mode.write().await = game_mode;
    }

    /// The batch an analysis started now belongs to.
    pub fn current_batch(&self) -> u64 {
        self.batch.load(Ordering::SeqCst)
    }

    /// Add the records of one analysis batch. Records of a batch that was
    /// cleared in the meantime are discarded and `false` is returned.
    pub async fn append_teammates(&self, batch: u64, records: Vec<TeammateRecord>) -> bool {
        let mut teammates = self.teammates.lock().await;
        if batch != self.current_batch() {
            return false;
        }
        teammates.extend(records);
        true
    }

    /// Drop the pending records and start a new batch.
    pub async fn clear_teammates(&self) {
        let mut teammates = self.teammates.lock().await;
        teammates.clear();
        self.batch.fetch_add(1, Ordering::SeqCst);
    }

    /// Drain the pending records.
    pub async fn take_teammates(&self) -> Vec<TeammateRecord> {
        std::mem::take(&mut *self.teammates.lock().await)
    }

    pub async fn pending_teammates(&self) -> usize {
        self.teammates.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeLcu;

    #[tokio::test]
    async fn established_from_the_current_summoner() {
        let api = FakeLcu::default();
        api.reply_json(
            "GET",
            "/lol-summoner/v1/current-summoner",
            json!({"displayName": "", "gameName": "Faker", "tagLine": "KR1", "puuid": "p-1", "summonerId": 42}),
        );

        let session = Session::establish(&api).await.unwrap();

        assert_eq!(session.display_name, "Faker#KR1");
        assert_eq!(session.puuid, "p-1");
        assert_eq!(session.summoner_id, 42);
        assert!(!session.has_picked());
    }

    #[tokio::test]
    async fn pending_teammates_are_drained() {
        let session = Session::default();
        let batch = session.current_batch();
        assert!(
            session
                .append_teammates(batch, vec![TeammateRecord::new("a".into(), Vec::new())])
                .await
        );

        assert_eq!(session.take_teammates().await.len(), 1);
        assert_eq!(session.pending_teammates().await, 0);
    }

    #[tokio::test]
    async fn stale_batch_is_discarded() {
        let session = Session::default();
        let stale = session.current_batch();
        session.clear_teammates().await;

        let appended = session
            .append_teammates(stale, vec![TeammateRecord::new("old".into(), Vec::new())])
            .await;

        assert!(!appended);
        assert_eq!(session.pending_teammates().await, 0);
        assert!(
            session
                .append_teammates(session.current_batch(), vec![TeammateRecord::new("new".into(), Vec::new())])
                .await
        );
        assert_eq!(session.pending_teammates().await, 1);
    }
}
