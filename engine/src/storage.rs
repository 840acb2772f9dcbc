//! Files kept in the data directory: the champion preference cache and the
//! append-only teammate history log.

use std::path::PathBuf;

use lcu_companion_api::GameDataApi;
use lcu_companion_shared::{PreferenceCache, TeammateRecord, now_millis};
use serde::{Deserialize, Serialize};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};

use crate::EngineError;

const PREFERENCES_FILE: &str = "champions.json";
const HISTORY_FILE: &str = "teammates.jsonl";

/// One line of the history log, written when a match starts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub recorded_at: i64,
    pub game_mode: Option<String>,
    pub members: Vec<TeammateRecord>,
}

impl HistoryEntry {
    pub fn new(game_mode: Option<String>, members: Vec<TeammateRecord>) -> Self {
        Self {
            recorded_at: now_millis(),
            game_mode,
            members,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// The preference cache, `None` when it was never written.
    pub async fn load_preferences(&self) -> Result<Option<PreferenceCache>, EngineError> {
        let raw = match fs::read(self.preferences_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&raw)?))
    }

    pub async fn save_preferences(&self, cache: &PreferenceCache) -> Result<(), EngineError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.preferences_path(), serde_json::to_vec_pretty(cache)?).await?;
        debug!(
            "💾 Preference cache saved with {} selected champion(s)",
            cache.selected.len()
        );
        Ok(())
    }

    /// Load the preference cache, creating it from the client's champion list
    /// on first start.
    pub async fn load_or_bootstrap_preferences<A: GameDataApi + ?Sized>(
        &self,
        api: &A,
    ) -> Result<PreferenceCache, EngineError> {
        if let Some(cache) = self.load_preferences().await? {
            return Ok(cache);
        }

        let champions = api
            .get_champion_summary()
            .await?
            .into_iter()
            .map(|c| (c.id as u32, c.name))
            .collect();
        let cache = PreferenceCache::unselected(champions);
        self.save_preferences(&cache).await?;

        info!(
            path = %self.preferences_path().display(),
            "💾 Created preference cache with {} champions",
            cache.not_selected.len()
        );
        Ok(cache)
    }

    pub async fn append_history(&self, entry: &HistoryEntry) -> Result<(), EngineError> {
        fs::create_dir_all(&self.dir).await?;

        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.history_path())
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        info!(
            members = entry.members.len(),
            "💾 Teammate history saved"
        );
        Ok(())
    }

    pub async fn read_history(&self) -> Result<Vec<HistoryEntry>, EngineError> {
        let raw = match fs::read_to_string(self.history_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(EngineError::from))
            .collect()
    }
}
