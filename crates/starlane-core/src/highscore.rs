use log::{debug, warn};
use serde::{Deserialize, Serialize};
use starlane_domain_song::SongId;
use starlane_ports::storage::StoragePort;
use starlane_ports::types::Shared;

pub const HIGH_SCORE_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Milliseconds since the Unix epoch.
    pub achieved_at: i64,
}

pub fn score_key(song_id: &SongId) -> String {
    format!("score:{}", song_id)
}

/// Appends `entry`, then keeps the best `HIGH_SCORE_LIMIT` by score. The sort
/// is stable, so among equal scores the earlier play ranks first.
pub fn insert_ranked(mut list: Vec<HighScoreEntry>, entry: HighScoreEntry) -> Vec<HighScoreEntry> {
    list.push(entry);
    ranked(list)
}

fn ranked(mut list: Vec<HighScoreEntry>) -> Vec<HighScoreEntry> {
    list.sort_by(|a, b| b.score.cmp(&a.score));
    list.truncate(HIGH_SCORE_LIMIT);
    list
}

/// Per-song top scores kept behind the storage port. Storage trouble never
/// reaches the caller: unreadable data counts as an empty list and failed
/// writes are only logged.
#[derive(Clone)]
pub struct HighScoreStore {
    storage: Shared<dyn StoragePort>,
}

impl HighScoreStore {
    pub fn new(storage: Shared<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub fn load(&self, song_id: &SongId) -> Vec<HighScoreEntry> {
        let key = score_key(song_id);
        let raw = match self.storage.read_value(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("could not read {}: {}", key, err);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
            // a hand-edited file can break the ranking
            Ok(list) => ranked(list),
            Err(err) => {
                warn!("discarding unreadable {}: {}", key, err);
                Vec::new()
            }
        }
    }

    pub fn record(&self, song_id: &SongId, score: u64) -> Vec<HighScoreEntry> {
        self.record_at(song_id, score, chrono::Utc::now().timestamp_millis())
    }

    pub fn record_at(&self, song_id: &SongId, score: u64, achieved_at: i64) -> Vec<HighScoreEntry> {
        let updated = insert_ranked(self.load(song_id), HighScoreEntry { score, achieved_at });
        let key = score_key(song_id);
        match serde_json::to_string(&updated) {
            Ok(raw) => {
                if let Err(err) = self.storage.write_value(&key, &raw) {
                    warn!("could not save {}: {}", key, err);
                } else {
                    debug!("saved {} ({} entries)", key, updated.len());
                }
            }
            Err(err) => warn!("could not encode {}: {}", key, err),
        }
        updated
    }
}
