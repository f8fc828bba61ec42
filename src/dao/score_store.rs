use tracing::warn;

use crate::dao::{
    kv::KeyValueStore,
    models::{CurrentGameEntity, GameEntity},
    storage::{StorageError, StorageResult},
};

/// Storage key holding the current game. Key names are kept identical to
/// earlier generations of the app so data already on a device is picked up.
pub const KEY_CURRENT: &str = "ht_current_v2";
/// Storage key holding the saved-games log, newest first.
pub const KEY_HISTORY: &str = "ht_history_v2";

/// Typed repository over the key-value boundary.
///
/// Owns the versioned key names, JSON (de)serialization, and the policy
/// that unreadable persisted data degrades to defaults instead of erroring.
pub struct ScoreStore {
    kv: Box<dyn KeyValueStore>,
}

impl ScoreStore {
    /// Wrap a key-value backend.
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the current game, substituting a default record when the key is
    /// absent or holds malformed data.
    pub fn load_current(&self) -> CurrentGameEntity {
        let Some(raw) = self.kv.get(KEY_CURRENT) else {
            return CurrentGameEntity::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "malformed current game in storage; using defaults");
            CurrentGameEntity::default()
        })
    }

    /// Overwrite the stored current game wholesale.
    pub fn save_current(&mut self, current: &CurrentGameEntity) -> StorageResult<()> {
        let raw = serde_json::to_string(current)
            .map_err(|source| StorageError::encode(KEY_CURRENT, source))?;
        self.kv.set(KEY_CURRENT, &raw)
    }

    /// Load the saved-games log, substituting an empty log when the key is
    /// absent or holds malformed data.
    ///
    /// Decoding is tolerant per entry: one unreadable record is skipped
    /// with a warning instead of discarding every saved game around it.
    pub fn load_history(&self) -> Vec<GameEntity> {
        let Some(raw) = self.kv.get(KEY_HISTORY) else {
            return Vec::new();
        };
        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                warn!(error = %err, "malformed history in storage; starting empty");
                return Vec::new();
            }
        };
        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<GameEntity>(value) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping malformed history entry");
                    None
                }
            })
            .collect()
    }

    /// Overwrite the stored saved-games log wholesale.
    pub fn save_history(&mut self, entries: &[GameEntity]) -> StorageResult<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|source| StorageError::encode(KEY_HISTORY, source))?;
        self.kv.set(KEY_HISTORY, &raw)
    }

    /// Drop the stored saved-games log entirely.
    pub fn clear_history(&mut self) -> StorageResult<()> {
        self.kv.remove(KEY_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::dao::kv::MemoryStore;

    fn store() -> ScoreStore {
        ScoreStore::new(Box::new(MemoryStore::new()))
    }

    fn entry(home_goals: u32) -> GameEntity {
        GameEntity {
            id: Uuid::new_v4(),
            saved_at: "2024-01-05T18:00:00Z".into(),
            game_date: "2024-01-05".into(),
            home_team: String::new(),
            away_team: String::new(),
            home_color: String::new(),
            away_color: String::new(),
            home_goals,
            away_goals: 0,
            home_shots: home_goals,
            away_shots: 0,
        }
    }

    #[test]
    fn absent_current_game_yields_defaults() {
        let store = store();
        assert_eq!(store.load_current(), CurrentGameEntity::default());
    }

    #[test]
    fn current_game_round_trips() {
        let mut store = store();
        let current = CurrentGameEntity {
            home_team: "Sharks".into(),
            home_goals: 2,
            home_shots: 5,
            ..CurrentGameEntity::default()
        };
        store.save_current(&current).unwrap();
        assert_eq!(store.load_current(), current);
    }

    #[test]
    fn malformed_current_game_yields_defaults() {
        let mut store = store();
        store.kv.set(KEY_CURRENT, "{ nope").unwrap();
        assert_eq!(store.load_current(), CurrentGameEntity::default());
    }

    #[test]
    fn history_round_trips_in_order() {
        let mut store = store();
        let entries = vec![entry(3), entry(1)];
        store.save_history(&entries).unwrap();
        assert_eq!(store.load_history(), entries);
    }

    #[test]
    fn malformed_history_yields_empty_log() {
        let mut store = store();
        store.kv.set(KEY_HISTORY, "[{ nope").unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn history_entry_without_id_is_skipped_not_fatal() {
        let mut store = store();
        let keep = entry(2);
        let raw = format!(
            r#"[{{"gameDate":"2024-01-05","homeGoals":1}},{}]"#,
            serde_json::to_string(&keep).unwrap()
        );
        store.kv.set(KEY_HISTORY, &raw).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, keep.id);
    }

    #[test]
    fn clear_history_removes_the_key() {
        let mut store = store();
        store.save_history(&[entry(1)]).unwrap();
        store.clear_history().unwrap();
        assert!(store.load_history().is_empty());
        assert_eq!(store.kv.get(KEY_HISTORY), None);
    }
}
