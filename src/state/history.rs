use uuid::Uuid;

use crate::dao::models::GameEntity;

/// Ordered collection of saved games, newest first.
///
/// Upserts either replace an existing entry in place, keeping its position,
/// or prepend a brand-new entry. At most one entry exists per id.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<GameEntity>,
}

impl HistoryLog {
    /// Wrap already-ordered entries loaded from storage.
    pub fn from_entries(entries: Vec<GameEntity>) -> Self {
        Self { entries }
    }

    /// Insert or replace by id: an existing entry is replaced in place, a
    /// new one becomes the newest (first) entry.
    pub fn upsert(&mut self, entry: GameEntity) {
        match self.entries.iter().position(|existing| existing.id == entry.id) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.insert(0, entry),
        }
    }

    /// Remove the entry with `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up an entry by id.
    pub fn find(&self, id: Uuid) -> Option<&GameEntity> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All entries in storage order, newest first.
    pub fn entries(&self) -> &[GameEntity] {
        &self.entries
    }

    /// Number of saved games.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> GameEntity {
        GameEntity {
            id: Uuid::new_v4(),
            saved_at: String::new(),
            game_date: String::new(),
            home_team: String::new(),
            away_team: name.into(),
            home_color: String::new(),
            away_color: String::new(),
            home_goals: 0,
            away_goals: 0,
            home_shots: 0,
            away_shots: 0,
        }
    }

    #[test]
    fn new_entries_are_prepended() {
        let mut log = HistoryLog::default();
        log.upsert(entry("first"));
        log.upsert(entry("second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].away_team, "second");
        assert_eq!(log.entries()[1].away_team, "first");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut log = HistoryLog::default();
        log.upsert(entry("newest"));
        let mut target = entry("middle");
        log.upsert(target.clone());
        log.upsert(entry("oldest"));
        let position = log
            .entries()
            .iter()
            .position(|e| e.id == target.id)
            .unwrap();

        target.home_goals = 9;
        log.upsert(target.clone());

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[position].id, target.id);
        assert_eq!(log.entries()[position].home_goals, 9);
    }

    #[test]
    fn remove_deletes_only_the_matching_entry() {
        let mut log = HistoryLog::default();
        let keep = entry("keep");
        let drop = entry("drop");
        log.upsert(keep.clone());
        log.upsert(drop.clone());

        assert!(log.remove(drop.id));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].id, keep.id);
    }

    #[test]
    fn removing_an_unknown_id_is_a_no_op() {
        let mut log = HistoryLog::default();
        log.upsert(entry("only"));
        assert!(!log.remove(Uuid::new_v4()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_empties_the_log_and_stays_empty() {
        let mut log = HistoryLog::default();
        log.upsert(entry("a"));
        log.upsert(entry("b"));

        log.clear();
        assert!(log.is_empty());

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn find_returns_the_matching_entry() {
        let mut log = HistoryLog::default();
        let target = entry("target");
        log.upsert(entry("other"));
        log.upsert(target.clone());

        assert_eq!(log.find(target.id).unwrap().id, target.id);
        assert!(log.find(Uuid::new_v4()).is_none());
    }
}
