//! Core orchestration between the live score sheet and the saved-games log.
//!
//! [`ScoreKeeper`] is the only component that assigns identifiers and moves
//! data between the sheet and the log. Every mutating operation persists
//! its result before returning; a failed write is logged and otherwise
//! ignored, the in-memory state staying authoritative for the session.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::{Clock, IdSource},
    config::AppConfig,
    dao::{
        kv::KeyValueStore,
        migrations,
        models::{CurrentGameEntity, GameEntity, LayoutMode, ThemeMode},
        score_store::ScoreStore,
    },
    dto::scoreboard::{HistoryItem, Scoreboard},
    state::{
        game::{Counter, GoalieLine, ScoreSheet, Side},
        history::HistoryLog,
    },
};

/// Single-threaded controller owning the live sheet, the saved-games log,
/// and the persistence, clock, and identifier capabilities.
pub struct ScoreKeeper {
    store: ScoreStore,
    sheet: ScoreSheet,
    history: HistoryLog,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    default_home_color: String,
    default_away_color: String,
}

impl ScoreKeeper {
    /// Open the controller over `kv`.
    ///
    /// Runs pending schema migrations first, then materializes the current
    /// game and the history from storage, substituting defaults when either
    /// is absent or unreadable. A blank date or color on the loaded sheet
    /// is filled from the clock and the configured defaults.
    pub fn open(
        mut kv: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdSource>,
        config: &AppConfig,
    ) -> Self {
        migrations::run(kv.as_mut(), ids.as_ref());

        let default_home_color = config.default_home_color().to_string();
        let default_away_color = config.default_away_color().to_string();

        let store = ScoreStore::new(kv);
        let mut sheet = ScoreSheet::from(store.load_current());
        if sheet.game_date.is_empty() {
            sheet.game_date = clock.today();
        }
        if sheet.home_color.is_empty() {
            sheet.home_color = default_home_color.clone();
        }
        if sheet.away_color.is_empty() {
            sheet.away_color = default_away_color.clone();
        }
        let history = HistoryLog::from_entries(store.load_history());

        debug!(saved_games = history.len(), "scorekeeper ready");
        let mut keeper = Self {
            store,
            sheet,
            history,
            clock,
            ids,
            default_home_color,
            default_away_color,
        };
        // Write back immediately so the defaulted fields are durable too.
        keeper.persist_current();
        keeper
    }

    /// Bump a counter; goal counters also count a shot for the same side.
    pub fn increment(&mut self, counter: Counter) {
        self.sheet.increment(counter);
        self.persist_current();
    }

    /// Lower a counter, floored at zero; goals take their paired shot along.
    pub fn decrement(&mut self, counter: Counter) {
        self.sheet.decrement(counter);
        self.persist_current();
    }

    /// Zero the counters and detach from any saved entry, keeping cosmetic
    /// and session fields.
    pub fn reset(&mut self) {
        self.sheet.reset_counters();
        self.persist_current();
    }

    /// Snapshot the live sheet into the saved-games log.
    ///
    /// A sheet bound to a saved entry updates that entry in place; an
    /// unbound sheet becomes a brand-new newest entry under a fresh id.
    /// Either way the counters are zeroed and the binding cleared
    /// afterwards. Returns the id of the written entry.
    pub fn save(&mut self) -> Uuid {
        let id = self.sheet.editing_id.unwrap_or_else(|| self.ids.fresh());
        let entry = self.snapshot(id);

        self.history.upsert(entry);
        self.persist_history();

        self.sheet.reset_counters();
        self.persist_current();

        info!(%id, "saved game");
        id
    }

    /// Load a saved entry back into the live sheet and bind to it.
    ///
    /// Unknown ids are a silent no-op, guarding against an entry deleted
    /// between a UI read and the action. Returns whether a load happened.
    pub fn load_from_history(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.history.find(id).cloned() else {
            debug!(%id, "resume target missing; ignoring");
            return false;
        };

        self.sheet.game_date = if entry.game_date.is_empty() {
            self.clock.today()
        } else {
            entry.game_date
        };
        self.sheet.home_team = entry.home_team;
        self.sheet.away_team = entry.away_team;
        // A blank stored color keeps whatever the sheet already shows.
        if !entry.home_color.is_empty() {
            self.sheet.home_color = entry.home_color;
        }
        if !entry.away_color.is_empty() {
            self.sheet.away_color = entry.away_color;
        }
        self.sheet.home_goals = entry.home_goals;
        self.sheet.away_goals = entry.away_goals;
        self.sheet.home_shots = entry.home_shots.max(entry.home_goals);
        self.sheet.away_shots = entry.away_shots.max(entry.away_goals);
        self.sheet.editing_id = Some(id);

        self.persist_current();
        true
    }

    /// Remove one saved entry.
    ///
    /// When the live sheet was editing that entry only the binding is
    /// cleared; the in-progress counters are untouched. Unknown ids are a
    /// silent no-op. Returns whether anything was removed.
    pub fn delete_history_entry(&mut self, id: Uuid) -> bool {
        if !self.history.remove(id) {
            debug!(%id, "delete target missing; ignoring");
            return false;
        }
        self.persist_history();

        if self.sheet.editing_id == Some(id) {
            self.sheet.editing_id = None;
            self.persist_current();
        }
        true
    }

    /// Drop every saved entry and detach the live sheet.
    pub fn clear_history(&mut self) {
        self.history.clear();
        if let Err(err) = self.store.clear_history() {
            warn!(error = %err, "failed to clear stored history");
        }
        if self.sheet.editing_id.take().is_some() {
            self.persist_current();
        }
    }

    /// Update the game date (`YYYY-MM-DD`).
    pub fn set_game_date(&mut self, date: String) {
        self.sheet.game_date = date;
        self.persist_current();
    }

    /// Update a team's display name.
    pub fn set_team_name(&mut self, side: Side, name: String) {
        match side {
            Side::Home => self.sheet.home_team = name,
            Side::Away => self.sheet.away_team = name,
        }
        self.persist_current();
    }

    /// Update a team's display color token.
    pub fn set_team_color(&mut self, side: Side, color: String) {
        match side {
            Side::Home => self.sheet.home_color = color,
            Side::Away => self.sheet.away_color = color,
        }
        self.persist_current();
    }

    /// Update the UI theme preference.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.sheet.theme_mode = mode;
        self.persist_current();
    }

    /// Update the UI layout preference.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.sheet.layout_mode = mode;
        self.persist_current();
    }

    /// Flip the settings panel collapse.
    pub fn toggle_settings_collapsed(&mut self) {
        self.sheet.settings_collapsed = !self.sheet.settings_collapsed;
        self.persist_current();
    }

    /// Flip the saved-games panel collapse.
    pub fn toggle_saved_collapsed(&mut self) {
        self.sheet.saved_collapsed = !self.sheet.saved_collapsed;
        self.persist_current();
    }

    /// The live sheet, read-only.
    pub fn current(&self) -> &ScoreSheet {
        &self.sheet
    }

    /// Saved entries in storage order, newest first.
    pub fn history_entries(&self) -> &[GameEntity] {
        self.history.entries()
    }

    /// Derived goalie line for `side`; that goalie faces the other side's
    /// shots. Pure read.
    pub fn save_percentage(&self, side: Side) -> GoalieLine {
        self.sheet.goalie_line(side)
    }

    /// Display read model for the live scoreboard.
    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::from(&self.sheet)
    }

    /// Display rows for the saved-games list, newest first.
    pub fn history_items(&self) -> Vec<HistoryItem> {
        self.history.entries().iter().map(Into::into).collect()
    }

    fn snapshot(&self, id: Uuid) -> GameEntity {
        GameEntity {
            id,
            saved_at: self.clock.now_rfc3339(),
            game_date: if self.sheet.game_date.is_empty() {
                self.clock.today()
            } else {
                self.sheet.game_date.clone()
            },
            home_team: self.sheet.home_team.clone(),
            away_team: self.sheet.away_team.clone(),
            // Snapshots always carry a usable color token.
            home_color: if self.sheet.home_color.is_empty() {
                self.default_home_color.clone()
            } else {
                self.sheet.home_color.clone()
            },
            away_color: if self.sheet.away_color.is_empty() {
                self.default_away_color.clone()
            } else {
                self.sheet.away_color.clone()
            },
            home_goals: self.sheet.home_goals,
            away_goals: self.sheet.away_goals,
            home_shots: self.sheet.home_shots,
            away_shots: self.sheet.away_shots,
        }
    }

    fn persist_current(&mut self) {
        let entity = CurrentGameEntity::from(&self.sheet);
        if let Err(err) = self.store.save_current(&entity) {
            warn!(error = %err, "failed to persist current game; keeping in-memory state");
        }
    }

    fn persist_history(&mut self) {
        if let Err(err) = self.store.save_history(self.history.entries()) {
            warn!(error = %err, "failed to persist history; keeping in-memory state");
        }
    }
}
