//! One-shot schema migrations for data persisted by earlier app generations.
//!
//! The pipeline is an ordered list of key upgrades; each step runs only
//! when its destination key is still absent, so migration never overwrites
//! data that already lives under the current schema. A step that cannot
//! parse its legacy data is abandoned silently and the destination key is
//! simply left unset.

use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::IdSource,
    dao::{
        kv::KeyValueStore,
        models::{CurrentGameEntity, GameEntity},
        score_store::{KEY_CURRENT, KEY_HISTORY},
    },
};

/// v1 key for the current game (single "opponent" team, optional venue).
const KEY_CURRENT_V1: &str = "ht_current_v1";
/// v1 key for the saved-games log.
const KEY_HISTORY_V1: &str = "ht_history_v1";

/// One key upgrade in the migration pipeline.
struct KeyMigration {
    /// Schema version this step upgrades to.
    to_version: u32,
    source: &'static str,
    destination: &'static str,
    transform: fn(&str, &dyn IdSource) -> Option<String>,
}

/// Ordered pipeline; a future v3 step chains after these.
fn pipeline() -> Vec<KeyMigration> {
    vec![
        KeyMigration {
            to_version: 2,
            source: KEY_CURRENT_V1,
            destination: KEY_CURRENT,
            transform: migrate_current_v1,
        },
        KeyMigration {
            to_version: 2,
            source: KEY_HISTORY_V1,
            destination: KEY_HISTORY,
            transform: migrate_history_v1,
        },
    ]
}

/// Run every pending step against `kv`.
///
/// Idempotent: steps whose destination key already holds data are skipped,
/// and legacy keys are removed once their transform has been written, so a
/// second invocation finds nothing to do.
pub fn run(kv: &mut dyn KeyValueStore, ids: &dyn IdSource) {
    for step in pipeline() {
        if kv.get(step.destination).is_some() {
            continue;
        }
        let Some(raw) = kv.get(step.source) else {
            continue;
        };

        match (step.transform)(&raw, ids) {
            Some(migrated) => {
                if let Err(err) = kv.set(step.destination, &migrated) {
                    warn!(key = step.destination, error = %err, "failed to write migrated data");
                    continue;
                }
                if let Err(err) = kv.remove(step.source) {
                    warn!(key = step.source, error = %err, "failed to drop legacy key");
                }
                info!(
                    key = step.destination,
                    version = step.to_version,
                    "migrated legacy data"
                );
            }
            None => {
                debug!(key = step.source, "legacy data unreadable; leaving destination unset");
            }
        }
    }
}

/// v1 record shape, shared by the current game and history entries.
///
/// v1 also carried a `venue` field; it has no v2 counterpart and is dropped
/// by not being read. The scorekeeper's own team was called `team` and maps
/// to the v2 home side, `opponent` maps to the away side.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyGameV1 {
    id: Option<String>,
    saved_at: String,
    game_date: String,
    team: String,
    opponent: String,
    home_color: String,
    away_color: String,
    home_goals: u32,
    away_goals: u32,
    home_shots: u32,
    away_shots: u32,
}

fn migrate_current_v1(raw: &str, _ids: &dyn IdSource) -> Option<String> {
    let legacy: LegacyGameV1 = serde_json::from_str(raw).ok()?;

    let current = CurrentGameEntity {
        game_date: legacy.game_date,
        home_team: legacy.team,
        away_team: legacy.opponent,
        home_color: legacy.home_color,
        away_color: legacy.away_color,
        home_goals: legacy.home_goals,
        away_goals: legacy.away_goals,
        home_shots: legacy.home_shots.max(legacy.home_goals),
        away_shots: legacy.away_shots.max(legacy.away_goals),
        ..CurrentGameEntity::default()
    };

    serde_json::to_string(&current).ok()
}

fn migrate_history_v1(raw: &str, ids: &dyn IdSource) -> Option<String> {
    let legacy: Vec<LegacyGameV1> = serde_json::from_str(raw).ok()?;
    let entries: Vec<GameEntity> = legacy
        .into_iter()
        .map(|game| upgrade_entry(game, ids))
        .collect();
    serde_json::to_string(&entries).ok()
}

/// Total upgrade of one v1 history record: every legacy record yields
/// exactly one v2 record, defaulting whatever v1 did not carry.
fn upgrade_entry(legacy: LegacyGameV1, ids: &dyn IdSource) -> GameEntity {
    let id = legacy
        .id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(|| ids.fresh());

    GameEntity {
        id,
        saved_at: legacy.saved_at,
        game_date: legacy.game_date,
        home_team: legacy.team,
        away_team: legacy.opponent,
        home_color: legacy.home_color,
        away_color: legacy.away_color,
        home_goals: legacy.home_goals,
        away_goals: legacy.away_goals,
        home_shots: legacy.home_shots.max(legacy.home_goals),
        away_shots: legacy.away_shots.max(legacy.away_goals),
    }
}
