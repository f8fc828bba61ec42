use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Saved snapshot of a completed (or checkpointed) game in the history log.
///
/// Field names on the wire are camelCase to stay byte-compatible with the
/// JSON written by earlier generations of the app, so data already on a
/// device keeps loading. Counters and labels default individually so a
/// partially written entry still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameEntity {
    /// Primary key of the snapshot, unique across the history log.
    pub id: Uuid,
    /// RFC 3339 instant at which the snapshot was created or last updated.
    #[serde(default)]
    pub saved_at: String,
    /// Calendar date of the game, `YYYY-MM-DD`.
    #[serde(default)]
    pub game_date: String,
    /// Home team display name; blank means "use the generic label".
    #[serde(default)]
    pub home_team: String,
    /// Away team display name; blank means "use the generic label".
    #[serde(default)]
    pub away_team: String,
    /// Home display color token (e.g. a hex string); cosmetic only.
    #[serde(default)]
    pub home_color: String,
    /// Away display color token; cosmetic only.
    #[serde(default)]
    pub away_color: String,
    /// Goals scored by the home team.
    #[serde(default)]
    pub home_goals: u32,
    /// Goals scored by the away team.
    #[serde(default)]
    pub away_goals: u32,
    /// Shots on goal taken by the home team.
    #[serde(default)]
    pub home_shots: u32,
    /// Shots on goal taken by the away team.
    #[serde(default)]
    pub away_shots: u32,
}

/// Persisted state of the game currently being scored, plus session fields.
///
/// Unlike [`GameEntity`] this record carries no `id`/`savedAt`: it is
/// overwritten wholesale on every mutation and only ever exists once.
/// Every field defaults, so loading merges whatever was stored over a
/// fresh record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentGameEntity {
    /// Calendar date of the game, `YYYY-MM-DD`; blank until defaulted.
    pub game_date: String,
    /// Home team display name.
    pub home_team: String,
    /// Away team display name.
    pub away_team: String,
    /// Home display color token.
    pub home_color: String,
    /// Away display color token.
    pub away_color: String,
    /// Selected UI theme.
    pub theme_mode: ThemeMode,
    /// Selected UI layout.
    pub layout_mode: LayoutMode,
    /// Whether the settings panel is collapsed.
    pub settings_collapsed: bool,
    /// Whether the saved-games panel is collapsed.
    pub saved_collapsed: bool,
    /// Goals scored by the home team.
    pub home_goals: u32,
    /// Goals scored by the away team.
    pub away_goals: u32,
    /// Shots on goal taken by the home team.
    pub home_shots: u32,
    /// Shots on goal taken by the away team.
    pub away_shots: u32,
    /// History entry this sheet was resumed from, if any.
    pub editing_id: Option<Uuid>,
}

impl Default for CurrentGameEntity {
    fn default() -> Self {
        Self {
            game_date: String::new(),
            home_team: String::new(),
            away_team: String::new(),
            home_color: String::new(),
            away_color: String::new(),
            theme_mode: ThemeMode::Auto,
            layout_mode: LayoutMode::Auto,
            // Both panels start collapsed so the scoring controls lead.
            settings_collapsed: true,
            saved_collapsed: true,
            home_goals: 0,
            away_goals: 0,
            home_shots: 0,
            away_shots: 0,
            editing_id: None,
        }
    }
}

/// UI theme preference carried with the current game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the device preference.
    #[default]
    Auto,
    /// Force the light theme.
    Light,
    /// Force the dark theme.
    Dark,
}

/// UI layout preference carried with the current game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Follow the device orientation.
    #[default]
    Auto,
    /// Force the portrait layout.
    Portrait,
    /// Force the landscape layout.
    Landscape,
}
