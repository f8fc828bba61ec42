use uuid::Uuid;

use crate::dao::models::{CurrentGameEntity, LayoutMode, ThemeMode};

/// Identifies one of the four scoring counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Goals scored by the home team.
    HomeGoals,
    /// Shots on goal taken by the home team.
    HomeShots,
    /// Goals scored by the away team.
    AwayGoals,
    /// Shots on goal taken by the away team.
    AwayShots,
}

/// Identifies a team slot on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The home team.
    Home,
    /// The away team.
    Away,
}

impl Side {
    /// The other side. A goalie's stats come from the opponent's shots.
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Derived goalie line for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalieLine {
    /// Shots the goalie stopped.
    pub saves: u32,
    /// Shots the goalie faced.
    pub shots_against: u32,
    /// Save percentage, rounded and clamped to 0..=100; 0 when no shots.
    pub pct: u8,
}

impl GoalieLine {
    /// Derive a goalie line from the opposing side's raw counters.
    pub fn from_counters(shots_against: u32, goals_against: u32) -> Self {
        let saves = shots_against.saturating_sub(goals_against);
        let pct = if shots_against == 0 {
            0
        } else {
            let ratio = f64::from(saves) / f64::from(shots_against);
            (ratio * 100.0).round().clamp(0.0, 100.0) as u8
        };
        Self {
            saves,
            shots_against,
            pct,
        }
    }
}

/// Runtime record of the game currently being scored.
///
/// Exactly one sheet exists per session. Counters only move through
/// [`ScoreSheet::increment`] and [`ScoreSheet::decrement`], which keep the
/// shots-at-least-goals invariant on both sides after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    /// Calendar date of the game, `YYYY-MM-DD`.
    pub game_date: String,
    /// Home team display name; blank falls back to a generic label.
    pub home_team: String,
    /// Away team display name; blank falls back to a generic label.
    pub away_team: String,
    /// Home display color token.
    pub home_color: String,
    /// Away display color token.
    pub away_color: String,
    /// UI theme preference.
    pub theme_mode: ThemeMode,
    /// UI layout preference.
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

impl ScoreSheet {
    /// Fresh zeroed sheet for the given date and default colors.
    pub fn fresh(game_date: String, home_color: String, away_color: String) -> Self {
        let mut sheet = ScoreSheet::from(CurrentGameEntity::default());
        sheet.game_date = game_date;
        sheet.home_color = home_color;
        sheet.away_color = away_color;
        sheet
    }

    /// Bump `counter` by one. A goal counter also bumps the same side's
    /// shot counter, since every goal is a shot on goal.
    pub fn increment(&mut self, counter: Counter) {
        match counter {
            Counter::HomeGoals => {
                self.home_goals += 1;
                self.home_shots += 1;
            }
            Counter::AwayGoals => {
                self.away_goals += 1;
                self.away_shots += 1;
            }
            Counter::HomeShots => self.home_shots += 1,
            Counter::AwayShots => self.away_shots += 1,
        }
        self.normalize_shot_floor();
    }

    /// Lower `counter` by one, floored at zero. Removing a goal also
    /// removes the paired shot; a goal counter at zero is left alone.
    pub fn decrement(&mut self, counter: Counter) {
        match counter {
            Counter::HomeGoals => {
                if self.home_goals > 0 {
                    self.home_goals -= 1;
                    self.home_shots = self.home_shots.saturating_sub(1);
                }
            }
            Counter::AwayGoals => {
                if self.away_goals > 0 {
                    self.away_goals -= 1;
                    self.away_shots = self.away_shots.saturating_sub(1);
                }
            }
            Counter::HomeShots => self.home_shots = self.home_shots.saturating_sub(1),
            Counter::AwayShots => self.away_shots = self.away_shots.saturating_sub(1),
        }
        self.normalize_shot_floor();
    }

    /// Zero every counter and detach from any saved entry. Cosmetic and
    /// session fields (date, names, colors, theme/layout, collapses) stay.
    pub fn reset_counters(&mut self) {
        self.home_goals = 0;
        self.home_shots = 0;
        self.away_goals = 0;
        self.away_shots = 0;
        self.editing_id = None;
    }

    /// Derived goalie line for `side`; the home goalie faces the away
    /// team's shots and vice versa.
    pub fn goalie_line(&self, side: Side) -> GoalieLine {
        let (shots_against, goals_against) = match side.opponent() {
            Side::Home => (self.home_shots, self.home_goals),
            Side::Away => (self.away_shots, self.away_goals),
        };
        GoalieLine::from_counters(shots_against, goals_against)
    }

    /// Shots can never sit below goals on either side.
    fn normalize_shot_floor(&mut self) {
        self.home_shots = self.home_shots.max(self.home_goals);
        self.away_shots = self.away_shots.max(self.away_goals);
    }
}

impl From<CurrentGameEntity> for ScoreSheet {
    fn from(value: CurrentGameEntity) -> Self {
        let mut sheet = Self {
            game_date: value.game_date,
            home_team: value.home_team,
            away_team: value.away_team,
            home_color: value.home_color,
            away_color: value.away_color,
            theme_mode: value.theme_mode,
            layout_mode: value.layout_mode,
            settings_collapsed: value.settings_collapsed,
            saved_collapsed: value.saved_collapsed,
            home_goals: value.home_goals,
            away_goals: value.away_goals,
            home_shots: value.home_shots,
            away_shots: value.away_shots,
            editing_id: value.editing_id,
        };
        // Stored data may predate the invariant.
        sheet.normalize_shot_floor();
        sheet
    }
}

impl From<&ScoreSheet> for CurrentGameEntity {
    fn from(value: &ScoreSheet) -> Self {
        Self {
            game_date: value.game_date.clone(),
            home_team: value.home_team.clone(),
            away_team: value.away_team.clone(),
            home_color: value.home_color.clone(),
            away_color: value.away_color.clone(),
            theme_mode: value.theme_mode,
            layout_mode: value.layout_mode,
            settings_collapsed: value.settings_collapsed,
            saved_collapsed: value.saved_collapsed,
            home_goals: value.home_goals,
            away_goals: value.away_goals,
            home_shots: value.home_shots,
            away_shots: value.away_shots,
            editing_id: value.editing_id,
        }
    }
}
