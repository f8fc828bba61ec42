use uuid::Uuid;

use crate::{
    dao::models::GameEntity,
    state::game::{GoalieLine, ScoreSheet, Side},
};

/// Display label for a side, falling back to a generic label when the
/// configured name is blank or whitespace.
pub fn team_label(name: &str, side: Side) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        match side {
            Side::Home => "Home",
            Side::Away => "Away",
        }
        .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Rendered goalie save line, e.g. `75% (3/4)`; `0% (0/0)` when no shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePercentageView {
    /// Save percentage, 0..=100.
    pub pct: u8,
    /// Full display text including the saves/shots breakdown.
    pub text: String,
}

impl From<GoalieLine> for SavePercentageView {
    fn from(line: GoalieLine) -> Self {
        Self {
            pct: line.pct,
            text: format!("{}% ({}/{})", line.pct, line.saves, line.shots_against),
        }
    }
}

/// Read model for the live scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    /// Home label, already fallen back when blank.
    pub home_label: String,
    /// Away label, already fallen back when blank.
    pub away_label: String,
    /// Home goals.
    pub home_goals: u32,
    /// Away goals.
    pub away_goals: u32,
    /// Home shots on goal.
    pub home_shots: u32,
    /// Away shots on goal.
    pub away_shots: u32,
    /// Home goalie save line.
    pub home_goalie: SavePercentageView,
    /// Away goalie save line.
    pub away_goalie: SavePercentageView,
    /// Whether the sheet is editing a saved game.
    pub editing: bool,
}

impl From<&ScoreSheet> for Scoreboard {
    fn from(sheet: &ScoreSheet) -> Self {
        Self {
            home_label: team_label(&sheet.home_team, Side::Home),
            away_label: team_label(&sheet.away_team, Side::Away),
            home_goals: sheet.home_goals,
            away_goals: sheet.away_goals,
            home_shots: sheet.home_shots,
            away_shots: sheet.away_shots,
            home_goalie: sheet.goalie_line(Side::Home).into(),
            away_goalie: sheet.goalie_line(Side::Away).into(),
            editing: sheet.editing_id.is_some(),
        }
    }
}

/// Summary row for one saved game in the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Identifier of the underlying entry.
    pub id: Uuid,
    /// Headline, e.g. `2024-01-05 — Sharks vs Eagles`.
    pub title: String,
    /// Score/shots/save-percentage line.
    pub summary: String,
}

impl From<&GameEntity> for HistoryItem {
    fn from(entry: &GameEntity) -> Self {
        let home = team_label(&entry.home_team, Side::Home);
        let away = team_label(&entry.away_team, Side::Away);
        let home_goalie = GoalieLine::from_counters(entry.away_shots, entry.away_goals);
        let away_goalie = GoalieLine::from_counters(entry.home_shots, entry.home_goals);

        Self {
            id: entry.id,
            title: format!("{} — {} vs {}", entry.game_date, home, away),
            summary: format!(
                "Score {}-{} • Shots {}-{} • SV% {}%-{}%",
                entry.home_goals,
                entry.away_goals,
                entry.home_shots,
                entry.away_shots,
                home_goalie.pct,
                away_goalie.pct
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::CurrentGameEntity;
    use crate::state::game::Counter;

    #[test]
    fn blank_names_fall_back_to_generic_labels() {
        assert_eq!(team_label("", Side::Home), "Home");
        assert_eq!(team_label("   ", Side::Away), "Away");
        assert_eq!(team_label(" Sharks ", Side::Home), "Sharks");
    }

    #[test]
    fn zero_shot_goalie_line_renders_the_empty_contract() {
        let view = SavePercentageView::from(GoalieLine::from_counters(0, 0));
        assert_eq!(view.text, "0% (0/0)");
        assert_eq!(view.pct, 0);
    }

    #[test]
    fn scoreboard_reflects_the_sheet() {
        let mut sheet = ScoreSheet::from(CurrentGameEntity::default());
        sheet.away_team = "Eagles".into();
        sheet.increment(Counter::AwayGoals);
        sheet.increment(Counter::AwayShots);

        let board = Scoreboard::from(&sheet);
        assert_eq!(board.home_label, "Home");
        assert_eq!(board.away_label, "Eagles");
        assert_eq!(board.away_shots, 2);
        assert_eq!(board.home_goalie.text, "50% (1/2)");
        assert_eq!(board.away_goalie.text, "0% (0/0)");
        assert!(!board.editing);
    }

    #[test]
    fn history_item_summarizes_an_entry() {
        let entry = GameEntity {
            id: Uuid::new_v4(),
            saved_at: "2024-01-05T20:00:00Z".into(),
            game_date: "2024-01-05".into(),
            home_team: String::new(),
            away_team: "Eagles".into(),
            home_color: String::new(),
            away_color: String::new(),
            home_goals: 3,
            away_goals: 2,
            home_shots: 10,
            away_shots: 8,
        };

        let item = HistoryItem::from(&entry);
        assert_eq!(item.title, "2024-01-05 — Home vs Eagles");
        assert_eq!(item.summary, "Score 3-2 • Shots 10-8 • SV% 75%-70%");
    }
}
