use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::enums::Gender;

/// Lifecycle state of a scoreboard entry. The scoreboard adds
/// `in-progress`, which a team-schedule page never shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreboardStatus {
    Scheduled,
    Completed,
    Postponed,
    Cancelled,
    InProgress,
}

/// Final or running score of a scoreboard game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardResult {
    pub home_score: u32,
    pub away_score: u32,
}

/// Period and clock state for a game in progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveData {
    pub period: String,
    pub time_remaining: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermission: Option<bool>,
}

/// One game on a day's slate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardGame {
    pub id: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Named conference the listing groups the game under; defaults to
    /// "Non-Conference".
    pub conference: String,
    pub exhibition: bool,
    pub status: ScoreboardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreboardResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_data: Option<LiveData>,
}

impl ScoreboardGame {
    pub fn make_id(away_team: &str, home_team: &str, date: NaiveDate) -> String {
        format!("{away_team}-at-{home_team}-{date}").replace(char::is_whitespace, "-")
    }
}

/// A day's slate of games for one division.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub date: NaiveDate,
    pub gender: Gender,
    pub games: Vec<ScoreboardGame>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ScoreboardStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_make_id() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        assert_eq!(
            ScoreboardGame::make_id("Denver", "North Dakota", date),
            "Denver-at-North-Dakota-2025-10-03"
        );
    }
}
