use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Season value signaling "no confirmed current-season data". Callers
/// must treat a schedule carrying it as absent, never display it.
pub const OFFSEASON: &str = "offseason";

/// Lifecycle state of a scheduled game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Completed,
    Postponed,
    Cancelled,
}

/// Final score from the subject team's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Display score, subject team first (e.g. "4-2").
    pub score: String,
    pub won: bool,
}

/// Broadcast and companion links attached to a game entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets_link: Option<String>,
}

impl BroadcastInfo {
    pub fn is_empty(&self) -> bool {
        self.network.is_none()
            && self.watch_link.is_none()
            && self.stats_link.is_none()
            && self.tickets_link.is_none()
    }
}

/// Win-loss-tie record split by category. Categories a source does not
/// publish stay at "0-0-0".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub overall: String,
    pub conference: String,
    pub home: String,
    pub away: String,
    pub neutral: String,
}

impl Default for TeamRecord {
    fn default() -> Self {
        let zero = || "0-0-0".to_string();
        Self {
            overall: zero(),
            conference: zero(),
            home: zero(),
            away: zero(),
            neutral: zero(),
        }
    }
}

/// One game entry on a team's schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    /// Derived from team, date, and opponent. Collision-prone by design;
    /// suitable for list rendering only, not as a durable key.
    pub id: String,
    pub date: NaiveDate,
    pub opponent: String,
    pub is_home: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Raw display time for games not yet played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// True iff the opponent belongs to the subject team's conference.
    pub conference: bool,
    pub exhibition: bool,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_info: Option<BroadcastInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_info: Option<String>,
}

impl ScheduleGame {
    /// Deterministic list-rendering id from team, date, and opponent.
    pub fn make_id(team: &str, date: NaiveDate, opponent: &str) -> String {
        format!("{team}-{date}-{opponent}").replace(char::is_whitespace, "-")
    }
}

/// A team's full schedule as scraped from one source page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSchedule {
    pub team_name: String,
    /// "YYYY-YY" label, or [`OFFSEASON`] when no current-season data was
    /// confirmed.
    pub season: String,
    pub record: TeamRecord,
    /// Ordered by date ascending.
    pub games: Vec<ScheduleGame>,
    pub last_updated: DateTime<Utc>,
}

impl TeamSchedule {
    /// The sentinel schedule returned when a source shows stale
    /// prior-season data.
    pub fn offseason(team_name: &str, record: TeamRecord) -> Self {
        Self {
            team_name: team_name.to_string(),
            season: OFFSEASON.to_string(),
            record,
            games: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn is_offseason(&self) -> bool {
        self.season == OFFSEASON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_id_replaces_whitespace() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let id = ScheduleGame::make_id("Boston University", date, "Michigan State");
        assert_eq!(id, "Boston-University-2025-10-04-Michigan-State");
    }

    #[test]
    fn test_offseason_sentinel() {
        let schedule = TeamSchedule::offseason("Maine", TeamRecord::default());
        assert!(schedule.is_offseason());
        assert!(schedule.games.is_empty());
        assert_eq!(schedule.record.overall, "0-0-0");
    }

    #[test]
    fn test_camel_case_serialization() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let game = ScheduleGame {
            id: ScheduleGame::make_id("Maine", date, "Quinnipiac"),
            date,
            opponent: "Quinnipiac".to_string(),
            is_home: true,
            venue: None,
            city: None,
            state: None,
            time: Some("7:00 PM".to_string()),
            conference: false,
            exhibition: false,
            status: GameStatus::Scheduled,
            result: None,
            broadcast_info: None,
            tournament_info: None,
        };
        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"isHome\":true"));
        assert!(json.contains("\"status\":\"scheduled\""));
        assert!(!json.contains("venue"));
    }
}
