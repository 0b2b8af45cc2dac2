//! Team schedule parser for the college-hockey-news site.
//!
//! The schedule table interleaves single-cell month headers
//! ("October 2025") with game rows; the header sets the month/year
//! context for every row until the next header. Game rows carry a W/L
//! cell, the team score, and the opponent score as a glued "- 7" cell.
//! Non-conference games are marked "(nc)" and exhibitions "(ex)" in the
//! opponent cell.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use crate::directory;
use crate::enums::Gender;
use crate::error::{HockeyError, Result};
use crate::model::{GameResult, GameStatus, ScheduleGame, TeamRecord, TeamSchedule};
use crate::scrape::fetch_document;
use crate::scrape::schedule::season::{month_from_name, SeasonWindow};

static MONTH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{4})$").unwrap()
});
static DAY_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{1,2})\s+\w+").unwrap());
static OPPONENT_SCORE_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*(\d+)$").unwrap());
static RECORD_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Record:\s*([\d-]+).*?\(([\d\s-]+?)\s+[A-Z]+\)").unwrap());
static FOOTNOTE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Fetch and parse a team's schedule, resolving the team through the
/// directory first. Unknown teams are a [`HockeyError::TeamNotFound`].
#[instrument(skip(client))]
pub(crate) async fn scrape_team_schedule(
    client: &reqwest::Client,
    team_name: &str,
    gender: Gender,
) -> Result<TeamSchedule> {
    let info = directory::lookup(team_name, gender).ok_or_else(|| HockeyError::TeamNotFound {
        team: team_name.to_string(),
        gender,
    })?;
    let document = fetch_document(client, &info.url).await?;
    let window = SeasonWindow::current();
    Ok(parse_team_schedule(&document, &info.name, &window))
}

/// Pure table walk over an already-fetched schedule page.
pub(crate) fn parse_team_schedule(
    document: &Html,
    fallback_name: &str,
    window: &SeasonWindow,
) -> TeamSchedule {
    let h1_selector = Selector::parse("h1").expect("valid selector");
    let h2_selector = Selector::parse("h2").expect("valid selector");
    let row_selector = Selector::parse("table tr").expect("valid selector");
    let cell_selector = Selector::parse("td").expect("valid selector");

    let team_name = document
        .select(&h1_selector)
        .next()
        .map(|h| collapsed_text(&h))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    let mut record = TeamRecord::default();
    if let Some(header) = document.select(&h2_selector).next() {
        if let Some(caps) = RECORD_HEADER.captures(&collapsed_text(&header)) {
            record.overall = caps[1].to_string();
            record.conference = caps[2].trim().to_string();
        }
    }

    let mut games = Vec::new();
    let mut current_month: Option<u32> = None;
    let mut current_year: Option<i32> = None;

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.is_empty() {
            continue;
        }

        let row_text = collapsed_text(&row);
        if let Some(caps) = MONTH_HEADER.captures(&row_text) {
            current_month = month_from_name(&caps[1]);
            current_year = caps[2].parse().ok();
            debug!(header = row_text.as_str(), "month header");
            continue;
        }

        if cells.len() < 9 {
            continue;
        }

        match parse_game_row(document, &cells, &team_name, current_month, current_year) {
            Some(game) => games.push(game),
            None => continue,
        }
    }

    games.sort_by_key(|game| game.date);
    TeamSchedule {
        team_name,
        season: window.label(),
        record,
        games,
        last_updated: Utc::now(),
    }
}

fn parse_game_row(
    document: &Html,
    cells: &[ElementRef],
    team_name: &str,
    current_month: Option<u32>,
    current_year: Option<i32>,
) -> Option<ScheduleGame> {
    let day_text = collapsed_text(&cells[0]);
    let day: u32 = DAY_CELL.captures(&day_text)?[1].parse().ok()?;

    let (month, year) = match (current_month, current_year) {
        (Some(month), Some(year)) => (month, year),
        _ => {
            warn!(day = day_text.as_str(), "game row before any month header");
            return None;
        }
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Completed games carry W/L, the team score, and the opponent score
    // as "- 7" in the following cell.
    let result_cell = collapsed_text(&cells[2]);
    let mut result = None;
    if result_cell == "W" || result_cell == "L" {
        let team_score: Option<u32> = collapsed_text(&cells[3]).parse().ok();
        let opponent_score: Option<u32> = OPPONENT_SCORE_CELL
            .captures(&collapsed_text(&cells[4]))
            .and_then(|caps| caps[1].parse().ok());
        if let (Some(us), Some(them)) = (team_score, opponent_score) {
            result = Some(GameResult {
                score: format!("{us}-{them}"),
                won: result_cell == "W",
            });
        }
    }

    // Location cell: "at" is a road game, "vs." is a neutral site.
    let location = collapsed_text(&cells[6]);
    let (is_home, venue) = match location.as_str() {
        "at" => (false, None),
        "vs." => (false, Some("Neutral Site".to_string())),
        _ => (true, None),
    };

    let raw_opponent = collapsed_text(&cells[7]);
    let conference = !raw_opponent.contains("(nc)");
    let exhibition = raw_opponent.contains("(ex)");
    let opponent = raw_opponent
        .replace("(nc)", "")
        .replace("(ex)", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if opponent.is_empty() {
        return None;
    }

    let status = if result.is_some() {
        GameStatus::Completed
    } else {
        GameStatus::Scheduled
    };
    let time = (status == GameStatus::Scheduled)
        .then(|| {
            cells
                .get(10)
                .map(|cell| collapsed_text(cell))
                .filter(|t| !t.is_empty())
        })
        .flatten();

    let tournament_info = cells
        .get(1)
        .map(|cell| collapsed_text(cell))
        .and_then(|marker| FOOTNOTE_MARKER.captures(&marker).map(|c| c[1].to_string()))
        .and_then(|number| find_footnote(document, &number));

    Some(ScheduleGame {
        id: ScheduleGame::make_id(team_name, date, &opponent),
        date,
        opponent,
        is_home,
        venue,
        city: None,
        state: None,
        time,
        conference,
        exhibition,
        status,
        result,
        broadcast_info: None,
        tournament_info,
    })
}

/// Tournament footnotes sit below the table as short "1 Friendship
/// Four, Belfast" lines keyed by the marker digit.
fn find_footnote(document: &Html, number: &str) -> Option<String> {
    let selector = Selector::parse("p, li").expect("valid selector");
    let prefix = format!("{number} ");
    document
        .select(&selector)
        .map(|el| collapsed_text(&el))
        .find(|text| text.starts_with(&prefix) && text.len() < 200)
}

fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<html><body>
<h1>Connecticut</h1>
<h2>2025-26 Schedule | Record: 6-3-1 (4-2-0 HEA)</h2>
<table>
<tr><td>October 2025</td></tr>
<tr><td>3 Fri</td><td></td><td>W</td><td>4</td><td>- 2</td><td></td><td></td><td>Quinnipiac (nc)</td><td></td><td></td><td></td></tr>
<tr><td>10 Fri</td><td></td><td></td><td></td><td></td><td></td><td>at</td><td>Boston College</td><td></td><td></td><td>7:00 pm ET</td></tr>
<tr><td>17 Fri</td><td>1</td><td></td><td></td><td></td><td></td><td>vs.</td><td>Maine</td><td></td><td></td><td>4:00 pm ET</td></tr>
<tr><td>January 2026</td></tr>
<tr><td>9 Fri</td><td></td><td></td><td></td><td></td><td></td><td></td><td>Sacred Heart (ex)</td><td></td><td></td><td>7:00 pm ET</td></tr>
</table>
<p>1 Friendship Four, Belfast</p>
</body></html>"#;

    fn window() -> SeasonWindow {
        SeasonWindow::starting(2025)
    }

    #[test]
    fn test_parse_fixture() {
        let document = Html::parse_document(FIXTURE);
        let schedule = parse_team_schedule(&document, "UConn", &window());

        assert_eq!(schedule.team_name, "Connecticut");
        assert_eq!(schedule.season, "2025-26");
        assert_eq!(schedule.record.overall, "6-3-1");
        assert_eq!(schedule.record.conference, "4-2-0");
        assert_eq!(schedule.games.len(), 4);

        let quinnipiac = &schedule.games[0];
        assert_eq!(quinnipiac.opponent, "Quinnipiac");
        assert_eq!(quinnipiac.date, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
        assert_eq!(quinnipiac.status, GameStatus::Completed);
        let result = quinnipiac.result.as_ref().unwrap();
        assert_eq!(result.score, "4-2");
        assert!(result.won);
        assert!(!quinnipiac.conference);
        assert!(quinnipiac.is_home);
        assert!(quinnipiac.time.is_none());

        let bc = &schedule.games[1];
        assert!(!bc.is_home);
        assert!(bc.venue.is_none());
        assert!(bc.conference);
        assert_eq!(bc.time.as_deref(), Some("7:00 pm ET"));
        assert_eq!(bc.status, GameStatus::Scheduled);

        // "vs." marks a neutral-site game.
        let maine = &schedule.games[2];
        assert!(!maine.is_home);
        assert_eq!(maine.venue.as_deref(), Some("Neutral Site"));
        assert_eq!(
            maine.tournament_info.as_deref(),
            Some("1 Friendship Four, Belfast")
        );

        // The January header flips the calendar year.
        let sacred_heart = &schedule.games[3];
        assert_eq!(
            sacred_heart.date,
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
        );
        assert!(sacred_heart.exhibition);
    }

    #[tokio::test]
    async fn test_unknown_team_is_not_found() {
        // Resolved against the directory before any request goes out.
        let client = reqwest::Client::new();
        let err = scrape_team_schedule(&client, "Slippery Rock", Gender::Men)
            .await
            .unwrap_err();
        assert!(matches!(err, HockeyError::TeamNotFound { .. }));
        assert!(err.to_string().contains("Slippery Rock"));
    }

    #[test]
    fn test_rows_before_month_header_are_skipped() {
        let document = Html::parse_document(
            r#"<html><body><h1>Maine</h1><table>
<tr><td>3 Fri</td><td></td><td></td><td></td><td></td><td></td><td></td><td>Quinnipiac</td><td></td><td></td><td></td></tr>
</table></body></html>"#,
        );
        let schedule = parse_team_schedule(&document, "Maine", &window());
        assert!(schedule.games.is_empty());
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let document = Html::parse_document(
            r#"<html><body><h1>Maine</h1><table>
<tr><td>October 2025</td></tr>
<tr><td>3 Fri</td><td>vs</td><td>Quinnipiac</td></tr>
</table></body></html>"#,
        );
        let schedule = parse_team_schedule(&document, "Maine", &window());
        assert!(schedule.games.is_empty());
    }
}
