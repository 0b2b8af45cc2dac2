//! Day-slate scoreboard parser.
//!
//! The schedules listing interleaves single-cell header rows holding a
//! long-form date ("Friday, October 3, 2025") with game rows; every
//! multi-cell row belongs to the most recent header. Section matching
//! against the requested date is exact-string; a date with no section
//! yields an empty slate, not an error.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::enums::Gender;
use crate::error::Result;
use crate::model::{
    LiveData, Scoreboard, ScoreboardGame, ScoreboardResult, ScoreboardStatus,
};
use crate::scrape::fetch_document;

const MEN_URL: &str = "https://www.collegehockeynews.com/schedules/";
const WOMEN_URL: &str = "https://www.collegehockeynews.com/women/schedule.php";

static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+, \w+ \d+, \d{4}$").unwrap());
static PERIOD_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bper(?:iod|\.)").unwrap());
static LIVE_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(?:st|nd|rd)?\s*Per(?:iod|\.)\s*(\d+:\d{2})").unwrap()
});

/// Scrape the slate of games for one date.
#[instrument(skip(client))]
pub(crate) async fn scrape_scoreboard(
    client: &reqwest::Client,
    date: NaiveDate,
    gender: Gender,
) -> Result<Scoreboard> {
    let url = match gender {
        Gender::Men => MEN_URL,
        Gender::Women => WOMEN_URL,
    };
    let document = fetch_document(client, url).await?;
    Ok(parse_scoreboard(&document, date, gender))
}

/// Section walk over an already-fetched listing page.
pub(crate) fn parse_scoreboard(document: &Html, date: NaiveDate, gender: Gender) -> Scoreboard {
    let row_selector = Selector::parse("tr").expect("valid selector");
    let cell_selector = Selector::parse("td").expect("valid selector");

    // The header a section for `date` must carry, formatted exactly the
    // way the site renders it.
    let target_header = date.format("%A, %B %-d, %Y").to_string();

    let mut games = Vec::new();
    let mut in_target_section = false;
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() == 1 {
            let header = collapsed_text(&cells[0]);
            if DATE_HEADER.is_match(&header) {
                in_target_section = header == target_header;
                debug!(header = header.as_str(), matched = in_target_section, "date section");
            }
            continue;
        }
        if in_target_section && cells.len() >= 8 {
            if let Some(game) = parse_game_row(&cells, date) {
                games.push(game);
            }
        }
    }

    debug!(%date, %gender, count = games.len(), "parsed scoreboard");
    Scoreboard {
        date,
        gender,
        games,
        last_updated: Utc::now(),
    }
}

// Row layout: [0] away team, [1] away score, [2] "at"/"vs.", [3] home
// team, [4] home score, [6] time or status, [7] box score link.
fn parse_game_row(cells: &[ElementRef], date: NaiveDate) -> Option<ScoreboardGame> {
    let away_team = collapsed_text(&cells[0]);
    let away_score_text = collapsed_text(&cells[1]);
    let home_team = collapsed_text(&cells[3]);
    let home_score_text = collapsed_text(&cells[4]);
    let time_text = collapsed_text(&cells[6]);

    if away_team.is_empty() || home_team.is_empty() {
        return None;
    }

    let away_score: Option<u32> = away_score_text.parse().ok();
    let home_score: Option<u32> = home_score_text.parse().ok();
    let result = match (home_score, away_score) {
        (Some(home), Some(away)) => Some(ScoreboardResult {
            home_score: home,
            away_score: away,
        }),
        _ => None,
    };

    let exhibition = time_text.contains("Exhibition")
        || away_team.contains("Exhibition")
        || home_team.contains("Exhibition");

    let (status, live_data, time) = if PERIOD_MARKER.is_match(&time_text) {
        let live_data = LIVE_CLOCK.captures(&time_text).map(|caps| LiveData {
            period: format!("Period {}", &caps[1]),
            time_remaining: caps[2].to_string(),
            intermission: None,
        });
        (ScoreboardStatus::InProgress, live_data, None)
    } else if result.is_some() {
        (ScoreboardStatus::Completed, None, None)
    } else {
        let time = (!time_text.is_empty()).then_some(time_text);
        (ScoreboardStatus::Scheduled, None, time)
    };

    Some(ScoreboardGame {
        id: ScoreboardGame::make_id(&away_team, &home_team, date),
        date,
        home_team,
        away_team,
        time,
        conference: "Non-Conference".to_string(),
        exhibition,
        status,
        result,
        live_data,
    })
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

    const FIXTURE: &str = r#"<html><body><table>
<tr><td>Friday, October 3, 2025</td></tr>
<tr><td>Denver</td><td>4</td><td>at</td><td>North Dakota</td><td>2</td><td></td><td>Final</td><td>Box</td></tr>
<tr><td>Maine</td><td>2</td><td>at</td><td>Quinnipiac</td><td>2</td><td></td><td>3rd Per. 12:34</td><td>Box</td></tr>
<tr><td>Bentley</td><td></td><td>at</td><td>Army</td><td></td><td></td><td>7:05 pm ET</td><td></td></tr>
<tr><td>Saturday, October 4, 2025</td></tr>
<tr><td>Denver</td><td></td><td>at</td><td>North Dakota</td><td></td><td></td><td>6:07 pm ET</td><td></td></tr>
</table></body></html>"#;

    #[test]
    fn test_only_the_exact_section_matches() {
        let document = Html::parse_document(FIXTURE);
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let scoreboard = parse_scoreboard(&document, date, Gender::Men);
        assert_eq!(scoreboard.games.len(), 3);

        let next_day = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let scoreboard = parse_scoreboard(&document, next_day, Gender::Men);
        assert_eq!(scoreboard.games.len(), 1);
        assert_eq!(scoreboard.games[0].time.as_deref(), Some("6:07 pm ET"));
    }

    #[test]
    fn test_game_status_inference() {
        let document = Html::parse_document(FIXTURE);
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let scoreboard = parse_scoreboard(&document, date, Gender::Men);

        let completed = &scoreboard.games[0];
        assert_eq!(completed.status, ScoreboardStatus::Completed);
        let result = completed.result.unwrap();
        assert_eq!(result.away_score, 4);
        assert_eq!(result.home_score, 2);

        let live = &scoreboard.games[1];
        assert_eq!(live.status, ScoreboardStatus::InProgress);
        let live_data = live.live_data.as_ref().unwrap();
        assert_eq!(live_data.period, "Period 3");
        assert_eq!(live_data.time_remaining, "12:34");

        let scheduled = &scoreboard.games[2];
        assert_eq!(scheduled.status, ScoreboardStatus::Scheduled);
        assert!(scheduled.result.is_none());
        assert_eq!(scheduled.time.as_deref(), Some("7:05 pm ET"));
    }

    #[test]
    fn test_no_matching_section_is_empty_not_error() {
        let document = Html::parse_document(FIXTURE);
        let date = NaiveDate::from_ymd_opt(2025, 11, 14).unwrap();
        let scoreboard = parse_scoreboard(&document, date, Gender::Men);
        assert!(scoreboard.games.is_empty());
    }
}
