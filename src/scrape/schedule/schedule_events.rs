//! Parser for "Schedule Events" card layouts.
//!
//! These pages render each game as a card whose date and opponent sit
//! in separate runs of text, collapsing to strings like
//! `"Oct3Oct3(Fri)7:00 p.m. (MST)Mullett Arenavs. Penn State"`. Dates
//! and matchups are matched independently and paired by position.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::Html;
use tracing::{debug, warn};

use crate::directory;
use crate::enums::Gender;
use crate::model::{GameStatus, ScheduleGame, TeamSchedule};
use crate::scrape::normalized_text;
use crate::scrape::schedule::opponent::{clean_opponent, home_venue, is_valid_opponent};
use crate::scrape::schedule::season::{
    extract_record, extract_season, month_from_abbr, SeasonWindow,
};

// "Oct3(Fri)", the second, parenthesized copy of each card's date.
static CARD_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]{2})(\d{1,2})\([A-Z][a-z]{2}\)").unwrap());

static CARD_MATCHUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(vs\.|at)\s+(.+?)(?:\s*(?:Event details|Show Event Info|Season opener)|\s*$)",
    )
    .unwrap()
});

const SECTION_SPAN: usize = 3000;

pub(crate) fn parse(document: &Html, team_name: &str, window: &SeasonWindow) -> TeamSchedule {
    let record = extract_record(document);
    let Some(season) = extract_season(document, window) else {
        debug!(team = team_name, "no confirmed current season");
        return TeamSchedule::offseason(team_name, record);
    };

    let text = normalized_text(document);
    // Narrow to the schedule-events section when the page has one, so
    // news headlines below the schedule can't contribute matchups.
    let relevant: String = match text.find("Schedule Events") {
        Some(index) => text[index..].chars().take(SECTION_SPAN).collect(),
        None => text,
    };

    let dates: Vec<(u32, u32)> = CARD_DATE
        .captures_iter(&relevant)
        .filter_map(|caps| {
            let month = month_from_abbr(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            Some((month, day))
        })
        .collect();

    let matchups: Vec<(bool, String)> = CARD_MATCHUP
        .captures_iter(&relevant)
        .map(|caps| (caps[1].starts_with("vs"), caps[2].to_string()))
        .collect();

    let mut games = Vec::new();
    if !dates.is_empty() && matchups.len() <= dates.len() {
        let venue = home_venue(&relevant);
        for ((is_home, raw_opponent), (month, day)) in matchups.iter().zip(dates.iter()) {
            let opponent = clean_opponent(raw_opponent);
            if !is_valid_opponent(&opponent) {
                debug!(raw = raw_opponent.as_str(), "skipping invalid opponent");
                continue;
            }
            let year = window.year_for_month(*month);
            let Some(date) = NaiveDate::from_ymd_opt(year, *month, *day) else {
                continue;
            };
            let (venue, city, state) = match (*is_home, venue) {
                (true, Some((venue, city, state))) => (
                    Some(venue.to_string()),
                    Some(city.to_string()),
                    Some(state.to_string()),
                ),
                _ => (None, None, None),
            };
            games.push(ScheduleGame {
                id: ScheduleGame::make_id(team_name, date, &opponent),
                date,
                opponent: opponent.clone(),
                is_home: *is_home,
                venue,
                city,
                state,
                time: None,
                conference: directory::same_conference(team_name, &opponent, Gender::Men),
                exhibition: false,
                status: GameStatus::Scheduled,
                result: None,
                broadcast_info: None,
                tournament_info: None,
            });
        }
    } else if !matchups.is_empty() {
        warn!(
            team = team_name,
            matchups = matchups.len(),
            dates = dates.len(),
            "matchup count exceeds date count; cannot pair reliably"
        );
    }

    debug!(team = team_name, count = games.len(), "parsed schedule-events page");
    TeamSchedule {
        team_name: team_name.to_string(),
        season,
        record,
        games,
        last_updated: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<html>
<head><title>Sun Devil Hockey Schedule 2025-26</title></head>
<body>
<h1>Schedule Events</h1>
<div>Oct3Oct3(Fri)7:00 p.m. (MST)Mullett Arenavs. Penn State Event details</div>
<div>Oct10Oct10(Fri)6:00 p.m. (MST)at Denver Event details</div>
<div>Jan16Jan16(Fri)7:00 p.m. (MST)Mullett Arenavs. North Dakota Show Event Info</div>
</body></html>"#;

    fn window() -> SeasonWindow {
        SeasonWindow::starting(2025)
    }

    #[test]
    fn test_parse_pairs_dates_with_matchups() {
        let document = Html::parse_document(FIXTURE);
        let schedule = parse(&document, "Arizona State", &window());

        assert_eq!(schedule.season, "2025-26");
        assert_eq!(schedule.games.len(), 3);

        let penn_state = &schedule.games[0];
        assert_eq!(penn_state.opponent, "Penn State");
        assert_eq!(penn_state.date, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
        assert!(penn_state.is_home);
        assert!(!penn_state.conference);
        assert_eq!(penn_state.venue.as_deref(), Some("Mullett Arena"));

        let denver = &schedule.games[1];
        assert_eq!(denver.opponent, "Denver");
        assert!(!denver.is_home);
        assert!(denver.conference);
        assert!(denver.venue.is_none());

        let north_dakota = &schedule.games[2];
        assert_eq!(
            north_dakota.date,
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
        assert!(north_dakota.conference);
    }

    #[test]
    fn test_unpairable_counts_yield_no_games() {
        let document = Html::parse_document(
            r#"<html><head><title>Schedule 2025-26</title></head>
<body><h1>Schedule Events</h1>
<div>vs. Denver Event details</div><div>at Omaha Event details</div>
<div>Oct3Oct3(Fri)only one date</div></body></html>"#,
        );
        let schedule = parse(&document, "Arizona State", &window());
        assert_eq!(schedule.season, "2025-26");
        assert!(schedule.games.is_empty());
    }
}
