//! Parser for compact text schedule listings common to Big Ten sites.
//!
//! The page text reduces to runs like `"Oct 4 vs Michigan State Oct 11
//! at Notre Dame"`, sometimes with a weekday prefix or the day glued to
//! the month ("Oct4"). The text is split at month-day anchors and each
//! section is expected to open with a vs/at matchup.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::directory;
use crate::enums::Gender;
use crate::model::{GameStatus, ScheduleGame, TeamSchedule};
use crate::scrape::normalized_text;
use crate::scrape::schedule::opponent::{clean_opponent, is_exhibition, is_valid_opponent};
use crate::scrape::schedule::season::{
    extract_record, extract_season, month_from_abbr, SeasonWindow,
};

// Month-day anchors; candidates whose abbreviation is a weekday are
// dropped by the month table.
static DATE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]{2})\s*(\d{1,2})\b").unwrap());
static SECTION_MATCHUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(vs\.?|at|@)\s+(.+?)\s*$").unwrap());
// Cut opponents at a start time so "Michigan State 7:00 PM BTN" doesn't
// carry the broadcast row along.
static TIME_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\d{1,2}:\d{2}.*$").unwrap());
static SCHEDULE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(schedule|games|opponents)").unwrap());

const SECTION_SPAN: usize = 2000;

pub(crate) fn parse(document: &Html, team_name: &str, window: &SeasonWindow) -> TeamSchedule {
    let record = extract_record(document);
    let Some(season) = extract_season(document, window) else {
        debug!(team = team_name, "no confirmed current season");
        return TeamSchedule::offseason(team_name, record);
    };

    let text = normalized_text(document);
    let relevant: String = match SCHEDULE_KEYWORD.find(&text) {
        Some(keyword) => text[keyword.start()..].chars().take(SECTION_SPAN).collect(),
        None => text,
    };

    let anchors: Vec<(usize, usize, u32, u32)> = DATE_ANCHOR
        .captures_iter(&relevant)
        .filter_map(|caps| {
            let month = month_from_abbr(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            let full = caps.get(0)?;
            Some((full.start(), full.end(), month, day))
        })
        .collect();

    let mut games = Vec::new();
    for (i, (_, section_start, month, day)) in anchors.iter().enumerate() {
        let section_end = anchors
            .get(i + 1)
            .map(|(start, ..)| *start)
            .unwrap_or(relevant.len());
        let section = &relevant[*section_start..section_end];

        let Some(caps) = SECTION_MATCHUP.captures(section) else {
            continue;
        };
        let raw_opponent = TIME_TAIL.replace(&caps[2], "").into_owned();
        let opponent = clean_opponent(&raw_opponent);
        if !is_valid_opponent(&opponent) {
            debug!(raw = raw_opponent.as_str(), "skipping invalid opponent");
            continue;
        }

        let year = window.year_for_month(*month);
        let Some(date) = NaiveDate::from_ymd_opt(year, *month, *day) else {
            continue;
        };

        games.push(ScheduleGame {
            id: ScheduleGame::make_id(team_name, date, &opponent),
            date,
            opponent: opponent.clone(),
            is_home: caps[1].to_lowercase().starts_with("vs"),
            venue: None,
            city: None,
            state: None,
            time: None,
            conference: directory::same_conference(team_name, &opponent, Gender::Men),
            exhibition: is_exhibition(&raw_opponent),
            status: GameStatus::Scheduled,
            result: None,
            broadcast_info: None,
            tournament_info: None,
        });
    }

    debug!(team = team_name, count = games.len(), "parsed big-ten schedule");
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

    fn window() -> SeasonWindow {
        SeasonWindow::starting(2025)
    }

    #[test]
    fn test_parse_compact_listing() {
        let document = Html::parse_document(
            r#"<html><head><title>Wisconsin Hockey Schedule 2025-26</title></head>
<body><p>Schedule</p>
<p>Sat, Oct 4 vs Michigan State 7:00 PM BTN</p>
<p>Oct11 at Notre Dame</p>
<p>Feb 7 vs Minnesota</p></body></html>"#,
        );
        let schedule = parse(&document, "Wisconsin", &window());

        assert_eq!(schedule.season, "2025-26");
        assert_eq!(schedule.games.len(), 3);

        let msu = &schedule.games[0];
        assert_eq!(msu.opponent, "Michigan State");
        assert_eq!(msu.date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert!(msu.is_home);
        assert!(msu.conference);

        let nd = &schedule.games[1];
        assert_eq!(nd.opponent, "Notre Dame");
        assert!(!nd.is_home);
        assert!(nd.conference);

        let gophers = &schedule.games[2];
        assert_eq!(gophers.date, NaiveDate::from_ymd_opt(2026, 2, 7).unwrap());
    }

    #[test]
    fn test_weekday_abbreviations_are_not_dates() {
        let document = Html::parse_document(
            r#"<html><head><title>Schedule 2025-26</title></head>
<body><p>Schedule</p><p>Sat 4 vs Nobody Oct 18 at Michigan</p></body></html>"#,
        );
        let schedule = parse(&document, "Wisconsin", &window());
        assert_eq!(schedule.games.len(), 1);
        assert_eq!(schedule.games[0].opponent, "Michigan");
    }
}
