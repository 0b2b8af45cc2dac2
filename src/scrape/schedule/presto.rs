//! Parser for PrestoSports-style schedule pages.
//!
//! These sites render each game as a run of sibling elements: a date
//! element ("Oct 03 (Fri)"), an optional time element ("6:07 PM EDT"),
//! then an opponent element ("AT Miami (Ohio)" / "VS Western Michigan *").
//! The scan walks elements in document order, carrying the most recent
//! date and time until an opponent element consumes them.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::directory;
use crate::enums::Gender;
use crate::model::{GameStatus, ScheduleGame, TeamSchedule};
use crate::scrape::schedule::opponent::{clean_opponent, is_valid_opponent};
use crate::scrape::schedule::season::{
    extract_record, extract_season, month_from_abbr, SeasonWindow,
};

static DATE_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]{2})\s+(\d{1,2})\s+\([A-Z][a-z]{2}\)$").unwrap());
static TIME_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}:\d{2}\s+(?:AM|PM)\s+(?:EDT|EST))$").unwrap());
static OPPONENT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(AT|VS)\s+(.+?)(?:\s*[#*%].*)?$").unwrap());

pub(crate) fn parse(document: &Html, team_name: &str, window: &SeasonWindow) -> TeamSchedule {
    let record = extract_record(document);
    let Some(season) = extract_season(document, window) else {
        debug!(team = team_name, "no confirmed current season");
        return TeamSchedule::offseason(team_name, record);
    };

    let element_selector = Selector::parse("div, li, article").expect("valid selector");

    let mut games: Vec<ScheduleGame> = Vec::new();
    let mut current_date: Option<(u32, u32)> = None;
    let mut current_time: Option<String> = None;

    for element in document.select(&element_selector) {
        let text = element.text().collect::<String>();
        let text = text.split_whitespace().join(" ");

        if let Some(caps) = DATE_ELEMENT.captures(&text) {
            if let Some(month) = month_from_abbr(&caps[1]) {
                if let Ok(day) = caps[2].parse::<u32>() {
                    current_date = Some((month, day));
                }
            }
            continue;
        }

        if TIME_ELEMENT.is_match(&text) {
            current_time = Some(text);
            continue;
        }

        let Some(caps) = OPPONENT_ELEMENT.captures(&text) else {
            continue;
        };
        let Some((month, day)) = current_date else {
            continue;
        };

        let opponent = clean_opponent(&caps[2]);
        if !is_valid_opponent(&opponent) {
            debug!(raw = &caps[2], "skipping invalid opponent");
            continue;
        }
        let year = window.year_for_month(month);
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            current_date = None;
            continue;
        };

        let is_home = &caps[1] == "VS";
        let conference = text.contains('*')
            || text.contains("CCHA")
            || directory::same_conference(team_name, &opponent, Gender::Men);

        games.push(ScheduleGame {
            id: ScheduleGame::make_id(team_name, date, &opponent),
            date,
            opponent,
            is_home,
            venue: None,
            city: None,
            state: None,
            time: current_time.take(),
            conference,
            exhibition: text.contains('#'),
            status: GameStatus::Scheduled,
            result: None,
            broadcast_info: None,
            tournament_info: None,
        });

        // Each date/time pair belongs to exactly one game.
        current_date = None;
    }

    debug!(team = team_name, count = games.len(), "parsed presto schedule");
    TeamSchedule {
        team_name: team_name.to_string(),
        season,
        record,
        games,
        last_updated: Utc::now(),
    }
}
