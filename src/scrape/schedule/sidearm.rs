//! Parser for Sidearm Sports platform schedule pages.
//!
//! Sidearm pages render each game as a card whose text collapses to
//! `"Oct 4 (Sat) 7:00 PM ESPN+HEA * vs Boston College Watch …"`. The
//! page text is split at date anchors so one card's content can't bleed
//! into the next, then each section is searched for a vs/at matchup.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::directory;
use crate::enums::Gender;
use crate::model::{BroadcastInfo, GameStatus, ScheduleGame, TeamSchedule};
use crate::scrape::normalized_text;
use crate::scrape::schedule::opponent::{
    clean_opponent, has_conference_abbrev, home_venue, is_exhibition, is_valid_opponent,
};
use crate::scrape::schedule::season::{
    extract_record, extract_season, month_from_abbr, SeasonWindow,
};

// "Oct 4 (Sat)": month abbreviation, day, weekday in parentheses.
static DATE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]{2})\s+(\d{1,2})\s+\([A-Z][a-z]{2}\)").unwrap());

// Conference games carry an "ESPN+HEA *" style prefix before the
// matchup; try that shape first, then the plain one.
static STARRED_MATCHUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\s+(vs|at)\s+(.+?)(?:\s+(?:ESPN|Watch|Listen|Tickets|Game)|\s*$)").unwrap()
});
static MATCHUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s(vs|at)\s+(.+?)(?:\s+(?:ESPN|Watch|Listen|Tickets|Game)|\s*$)").unwrap()
});

pub(crate) fn parse(document: &Html, team_name: &str, window: &SeasonWindow) -> TeamSchedule {
    let record = extract_record(document);
    let Some(season) = extract_season(document, window) else {
        debug!(team = team_name, "no confirmed current season");
        return TeamSchedule::offseason(team_name, record);
    };

    let text = normalized_text(document);
    let anchors: Vec<(usize, usize, u32, u32)> = DATE_ANCHOR
        .captures_iter(&text)
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
            .unwrap_or(text.len());
        let section = &text[*section_start..section_end];

        let Some(caps) = STARRED_MATCHUP
            .captures(section)
            .or_else(|| MATCHUP.captures(section))
        else {
            continue;
        };
        let home_away = &caps[1];
        let raw_opponent = &caps[2];

        let exhibition = is_exhibition(raw_opponent) || section.contains("(exh.)");
        let opponent = clean_opponent(raw_opponent);
        if !is_valid_opponent(&opponent) {
            debug!(raw = raw_opponent, "skipping invalid opponent");
            continue;
        }

        let year = window.year_for_month(*month);
        let Some(date) = NaiveDate::from_ymd_opt(year, *month, *day) else {
            continue;
        };

        let is_home = home_away.eq_ignore_ascii_case("vs");
        let conference = has_conference_abbrev(section)
            || directory::same_conference(team_name, &opponent, Gender::Men);
        let broadcast_info = section.contains("ESPN+").then(|| BroadcastInfo {
            network: Some("ESPN+".to_string()),
            ..BroadcastInfo::default()
        });
        let (venue, city, state) = match (is_home, home_venue(section)) {
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
            opponent,
            is_home,
            venue,
            city,
            state,
            time: None,
            conference,
            exhibition,
            status: GameStatus::Scheduled,
            result: None,
            broadcast_info,
            tournament_info: None,
        });
    }

    debug!(team = team_name, count = games.len(), "parsed sidearm schedule");
    TeamSchedule {
        team_name: team_name.to_string(),
        season,
        record,
        games,
        last_updated: Utc::now(),
    }
}
