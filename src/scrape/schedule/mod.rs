//! Multi-format schedule scraping for school athletics sites.
//!
//! One fetched document, many candidate parsers: the detected format
//! runs first, and a fixed-order fallback chain covers low-confidence
//! detections. A result is accepted when it confirms a current season
//! and contains games. A parser that confirms the current season but
//! finds zero games is kept as a "true empty schedule" and returned
//! only if no parser produces games, so an empty-but-valid result can
//! never mask real games, and callers can still distinguish a confirmed
//! empty schedule from "unavailable" (`None`).

pub(crate) mod detect;
pub(crate) mod opponent;
pub(crate) mod season;

mod big_ten;
mod generic;
mod presto;
mod schedule_events;
mod sidearm;

use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::model::{ScheduleGame, TeamSchedule};
use crate::scrape::fetch_document;
use detect::ScheduleFormat;
use season::SeasonWindow;

/// Detection confidence at or above which a rejected primary result is
/// trusted enough that no fallback parsing runs.
const FALLBACK_CONFIDENCE_GATE: f64 = 0.8;

/// Scrape a school athletics schedule page. `Ok(None)` means no parser
/// could confirm current-season data: "schedule unavailable", a
/// materially different outcome from a confirmed-empty schedule.
#[instrument(skip(client))]
pub(crate) async fn scrape_schedule(
    client: &reqwest::Client,
    url: &str,
    team_name: Option<&str>,
) -> Result<Option<TeamSchedule>> {
    let document = fetch_document(client, url).await?;
    let window = SeasonWindow::current();
    Ok(parse_schedule_document(&document, url, team_name, &window))
}

/// Format detection, primary parse, and the fallback chain, all over an
/// already-fetched document.
pub(crate) fn parse_schedule_document(
    document: &Html,
    url: &str,
    team_name: Option<&str>,
    window: &SeasonWindow,
) -> Option<TeamSchedule> {
    let team = team_name.unwrap_or("Unknown Team");
    let (format, confidence) = detect::detect(url, team_name, document);
    info!(team, format = %format, confidence, "detected schedule format");

    let primary = run_parser(format, document, team, window);
    if is_accepted(&primary, window) {
        return Some(finish(primary));
    }
    let mut confirmed_empty = keep_confirmed_empty(primary, window);

    if confidence < FALLBACK_CONFIDENCE_GATE {
        debug!(team, "primary format rejected, trying fallback parsers");
        for fallback in detect::FALLBACK_ORDER.iter().filter(|f| **f != format) {
            let candidate = run_parser(*fallback, document, team, window);
            if is_accepted(&candidate, window) {
                info!(
                    team,
                    format = %fallback,
                    count = candidate.games.len(),
                    "fallback parser succeeded"
                );
                return Some(finish(candidate));
            }
            if confirmed_empty.is_none() {
                confirmed_empty = keep_confirmed_empty(candidate, window);
            }
        }
    }

    if confirmed_empty.is_some() {
        debug!(team, "current season confirmed but no games published");
    }
    confirmed_empty.map(finish)
}

fn run_parser(
    format: ScheduleFormat,
    document: &Html,
    team_name: &str,
    window: &SeasonWindow,
) -> TeamSchedule {
    match format {
        ScheduleFormat::Sidearm => sidearm::parse(document, team_name, window),
        ScheduleFormat::ScheduleEvents => schedule_events::parse(document, team_name, window),
        ScheduleFormat::Presto => presto::parse(document, team_name, window),
        ScheduleFormat::BigTen => big_ten::parse(document, team_name, window),
        ScheduleFormat::Generic => generic::parse(document, team_name, window),
    }
}

fn is_accepted(schedule: &TeamSchedule, window: &SeasonWindow) -> bool {
    season::is_valid_season(&schedule.season, window) && !schedule.games.is_empty()
}

fn keep_confirmed_empty(schedule: TeamSchedule, window: &SeasonWindow) -> Option<TeamSchedule> {
    (season::is_valid_season(&schedule.season, window) && schedule.games.is_empty())
        .then_some(schedule)
}

fn finish(mut schedule: TeamSchedule) -> TeamSchedule {
    schedule.games = dedupe_games(std::mem::take(&mut schedule.games));
    schedule.games.sort_by_key(|game| game.date);
    schedule
}

/// Remove repeated games. Overlapping regex matches over the same page
/// text can register a game twice; two entries are the same game iff
/// they share the calendar date and the case/whitespace-folded opponent
/// name. The first occurrence in input order survives.
pub(crate) fn dedupe_games(games: Vec<ScheduleGame>) -> Vec<ScheduleGame> {
    let mut seen = HashSet::new();
    games
        .into_iter()
        .filter(|game| {
            seen.insert((
                game.date,
                game.opponent.to_lowercase().replace(char::is_whitespace, ""),
            ))
        })
        .collect()
}
