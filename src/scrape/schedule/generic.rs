//! Last-resort format: confirms season and record but extracts no
//! games. Keeps unknown markup from producing garbage entries while
//! still distinguishing "current season, nothing published" from stale
//! pages.

use chrono::Utc;
use scraper::Html;

use crate::model::TeamSchedule;
use crate::scrape::schedule::season::{extract_record, extract_season, SeasonWindow};

pub(crate) fn parse(document: &Html, team_name: &str, window: &SeasonWindow) -> TeamSchedule {
    let record = extract_record(document);
    match extract_season(document, window) {
        Some(season) => TeamSchedule {
            team_name: team_name.to_string(),
            season,
            record,
            games: Vec::new(),
            last_updated: Utc::now(),
        },
        None => TeamSchedule::offseason(team_name, record),
    }
}
