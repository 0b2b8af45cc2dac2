//! Live scoreboard parser.
//!
//! The live-scores page has no date headers (it only shows today) and
//! lays each game out as an away-team logo row immediately followed by
//! the home-team row. The men's and women's pages use different cell
//! layouts inside those rows; both are tried. Games are grouped under
//! conference sections (`div.confGroup`) whose heading names the
//! conference or marks exhibitions.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use scraper::{CaseSensitivity, ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::enums::Gender;
use crate::error::Result;
use crate::model::{
    LiveData, Scoreboard, ScoreboardGame, ScoreboardResult, ScoreboardStatus,
};
use crate::scrape::fetch_document;

const MEN_URL: &str = "https://www.collegehockeynews.com/schedules/scoreboard.php";
const WOMEN_URL: &str = "https://www.collegehockeynews.com/women/scoreboard.php";

static LIVE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*Per\.\s*(\d+)\s*(\d+):(\d+)").unwrap());
static SCHEDULED_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+:\d+\s*(?:ET|CT|MT|PT|AT)").unwrap());

const CONFERENCES: &[&str] = &[
    "Hockey East",
    "NCHC",
    "Big Ten",
    "CCHA",
    "ECAC",
    "Atlantic Hockey",
];

/// Scrape today's games with running scores and clock state.
#[instrument(skip(client))]
pub(crate) async fn scrape_live_scoreboard(
    client: &reqwest::Client,
    gender: Gender,
) -> Result<Scoreboard> {
    let url = match gender {
        Gender::Men => MEN_URL,
        Gender::Women => WOMEN_URL,
    };
    let document = fetch_document(client, url).await?;
    let today = Utc::now().date_naive();
    Ok(parse_live_scoreboard(&document, today, gender))
}

pub(crate) fn parse_live_scoreboard(
    document: &Html,
    date: NaiveDate,
    gender: Gender,
) -> Scoreboard {
    let away_logo_selector =
        Selector::parse(r#"img[alt*="away logo"]"#).expect("valid selector");

    let mut games = Vec::new();
    for away_logo in document.select(&away_logo_selector) {
        let Some(away_row) = closest_row(&away_logo) else {
            continue;
        };
        let Some(home_row) = next_row(&away_row) else {
            continue;
        };
        if let Some(game) = parse_game_pair(&away_row, &home_row, date) {
            games.push(game);
        }
    }

    debug!(%date, %gender, count = games.len(), "parsed live scoreboard");
    Scoreboard {
        date,
        gender,
        games,
        last_updated: Utc::now(),
    }
}

fn parse_game_pair(
    away_row: &ElementRef,
    home_row: &ElementRef,
    date: NaiveDate,
) -> Option<ScoreboardGame> {
    let cell_selector = Selector::parse("td").expect("valid selector");
    let status_selector = Selector::parse(".gamestatus").expect("valid selector");

    let away_cells: Vec<ElementRef> = away_row.select(&cell_selector).collect();
    let home_cells: Vec<ElementRef> = home_row.select(&cell_selector).collect();

    // Women's layout is logo | team | score; men's is logo | spacer |
    // team | score. A parseable number in cell 2 distinguishes them.
    let womens_layout = away_cells.len() >= 3
        && !cell_text(&away_cells, 1).is_empty()
        && cell_text(&away_cells, 2).parse::<u32>().is_ok();

    let (away_team, home_team, away_score_text, home_score_text) = if womens_layout {
        (
            cell_text(&away_cells, 1),
            cell_text(&home_cells, 1),
            cell_text(&away_cells, 2),
            cell_text(&home_cells, 2),
        )
    } else {
        (
            cell_text(&away_cells, 2),
            cell_text(&home_cells, 2),
            cell_text(&away_cells, 3),
            cell_text(&home_cells, 3),
        )
    };
    if away_team.is_empty() || home_team.is_empty() {
        return None;
    }

    let game_time = away_row
        .select(&status_selector)
        .next()
        .map(|el| collapsed_text(&el))
        .unwrap_or_default();

    let mut status = ScoreboardStatus::Scheduled;
    let mut result = None;
    let mut live_data = None;
    let mut time = None;

    let scores = match (home_score_text.parse::<u32>(), away_score_text.parse::<u32>()) {
        (Ok(home), Ok(away)) => Some((home, away)),
        _ => None,
    };
    if let Some((home_score, away_score)) = scores {
        result = Some(ScoreboardResult {
            home_score,
            away_score,
        });
        if game_time.contains("Per.") || game_time.contains("Period") {
            status = ScoreboardStatus::InProgress;
            live_data = LIVE_CLOCK.captures(&game_time).map(|caps| LiveData {
                period: format!("Period {}", &caps[1]),
                time_remaining: format!("{}:{}", &caps[3], &caps[4]),
                intermission: None,
            });
        } else {
            status = ScoreboardStatus::Completed;
        }
    } else if SCHEDULED_TIME.is_match(&game_time) {
        time = Some(game_time.clone());
    }

    let (conference, exhibition) = section_heading(away_row)
        .map(|heading| {
            let exhibition = heading.to_lowercase().contains("exhibition");
            let conference = CONFERENCES
                .iter()
                .find(|name| heading.contains(*name))
                .map(|name| name.to_string())
                .unwrap_or_else(|| "Non-Conference".to_string());
            (conference, exhibition)
        })
        .unwrap_or_else(|| ("Non-Conference".to_string(), false));

    Some(ScoreboardGame {
        id: ScoreboardGame::make_id(&away_team, &home_team, date),
        date,
        home_team,
        away_team,
        time,
        conference,
        exhibition,
        status,
        result,
        live_data,
    })
}

fn closest_row<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
}

fn next_row<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    row.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
}

/// Heading of the enclosing conference group, if any.
fn section_heading(row: &ElementRef) -> Option<String> {
    let heading_selector = Selector::parse("h2").expect("valid selector");
    let group = row.ancestors().filter_map(ElementRef::wrap).find(|el| {
        el.value()
            .has_class("confGroup", CaseSensitivity::CaseSensitive)
    })?;
    group
        .select(&heading_selector)
        .next()
        .map(|el| collapsed_text(&el))
}

fn cell_text(cells: &[ElementRef], index: usize) -> String {
    cells.get(index).map(|c| collapsed_text(c)).unwrap_or_default()
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

    const MENS_FIXTURE: &str = r#"<html><body>
<div class="confGroup"><h2>NCHC</h2><table>
<tr><td><img alt="away logo"></td><td></td><td>Denver</td><td>2</td><td class="gamestatus">1 Per. 2 15:22</td></tr>
<tr><td><img alt="home logo"></td><td></td><td>North Dakota</td><td>1</td></tr>
<tr><td><img alt="away logo"></td><td></td><td>Omaha</td><td>3</td><td class="gamestatus">Final</td></tr>
<tr><td><img alt="home logo"></td><td></td><td>Miami</td><td>5</td></tr>
</table></div>
<div class="confGroup"><h2>Exhibition Games</h2><table>
<tr><td><img alt="away logo"></td><td></td><td>U.S. NTDP</td><td></td><td class="gamestatus">7:05 ET</td></tr>
<tr><td><img alt="home logo"></td><td></td><td>Michigan</td><td></td></tr>
</table></div>
</body></html>"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()
    }

    #[test]
    fn test_mens_layout_and_status() {
        let document = Html::parse_document(MENS_FIXTURE);
        let scoreboard = parse_live_scoreboard(&document, date(), Gender::Men);
        assert_eq!(scoreboard.games.len(), 3);

        let live = &scoreboard.games[0];
        assert_eq!(live.away_team, "Denver");
        assert_eq!(live.home_team, "North Dakota");
        assert_eq!(live.status, ScoreboardStatus::InProgress);
        assert_eq!(live.conference, "NCHC");
        let clock = live.live_data.as_ref().unwrap();
        assert_eq!(clock.period, "Period 1");
        assert_eq!(clock.time_remaining, "15:22");
        let result = live.result.unwrap();
        assert_eq!(result.away_score, 2);
        assert_eq!(result.home_score, 1);

        let completed = &scoreboard.games[1];
        assert_eq!(completed.status, ScoreboardStatus::Completed);
        assert_eq!(completed.result.unwrap().home_score, 5);

        let scheduled = &scoreboard.games[2];
        assert_eq!(scheduled.status, ScoreboardStatus::Scheduled);
        assert_eq!(scheduled.time.as_deref(), Some("7:05 ET"));
        assert!(scheduled.exhibition);
        assert_eq!(scheduled.conference, "Non-Conference");
    }

    #[test]
    fn test_womens_layout() {
        let document = Html::parse_document(
            r#"<html><body><div class="confGroup"><h2>Hockey East</h2><table>
<tr><td><img alt="away logo"></td><td>Northeastern</td><td>3</td><td class="gamestatus">Final</td></tr>
<tr><td><img alt="home logo"></td><td>Providence</td><td>2</td></tr>
</table></div></body></html>"#,
        );
        let scoreboard = parse_live_scoreboard(&document, date(), Gender::Women);
        assert_eq!(scoreboard.games.len(), 1);
        let game = &scoreboard.games[0];
        assert_eq!(game.away_team, "Northeastern");
        assert_eq!(game.home_team, "Providence");
        assert_eq!(game.conference, "Hockey East");
        assert_eq!(game.status, ScoreboardStatus::Completed);
    }

    #[test]
    fn test_unpaired_away_row_is_skipped() {
        let document = Html::parse_document(
            r#"<html><body><table>
<tr><td><img alt="away logo"></td><td></td><td>Denver</td><td></td></tr>
</table></body></html>"#,
        );
        let scoreboard = parse_live_scoreboard(&document, date(), Gender::Men);
        assert!(scoreboard.games.is_empty());
    }
}
