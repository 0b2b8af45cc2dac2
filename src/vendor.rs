//! Vendor league API client: an authenticated JSON GET whose response
//! is reconciled against the active-programs list. The vendor's market
//! names don't always match program names, so a small rename table is
//! applied before filtering.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{HockeyError, Result};
use crate::model::{LeagueTeam, LeagueTeams};
use crate::scrape::schedule::season::SeasonWindow;

const BASE_URL: &str = "https://api.sportradar.com/ncaamh/trial/v3/en";

/// Vendor market name → program-list name.
static NAME_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Massachusetts", "UMass"),
        ("Connecticut", "UConn"),
        ("UMass-Lowell", "UMass Lowell"),
        ("Massachusetts-Lowell", "UMass Lowell"),
        ("Long Island University", "LIU"),
        ("Minnesota-Duluth", "Minnesota Duluth"),
        ("Miami", "Miami (OH)"),
        ("Miami (Ohio)", "Miami (OH)"),
        ("Saint Cloud State", "St. Cloud State"),
        ("St Cloud State", "St. Cloud State"),
        ("Saint Lawrence", "St. Lawrence"),
        ("Saint Thomas", "St. Thomas"),
        ("St Thomas", "St. Thomas"),
        ("Army", "Army West Point"),
    ])
});

#[derive(Debug, Deserialize)]
struct LeagueTeamsResponse {
    teams: Option<Vec<LeagueTeam>>,
}

/// Fetch the league roster and keep only currently active programs,
/// sorted case-insensitively by school name.
#[instrument(skip(client, api_key, active_programs))]
pub(crate) async fn fetch_league_teams(
    client: &reqwest::Client,
    api_key: &str,
    active_programs: &HashSet<String>,
) -> Result<LeagueTeams> {
    let url = format!("{BASE_URL}/league/teams.json");
    let response = client
        .get(&url)
        .header("accept", "application/json")
        .header("x-api-key", api_key)
        .send()
        .await
        .map_err(|e| HockeyError::Http {
            url: url.clone(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HockeyError::UnexpectedStatus { url, status });
    }

    let body: LeagueTeamsResponse =
        response
            .json()
            .await
            .map_err(|e| HockeyError::ResponseBody {
                url: url.clone(),
                source: e,
            })?;
    let teams = body.teams.ok_or(HockeyError::ElementNotFound {
        context: "teams array in league response",
    })?;

    let teams = filter_active(teams, active_programs);
    debug!(count = teams.len(), "filtered league teams");

    Ok(LeagueTeams {
        season: SeasonWindow::current().label(),
        teams,
    })
}

fn filter_active(teams: Vec<LeagueTeam>, active_programs: &HashSet<String>) -> Vec<LeagueTeam> {
    let mut teams: Vec<LeagueTeam> = teams
        .into_iter()
        .filter(|team| {
            let program = NAME_MAP
                .get(team.market.as_str())
                .copied()
                .unwrap_or(team.market.as_str());
            active_programs.contains(program)
        })
        .collect();
    teams.sort_by_key(|team| team.market.to_lowercase());
    teams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(market: &str) -> LeagueTeam {
        LeagueTeam {
            id: format!("id-{market}"),
            market: market.to_string(),
            name: "Hockey".to_string(),
            alias: None,
        }
    }

    #[test]
    fn test_filter_reconciles_market_names() {
        let active: HashSet<String> = ["UMass", "UConn", "Boston University"]
            .into_iter()
            .map(String::from)
            .collect();
        let teams = vec![
            team("Massachusetts"),
            team("Connecticut"),
            team("Boston University"),
            team("Retired State"),
        ];
        let filtered = filter_active(teams, &active);
        assert_eq!(filtered.len(), 3);
        // Sorted case-insensitively by market name.
        assert_eq!(filtered[0].market, "Boston University");
        assert_eq!(filtered[1].market, "Connecticut");
        assert_eq!(filtered[2].market, "Massachusetts");
    }

    #[test]
    fn test_unmapped_market_uses_its_own_name() {
        let active: HashSet<String> = ["Northern Michigan"].into_iter().map(String::from).collect();
        let filtered = filter_active(vec![team("Northern Michigan")], &active);
        assert_eq!(filtered.len(), 1);
    }
}
