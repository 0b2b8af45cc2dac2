use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::instrument;

use crate::enums::Gender;
use crate::error::Result;
use crate::model::*;
use crate::{directory, scrape, vendor};

/// The main entry point for scraping college hockey data.
///
/// `HockeyClient` wraps a [`reqwest::Client`] and exposes methods to
/// fetch team schedules, day-slate and live scoreboards, ranking
/// polls, and the vendor league roster.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> college_hockey_scraper::Result<()> {
/// use college_hockey_scraper::{Gender, HockeyClient};
///
/// let client = HockeyClient::new();
/// let schedule = client.get_team_schedule("UConn", Gender::Men).await?;
/// println!("{} games in {}", schedule.games.len(), schedule.season);
/// # Ok(())
/// # }
/// ```
pub struct HockeyClient {
    http: reqwest::Client,
}

impl HockeyClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, connection pools,
    /// etc. Per-request timeouts are set by the fetch layer.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }

    /// Fetch a team's schedule from the college-hockey-news site,
    /// resolving the team name through the directory.
    #[instrument(skip(self))]
    pub async fn get_team_schedule(
        &self,
        team_name: &str,
        gender: Gender,
    ) -> Result<TeamSchedule> {
        scrape::chn::scrape_team_schedule(&self.http, team_name, gender).await
    }

    /// Scrape a school athletics site schedule page with format
    /// detection and the fallback parser chain. `Ok(None)` means no
    /// parser confirmed current-season data; present it as "schedule
    /// unavailable", never as an empty schedule.
    #[instrument(skip(self))]
    pub async fn scrape_school_schedule(
        &self,
        url: &str,
        team_name: Option<&str>,
    ) -> Result<Option<TeamSchedule>> {
        scrape::schedule::scrape_schedule(&self.http, url, team_name).await
    }

    /// Fetch the slate of games for one date.
    #[instrument(skip(self))]
    pub async fn get_scoreboard(&self, date: NaiveDate, gender: Gender) -> Result<Scoreboard> {
        scrape::scoreboard::scrape_scoreboard(&self.http, date, gender).await
    }

    /// Fetch today's games with running scores and clock state.
    #[instrument(skip(self))]
    pub async fn get_live_scoreboard(&self, gender: Gender) -> Result<Scoreboard> {
        scrape::live::scrape_live_scoreboard(&self.http, gender).await
    }

    /// Fetch the current ranking poll.
    #[instrument(skip(self))]
    pub async fn get_poll(&self, gender: Gender) -> Result<Poll> {
        scrape::poll::scrape_poll(&self.http, gender).await
    }

    /// Fetch the vendor league roster, filtered to `active_programs`.
    #[instrument(skip(self, api_key, active_programs))]
    pub async fn get_league_teams(
        &self,
        api_key: &str,
        active_programs: &HashSet<String>,
    ) -> Result<LeagueTeams> {
        vendor::fetch_league_teams(&self.http, api_key, active_programs).await
    }

    /// Resolve a team name (any alias) to its directory entry. No
    /// network call.
    pub fn lookup_team(&self, team_name: &str, gender: Gender) -> Option<TeamInfo> {
        directory::lookup(team_name, gender)
    }

    /// All programs in the directory, one entry per source URL. No
    /// network call.
    pub fn list_teams(&self, gender: Gender) -> Vec<TeamInfo> {
        directory::list_all(gender)
    }

    /// Conference-grouped directory summary. No network call.
    pub fn teams_list(&self, gender: Gender) -> TeamsList {
        directory::teams_list(gender)
    }
}

impl Default for HockeyClient {
    fn default() -> Self {
        Self::new()
    }
}
