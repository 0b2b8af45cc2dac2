use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::Gender;

/// Directory entry for one program: canonical name, source page, and
/// conference affiliation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub name: String,
    pub url: String,
    pub conference: String,
    pub gender: Gender,
}

/// Summary of every program in the directory, grouped by conference.
/// Derived purely from static data, no network call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsList {
    pub total_teams: usize,
    pub conferences: Vec<String>,
    pub teams_by_conference: BTreeMap<String, Vec<String>>,
    pub all_teams: Vec<String>,
    pub gender: Gender,
}

/// One team as returned by the vendor league API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueTeam {
    pub id: String,
    /// School name ("Boston University"), the field the vendor sorts and
    /// filters on.
    pub market: String,
    /// Nickname ("Terriers").
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Vendor league roster filtered to currently active programs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTeams {
    pub season: String,
    pub teams: Vec<LeagueTeam>,
}
