use serde::Serialize;

/// One ranked team in a weekly poll.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollTeam {
    /// 1-based dense rank.
    pub rank: u32,
    /// Short display name as published by the poll.
    pub team: String,
    pub first_place_votes: u32,
    pub record: String,
    pub points: u32,
    /// None when the team was unranked last week.
    pub last_week_rank: Option<u32>,
}

/// A weekly ranking poll with its trailing vote-getters line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub date: String,
    pub teams: Vec<PollTeam>,
    pub others_receiving_votes: String,
}
