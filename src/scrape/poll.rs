//! Weekly ranking poll parser.
//!
//! The poll page embeds its data as an HTML-entity-escaped JSON array
//! inside a script/markup blob. A bounding regex locates the escaped
//! array, entities are decoded, and then balanced `{…}` objects are
//! scanned out by brace depth, because the embedded strings can contain
//! characters that make a naive split unsafe. Each object is parsed
//! independently; one malformed team must not take down the poll.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::{instrument, warn};

use crate::enums::Gender;
use crate::error::{HockeyError, Result};
use crate::model::{Poll, PollTeam};
use crate::scrape::fetch_html;

const MEN_URL: &str = "https://www.uscho.com/rankings/d-i-mens-poll";
const WOMEN_URL: &str = "https://www.uscho.com/rankings/d-i-womens-poll";

static DATA_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&quot;data&quot;:\[(\{&quot;[^\]]+)\]").unwrap());
// Lazy capture up to the closing quote entity, so apostrophe entities
// inside the value don't truncate it.
static OTHERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&quot;other&quot;:&quot;(.+?)&quot;").unwrap());

/// Scrape the current ranking poll for one division.
#[instrument(skip(client))]
pub(crate) async fn scrape_poll(client: &reqwest::Client, gender: Gender) -> Result<Poll> {
    let url = match gender {
        Gender::Men => MEN_URL,
        Gender::Women => WOMEN_URL,
    };
    let html = fetch_html(client, url).await?;
    let teams = parse_teams(&html)?;
    let others_receiving_votes = parse_others_receiving_votes(&html);

    Ok(Poll {
        date: Utc::now().format("%B %-d, %Y").to_string(),
        teams,
        others_receiving_votes,
    })
}

pub(crate) fn parse_others_receiving_votes(html: &str) -> String {
    OTHERS
        .captures(html)
        .map(|caps| caps[1].replace("&#039;", "'"))
        .unwrap_or_default()
}

pub(crate) fn parse_teams(html: &str) -> Result<Vec<PollTeam>> {
    let Some(caps) = DATA_ARRAY.captures(html) else {
        return Err(HockeyError::PollDataMissing {
            context: "data array pattern absent from page",
        });
    };
    let decoded = caps[1].replace("&quot;", "\"").replace("&#039;", "'");

    let mut teams = Vec::new();
    for object in balanced_objects(&decoded) {
        match parse_team_object(object) {
            Some(team) => teams.push(team),
            None => warn!(object, "skipping unparseable poll team object"),
        }
    }

    if teams.is_empty() {
        return Err(HockeyError::PollDataMissing {
            context: "no recoverable team objects",
        });
    }
    Ok(teams)
}

/// Split the decoded array body into balanced `{…}` slices by brace
/// depth.
fn balanced_objects(decoded: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (index, ch) in decoded.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(begin) = start.take() {
                        objects.push(&decoded[begin..=index]);
                    }
                }
            }
            _ => {}
        }
    }
    objects
}

fn parse_team_object(json: &str) -> Option<PollTeam> {
    let value: serde_json::Value = serde_json::from_str(json).ok()?;
    let rank = field_u32(&value, "rnk")?;
    let team = value.get("shortname")?.as_str()?.to_string();
    Some(PollTeam {
        rank,
        team,
        record: value
            .get("record")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        points: field_u32(&value, "pts").unwrap_or(0),
        first_place_votes: field_u32(&value, "first_pv").unwrap_or(0),
        // A zero previous rank means unranked last week.
        last_week_rank: field_u32(&value, "prev_rnk").filter(|rank| *rank != 0),
    })
}

fn field_u32(value: &serde_json::Value, key: &str) -> Option<u32> {
    let field = value.get(key)?;
    field
        .as_u64()
        .map(|n| n as u32)
        .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped_poll(objects: &[&str]) -> String {
        let body = objects.join(",").replace('"', "&quot;");
        format!(
            "<html><body><script>var chart = {{&quot;data&quot;:[{body}],&quot;other&quot;:&quot;Denver 45, St. Lawrence&#039;s 12&quot;}}</script></body></html>"
        )
    }

    #[test]
    fn test_parse_teams() {
        let html = escaped_poll(&[
            r#"{"rnk":1,"shortname":"Boston College","record":"10-1-0","pts":499,"first_pv":24,"prev_rnk":1}"#,
            r#"{"rnk":2,"shortname":"Michigan State","record":"9-2-0","pts":470,"first_pv":1,"prev_rnk":3}"#,
            r#"{"rnk":3,"shortname":"Maine","record":"8-2-1","pts":441,"prev_rnk":0}"#,
        ]);
        let teams = parse_teams(&html).unwrap();
        assert_eq!(teams.len(), 3);

        let first = &teams[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.team, "Boston College");
        assert_eq!(first.record, "10-1-0");
        assert_eq!(first.points, 499);
        assert_eq!(first.first_place_votes, 24);
        assert_eq!(first.last_week_rank, Some(1));

        // prev_rnk of zero means unranked last week.
        assert_eq!(teams[2].last_week_rank, None);
        assert_eq!(teams[2].first_place_votes, 0);
    }

    #[test]
    fn test_one_malformed_object_does_not_sink_the_poll() {
        let html = escaped_poll(&[
            r#"{"rnk":1,"shortname":"Boston College","pts":499}"#,
            r#"{"rnk":2,"shortname":}"#,
            r#"{"rnk":3,"shortname":"Maine","pts":441}"#,
        ]);
        let teams = parse_teams(&html).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].team, "Maine");
    }

    #[test]
    fn test_numeric_strings_are_tolerated() {
        let html = escaped_poll(&[r#"{"rnk":"4","shortname":"Denver","pts":"410"}"#]);
        let teams = parse_teams(&html).unwrap();
        assert_eq!(teams[0].rank, 4);
        assert_eq!(teams[0].points, 410);
    }

    #[test]
    fn test_missing_data_array_is_fatal() {
        let err = parse_teams("<html><body>no poll here</body></html>").unwrap_err();
        assert!(matches!(err, HockeyError::PollDataMissing { .. }));
    }

    #[test]
    fn test_zero_recoverable_teams_is_fatal() {
        let html = escaped_poll(&[r#"{"bogus":}"#]);
        let err = parse_teams(&html).unwrap_err();
        assert!(matches!(err, HockeyError::PollDataMissing { .. }));
    }

    #[test]
    fn test_others_receiving_votes_decodes_entities() {
        let html = escaped_poll(&[r#"{"rnk":1,"shortname":"BC"}"#]);
        assert_eq!(
            parse_others_receiving_votes(&html),
            "Denver 45, St. Lawrence's 12"
        );
    }
}
