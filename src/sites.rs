//! Load-once static configuration: the team-name → schedule-URL mapping
//! for school athletics sites, and the list of currently active
//! programs used to filter vendor API responses.
//!
//! Both tables are read from disk exactly once per process and exposed
//! through read-only accessors; nothing mutates them afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use crate::error::{HockeyError, Result};

static SCHEDULE_URLS: OnceLock<HashMap<String, String>> = OnceLock::new();

fn config_error(path: &Path, message: impl ToString) -> HockeyError {
    HockeyError::Config {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Parse the team,url CSV. Headerless; `#` comment lines and blank
/// lines are skipped, as are rows missing either field.
fn parse_schedule_urls(path: &Path) -> Result<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| config_error(path, e))?;

    let mut urls = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| config_error(path, e))?;
        let team = record.get(0).unwrap_or_default();
        let url = record.get(1).unwrap_or_default();
        if !team.is_empty() && !url.is_empty() {
            urls.insert(team.to_string(), url.to_string());
        }
    }
    info!(count = urls.len(), path = %path.display(), "loaded team schedule URLs");
    Ok(urls)
}

/// The process-wide schedule-URL table, loading it from `path` on first
/// call. Later calls return the already-loaded table and ignore `path`.
pub fn schedule_urls(path: impl AsRef<Path>) -> Result<&'static HashMap<String, String>> {
    if let Some(urls) = SCHEDULE_URLS.get() {
        return Ok(urls);
    }
    let parsed = parse_schedule_urls(path.as_ref())?;
    Ok(SCHEDULE_URLS.get_or_init(|| parsed))
}

/// Schedule URL for a team, if the mapping has been loaded and has one.
pub fn schedule_url_for(team_name: &str) -> Option<&'static str> {
    SCHEDULE_URLS
        .get()
        .and_then(|urls| urls.get(team_name))
        .map(String::as_str)
}

/// Parse the active-programs list: one program name per line, `//`
/// comment lines and blanks ignored.
pub fn active_programs(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    let programs: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(str::to_string)
        .collect();
    info!(count = programs.len(), path = %path.display(), "loaded active programs");
    Ok(programs)
}
