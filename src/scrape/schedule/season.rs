//! Season labeling and currency rules.
//!
//! A hockey season spans two calendar years; its label is "YYYY-YY"
//! where the suffix is `(start + 1) % 100`. Games in August–December
//! fall in the start year, January–July in the following year.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::model::TeamRecord;
use crate::scrape::normalized_text;

/// The season currently considered "target": computed once per request
/// from the calendar date and threaded through every parser, so the
/// currency rules never hardcode a season literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeasonWindow {
    start_year: i32,
}

impl SeasonWindow {
    pub(crate) fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// Window containing `date`: August or later starts a new season.
    pub(crate) fn for_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 8 {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    #[cfg(test)]
    pub(crate) fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    pub(crate) fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Display label, e.g. "2025-26".
    pub(crate) fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }

    /// Calendar year a game in `month` (1-12) falls in within this
    /// season.
    pub(crate) fn year_for_month(&self, month: u32) -> i32 {
        if month >= 8 {
            self.start_year
        } else {
            self.start_year + 1
        }
    }
}

static SEASON_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

// Explicit "2025-26 season" / "schedule 2025-26" style references,
// slash or dash separated.
static LABELED_SEASON: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(\d{4}[-/]\d{2})\s*(?:season|schedule)").unwrap(),
        Regex::new(r"(?i)(?:season|schedule)\s*(\d{4}[-/]\d{2})").unwrap(),
    ]
});

static STANDALONE_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(\d{4}-\d{2})(\s|$)").unwrap());

/// True iff `season` is a well-formed "YYYY-YY" hockey season label
/// whose suffix wraps correctly and which is not older than the target
/// window. "2099-00" is valid: the suffix rule is `(start + 1) % 100`.
pub(crate) fn is_valid_season(season: &str, window: &SeasonWindow) -> bool {
    let Some(caps) = SEASON_FORMAT.captures(season) else {
        return false;
    };
    let start: i32 = caps[1].parse().unwrap_or(0);
    let end: i32 = caps[2].parse().unwrap_or(-1);
    end == (start + 1) % 100 && start >= window.start_year()
}

fn season_format_ok(season: &str) -> bool {
    let Some(caps) = SEASON_FORMAT.captures(season) else {
        return false;
    };
    let start: i32 = caps[1].parse().unwrap_or(0);
    let end: i32 = caps[2].parse().unwrap_or(-1);
    end == (start + 1) % 100
}

/// Pull the season label out of the page title and headings.
///
/// Returns `None` when the page confirms only stale seasons or carries
/// no season evidence at all; callers turn that into the offseason
/// sentinel. Absence of a confirmed current season is far more common
/// than a false positive, so the default is conservative.
pub(crate) fn extract_season(document: &Html, window: &SeasonWindow) -> Option<String> {
    let title_selector = Selector::parse("title").expect("valid selector");
    let heading_selector = Selector::parse("h1, h2, h3").expect("valid selector");

    let title: String = document
        .select(&title_selector)
        .flat_map(|t| t.text())
        .collect();
    let headings: String = document
        .select(&heading_selector)
        .flat_map(|h| h.text())
        .map(|t| format!("{t} "))
        .collect();
    let scope = format!("{title} {headings}");

    let mut found: Vec<String> = Vec::new();
    for pattern in LABELED_SEASON.iter() {
        for caps in pattern.captures_iter(&scope) {
            found.push(caps[1].replace('/', "-"));
        }
    }

    // No explicit "season"/"schedule" context: accept standalone labels
    // but only ones that pass the suffix-wrap rule, to avoid matching
    // date ranges.
    if found.is_empty() {
        for caps in STANDALONE_SEASON.captures_iter(&scope) {
            let candidate = caps[2].to_string();
            if season_format_ok(&candidate) {
                found.push(candidate);
            }
        }
    }

    found.sort();
    found.dedup();

    let mut valid: Vec<String> = found
        .iter()
        .filter(|s| is_valid_season(s, window))
        .cloned()
        .collect();

    let target = window.label();
    if valid.iter().any(|s| *s == target) {
        return Some(target);
    }
    if !valid.is_empty() {
        valid.sort();
        debug!(season = %valid[0], "page declares a future season, not the target");
        return Some(valid.remove(0));
    }

    if !found.is_empty() {
        // Seasons were declared but none is current; the site is
        // showing an old schedule.
        debug!(stale = ?found, "only stale seasons found");
        return None;
    }

    // No season declared anywhere. Default to the target season only
    // when the page at least references the window's calendar years.
    let text = normalized_text(document);
    let years = [
        window.start_year().to_string(),
        (window.start_year() + 1).to_string(),
    ];
    if years.iter().any(|y| text.contains(y)) {
        debug!("no explicit season; page references current years");
        return Some(target);
    }
    None
}

static RECORD_PATTERNS: LazyLock<[(Regex, usize); 4]> = LazyLock::new(|| {
    [
        (Regex::new(r"Overall\s*(\d+-\d+-\d+)").unwrap(), 0),
        (Regex::new(r"Conf(?:erence)?\s*(\d+-\d+-\d+)").unwrap(), 1),
        (Regex::new(r"Home\s*(\d+-\d+-\d+)").unwrap(), 2),
        (Regex::new(r"Away\s*(\d+-\d+-\d+)").unwrap(), 3),
    ]
});

/// Pull labeled win-loss-tie triples out of the page text. Athletics
/// sites render these as label and value in adjacent nodes, which the
/// concatenated page text turns into "Overall6-3-1". Missing
/// categories stay at "0-0-0".
pub(crate) fn extract_record(document: &Html) -> TeamRecord {
    let text = normalized_text(document);
    let mut record = TeamRecord::default();
    for (pattern, slot) in RECORD_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let value = caps[1].to_string();
            match *slot {
                0 => record.overall = value,
                1 => record.conference = value,
                2 => record.home = value,
                _ => record.away = value,
            }
        }
    }
    record
}

/// 1-based month number for an English three-letter abbreviation.
pub(crate) fn month_from_abbr(abbr: &str) -> Option<u32> {
    match abbr {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// 1-based month number for a full English month name.
pub(crate) fn month_from_name(name: &str) -> Option<u32> {
    month_from_abbr(name.get(..3).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> SeasonWindow {
        SeasonWindow::starting(2025)
    }

    #[test]
    fn test_window_boundaries() {
        let august = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let july = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        assert_eq!(SeasonWindow::for_date(august).label(), "2025-26");
        assert_eq!(SeasonWindow::for_date(july).label(), "2024-25");
    }

    #[test]
    fn test_year_for_month_covers_every_month() {
        let w = window();
        for month in 1..=12 {
            let expected = if month >= 8 { 2025 } else { 2026 };
            assert_eq!(w.year_for_month(month), expected, "month {month}");
        }
    }

    #[test]
    fn test_is_valid_season() {
        let w = window();
        assert!(is_valid_season("2025-26", &w));
        assert!(is_valid_season("2026-27", &w));
        assert!(!is_valid_season("2025-27", &w));
        assert!(!is_valid_season("2024-25", &w));
        assert!(!is_valid_season("offseason", &w));
        assert!(!is_valid_season("2025/26", &w));
        assert!(!is_valid_season("25-26", &w));
    }

    #[test]
    fn test_is_valid_season_century_wrap() {
        let w = SeasonWindow::starting(2099);
        assert!(is_valid_season("2099-00", &w));
        assert!(!is_valid_season("2099-100", &w));
    }

    #[test]
    fn test_extract_season_from_title() {
        let html = Html::parse_document(
            "<html><head><title>Men's Ice Hockey Schedule 2025-26</title></head><body></body></html>",
        );
        assert_eq!(extract_season(&html, &window()), Some("2025-26".into()));
    }

    #[test]
    fn test_extract_season_slash_form_in_heading() {
        let html = Html::parse_document(
            "<html><body><h2>2025/26 Season</h2></body></html>",
        );
        assert_eq!(extract_season(&html, &window()), Some("2025-26".into()));
    }

    #[test]
    fn test_extract_season_stale_page_is_none() {
        let html = Html::parse_document(
            "<html><head><title>Schedule 2024-25</title></head><body>old news</body></html>",
        );
        assert_eq!(extract_season(&html, &window()), None);
    }

    #[test]
    fn test_extract_season_standalone_rejects_non_season_ranges() {
        // "2030-50" is a year range, not a season label, and the page
        // has no current-year references to fall back on.
        let html = Html::parse_document(
            "<html><body><h1>Capital plan 2030-50</h1></body></html>",
        );
        assert_eq!(extract_season(&html, &window()), None);
    }

    #[test]
    fn test_extract_season_defaults_on_current_year_content() {
        let html = Html::parse_document(
            "<html><body><h1>Hockey Schedule</h1><p>Opening night October 2025</p></body></html>",
        );
        assert_eq!(extract_season(&html, &window()), Some("2025-26".into()));
    }

    #[test]
    fn test_extract_season_no_evidence_is_none() {
        let html = Html::parse_document(
            "<html><body><h1>Hockey Schedule</h1><p>Check back soon.</p></body></html>",
        );
        assert_eq!(extract_season(&html, &window()), None);
    }

    #[test]
    fn test_extract_record_concatenated_labels() {
        let html = Html::parse_document(
            "<html><body><div>Overall</div>6-3-1<div>Conf</div>4-2-0<div>Home</div>3-1-0</body></html>",
        );
        let record = extract_record(&html);
        assert_eq!(record.overall, "6-3-1");
        assert_eq!(record.conference, "4-2-0");
        assert_eq!(record.home, "3-1-0");
        assert_eq!(record.away, "0-0-0");
        assert_eq!(record.neutral, "0-0-0");
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_from_abbr("Oct"), Some(10));
        assert_eq!(month_from_abbr("oct"), None);
        assert_eq!(month_from_name("February"), Some(2));
        assert_eq!(month_from_name("x"), None);
    }
}
