//! Format detection for school athletics schedule pages.
//!
//! Different athletics platforms render schedules with incompatible
//! markup, so each fetched page is matched to a parsing strategy before
//! any extraction runs. Detection is a ladder from most to least
//! specific; the confidence score gates the fallback chain in
//! `schedule::parse_schedule_document`.

use scraper::{Html, Selector};

use crate::scrape::normalized_text;

/// Identifier for one site-family parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum ScheduleFormat {
    /// Sidearm Sports platform pages (most large programs).
    Sidearm,
    /// "Schedule Events" card layout with separately rendered dates.
    ScheduleEvents,
    /// PrestoSports-style pages with uppercase AT/VS opponent rows.
    Presto,
    /// Compact `Mon D vs Team` text listings common to Big Ten sites.
    BigTen,
    /// Last-resort format: season/record only, no game extraction.
    Generic,
}

/// Fixed priority order the fallback chain tries parsers in.
pub(crate) const FALLBACK_ORDER: &[ScheduleFormat] = &[
    ScheduleFormat::Sidearm,
    ScheduleFormat::Presto,
    ScheduleFormat::ScheduleEvents,
    ScheduleFormat::BigTen,
    ScheduleFormat::Generic,
];

/// Domains with a confirmed, stable format.
const URL_FORMATS: &[(&str, ScheduleFormat)] = &[
    ("thesundevils.com", ScheduleFormat::ScheduleEvents),
    ("goterriers.com", ScheduleFormat::Sidearm),
    ("ferrisstatebulldogs.com", ScheduleFormat::Presto),
];

/// Teams whose site format is known; confidence reflects how stable
/// that site has been.
const TEAM_FORMATS: &[(&str, ScheduleFormat, f64)] = &[
    ("Arizona State", ScheduleFormat::ScheduleEvents, 0.9),
    ("Boston University", ScheduleFormat::Sidearm, 0.9),
    ("Boston College", ScheduleFormat::Sidearm, 0.8),
    ("Ferris State", ScheduleFormat::Presto, 0.9),
    ("Michigan", ScheduleFormat::BigTen, 0.7),
    ("Michigan State", ScheduleFormat::BigTen, 0.7),
    ("Ohio State", ScheduleFormat::BigTen, 0.7),
    ("Penn State", ScheduleFormat::BigTen, 0.7),
    ("Wisconsin", ScheduleFormat::BigTen, 0.7),
    ("Minnesota", ScheduleFormat::BigTen, 0.7),
    ("Notre Dame", ScheduleFormat::BigTen, 0.7),
];

/// Pick a parsing strategy for a fetched page. Ladder, first match
/// wins: URL domain (1.0), known team (0.7–0.9), content sniffing
/// (0.6–0.8), generic default (0.3).
pub(crate) fn detect(
    url: &str,
    team_name: Option<&str>,
    document: &Html,
) -> (ScheduleFormat, f64) {
    for (domain, format) in URL_FORMATS {
        if url.contains(domain) {
            return (*format, 1.0);
        }
    }

    if let Some(team) = team_name {
        for (known, format, confidence) in TEAM_FORMATS {
            if team == *known {
                return (*format, *confidence);
            }
        }
    }

    let page_text = normalized_text(document).to_lowercase();
    if page_text.contains("sidearm") || page_text.contains("schedule events") {
        return (ScheduleFormat::Sidearm, 0.6);
    }

    let title_selector = Selector::parse("title").expect("valid selector");
    let title: String = document
        .select(&title_selector)
        .flat_map(|t| t.text())
        .collect::<String>()
        .to_lowercase();
    if title.contains("sun devil") {
        return (ScheduleFormat::ScheduleEvents, 0.8);
    }

    (ScheduleFormat::Generic, 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_doc() -> Html {
        Html::parse_document("<html><head></head><body></body></html>")
    }

    #[test]
    fn test_url_match_is_certain() {
        let doc = empty_doc();
        let (format, confidence) = detect(
            "https://goterriers.com/sports/mens-ice-hockey/schedule",
            None,
            &doc,
        );
        assert_eq!(format, ScheduleFormat::Sidearm);
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn test_team_table_beats_content() {
        let doc = Html::parse_document("<html><body>sidearm platform</body></html>");
        let (format, confidence) = detect("https://example.edu/schedule", Some("Michigan"), &doc);
        assert_eq!(format, ScheduleFormat::BigTen);
        assert_eq!(confidence, 0.7);
    }

    #[test]
    fn test_content_sniffing() {
        let doc = Html::parse_document("<html><body>Powered by Sidearm Sports</body></html>");
        let (format, confidence) = detect("https://example.edu/schedule", None, &doc);
        assert_eq!(format, ScheduleFormat::Sidearm);
        assert_eq!(confidence, 0.6);

        let doc = Html::parse_document(
            "<html><head><title>Sun Devil Hockey</title></head><body></body></html>",
        );
        let (format, confidence) = detect("https://example.edu/schedule", None, &doc);
        assert_eq!(format, ScheduleFormat::ScheduleEvents);
        assert_eq!(confidence, 0.8);
    }

    #[test]
    fn test_default_is_generic_low_confidence() {
        let doc = empty_doc();
        let (format, confidence) = detect("https://example.edu/schedule", None, &doc);
        assert_eq!(format, ScheduleFormat::Generic);
        assert_eq!(confidence, 0.3);
    }

    #[test]
    fn test_format_ids_render_kebab_case() {
        assert_eq!(ScheduleFormat::ScheduleEvents.to_string(), "schedule-events");
        assert_eq!(ScheduleFormat::BigTen.to_string(), "big-ten");
    }
}
