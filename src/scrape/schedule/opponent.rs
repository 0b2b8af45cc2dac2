//! Opponent-name cleanup and validation.
//!
//! Athletics pages glue promotional text, locations, broadcast labels,
//! and navigation chrome onto opponent names. Every parser routes its
//! raw extraction through [`clean_opponent`] and accepts the result
//! only if it passes [`is_valid_opponent`], so the cleanup heuristics
//! can grow without touching extraction logic.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing content that marks the end of the opponent name: schedule
/// card controls, media links, giveaways.
static TRAILING_JUNK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(Box\s+Score|Recap|Gallery|Int|Gameday\s+Information|Watch|Listen|Live|Stats|Tickets|Magnet\s+Giveaway|Schedule\s+Magnet\s+Giveaway|Exhibition|Event\s+details|Show\s+Event\s+Info|Season\s+opener).*$",
    )
    .unwrap()
});

/// Home-town strings that some sites append right after the name.
static TRAILING_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s+(Boston|Storrs|Orono|Cambridge|Durham|Providence|Amherst|North Andover|Hamden|Chestnut Hill|New York),?.*$",
    )
    .unwrap()
});

/// Mixed-in navigation text that signals the match ran into unrelated
/// page content.
static TRAILING_NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(Ice\s+Hockey\s+Highlights|All\s+Videos|Related\s+News|Skip\s+Ad|All\s+News|Highlights|Videos).*$",
    )
    .unwrap()
});

// "(Feb. 28)" date references and "Saturday, ..." day-of-week tails.
static TRAILING_DATE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z][a-z]{2}\.\s+\d{1,2}\).*$").unwrap());
static TRAILING_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday),.*$").unwrap()
});

/// Conference abbreviations glued to the end of a name.
static TRAILING_CONFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(NCHC|HEA|ECAC|CCHA|B1G|Big Ten|Atlantic Hockey)$").unwrap()
});

static DUPLICATED_LOWELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*UMass Lowell)\s+Lowell.*$").unwrap());
static TRAILING_LOWELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+Lowell.*$").unwrap());
static TRAILING_EVENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*Red Hot Hockey.*$").unwrap());
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

static EXHIBITION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(exh\.?\)|\(exhibition\)|#\s*$").unwrap());

/// Strip everything a source site glues onto an opponent name. The
/// result still has to pass [`is_valid_opponent`].
pub(crate) fn clean_opponent(raw: &str) -> String {
    let mut name = raw.trim().to_string();

    name = TRAILING_JUNK.replace(&name, "").into_owned();
    name = TRAILING_NAVIGATION.replace(&name, "").into_owned();
    name = TRAILING_DATE_REF.replace(&name, "").into_owned();
    name = TRAILING_WEEKDAY.replace(&name, "").into_owned();
    name = TRAILING_LOCATION.replace(&name, "").into_owned();

    // "UMass Lowell Lowell" keeps the team, drops the city echo; for
    // any other name a trailing "Lowell" is the city.
    if let Some(caps) = DUPLICATED_LOWELL.captures(&name) {
        name = caps[1].to_string();
    } else if !name.contains("UMass Lowell") {
        name = TRAILING_LOWELL.replace(&name, "").into_owned();
    }

    name = name.replace("(exh.)", "");
    name = TRAILING_EVENT_NAME.replace(&name, "").into_owned();
    name = name.trim_start_matches('[').trim_end_matches(']').to_string();
    name = TRAILING_PARENTHETICAL.replace(&name, "").into_owned();
    name = TRAILING_CONFERENCE.replace(&name, "").into_owned();

    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validation gate every parsed opponent must pass: bounded length, no
/// placeholder or template artifacts, no navigation text, no repeated
/// phrase (a sign two page fragments were joined).
pub(crate) fn is_valid_opponent(name: &str) -> bool {
    let len = name.chars().count();
    if !(2..=100).contains(&len) {
        return false;
    }
    if !name.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    if name.contains('/') || name.contains("TBD") {
        return false;
    }
    if ["{{", "}}", "${", "<%", "[object", "undefined"]
        .iter()
        .any(|artifact| name.contains(artifact))
    {
        return false;
    }
    if name.contains("Men's Ice Hockey")
        || name.contains("Highlights")
        || name.contains("Videos")
        || name.contains("News")
    {
        return false;
    }
    if has_repeated_phrase(name) {
        return false;
    }
    true
}

/// "Boston College Boston College": the same phrase twice is a sign
/// two page fragments got joined.
fn has_repeated_phrase(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() < 2 || words.len() % 2 != 0 {
        return false;
    }
    let (first, second) = words.split_at(words.len() / 2);
    first == second
}

/// Exhibition markers near the opponent text: "(Exhibition)", "(exh.)",
/// or a trailing "#".
pub(crate) fn is_exhibition(text: &str) -> bool {
    EXHIBITION_MARKER.is_match(text.trim())
}

/// Known home venues, keyed by markers found in the surrounding match
/// text. Only a handful of rinks are recognized; everything else stays
/// unset.
pub(crate) fn home_venue(
    context: &str,
) -> Option<(&'static str, &'static str, &'static str)> {
    if context.contains("Agganis") || context.contains("goterriers.com") {
        return Some(("Agganis Arena", "Boston", "MA"));
    }
    if context.contains("Mullett") || context.contains("thesundevils.com") {
        return Some(("Mullett Arena", "Tempe", "AZ"));
    }
    None
}

/// Conference abbreviation near the match text, the usual way Sidearm
/// pages flag an in-conference game.
pub(crate) fn has_conference_abbrev(text: &str) -> bool {
    ["HEA", "NCHC", "B1G", "ECAC", "CCHA"]
        .iter()
        .any(|abbrev| text.contains(abbrev))
}
