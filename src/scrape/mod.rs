pub(crate) mod chn;
pub(crate) mod live;
pub(crate) mod poll;
pub(crate) mod schedule;
pub(crate) mod scoreboard;

use std::time::Duration;

use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{HockeyError, Result};

/// One outbound request shape. Some athletics sites reject requests
/// that don't look like a browser; the profiles below are tried in
/// order until one gets a response.
struct RequestProfile {
    user_agent: &'static str,
    headers: &'static [(&'static str, &'static str)],
    timeout: Duration,
}

static PROFILES: &[RequestProfile] = &[
    RequestProfile {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        headers: &[
            ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8"),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Cache-Control", "max-age=0"),
        ],
        timeout: Duration::from_secs(15),
    },
    RequestProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        headers: &[(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )],
        timeout: Duration::from_secs(20),
    },
    RequestProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        headers: &[("Accept", "*/*")],
        timeout: Duration::from_secs(25),
    },
];

const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Fetch a URL, rotating through the request profiles until one
/// succeeds. Exhausting every profile is terminal for the request; the
/// caller must not retry above this layer.
pub(crate) async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String> {
    for (attempt, profile) in PROFILES.iter().enumerate() {
        match send_with_profile(client, url, profile).await {
            Ok(body) => {
                debug!(url, strategy = attempt + 1, "fetched page");
                return Ok(body);
            }
            Err(e) => {
                warn!(url, strategy = attempt + 1, error = %e, "request strategy failed");
                if attempt + 1 < PROFILES.len() {
                    sleep(RETRY_PAUSE).await;
                }
            }
        }
    }
    Err(HockeyError::AllStrategiesFailed {
        url: url.to_owned(),
    })
}

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    let body = fetch_html(client, url).await?;
    Ok(Html::parse_document(&body))
}

async fn send_with_profile(
    client: &reqwest::Client,
    url: &str,
    profile: &RequestProfile,
) -> Result<String> {
    let mut request = client
        .get(url)
        .timeout(profile.timeout)
        .header("User-Agent", profile.user_agent);
    for (name, value) in profile.headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await.map_err(|e| HockeyError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HockeyError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| HockeyError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Extract trimmed text content from the first element matching
/// `selector` inside `element`. Returns an empty string if nothing
/// matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Full-page text with runs of whitespace collapsed to single spaces.
/// Adjacent text nodes concatenate with no separator, so labels glue to
/// their values ("Overall6-3-1") exactly as the text parsers expect.
pub(crate) fn normalized_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_text_collapses_whitespace() {
        let html = Html::parse_document(
            "<html><body><div>Overall</div>6-3-1<p>Oct   4\n (Sat)</p></body></html>",
        );
        let text = normalized_text(&html);
        assert_eq!(text, "Overall6-3-1 Oct 4 (Sat)");
    }

    #[test]
    fn test_select_text_trims_and_strips_breaks() {
        let html = Html::parse_document(
            "<html><body><span class='a'>\n\t Maine <b>ignored</b></span></body></html>",
        );
        let selector = Selector::parse("span.a").unwrap();
        let root = html.root_element();
        assert_eq!(select_text(&root, &selector), "Maine");
    }
}
