use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

use crate::enums::Gender;

/// All errors that can occur during scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum HockeyError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Every request profile was tried and none got a usable response.
    #[error("all request strategies failed for {url}")]
    AllStrategiesFailed { url: String },

    /// Requested team has no entry in the team directory.
    #[error("team \"{team}\" not found in the {gender}'s directory; list available teams with `teams_list`")]
    TeamNotFound { team: String, gender: Gender },

    /// The poll page contained no recoverable ranking data.
    #[error("poll data not found: {context}")]
    PollDataMissing { context: &'static str },

    /// A static configuration file could not be loaded.
    #[error("failed to load {path}: {message}")]
    Config { path: String, message: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date/time from scraped text.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for HockeyError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        HockeyError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HockeyError>;
