use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};
use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

pub const LOADING_TEXT: &str = "Loading anomalies...";
pub const HEADING_TEXT: &str = "Water Level Anomalies";
pub const NO_ANOMALIES_TEXT: &str = "No anomalies found.";

pub fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// A single reported jump or drop in a site's water level series.
///
/// Decoding is lenient: missing or `null` text fields become empty strings,
/// missing or `null` values become `None` and render blank. Values sent as
/// numeric strings are accepted as well.
#[serde_as]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AnomalyRecord {
    #[serde_as(as = "DefaultOnNull")]
    pub site_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub site_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub direction: String,
    #[serde_as(as = "DefaultOnNull")]
    pub timestamp: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub prev_value: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub curr_value: Option<f64>,
}

pub type AnomalyRecords = Vec<AnomalyRecord>;

/// Renders a number the way a browser would: exponent form from 1e21 up and
/// below 1e-6, plain decimal otherwise.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

impl AnomalyRecord {
    /// Identity hint for list rendering, not guaranteed to be unique.
    pub fn list_key(&self) -> String {
        format!("{}{}", self.site_id, self.timestamp)
    }

    pub fn prev_value_text(&self) -> String {
        format_value(self.prev_value)
    }

    pub fn curr_value_text(&self) -> String {
        format_value(self.curr_value)
    }

    /// Part of the list line following the site name.
    pub fn line_tail(&self) -> String {
        format!(
            " ({}) on {}: {} → {}",
            self.site_id,
            self.timestamp,
            self.prev_value_text(),
            self.curr_value_text()
        )
    }
}

impl Display for AnomalyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at site {}{}",
            self.direction,
            self.site_name,
            self.line_tail()
        )
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rising,
    Falling,
}

impl Direction {
    pub fn between(prev: f64, curr: f64) -> Self {
        if curr > prev {
            Self::Rising
        } else {
            Self::Falling
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Falling => write!(f, "falling"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed or returned a non-success status
    #[error("Failed to fetch")]
    TransportOrStatus,
    #[error("{0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub fn decode_anomalies(body: &str) -> Result<AnomalyRecords, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Turns a finished request into the fetch outcome. `body` is `None` when it
/// could not be read; it is not looked at unless the status was a success.
pub fn classify_response(ok: bool, body: Option<&str>) -> Result<AnomalyRecords, FetchError> {
    if !ok {
        return Err(FetchError::TransportOrStatus);
    }
    match body {
        Some(body) => decode_anomalies(body),
        None => Err(FetchError::TransportOrStatus),
    }
}

/// State owned by a mounted anomaly view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub anomalies: AnomalyRecords,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            anomalies: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// What a view renders for a given state, exactly one of the three.
#[derive(Debug, PartialEq)]
pub enum ViewContent<'a> {
    Loading,
    Failed(&'a str),
    Loaded(&'a [AnomalyRecord]),
}

impl ViewState {
    /// Applies the outcome of the fetch. Only the first completion is applied,
    /// returns whether this one was.
    pub fn complete(&mut self, outcome: Result<AnomalyRecords, FetchError>) -> bool {
        if !self.loading {
            return false;
        }
        match outcome {
            Ok(anomalies) => self.anomalies = anomalies,
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
        true
    }

    pub fn content(&self) -> ViewContent<'_> {
        if self.loading {
            ViewContent::Loading
        } else if let Some(message) = &self.error {
            ViewContent::Failed(message)
        } else {
            ViewContent::Loaded(&self.anomalies)
        }
    }
}

/// Token tied to a view's lifetime. Clones share the flag, so a task holding
/// a clone observes a revoke issued by the view's cleanup.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Runs `f` only while the owner is still alive.
    pub fn run_if_alive<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_alive() {
            Some(f())
        } else {
            None
        }
    }
}
