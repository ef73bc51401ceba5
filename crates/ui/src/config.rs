//! Runtime configuration
//!
//! Resolved once at startup from URL query parameters, then `localStorage`,
//! then built-in defaults. Values that fail to parse fall back to the default.

use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use vitals_protocol::{Scalar, UPDATE_VITAL_PATH};
use web_sys::Window;

pub const DEFAULT_SLIDER_CLASS: &str = "slider";

/// How a slider's raw text is put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueEncoding {
    /// Send the input's value string unchanged
    #[default]
    Text,
    /// Send numbers as JSON numbers, anything else as text
    Number,
}

impl ValueEncoding {
    pub fn encode(self, raw: &str) -> Scalar {
        match self {
            Self::Text => Scalar::from(raw),
            Self::Number => Scalar::parse_number(raw).unwrap_or_else(|| Scalar::from(raw)),
        }
    }
}

impl FromStr for ValueEncoding {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "number" | "numeric" => Ok(Self::Number),
            _ => Err(()),
        }
    }
}

/// A single setting: its query parameter and storage key
struct Setting {
    param: &'static str,
    storage_key: &'static str,
}

const ENDPOINT: Setting = Setting { param: "endpoint", storage_key: "vitals-endpoint" };
const SLIDER_CLASS: Setting = Setting { param: "slider_class", storage_key: "vitals-slider-class" };
const VALUES: Setting = Setting { param: "values", storage_key: "vitals-values" };
const LOG: Setting = Setting { param: "log", storage_key: "vitals-log" };
const SUMMARY: Setting = Setting { param: "summary", storage_key: "vitals-summary" };

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub endpoint: String,
    pub slider_class: String,
    pub value_encoding: ValueEncoding,
    pub log_level: LevelFilter,
    pub summary_targets: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            endpoint: UPDATE_VITAL_PATH.to_string(),
            slider_class: DEFAULT_SLIDER_CLASS.to_string(),
            value_encoding: ValueEncoding::Text,
            log_level: LevelFilter::INFO,
            summary_targets: false,
        }
    }
}

impl UiConfig {
    /// Resolve from `location.search` and `localStorage`
    pub fn from_window(win: &Window) -> Self {
        let search = win.location().search().unwrap_or_default();
        let storage = win.local_storage().ok().flatten();
        Self::resolve(&search, |key| {
            storage.as_ref().and_then(|s| s.get_item(key).ok()).flatten()
        })
    }

    /// Resolve from a query string (with or without leading `?`) and a storage lookup
    pub fn resolve(search: &str, stored: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |setting: &Setting| {
            query_param(search, setting.param)
                .or_else(|| stored(setting.storage_key))
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            endpoint: lookup(&ENDPOINT).unwrap_or(defaults.endpoint),
            slider_class: lookup(&SLIDER_CLASS).unwrap_or(defaults.slider_class),
            value_encoding: lookup(&VALUES)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.value_encoding),
            log_level: lookup(&LOG)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
            summary_targets: lookup(&SUMMARY)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.summary_targets),
        }
    }
}

/// Decoded value of `name` in a query string (handles both ?name=x and &name=x)
fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_component(value))
}

/// Form-style decoding: `+` is a space, then percent escapes.
/// Malformed UTF-8 keeps the raw text.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), |decoded| decoded.into_owned())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
