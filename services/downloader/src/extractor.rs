//! Video metadata extraction from TikTok page HTML
//!
//! Pages embed a rehydration payload (a JSON blob inside a `<script>` element)
//! that carries the video record. Extraction first tries to locate and walk
//! that payload; when the script is missing, unparseable, or exposes no video,
//! it falls back to pattern matching over the raw HTML, which only recovers
//! the play address, the cover and the description.

use regex::{Captures, Regex};
use scraper::{Html, Selector};
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::VideoMetadata;

/// Text identifying the script that holds the rehydration payload
pub const REHYDRATION_MARKER: &str = "__UNIVERSAL_DATA_FOR_REHYDRATION__";

/// Why the rehydration script could not be turned into JSON
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("no JSON object found in rehydration script")]
    MissingObject,

    #[error("invalid rehydration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Location of the video record inside a route of the rehydration payload
///
/// Page variants expose the same record under different keys, so each route is
/// resolved against both shapes, `videoData` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VideoDataShape<'a> {
    /// `routes[key].videoData`
    VideoData(&'a Value),
    /// `routes[key].itemInfo.itemStruct`
    ItemStruct(&'a Value),
}

impl<'a> VideoDataShape<'a> {
    /// Resolve the video record of a single route, if it has one
    ///
    /// Any non-null value claims the route, even one that is not an object;
    /// such a record simply yields default metadata.
    pub fn resolve(route: &'a Value) -> Option<Self> {
        if let Some(video_data) = route.get("videoData").filter(|v| !v.is_null()) {
            return Some(Self::VideoData(video_data));
        }

        route
            .get("itemInfo")
            .and_then(|info| info.get("itemStruct"))
            .filter(|v| !v.is_null())
            .map(Self::ItemStruct)
    }

    fn item(self) -> &'a Value {
        match self {
            Self::VideoData(item) | Self::ItemStruct(item) => item,
        }
    }

    /// Map the record into metadata, defaulting every missing leaf
    pub fn to_metadata(self) -> VideoMetadata {
        let item = self.item();
        let video = item.get("video");
        let video_field = |key: &str| video.and_then(|v| v.get(key));

        VideoMetadata {
            id: text_field(item.get("id")),
            description: text_field(item.get("desc")),
            created_at: text_field(item.get("createTime")),
            play_url: text_field(video_field("playAddr")),
            download_url: text_field(video_field("downloadAddr")),
            cover_url: text_field(video_field("cover")),
            duration_seconds: seconds_field(video_field("duration")),
        }
    }
}

/// Extract video metadata from a page
///
/// Returns `None` when neither the rehydration payload nor the raw-HTML
/// patterns yield a play address.
pub fn extract_video_metadata(html: &str) -> Option<VideoMetadata> {
    if let Some(metadata) = extract_from_rehydration(html) {
        debug!("Video metadata extracted from rehydration payload");
        return Some(metadata);
    }

    let metadata = extract_from_patterns(html);
    if metadata.is_some() {
        debug!("Video metadata extracted with pattern fallback");
    }
    metadata
}

/// Primary path: walk the rehydration payload
pub fn extract_from_rehydration(html: &str) -> Option<VideoMetadata> {
    let script = find_rehydration_script(html)?;

    let payload = match parse_payload(&script) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Error parsing rehydration payload: {}", e);
            return None;
        }
    };

    let routes = find_routes(&payload)?;

    // First route exposing a video wins
    routes.iter().find_map(|(key, route)| {
        VideoDataShape::resolve(route).map(|shape| {
            debug!("Video record found in route {}", key);
            shape.to_metadata()
        })
    })
}

/// Fallback path: pattern matching over the raw HTML
pub fn extract_from_patterns(html: &str) -> Option<VideoMetadata> {
    let play_url = first_capture(play_addr_regex(), html).map(unescape_ampersands)?;

    let cover_url = first_capture(cover_regex(), html)
        .map(unescape_ampersands)
        .unwrap_or_default();

    let description = first_capture(desc_regex(), html)
        .map(decode_unicode_escapes)
        .unwrap_or_default();

    Some(VideoMetadata {
        description,
        download_url: play_url.clone(),
        play_url,
        cover_url,
        ..VideoMetadata::default()
    })
}

/// Text of the first `<script>` element containing the rehydration marker
fn find_rehydration_script(html: &str) -> Option<String> {
    static SCRIPT_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SCRIPT_SELECTOR
        .get_or_init(|| Selector::parse("script").expect("Failed to parse script selector"));

    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|script| script.text().collect::<String>())
        .find(|text| text.contains(REHYDRATION_MARKER))
}

/// Parse the JSON object spanning the first `{` to the last `}` of a script
///
/// Anything around the object (an assignment, a trailing semicolon) is ignored.
pub fn parse_payload(script: &str) -> Result<Value, PayloadError> {
    let start = script.find('{').ok_or(PayloadError::MissingObject)?;
    let end = script.rfind('}').ok_or(PayloadError::MissingObject)?;
    if end < start {
        return Err(PayloadError::MissingObject);
    }

    Ok(serde_json::from_str(&script[start..=end])?)
}

/// The non-empty `routes` mapping, nested under the marker key or at the root
fn find_routes(payload: &Value) -> Option<&Map<String, Value>> {
    payload
        .get(REHYDRATION_MARKER)
        .and_then(|scope| scope.get("routes"))
        .or_else(|| payload.get("routes"))
        .and_then(Value::as_object)
        .filter(|routes| !routes.is_empty())
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric durations pass through untouched; numeric strings are parsed
fn seconds_field(value: Option<&Value>) -> Number {
    match value {
        Some(Value::Number(n)) => n.clone(),
        Some(Value::String(s)) => parse_number(s.trim()).unwrap_or_else(|| Number::from(0u64)),
        _ => Number::from(0u64),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    text.parse::<u64>()
        .map(Number::from)
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(Number::from_f64))
}

fn first_capture<'h>(regex: &Regex, html: &'h str) -> Option<&'h str> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn play_addr_regex() -> &'static Regex {
    static PLAY_ADDR_REGEX: OnceLock<Regex> = OnceLock::new();
    PLAY_ADDR_REGEX.get_or_init(|| {
        Regex::new(r#""playAddr":"([^"]+)""#).expect("Failed to compile playAddr regex")
    })
}

fn cover_regex() -> &'static Regex {
    static COVER_REGEX: OnceLock<Regex> = OnceLock::new();
    COVER_REGEX
        .get_or_init(|| Regex::new(r#""cover":"([^"]+)""#).expect("Failed to compile cover regex"))
}

fn desc_regex() -> &'static Regex {
    static DESC_REGEX: OnceLock<Regex> = OnceLock::new();
    DESC_REGEX
        .get_or_init(|| Regex::new(r#""desc":"([^"]+)""#).expect("Failed to compile desc regex"))
}

/// Replace literal `\u0026` sequences with `&`
pub fn unescape_ampersands(raw: &str) -> String {
    raw.replace(r"\u0026", "&")
}

/// Decode literal `\uXXXX` escape sequences into the characters they encode
///
/// Consecutive escapes are decoded together so surrogate pairs become a single
/// character; unpaired surrogates become U+FFFD.
pub fn decode_unicode_escapes(raw: &str) -> String {
    static ESCAPE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ESCAPE_RUN_REGEX.get_or_init(|| {
        Regex::new(r"(?:\\u[0-9a-fA-F]{4})+").expect("Failed to compile unicode escape regex")
    });

    regex
        .replace_all(raw, |caps: &Captures| {
            let units = caps[0]
                .split(r"\u")
                .filter(|hex| !hex.is_empty())
                .filter_map(|hex| u16::from_str_radix(hex, 16).ok());

            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect::<String>()
        })
        .into_owned()
}
