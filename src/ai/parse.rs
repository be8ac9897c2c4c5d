//! Tolerant decoders for free-form model output.
//!
//! Nothing here returns an error: malformed output becomes a
//! [`Decoded::Degraded`] carrying best-effort values and the reason.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_STANCE: &str = "Analysis provided";

#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Ok(T),
    Degraded { value: T, reason: String },
}

impl<T> Decoded<T> {
    fn from_reasons(value: T, reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Decoded::Ok(value)
        } else {
            Decoded::Degraded {
                value,
                reason: reasons.join("; "),
            }
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Decoded::Ok(value) | Decoded::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Decoded::Ok(value) | Decoded::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Decoded::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Decoded::Ok(_) => None,
            Decoded::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// A persona's analysis split into body and trailer fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentResponse {
    pub analysis: String,
    pub stance: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryContent {
    pub pro_points: Vec<String>,
    pub con_points: Vec<String>,
    pub neutral_context: String,
}

/// Well-formed stand-in used when no summary could be recovered.
pub fn degraded_summary() -> SummaryContent {
    SummaryContent {
        pro_points: vec!["Unable to parse pro points".to_string()],
        con_points: vec!["Unable to parse con points".to_string()],
        neutral_context: "Summary generation encountered an issue.".to_string(),
    }
}

fn stance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)STANCE:[ \t]*(.+?)(?:\n|KEY_POINTS:|$)").expect("stance pattern is valid")
    })
}

fn key_points_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)KEY_POINTS:").expect("key points pattern is valid"))
}

/// Split a persona response into analysis body, stance and key points.
pub fn decode_agent_response(text: &str) -> Decoded<AgentResponse> {
    let mut reasons = Vec::new();
    let mut strip: Vec<Range<usize>> = Vec::new();

    let stance = match stance_re().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let value = caps.get(1).map(|m| (m.as_str(), m.end()));
            match value {
                Some((raw, end)) => {
                    let end = if text[end..].starts_with('\n') { end + 1 } else { end };
                    strip.push(whole..end);
                    clean_stance(raw)
                }
                None => None,
            }
        }
        None => None,
    };
    let stance = stance.unwrap_or_else(|| {
        reasons.push("missing STANCE".to_string());
        DEFAULT_STANCE.to_string()
    });

    let key_points = match key_points_re().find(text) {
        None => {
            reasons.push("missing KEY_POINTS".to_string());
            Vec::new()
        }
        Some(label) => {
            let (points, end) = decode_key_points(text, label.end());
            strip.push(label.start()..end);
            match points {
                Ok(points) => points,
                Err(reason) => {
                    warn!("Discarding key points: {}", reason);
                    reasons.push(reason);
                    Vec::new()
                }
            }
        }
    };

    let analysis = remove_ranges(text, strip).trim().to_string();

    Decoded::from_reasons(
        AgentResponse {
            analysis,
            stance,
            key_points,
        },
        reasons,
    )
}

fn clean_stance(raw: &str) -> Option<String> {
    let cleaned = raw.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '"');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parse the JSON array that follows a KEY_POINTS label at `from`. Returns the
/// points (or why there are none) and the byte offset where the trailer ends.
fn decode_key_points(
    text: &str,
    from: usize,
) -> (std::result::Result<Vec<String>, String>, usize) {
    let rest = &text[from..];
    let offset = rest.len() - rest.trim_start_matches(|c: char| c.is_whitespace() || c == '*').len();
    let start = from + offset;
    let line_end = text[from..].find('\n').map(|i| from + i).unwrap_or(text.len());

    if !text[start..].starts_with('[') {
        return (Err("KEY_POINTS is not followed by a JSON array".to_string()), line_end);
    }

    let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Array(items))) => {
            let end = start + stream.byte_offset();
            (Ok(items.into_iter().map(value_to_string).collect()), end)
        }
        Some(Ok(_)) => (Err("KEY_POINTS is not an array".to_string()), line_end),
        Some(Err(e)) => (Err(format!("KEY_POINTS is not valid JSON: {}", e)), line_end),
        None => (Err("KEY_POINTS is empty".to_string()), line_end),
    }
}

/// Pull the pro/con summary out of the first JSON object in the response.
pub fn decode_summary(text: &str) -> Decoded<SummaryContent> {
    let Some(object) = first_json_object(text) else {
        warn!("No JSON object found in summary response");
        return Decoded::Degraded {
            value: degraded_summary(),
            reason: "no JSON object in response".to_string(),
        };
    };

    let mut reasons = Vec::new();
    let mut string_list = |key: &str| match object.get(key) {
        Some(Value::Array(items)) => items.iter().cloned().map(value_to_string).collect(),
        _ => {
            warn!("Summary field {} missing or not an array", key);
            reasons.push(format!("{} missing or not an array", key));
            Vec::new()
        }
    };
    let pro_points = string_list("pro_points");
    let con_points = string_list("con_points");

    let neutral_context = match object.get("neutral_context") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            warn!("Summary field neutral_context missing");
            reasons.push("neutral_context missing".to_string());
            String::new()
        }
    };

    Decoded::from_reasons(
        SummaryContent {
            pro_points,
            con_points,
            neutral_context,
        },
        reasons,
    )
}

/// First top-level JSON object in `text`. Falls back to the widest `{...}`
/// span when the first candidate does not parse on its own.
fn first_json_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    let start = text.find('{')?;

    let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
    if let Some(Ok(Value::Object(map))) = stream.next() {
        return Some(map);
    }

    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn remove_ranges(text: &str, mut ranges: Vec<Range<usize>>) -> String {
    ranges.sort_by_key(|r| r.start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            out.push_str(&text[cursor..range.start]);
        }
        cursor = cursor.max(range.end);
    }
    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }
    out
}
