//! Request payloads for the generation endpoints.
//!
//! Clients post a loose bag of well-being metrics. Parsing only coerces types;
//! each endpoint applies its own defaults when it converts the raw payload
//! into its request type.

use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

const UNKNOWN: &str = "Unknown";

/// Error raised while reading a request body.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Request body is empty")]
    Empty,

    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Invalid screen time '{0}'")]
    InvalidScreenTime(String),
}

/// Raw metrics as posted by the client. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WellbeingMetrics {
    #[serde(default, deserialize_with = "lenient_int")]
    pub anxiety_level: Option<i64>,

    #[serde(default, deserialize_with = "lenient_int")]
    pub stress_level: Option<i64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub screen_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_int")]
    pub unlock_count: Option<i64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub mood_description: Option<String>,

    /// Day name to mood, e.g. `{"Monday": "happy"}`, in the order sent.
    #[serde(default)]
    pub weekly_moods: Option<Map<String, Value>>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub most_used_app: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub profession: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub age: Option<String>,
}

impl WellbeingMetrics {
    /// Parse a raw HTTP body.
    pub fn from_body(body: &[u8]) -> Result<Self, PayloadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(PayloadError::Empty);
        }
        match serde_json::from_slice::<Value>(body)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Err(PayloadError::NotAnObject),
        }
    }
}

/// Input for the short tips prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct TipsRequest {
    pub anxiety_level: i64,
    pub stress_level: i64,
    pub screen_time: String,
    pub unlock_count: i64,
    pub mood_description: String,
    pub weekly_moods: Map<String, Value>,
    pub most_used_app: String,
}

impl From<WellbeingMetrics> for TipsRequest {
    fn from(m: WellbeingMetrics) -> Self {
        Self {
            anxiety_level: m.anxiety_level.unwrap_or(5),
            stress_level: m.stress_level.unwrap_or(5),
            screen_time: m.screen_time.unwrap_or_else(|| "240m".to_string()),
            unlock_count: m.unlock_count.unwrap_or(50),
            mood_description: m.mood_description.unwrap_or_default(),
            weekly_moods: m.weekly_moods.unwrap_or_default(),
            most_used_app: m.most_used_app.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// Input for the long-form insights prompt and the demo template.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsRequest {
    pub weekly_moods: Map<String, Value>,
    pub screen_time: String,
    pub unlock_count: String,
    pub most_used_app: String,
    pub mood_description: String,
    pub profession: String,
    pub gender: String,
    pub age: String,
}

impl From<WellbeingMetrics> for InsightsRequest {
    fn from(m: WellbeingMetrics) -> Self {
        let or_unknown = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            weekly_moods: m.weekly_moods.unwrap_or_default(),
            screen_time: or_unknown(m.screen_time),
            unlock_count: or_unknown(m.unlock_count.map(|n| n.to_string())),
            most_used_app: or_unknown(m.most_used_app),
            mood_description: or_unknown(m.mood_description),
            profession: or_unknown(m.profession),
            gender: or_unknown(m.gender),
            age: or_unknown(m.age),
        }
    }
}

/// Input for the custom model prompt. Screen time is normalized to minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTipRequest {
    pub anxiety_level: i64,
    pub stress_level: i64,
    pub screen_time_minutes: u32,
    pub unlock_count: i64,
}

impl TryFrom<WellbeingMetrics> for CustomTipRequest {
    type Error = PayloadError;

    fn try_from(m: WellbeingMetrics) -> Result<Self, Self::Error> {
        let screen_time = m.screen_time.as_deref().unwrap_or("240m");
        Ok(Self {
            anxiety_level: m.anxiety_level.unwrap_or(5),
            stress_level: m.stress_level.unwrap_or(5),
            screen_time_minutes: parse_screen_time_minutes(screen_time)?,
            unlock_count: m.unlock_count.unwrap_or(50),
        })
    }
}

/// Parse a screen time such as `"240"`, `"240m"`, `"4h"` or `"4h 5m"` into minutes.
pub fn parse_screen_time_minutes(raw: &str) -> Result<u32, PayloadError> {
    let invalid = || PayloadError::InvalidScreenTime(raw.to_string());
    let text = raw.trim().to_ascii_lowercase();

    if text.is_empty() {
        return Err(invalid());
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().map_err(|_| invalid());
    }

    let mut total: u32 = 0;
    let mut digits = String::new();
    let mut seen_hours = false;
    let mut seen_minutes = false;

    for c in text.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'm' => {
                let value: u32 = digits.parse().map_err(|_| invalid())?;
                digits.clear();

                let minutes = if c == 'h' {
                    if seen_hours || seen_minutes {
                        return Err(invalid());
                    }
                    seen_hours = true;
                    value.checked_mul(60).ok_or_else(invalid)?
                } else {
                    if seen_minutes {
                        return Err(invalid());
                    }
                    seen_minutes = true;
                    value
                };
                total = total.checked_add(minutes).ok_or_else(invalid)?;
            }
            c if c.is_whitespace() && digits.is_empty() => {}
            _ => return Err(invalid()),
        }
    }

    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(total)
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{}'", s))),
        Some(other) => Err(de::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, got {}",
            other
        ))),
    }
}
