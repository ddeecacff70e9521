use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Phone numbers
// ---------------------------------------------------------------------------

/// Exact length of a complete phone number.
pub const PHONE_LENGTH: usize = 11;

/// Inline message shown next to a phone field holding a partial number.
pub const PHONE_LENGTH_MESSAGE: &str = "Phone number must be 11 digits";

/// Strip every non-digit character and truncate to [`PHONE_LENGTH`] digits.
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_LENGTH)
        .collect()
}

/// Validity of a (sanitized) phone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCheck {
    Empty,
    /// 1..=10 digits entered so far.
    Partial(usize),
    Complete,
}

impl PhoneCheck {
    pub fn of(value: &str) -> Self {
        match value.chars().count() {
            0 => PhoneCheck::Empty,
            PHONE_LENGTH => PhoneCheck::Complete,
            n => PhoneCheck::Partial(n),
        }
    }

    /// Empty and complete values are valid; a partial number is flagged.
    pub fn is_valid(&self) -> bool {
        !matches!(self, PhoneCheck::Partial(_))
    }

    /// Inline error to display, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PhoneCheck::Partial(_) => Some(PHONE_LENGTH_MESSAGE),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a backend timestamp as local wall-clock time. Accepts RFC 3339
/// (converted to the local zone), `YYYY-MM-DDTHH:MM:SS[.f]`,
/// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Calendar date of a backend timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// Response normalization
// ---------------------------------------------------------------------------

/// Wrapper keys the backend is known to put collections under.
pub const COLLECTION_KEYS: &[&str] = &["data", "bookings", "students", "services", "items"];

/// Extract the raw items of a collection response.
///
/// Accepts a bare array or an object carrying the array under one of
/// [`COLLECTION_KEYS`]. Returns `None` for any other shape.
pub fn collection_items(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => COLLECTION_KEYS.iter().find_map(|key| match map.remove(*key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }),
        _ => None,
    }
}

/// Map every accepted collection shape to one typed list.
///
/// Unknown shapes become an empty list; individual items that fail to
/// deserialize are dropped.
pub fn normalize_collection<T: DeserializeOwned>(value: Value) -> Vec<T> {
    collection_items(value)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Deserialize an identifier that may arrive as a JSON number or string.
pub fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Deserialize an optional text field that may be null, a number or a string.
pub fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_string)
        .unwrap_or_default())
}
