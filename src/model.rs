// Canonical reservation model shared by every partner strategy
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::fields;

// Invariant, locale-independent timestamp layout (`yyyy-MM-ddTHH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Property names a canonical payload must carry, compared case-insensitively.
pub const REQUIRED_CANONICAL_FIELDS: [&str; 5] =
    ["reservationId", "guestName", "checkIn", "checkOut", "rooms"];

const RESERVATION_FIELDS: [&str; 9] = [
    "reservationId",
    "guestName",
    "checkIn",
    "checkOut",
    "rooms",
    "numberOfGuests",
    "totalAmount",
    "specialRequests",
    "bookingSource",
];

const ROOM_FIELDS: [&str; 6] = [
    "roomNumber",
    "roomType",
    "numberOfBeds",
    "bedType",
    "isSmokingAllowed",
    "price",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: String,
    pub guest_name: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub check_in: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    pub check_out: NaiveDateTime,
    pub rooms: Vec<Room>,
    pub number_of_guests: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub special_requests: Option<String>,
    pub booking_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Room {
    #[serde(deserialize_with = "scalar_as_string")]
    pub room_number: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub room_type: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub number_of_beds: u32,
    #[serde(deserialize_with = "scalar_as_string")]
    pub bed_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_smoking_allowed: bool,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "null_as_default"
    )]
    pub price: Decimal,
}

impl Reservation {
    // Property names are matched case-insensitively
    pub fn from_canonical_json(object: &Map<String, Value>) -> Result<Self, MappingError> {
        let data = canonical_keys(object, &RESERVATION_FIELDS);

        Ok(Reservation {
            reservation_id: fields::optional_string(&data, "reservationId")?.unwrap_or_default(),
            guest_name: fields::optional_string(&data, "guestName")?.unwrap_or_default(),
            check_in: fields::timestamp(&data, "checkIn")?,
            check_out: fields::timestamp(&data, "checkOut")?,
            rooms: fields::rooms(&data, "rooms")?,
            number_of_guests: fields::count(&data, "numberOfGuests")?,
            total_amount: fields::optional_decimal(&data, "totalAmount")?,
            special_requests: fields::optional_string(&data, "specialRequests")?,
            booking_source: fields::optional_string(&data, "bookingSource")?.unwrap_or_default(),
        })
    }
}

impl Room {
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(object) => {
                serde_json::from_value(Value::Object(canonical_keys(object, &ROOM_FIELDS)))
            }
            other => serde_json::from_value(other.clone()),
        }
    }
}

pub fn is_canonical_shape(object: &Map<String, Value>) -> bool {
    REQUIRED_CANONICAL_FIELDS
        .iter()
        .all(|required| object.keys().any(|key| key.eq_ignore_ascii_case(required)))
}

// Parses a timestamp with the invariant parser. Accepted layouts, tried in order:
// ISO date-time with optional fraction (`T` or space separator), RFC 3339 with an
// offset (normalized to UTC), and a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Room text properties: numbers and booleans are taken as their text, null as empty
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Ok(scalar.to_string()),
        _ => Err(de::Error::custom("expected a string")),
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(0),
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| de::Error::custom("expected a non-negative integer"))
}

// Renames properties that match a known name case-insensitively to that name.
// When two properties collapse onto the same name the first one seen is kept.
fn canonical_keys(object: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    let mut normalized = Map::new();
    for (key, value) in object {
        let name = known
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(key))
            .map_or_else(|| key.clone(), |candidate| candidate.to_string());
        normalized.entry(name).or_insert_with(|| value.clone());
    }
    normalized
}
