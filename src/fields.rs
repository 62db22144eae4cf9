// Per-field extraction helpers used by the partner strategies and the canonical decoder.
// Every failure names the key that was being read.
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::model::{parse_timestamp, Room};

// A string that must be present and non-empty. Non-string scalars are taken as text.
pub fn required_string(data: &Map<String, Value>, key: &str) -> Result<String, MappingError> {
    match data.get(key) {
        None | Some(Value::Null) => Err(MappingError::MissingRequiredField(key.to_string())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            Err(MappingError::invalid_field(key, "expected a string"))
        }
        Some(value) => match scalar_text(value) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(MappingError::MissingRequiredField(key.to_string())),
        },
    }
}

// Missing or null reads as None; arrays and objects are rejected
pub fn optional_string(data: &Map<String, Value>, key: &str) -> Result<Option<String>, MappingError> {
    match data.get(key) {
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            Err(MappingError::invalid_field(key, "expected a string"))
        }
        value => Ok(value.and_then(scalar_text)),
    }
}

pub fn timestamp(data: &Map<String, Value>, key: &str) -> Result<NaiveDateTime, MappingError> {
    data.get(key)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .ok_or_else(|| MappingError::InvalidDate(key.to_string()))
}

pub fn decimal(data: &Map<String, Value>, key: &str) -> Result<Decimal, MappingError> {
    data.get(key)
        .and_then(parse_decimal)
        .ok_or_else(|| MappingError::InvalidDecimal(key.to_string()))
}

pub fn optional_decimal(data: &Map<String, Value>, key: &str) -> Result<Decimal, MappingError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(_) => decimal(data, key),
    }
}

// A non-negative integer count; missing or null reads as zero.
pub fn count(data: &Map<String, Value>, key: &str) -> Result<u32, MappingError> {
    let parsed = match data.get(key) {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        Some(_) => None,
    };
    parsed.ok_or_else(|| MappingError::invalid_field(key, "expected a non-negative integer"))
}

// Structurally decodes an embedded array of room objects. Absent or null is empty.
pub fn rooms(data: &Map<String, Value>, key: &str) -> Result<Vec<Room>, MappingError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Room::from_json(item).map_err(|e| MappingError::invalid_field(key, e)))
            .collect(),
        Some(_) => Err(MappingError::invalid_field(key, "expected an array of rooms")),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test_case(json!({"id": "A1"}), Ok("A1"); "string")]
    #[test_case(json!({"id": 42}), Ok("42"); "number as text")]
    #[test_case(json!({}), Err("id"); "missing")]
    #[test_case(json!({"id": null}), Err("id"); "null")]
    #[test_case(json!({"id": ""}), Err("id"); "empty")]
    fn test_required_string(input: Value, expected: Result<&str, &str>) {
        let result = required_string(&data(input), "id");
        match expected {
            Ok(text) => assert_eq!(result.unwrap(), text),
            Err(field) => {
                let err = result.unwrap_err();
                assert!(matches!(err, MappingError::MissingRequiredField(_)));
                assert_eq!(err.field(), Some(field));
            }
        }
    }

    #[test]
    fn test_required_string_rejects_structures() {
        let err = required_string(&data(json!({"id": ["A1"]})), "id").unwrap_err();
        assert!(matches!(err, MappingError::InvalidField { .. }));
    }

    #[test_case(json!({}), Ok(None); "missing")]
    #[test_case(json!({"note": null}), Ok(None); "null")]
    #[test_case(json!({"note": 7}), Ok(Some("7")); "number as text")]
    #[test_case(json!({"note": {"text": "x"}}), Err(()); "object")]
    #[test_case(json!({"note": ["x"]}), Err(()); "array")]
    fn test_optional_string(input: Value, expected: Result<Option<&str>, ()>) {
        let result = optional_string(&data(input), "note");
        match expected {
            Ok(text) => assert_eq!(result.unwrap().as_deref(), text),
            Err(()) => assert_eq!(result.unwrap_err().field(), Some("note")),
        }
    }

    #[test_case(json!({"amount": 100.0}), Some(Decimal::new(100, 0)); "float")]
    #[test_case(json!({"amount": 600.25}), Some(Decimal::new(60025, 2)); "fraction")]
    #[test_case(json!({"amount": 7}), Some(Decimal::new(7, 0)); "integer")]
    #[test_case(json!({"amount": " 12.50 "}), Some(Decimal::new(1250, 2)); "padded string")]
    #[test_case(json!({"amount": "1.5e2"}), Some(Decimal::new(150, 0)); "scientific string")]
    #[test_case(json!({"amount": "12,50"}), None; "comma separator")]
    #[test_case(json!({"amount": true}), None; "boolean")]
    #[test_case(json!({}), None; "missing")]
    fn test_decimal(input: Value, expected: Option<Decimal>) {
        let result = decimal(&data(input), "amount");
        match expected {
            Some(amount) => assert_eq!(result.unwrap(), amount),
            None => assert!(matches!(
                result.unwrap_err(),
                MappingError::InvalidDecimal(ref field) if field == "amount"
            )),
        }
    }

    #[test]
    fn test_optional_decimal_defaults_to_zero() {
        assert_eq!(optional_decimal(&data(json!({})), "amount").unwrap(), Decimal::ZERO);
        assert!(optional_decimal(&data(json!({"amount": "abc"})), "amount").is_err());
    }

    #[test]
    fn test_timestamp_names_field() {
        let err = timestamp(&data(json!({"start": "not-a-date"})), "start").unwrap_err();
        assert_eq!(err.field(), Some("start"));

        let err = timestamp(&data(json!({"start": 20240101})), "start").unwrap_err();
        assert!(matches!(err, MappingError::InvalidDate(_)));
    }

    #[test_case(json!({}), Some(0); "missing")]
    #[test_case(json!({"n": 3}), Some(3); "number")]
    #[test_case(json!({"n": "4"}), Some(4); "string")]
    #[test_case(json!({"n": -1}), None; "negative")]
    #[test_case(json!({"n": 2.5}), None; "fraction")]
    fn test_count(input: Value, expected: Option<u32>) {
        let result = count(&data(input), "n");
        match expected {
            Some(n) => assert_eq!(result.unwrap(), n),
            None => assert_eq!(result.unwrap_err().field(), Some("n")),
        }
    }

    #[test]
    fn test_rooms_decoding() {
        assert!(rooms(&data(json!({})), "rooms").unwrap().is_empty());
        assert!(rooms(&data(json!({"rooms": null})), "rooms").unwrap().is_empty());

        let decoded = rooms(
            &data(json!({"rooms": [
                {"RoomNumber": "101", "NumberOfBeds": 2},
                {"roomNumber": "102", "isSmokingAllowed": true},
                {"RoomNumber": 103, "NumberOfBeds": "2", "Price": "10.5"}
            ]})),
            "rooms",
        )
        .unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].room_number, "101");
        assert_eq!(decoded[0].number_of_beds, 2);
        assert_eq!(decoded[1].room_number, "102");
        assert!(decoded[1].is_smoking_allowed);
        assert_eq!(decoded[2].room_number, "103");
        assert_eq!(decoded[2].number_of_beds, 2);
        assert_eq!(decoded[2].price, Decimal::new(105, 1));

        let err = rooms(&data(json!({"rooms": {"RoomNumber": "101"}})), "rooms").unwrap_err();
        assert_eq!(err.field(), Some("rooms"));

        let err = rooms(&data(json!({"rooms": [{"NumberOfBeds": "many"}]})), "rooms").unwrap_err();
        assert_eq!(err.field(), Some("rooms"));
    }
}
