// Google reservation format
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{partner_rooms, PartnerRoom};
use crate::error::MappingError;
use crate::fields;
use crate::model::{serialize_timestamp, Reservation};
use crate::strategy::MappingStrategy;

const PARTNER: &str = "Google";

#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMappingStrategy;

impl GoogleMappingStrategy {
    pub const NAME: &'static str = "GoogleMappingStrategy";
    pub const BOOKING_SOURCE: &'static str = "Google.com";
    pub const EXPECTED_SOURCE_TYPE: &'static str = "Google.Reservation";
    pub const EXPECTED_TARGET_TYPE: &'static str = "Google.Reservation";

    pub fn shared() -> Arc<dyn MappingStrategy> {
        Arc::new(Self)
    }
}

// Google labels are matched ignoring ASCII case
fn validate_source_type(source_type: &str) -> Result<(), MappingError> {
    if !source_type.eq_ignore_ascii_case(GoogleMappingStrategy::EXPECTED_SOURCE_TYPE) {
        return Err(MappingError::InvalidSourceType {
            partner: PARTNER,
            expected: GoogleMappingStrategy::EXPECTED_SOURCE_TYPE,
            found: source_type.to_string(),
        });
    }
    Ok(())
}

fn validate_target_type(target_type: &str) -> Result<(), MappingError> {
    if !target_type.eq_ignore_ascii_case(GoogleMappingStrategy::EXPECTED_TARGET_TYPE) {
        return Err(MappingError::InvalidTargetType {
            partner: PARTNER,
            expected: GoogleMappingStrategy::EXPECTED_TARGET_TYPE,
            found: target_type.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct GoogleReservation<'a> {
    reservation_id: &'a str,
    guest_name: &'a str,
    #[serde(serialize_with = "serialize_timestamp")]
    check_in_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    check_out_date: NaiveDateTime,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    total_amount: Decimal,
    number_of_guests: u32,
    special_requests: Option<&'a str>,
    booking_source: &'static str,
    rooms: Vec<PartnerRoom<'a>>,
}

impl MappingStrategy for GoogleMappingStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn to_internal(
        &self,
        data: &Map<String, Value>,
        source_type: &str,
    ) -> Result<Reservation, MappingError> {
        validate_source_type(source_type)?;

        Ok(Reservation {
            reservation_id: fields::required_string(data, "reservation_id")?,
            guest_name: fields::required_string(data, "guest_name")?,
            check_in: fields::timestamp(data, "check_in_date")?,
            check_out: fields::timestamp(data, "check_out_date")?,
            rooms: fields::rooms(data, "rooms")?,
            number_of_guests: fields::count(data, "number_of_guests")?,
            total_amount: fields::decimal(data, "total_amount")?,
            special_requests: fields::optional_string(data, "special_requests")?,
            booking_source: Self::BOOKING_SOURCE.to_string(),
        })
    }

    fn to_external(
        &self,
        reservation: &Reservation,
        target_type: &str,
    ) -> Result<Value, MappingError> {
        validate_target_type(target_type)?;

        if reservation.reservation_id.is_empty() {
            return Err(MappingError::MissingRequiredField("reservationId".to_string()));
        }
        if reservation.guest_name.is_empty() {
            return Err(MappingError::MissingRequiredField("guestName".to_string()));
        }

        serde_json::to_value(GoogleReservation {
            reservation_id: &reservation.reservation_id,
            guest_name: &reservation.guest_name,
            check_in_date: reservation.check_in,
            check_out_date: reservation.check_out,
            total_amount: reservation.total_amount,
            number_of_guests: reservation.number_of_guests,
            special_requests: reservation.special_requests.as_deref(),
            booking_source: Self::BOOKING_SOURCE,
            rooms: partner_rooms(&reservation.rooms),
        })
        .map_err(|e| MappingError::Conversion(e.to_string()))
    }
}
