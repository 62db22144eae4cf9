// Booking.com reservation format
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

const PARTNER: &str = "Booking";

#[derive(Debug, Clone, Copy, Default)]
pub struct BookingComMappingStrategy;

impl BookingComMappingStrategy {
    pub const NAME: &'static str = "BookingComMappingStrategy";
    pub const BOOKING_SOURCE: &'static str = "Booking.com";
    pub const EXPECTED_SOURCE_TYPE: &'static str = "Booking.Reservation";
    pub const EXPECTED_TARGET_TYPE: &'static str = "Booking.Reservation";

    pub fn shared() -> Arc<dyn MappingStrategy> {
        Arc::new(Self)
    }

    // Booking.com labels are compared exactly
    fn validate_source_type(source_type: &str) -> Result<(), MappingError> {
        if source_type != Self::EXPECTED_SOURCE_TYPE {
            return Err(MappingError::InvalidSourceType {
                partner: PARTNER,
                expected: Self::EXPECTED_SOURCE_TYPE,
                found: source_type.to_string(),
            });
        }
        Ok(())
    }

    fn validate_target_type(target_type: &str) -> Result<(), MappingError> {
        if target_type != Self::EXPECTED_TARGET_TYPE {
            return Err(MappingError::InvalidTargetType {
                partner: PARTNER,
                expected: Self::EXPECTED_TARGET_TYPE,
                found: target_type.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct BookingComReservation<'a> {
    booking_id: &'a str,
    customer_name: &'a str,
    #[serde(serialize_with = "serialize_timestamp")]
    booking_start_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    booking_end_date: NaiveDateTime,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    booking_amount_due: Decimal,
    booking_guest_count: u32,
    booking_notes: Option<&'a str>,
    booking_source: &'static str,
    booking_room_details: Vec<PartnerRoom<'a>>,
}

impl MappingStrategy for BookingComMappingStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn to_internal(
        &self,
        data: &Map<String, Value>,
        source_type: &str,
    ) -> Result<Reservation, MappingError> {
        Self::validate_source_type(source_type)?;

        Ok(Reservation {
            reservation_id: fields::required_string(data, "booking_id")?,
            guest_name: fields::required_string(data, "customer_name")?,
            check_in: fields::timestamp(data, "booking_start_date")?,
            check_out: fields::timestamp(data, "booking_end_date")?,
            rooms: fields::rooms(data, "booking_room_details")?,
            number_of_guests: fields::count(data, "booking_guest_count")?,
            total_amount: fields::decimal(data, "booking_amount_due")?,
            special_requests: fields::optional_string(data, "booking_notes")?,
            booking_source: Self::BOOKING_SOURCE.to_string(),
        })
    }

    fn to_external(
        &self,
        reservation: &Reservation,
        target_type: &str,
    ) -> Result<Value, MappingError> {
        Self::validate_target_type(target_type)?;

        if reservation.reservation_id.is_empty() {
            return Err(MappingError::MissingRequiredField("reservationId".to_string()));
        }
        if reservation.guest_name.is_empty() {
            return Err(MappingError::MissingRequiredField("guestName".to_string()));
        }

        let external = BookingComReservation {
            booking_id: &reservation.reservation_id,
            customer_name: &reservation.guest_name,
            booking_start_date: reservation.check_in,
            booking_end_date: reservation.check_out,
            booking_amount_due: reservation.total_amount,
            booking_guest_count: reservation.number_of_guests,
            booking_notes: reservation.special_requests.as_deref(),
            booking_source: Self::BOOKING_SOURCE,
            booking_room_details: partner_rooms(&reservation.rooms),
        };

        serde_json::to_value(external).map_err(|e| MappingError::Conversion(e.to_string()))
    }
}
