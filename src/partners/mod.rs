// Partner-specific mapping strategies
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::Room;

mod booking_com;
mod google;

pub use booking_com::BookingComMappingStrategy;
pub use google::GoogleMappingStrategy;

// Room entry as written into partner payloads
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PartnerRoom<'a> {
    pub room_number: &'a str,
    pub room_type: &'a str,
    pub number_of_beds: u32,
    pub bed_type: &'a str,
    pub is_smoking_allowed: bool,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

impl<'a> From<&'a Room> for PartnerRoom<'a> {
    fn from(room: &'a Room) -> Self {
        PartnerRoom {
            room_number: &room.room_number,
            room_type: &room.room_type,
            number_of_beds: room.number_of_beds,
            bed_type: &room.bed_type,
            is_smoking_allowed: room.is_smoking_allowed,
            price: room.price,
        }
    }
}

pub(crate) fn partner_rooms(rooms: &[Room]) -> Vec<PartnerRoom<'_>> {
    rooms.iter().map(PartnerRoom::from).collect()
}
