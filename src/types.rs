use serde::{Deserialize, Serialize};

/// A confirmed reservation of one lab at one location for one date and
/// timeslot.
///
/// Field order matters: it is the column order of the persisted CSV file and
/// of the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub lab: String,
    pub location: String,
    pub date: String,
    pub timeslot: String,
    #[serde(default)]
    pub purpose: String,
    pub created_at: String,
}

/// What a caller submits to create a booking. `id` and `created_at` are
/// assigned by the store, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub lab: String,
    pub location: String,
    pub date: String,
    pub timeslot: String,
    #[serde(default)]
    pub purpose: String,
}
