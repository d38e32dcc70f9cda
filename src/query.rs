use crate::types::Booking;
use std::collections::BTreeSet;

/// True iff any record matches all four fields exactly. Comparison is
/// case-sensitive string equality, no normalization of dates or whitespace.
pub fn is_conflict(
    bookings: &[Booking],
    date: &str,
    location: &str,
    lab: &str,
    timeslot: &str,
) -> bool {
    bookings.iter().any(|booking| {
        booking.date == date
            && booking.location == location
            && booking.lab == lab
            && booking.timeslot == timeslot
    })
}

/// Applies the provided equality filters conjunctively; omitted filters pass
/// everything through. Storage order is preserved.
pub fn filter_bookings(
    bookings: &[Booking],
    date: Option<&str>,
    location: Option<&str>,
) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|booking| date.map_or(true, |date| booking.date == date))
        .filter(|booking| location.map_or(true, |location| booking.location == location))
        .cloned()
        .collect()
}

/// The `(lab, timeslot)` pairs occupied in the given record set. Callers
/// filter by date and location first; the complement is "available".
pub fn taken_slots(bookings: &[Booking]) -> BTreeSet<(String, String)> {
    bookings
        .iter()
        .map(|booking| (booking.lab.clone(), booking.timeslot.clone()))
        .collect()
}
