use crate::backend::BookingBackend;
use crate::errors::{BookingError, StoreError};
use crate::query::{filter_bookings, is_conflict, taken_slots};
use crate::types::{Booking, BookingRequest};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Workflow layer the presentation glue calls into. Serializes all store
/// mutations behind one process-wide lock so that check-then-insert is
/// atomic per `(date, location, lab, timeslot)` key and a concurrent
/// insert/delete pair cannot lose an update. Multi-process deployments need
/// a storage-level lock instead.
#[derive(Debug, Clone)]
pub struct BookingManager<B> {
    backend: B,
    write_lock: Arc<Mutex<()>>,
}

/// Occupancy of one date at one location: the matching bookings and the
/// `(lab, timeslot)` pairs they occupy.
#[derive(Debug, Clone)]
pub struct Availability {
    pub bookings: Vec<Booking>,
    pub taken: BTreeSet<(String, String)>,
}

impl<B: BookingBackend> BookingManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Books the requested slot, or reports a conflict without writing
    /// anything. The conflict check and the insert happen under one lock.
    pub fn book(&self, request: BookingRequest) -> Result<String, BookingError> {
        let _guard = self.write_lock.lock().unwrap();
        let bookings = self.backend.bookings()?;
        if is_conflict(
            &bookings,
            &request.date,
            &request.location,
            &request.lab,
            &request.timeslot,
        ) {
            tracing::info!(
                lab = %request.lab,
                location = %request.location,
                date = %request.date,
                timeslot = %request.timeslot,
                "booking rejected, slot already taken"
            );
            return Err(BookingError::Conflict);
        }
        let id = self.backend.insert(request)?;
        tracing::info!(%id, "booking confirmed");
        Ok(id)
    }

    pub fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.backend.bookings()
    }

    pub fn availability(&self, date: &str, location: &str) -> Result<Availability, StoreError> {
        let bookings = self.backend.bookings()?;
        let matching = filter_bookings(&bookings, Some(date), Some(location));
        let taken = taken_slots(&matching);
        Ok(Availability {
            bookings: matching,
            taken,
        })
    }

    /// Returns whether a record was removed. A missing id is a normal
    /// negative result, not an error.
    pub fn remove_booking(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let removed = self.backend.delete_by_id(id)?;
        Ok(removed == 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::csv_store::CsvStore;
    use tempfile::TempDir;

    fn test_manager() -> (TempDir, BookingManager<CsvStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("bookings.csv"));
        (dir, BookingManager::new(store))
    }

    fn request(name: &str, lab: &str, location: &str, date: &str, timeslot: &str) -> BookingRequest {
        BookingRequest {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            lab: lab.into(),
            location: location.into(),
            date: date.into(),
            timeslot: timeslot.into(),
            purpose: String::new(),
        }
    }

    #[test]
    fn booking_a_taken_slot_is_rejected_and_not_stored() {
        let (_dir, manager) = test_manager();

        let id = manager
            .book(request("Stefan", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();
        assert_eq!(id, "1");

        // Same (lab, location, date, timeslot), different requester.
        let result = manager.book(request("Peter", "CS018", "Pune", "2024-01-10", "09:00-11:00"));
        assert!(matches!(result, Err(BookingError::Conflict)));

        let bookings = manager.bookings().unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].name, "Stefan");
    }

    #[test]
    fn same_slot_at_the_other_location_is_not_a_conflict() {
        let (_dir, manager) = test_manager();
        manager
            .book(request("Stefan", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();
        manager
            .book(request("Peter", "CS018", "Bangalore", "2024-01-10", "09:00-11:00"))
            .unwrap();
        assert_eq!(manager.bookings().unwrap().len(), 2);
    }

    #[test]
    fn availability_reports_taken_pairs_for_date_and_location() {
        let (_dir, manager) = test_manager();
        manager
            .book(request("Stefan", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();
        manager
            .book(request("Peter", "AI201", "Pune", "2024-01-10", "11:30-13:30"))
            .unwrap();
        manager
            .book(request("Maria", "CS018", "Pune", "2024-01-11", "09:00-11:00"))
            .unwrap();
        manager
            .book(request("Anna", "CS018", "Bangalore", "2024-01-10", "14:00-16:00"))
            .unwrap();

        let availability = manager.availability("2024-01-10", "Pune").unwrap();
        assert_eq!(availability.bookings.len(), 2);
        assert_eq!(availability.taken.len(), 2);
        assert!(availability
            .taken
            .contains(&("CS018".to_string(), "09:00-11:00".to_string())));
        assert!(availability
            .taken
            .contains(&("AI201".to_string(), "11:30-13:30".to_string())));
    }

    #[test]
    fn remove_booking_reports_whether_a_record_was_removed() {
        let (_dir, manager) = test_manager();
        let id = manager
            .book(request("Stefan", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();

        assert!(manager.remove_booking(&id).unwrap());
        assert!(!manager.remove_booking(&id).unwrap());
        assert_eq!(manager.bookings().unwrap().len(), 0);
    }

    #[test]
    fn freed_slot_can_be_booked_again() {
        let (_dir, manager) = test_manager();
        let id = manager
            .book(request("Stefan", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();
        manager.remove_booking(&id).unwrap();

        manager
            .book(request("Peter", "CS018", "Pune", "2024-01-10", "09:00-11:00"))
            .unwrap();
        assert_eq!(manager.bookings().unwrap().len(), 1);
    }
}
