use crate::backend::BookingBackend;
use crate::errors::StoreError;
use crate::types::{Booking, BookingRequest};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_insert: AtomicU64,
    pub calls_to_delete_by_id: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_bookings: AtomicU64::default(),
            calls_to_insert: AtomicU64::default(),
            calls_to_delete_by_id: AtomicU64::default(),
            bookings: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    fn check_success(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StoreError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::Other,
                "supposed to fail",
            ))),
        }
    }
}

impl BookingBackend for MockBookingBackend {
    fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.check_success()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn insert(&self, request: BookingRequest) -> Result<String, StoreError> {
        self.0.calls_to_insert.fetch_add(1, Ordering::SeqCst);
        self.check_success()?;
        let mut bookings = self.0.bookings.lock().unwrap();
        let id = (bookings.len() + 1).to_string();
        bookings.push(Booking {
            id: id.clone(),
            name: request.name,
            email: request.email,
            lab: request.lab,
            location: request.location,
            date: request.date,
            timeslot: request.timeslot,
            purpose: request.purpose,
            created_at: "2024-01-01 10:00:00".into(),
        });
        Ok(id)
    }

    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        self.0.calls_to_delete_by_id.fetch_add(1, Ordering::SeqCst);
        self.check_success()?;
        let mut bookings = self.0.bookings.lock().unwrap();
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        Ok(before - bookings.len())
    }
}
