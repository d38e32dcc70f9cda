use crate::backend::BookingBackend;
use crate::errors::StoreError;
use crate::types::{Booking, BookingRequest};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Column order of the backing file. The first line of the file is always
/// this header.
pub const FIELDNAMES: [&str; 9] = [
    "id",
    "name",
    "email",
    "lab",
    "location",
    "date",
    "timeslot",
    "purpose",
    "created_at",
];

/// Flat-file booking store. One CSV file, header line first, one record per
/// subsequent line, UTF-8. Inserts append; deletes rewrite the whole file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotent: creates the backing file with just the column header if it
    /// does not exist yet. The file handle is scoped and flushed on every
    /// exit path.
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(FIELDNAMES)?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), "created booking storage");
        Ok(())
    }

    fn next_id(bookings: &[Booking]) -> Result<String, StoreError> {
        let mut max_id = 0u64;
        for booking in bookings {
            let id = booking.id.parse::<u64>().map_err(|_| {
                StoreError::Malformed(format!("booking id {:?} is not an integer", booking.id))
            })?;
            max_id = max_id.max(id);
        }
        Ok((max_id + 1).to_string())
    }
}

impl BookingBackend for CsvStore {
    fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.ensure_initialized()?;
        let mut reader = csv::Reader::from_reader(File::open(&self.path)?);
        let mut bookings = Vec::new();
        for record in reader.deserialize() {
            bookings.push(record?);
        }
        Ok(bookings)
    }

    fn insert(&self, request: BookingRequest) -> Result<String, StoreError> {
        let bookings = self.bookings()?;
        let id = Self::next_id(&bookings)?;
        let booking = Booking {
            id: id.clone(),
            name: request.name,
            email: request.email,
            lab: request.lab,
            location: request.location,
            date: request.date,
            timeslot: request.timeslot,
            purpose: request.purpose,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(&booking)?;
        writer.flush()?;
        Ok(id)
    }

    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        let bookings = self.bookings()?;
        let kept: Vec<&Booking> = bookings.iter().filter(|booking| booking.id != id).collect();
        let removed = bookings.len() - kept.len();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(File::create(&self.path)?);
        writer.write_record(FIELDNAMES)?;
        for booking in &kept {
            writer.serialize(booking)?;
        }
        writer.flush()?;
        Ok(removed)
    }
}
