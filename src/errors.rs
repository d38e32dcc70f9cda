use thiserror::Error;

/// Failures surfaced by a booking storage backend. Storage I/O is never
/// retried; an error here is fatal to the calling operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("malformed booking record: {0}")]
    Malformed(String),
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return match err.into_kind() {
                csv::ErrorKind::Io(err) => Self::Unavailable(err),
                _ => Self::Unavailable(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "unknown I/O failure",
                )),
            };
        }
        Self::Malformed(err.to_string())
    }
}

/// Outcome of the booking-creation workflow.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The requested slot is already taken. A normal negative result: no id
    /// is assigned and no record is written.
    #[error("lab and timeslot already booked for this location and date")]
    Conflict,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while rendering an admin export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to render PDF export: {0}")]
    Pdf(#[from] printpdf::Error),
}
