use crate::errors::StoreError;
use crate::types::{Booking, BookingRequest};

/// Storage seam for the booking dataset. Implementations own the persisted
/// representation; callers only ever receive copies and must not assume they
/// observe live mutations. The backing medium is swappable behind this trait
/// without touching the conflict or filter logic.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    /// Every booking in storage order (append order, modulo deletions).
    fn bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Assigns the next id, stamps `created_at` and appends the record.
    /// Returns the new id. Conflict checking is the caller's responsibility.
    fn insert(&self, request: BookingRequest) -> Result<String, StoreError>;

    /// Removes the record whose id matches exactly, leaving all others and
    /// their ids untouched. Returns how many records were removed (0 or 1).
    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError>;
}
