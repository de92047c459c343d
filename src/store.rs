use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::{Booking, PendingBooking};

#[derive(Debug, Error)]
#[error("range {start_minute}..{end_minute} overlaps an existing booking in room {room_id}")]
pub struct OverlapError {
    pub room_id: String,
    pub start_minute: u16,
    pub end_minute: u16,
}

/// In-memory booking collection. Bookings are only ever appended; there is
/// no update or delete.
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new(seed: Vec<Booking>) -> Self {
        Self { bookings: seed }
    }

    pub fn bookings_for_date(&self, date: NaiveDate) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.date == date).collect()
    }

    pub fn bookings_for_room(&self, room_id: &str, date: NaiveDate) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.room_id == room_id && b.date == date)
            .collect()
    }

    /// Append a confirmed booking, assigning its id. Ranges that overlap an
    /// existing booking for the same room and day are refused.
    pub fn append(
        &mut self,
        pending: PendingBooking,
        title: String,
        organizer: String,
    ) -> Result<Booking, OverlapError> {
        let taken = self.bookings.iter().any(|b| {
            b.room_id == pending.room_id
                && b.date == pending.date
                && b.overlaps_range(pending.start_minute, pending.end_minute)
        });
        if taken {
            return Err(OverlapError {
                room_id: pending.room_id,
                start_minute: pending.start_minute,
                end_minute: pending.end_minute,
            });
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            room_id: pending.room_id,
            date: pending.date,
            start_minute: pending.start_minute,
            end_minute: pending.end_minute,
            title,
            organizer,
        };
        tracing::info!(
            "Booked {} in {} at {}..{}",
            booking.title,
            booking.room_id,
            booking.start_minute,
            booking.end_minute
        );
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn pending(room_id: &str, start_minute: u16, end_minute: u16) -> PendingBooking {
        PendingBooking {
            room_id: room_id.into(),
            date: date(),
            start_minute,
            end_minute,
        }
    }

    #[test]
    fn append_assigns_unique_ids() {
        let mut store = BookingStore::new(Vec::new());
        let a = store
            .append(pending("h1", 540, 570), "A".into(), "X".into())
            .unwrap();
        let b = store
            .append(pending("h1", 570, 600), "B".into(), "Y".into())
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn append_refuses_overlapping_ranges() {
        let mut store = BookingStore::new(Vec::new());
        store
            .append(pending("h1", 570, 660), "A".into(), "X".into())
            .unwrap();

        assert!(store
            .append(pending("h1", 600, 630), "B".into(), "Y".into())
            .is_err());
        assert!(store
            .append(pending("h1", 540, 580), "B".into(), "Y".into())
            .is_err());
        assert_eq!(store.len(), 1, "failed append must leave the store unchanged");

        // Touching ranges and other rooms are fine.
        assert!(store
            .append(pending("h1", 660, 690), "B".into(), "Y".into())
            .is_ok());
        assert!(store
            .append(pending("h2", 600, 630), "B".into(), "Y".into())
            .is_ok());
    }

    #[test]
    fn stored_bookings_never_overlap_per_room_and_date() {
        let mut store = BookingStore::new(Vec::new());
        for (start, end) in [(540, 600), (570, 630), (600, 660), (615, 700), (660, 720)] {
            let _ = store.append(pending("h1", start, end), "T".into(), "O".into());
        }
        let day = store.bookings_for_room("h1", date());
        for a in &day {
            for b in &day {
                if a.id != b.id {
                    assert!(a.end_minute <= b.start_minute || b.end_minute <= a.start_minute);
                }
            }
        }
    }

    #[test]
    fn listing_filters_by_room_and_date() {
        let mut store = BookingStore::new(Vec::new());
        store
            .append(pending("h1", 540, 570), "A".into(), "X".into())
            .unwrap();
        store
            .append(pending("h2", 540, 570), "B".into(), "Y".into())
            .unwrap();
        let other_day = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
        store
            .append(
                PendingBooking {
                    room_id: "h1".into(),
                    date: other_day,
                    start_minute: 540,
                    end_minute: 570,
                },
                "C".into(),
                "Z".into(),
            )
            .unwrap();

        assert_eq!(store.bookings_for_room("h1", date()).len(), 1);
        assert_eq!(store.bookings_for_date(date()).len(), 2);
        assert_eq!(store.bookings_for_room("h1", other_day).len(), 1);
    }
}
