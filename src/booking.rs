use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    // Accent color for the room label, by name ("blue", "rose", ...)
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub room_id: String,
    pub date: NaiveDate,
    pub start_minute: u16,
    pub end_minute: u16,
    pub title: String,
    pub organizer: String,
}

impl Booking {
    /// Half-open range overlap; the same test gates both the clamp and the
    /// store append.
    pub fn overlaps_range(&self, start_minute: u16, end_minute: u16) -> bool {
        self.start_minute < end_minute && self.end_minute > start_minute
    }

    pub fn covers_minute(&self, minute: u16) -> bool {
        minute >= self.start_minute && minute < self.end_minute
    }
}

/// Live drag highlight, inclusive slot indices. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub room_id: String,
    pub start_slot: u16,
    pub end_slot: u16,
}

/// A finished drag awaiting title/organizer confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    pub room_id: String,
    pub date: NaiveDate,
    pub start_minute: u16,
    pub end_minute: u16,
}
