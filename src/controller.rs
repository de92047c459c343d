use chrono::NaiveDate;

use crate::booking::{Booking, PendingBooking, Selection};
use crate::grid::{slot_to_minute, SLOT_MINUTES};
use crate::select::{clamp_drag, slot_occupied};
use crate::store::BookingStore;

/// Gesture phase: `Idle → Selecting → PendingConfirmation → Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting { room_id: String, anchor_slot: u16 },
    PendingConfirmation(PendingBooking),
}

/// Single owner of all mutable booking state: the store, the active day,
/// the gesture phase and the live selection.
pub struct Controller {
    store: BookingStore,
    date: NaiveDate,
    phase: Phase,
    selection: Option<Selection>,
}

impl Controller {
    pub fn new(store: BookingStore, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            phase: Phase::Idle,
            selection: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Switching the day re-filters the board and abandons any gesture.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.cancel();
        self.date = date;
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Pointer down over the grid. Starts a single-slot selection unless the
    /// slot is already booked, in which case the gesture is ignored.
    pub fn start_selection(&mut self, room_id: &str, slot: u16) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        let day = self.store.bookings_for_room(room_id, self.date);
        if slot_occupied(&day, slot) {
            tracing::debug!("Ignored drag start on booked slot {slot} in {room_id}");
            return false;
        }
        self.phase = Phase::Selecting {
            room_id: room_id.to_owned(),
            anchor_slot: slot,
        };
        self.selection = Some(Selection {
            room_id: room_id.to_owned(),
            start_slot: slot,
            end_slot: slot,
        });
        true
    }

    /// Pointer moved to `slot`. Re-clamps against the anchor room's
    /// bookings; an empty clamp clears the highlight.
    pub fn update_selection(&mut self, slot: u16) {
        let Phase::Selecting {
            room_id,
            anchor_slot,
        } = &self.phase
        else {
            return;
        };
        let day = self.store.bookings_for_room(room_id, self.date);
        self.selection =
            clamp_drag(&day, *anchor_slot, slot).map(|(start_slot, end_slot)| Selection {
                room_id: room_id.clone(),
                start_slot,
                end_slot,
            });
    }

    /// Pointer released. A non-empty selection moves to confirmation (the
    /// caller opens the dialog); an empty one falls back to idle.
    pub fn finish_selection(&mut self) -> bool {
        if !matches!(self.phase, Phase::Selecting { .. }) {
            return false;
        }
        match &self.selection {
            Some(sel) => {
                self.phase = Phase::PendingConfirmation(PendingBooking {
                    room_id: sel.room_id.clone(),
                    date: self.date,
                    start_minute: slot_to_minute(sel.start_slot),
                    end_minute: slot_to_minute(sel.end_slot) + SLOT_MINUTES,
                });
                true
            }
            None => {
                self.phase = Phase::Idle;
                false
            }
        }
    }

    pub fn pending(&self) -> Option<&PendingBooking> {
        match &self.phase {
            Phase::PendingConfirmation(pending) => Some(pending),
            _ => None,
        }
    }

    /// Confirm the pending booking. Blank title or organizer (after
    /// trimming) leaves the machine in confirmation; otherwise exactly one
    /// booking is appended and all transient state clears.
    pub fn confirm(&mut self, title: &str, organizer: &str) -> Option<Booking> {
        let Phase::PendingConfirmation(pending) = &self.phase else {
            return None;
        };
        let title = title.trim();
        let organizer = organizer.trim();
        if title.is_empty() || organizer.is_empty() {
            return None;
        }

        let pending = pending.clone();
        let booked = match self
            .store
            .append(pending, title.to_owned(), organizer.to_owned())
        {
            Ok(booking) => {
                tracing::debug!("{} bookings in store", self.store.len());
                Some(booking)
            }
            Err(e) => {
                // Unreachable from the UI path; the clamp already excluded
                // overlapping ranges.
                tracing::error!("Rejected pending booking: {e}");
                None
            }
        };
        self.phase = Phase::Idle;
        self.selection = None;
        booked
    }

    /// Abandon the gesture or the pending booking without touching the
    /// store.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.selection = None;
    }
}
