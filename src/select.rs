//! Drag-selection clamping against a room's existing bookings.

use crate::booking::Booking;
use crate::grid::{minute_to_slot, slot_to_minute, SLOT_MINUTES};

/// Whether a drag may start on `slot` at all.
pub fn slot_occupied(bookings: &[&Booking], slot: u16) -> bool {
    let minute = slot_to_minute(slot);
    bookings.iter().any(|b| b.covers_minute(minute))
}

/// Largest contiguous free run reachable from the anchor toward the pointer,
/// as inclusive slot indices, or `None` when every candidate slot is taken.
///
/// The candidate range `[min, max]` is shrunk once per overlapping booking,
/// in start-time order: a forward drag (anchor ≤ pointer) only lowers the
/// end, a backward drag only raises the start, so the boundary self-corrects
/// while the pointer moves and the result never straddles a booking.
pub fn clamp_drag(bookings: &[&Booking], anchor_slot: u16, current_slot: u16) -> Option<(u16, u16)> {
    let lo = anchor_slot.min(current_slot);
    let hi = anchor_slot.max(current_slot);
    let mut start = slot_to_minute(lo);
    let mut end = slot_to_minute(hi) + SLOT_MINUTES;

    let mut in_order: Vec<&Booking> = bookings.to_vec();
    in_order.sort_by_key(|b| b.start_minute);

    for b in in_order {
        if b.overlaps_range(start, end) {
            if anchor_slot <= current_slot {
                end = end.min(b.start_minute);
            } else {
                start = start.max(b.end_minute);
            }
        }
    }

    if start >= end {
        return None;
    }
    Some((minute_to_slot(start), minute_to_slot(end) - 1))
}
