//! Minute-of-day ⇄ slot conversions for the fixed booking window.
//!
//! The board covers 9:00–17:00 in 15-minute slots. All bookings and
//! selections are aligned to this grid.

/// 9:00 AM in minutes from midnight.
pub const DAY_START: u16 = 540;
/// 5:00 PM in minutes from midnight.
pub const DAY_END: u16 = 1020;
pub const SLOT_MINUTES: u16 = 15;
pub const SLOT_COUNT: u16 = (DAY_END - DAY_START) / SLOT_MINUTES;

pub fn minute_to_slot(minute: u16) -> u16 {
    minute.saturating_sub(DAY_START) / SLOT_MINUTES
}

pub fn slot_to_minute(slot: u16) -> u16 {
    DAY_START + slot * SLOT_MINUTES
}

/// Nearest grid-aligned minute, measured from the window start.
pub fn snap_to_grid(minute: u16) -> u16 {
    let rel = minute.saturating_sub(DAY_START);
    DAY_START + (rel + SLOT_MINUTES / 2) / SLOT_MINUTES * SLOT_MINUTES
}

/// 12-hour clock rendering: noon is 12 PM, midnight is 12 AM.
pub fn format_clock_time(minute: u16) -> String {
    let h = minute / 60;
    let m = minute % 60;
    let ampm = if h >= 12 { "PM" } else { "AM" };
    let hour = if h > 12 {
        h - 12
    } else if h == 0 {
        12
    } else {
        h
    };
    format!("{hour}:{m:02} {ampm}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_32_slots() {
        assert_eq!(SLOT_COUNT, 32);
    }

    #[test]
    fn conversions_round_trip_on_aligned_minutes() {
        let mut minute = DAY_START;
        while minute < DAY_END {
            assert_eq!(slot_to_minute(minute_to_slot(minute)), minute);
            minute += SLOT_MINUTES;
        }
    }

    #[test]
    fn clock_formatting_matches_twelve_hour_convention() {
        assert_eq!(format_clock_time(570), "9:30 AM");
        assert_eq!(format_clock_time(780), "1:00 PM");
        assert_eq!(format_clock_time(720), "12:00 PM");
        assert_eq!(format_clock_time(0), "12:00 AM");
        assert_eq!(format_clock_time(540), "9:00 AM");
    }

    #[test]
    fn snapping_rounds_to_nearest_slot_boundary() {
        assert_eq!(snap_to_grid(540), 540);
        assert_eq!(snap_to_grid(547), 540);
        assert_eq!(snap_to_grid(548), 555);
        assert_eq!(snap_to_grid(562), 555);
        assert_eq!(snap_to_grid(563), 570);
    }
}
