//! The rooms × slots timeline: rendering and mouse hit-testing.
//!
//! `TimelineLayout` holds the cell arithmetic shared by the renderer and the
//! pointer handlers, so a hit-test always lands on the cell the renderer
//! drew there.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::booking::{Booking, Room, Selection};
use crate::grid::{format_clock_time, minute_to_slot, slot_to_minute, DAY_END, DAY_START, SLOT_COUNT, SLOT_MINUTES};

/// Room name + capacity column on the left.
pub const LABEL_WIDTH: u16 = 20;
const HEADER_HEIGHT: u16 = 1;
const ROW_HEIGHT: u16 = 2;
/// Slots per labelled hour column.
const HOUR_SLOTS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineLayout {
    area: Rect,
    room_count: u16,
    slot_width: u16,
}

impl TimelineLayout {
    pub fn new(area: Rect, room_count: usize) -> Self {
        let grid_width = area.width.saturating_sub(LABEL_WIDTH);
        Self {
            area,
            room_count: room_count as u16,
            slot_width: (grid_width / SLOT_COUNT).max(1),
        }
    }

    /// The grid needs one cell per slot plus the label column.
    pub fn fits(&self) -> bool {
        self.area.width >= LABEL_WIDTH + SLOT_COUNT
            && self.area.height > HEADER_HEIGHT + ROW_HEIGHT
    }

    fn grid_x(&self) -> u16 {
        self.area.x + LABEL_WIDTH
    }

    fn grid_width(&self) -> u16 {
        self.slot_width * SLOT_COUNT
    }

    fn rows_y(&self) -> u16 {
        self.area.y + HEADER_HEIGHT
    }

    fn row_y(&self, room_index: u16) -> u16 {
        self.rows_y() + room_index * ROW_HEIGHT
    }

    fn slot_x(&self, slot: u16) -> u16 {
        self.grid_x() + slot * self.slot_width
    }

    /// Strict cell lookup for pointer-down: misses on the label column, the
    /// header, and anything past the grid.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, u16)> {
        if x < self.grid_x() || x >= self.grid_x() + self.grid_width() {
            return None;
        }
        if y < self.rows_y() {
            return None;
        }
        let row = (y - self.rows_y()) / ROW_HEIGHT;
        if row >= self.room_count {
            return None;
        }
        let slot = (x - self.grid_x()) / self.slot_width;
        Some((row as usize, slot.min(SLOT_COUNT - 1)))
    }

    /// Forgiving column lookup used while a drag is in flight; the pointer
    /// may wander off the grid and the slot pins to the nearest edge.
    pub fn slot_at_x(&self, x: u16) -> u16 {
        let rel = x.saturating_sub(self.grid_x());
        (rel / self.slot_width).min(SLOT_COUNT - 1)
    }

    /// Column of the current-time marker, proportional over the window.
    fn now_x(&self, minute: u16) -> Option<u16> {
        if !(DAY_START..=DAY_END).contains(&minute) {
            return None;
        }
        let span = (DAY_END - DAY_START) as u32;
        let rel = (minute - DAY_START) as u32 * (self.grid_width() as u32) / span;
        Some(self.grid_x() + (rel as u16).min(self.grid_width() - 1))
    }
}

pub struct TimelineView<'a> {
    pub rooms: &'a [Room],
    pub bookings: &'a [&'a Booking],
    pub selection: Option<&'a Selection>,
    /// Wall-clock minute when the board shows today, `None` otherwise.
    pub now_minute: Option<u16>,
}

fn room_color(name: &str) -> Color {
    match name {
        "blue" => Color::Blue,
        "emerald" => Color::Green,
        "amber" => Color::Yellow,
        "violet" => Color::Magenta,
        "rose" => Color::LightRed,
        "cyan" => Color::Cyan,
        "orange" => Color::LightYellow,
        "indigo" => Color::LightBlue,
        _ => Color::White,
    }
}

impl TimelineView<'_> {
    fn render_header(&self, layout: &TimelineLayout, buf: &mut Buffer) {
        let y = layout.area.y;
        let dim = Style::default().fg(Color::DarkGray);
        buf.set_stringn(layout.area.x + 1, y, "ROOMS", (LABEL_WIDTH - 1) as usize, dim);

        let label_style = Style::default().fg(Color::Gray);
        let max_width = (HOUR_SLOTS * layout.slot_width) as usize;
        let mut slot = 0;
        while slot < SLOT_COUNT {
            let label = format_clock_time(slot_to_minute(slot));
            buf.set_stringn(layout.slot_x(slot), y, &label, max_width, label_style);
            slot += HOUR_SLOTS;
        }
    }

    fn render_room_row(
        &self,
        layout: &TimelineLayout,
        index: u16,
        room: &Room,
        buf: &mut Buffer,
    ) {
        let y = layout.row_y(index);

        buf.set_stringn(
            layout.area.x + 1,
            y,
            &room.name,
            (LABEL_WIDTH - 2) as usize,
            Style::default().fg(room_color(&room.color)),
        );
        buf.set_stringn(
            layout.area.x + 1,
            y + 1,
            format!("{} seats", room.capacity),
            (LABEL_WIDTH - 2) as usize,
            Style::default().fg(Color::DarkGray),
        );

        // Hour gridlines; quarter-slot boundaries stay blank.
        let grid_style = Style::default().fg(Color::DarkGray);
        let mut slot = 0;
        while slot < SLOT_COUNT {
            let x = layout.slot_x(slot);
            for dy in 0..ROW_HEIGHT {
                buf[(x, y + dy)].set_char('│').set_style(grid_style);
            }
            slot += HOUR_SLOTS;
        }

        for booking in self.bookings.iter().filter(|b| b.room_id == room.id) {
            // Pin to the visible window; seed files may carry stray ranges.
            let start_slot = minute_to_slot(booking.start_minute).min(SLOT_COUNT);
            let end_slot = minute_to_slot(booking.end_minute).min(SLOT_COUNT);
            if start_slot >= end_slot {
                continue;
            }
            let x = layout.slot_x(start_slot);
            let width = (end_slot - start_slot) * layout.slot_width;
            let style = Style::default().fg(Color::Gray).bg(Color::DarkGray);
            fill(buf, x, y, width, ROW_HEIGHT, style);
            if width > 2 {
                buf.set_stringn(
                    x + 1,
                    y,
                    &booking.title,
                    (width - 2) as usize,
                    style.add_modifier(Modifier::BOLD),
                );
                buf.set_stringn(x + 1, y + 1, &booking.organizer, (width - 2) as usize, style);
            }
        }

        if let Some(sel) = self.selection.filter(|s| s.room_id == room.id) {
            let x = layout.slot_x(sel.start_slot);
            let width = (sel.end_slot - sel.start_slot + 1) * layout.slot_width;
            let style = Style::default().fg(Color::White).bg(Color::Blue);
            fill(buf, x, y, width, ROW_HEIGHT, style);
            let label = format!(
                "{} – {}",
                format_clock_time(slot_to_minute(sel.start_slot)),
                format_clock_time(slot_to_minute(sel.end_slot) + SLOT_MINUTES),
            );
            let pad = (width as usize).saturating_sub(label.len()) / 2;
            buf.set_stringn(
                x + pad as u16,
                y,
                &label,
                width as usize,
                style.add_modifier(Modifier::BOLD),
            );
        }
    }

    fn render_now_marker(&self, layout: &TimelineLayout, buf: &mut Buffer) {
        let Some(x) = self.now_minute.and_then(|m| layout.now_x(m)) else {
            return;
        };
        let bottom = layout.row_y(layout.room_count).min(layout.area.bottom());
        buf[(x, layout.area.y)].set_char('▼').set_fg(Color::Red);
        for y in layout.rows_y()..bottom {
            buf[(x, y)].set_char('│').set_fg(Color::Red);
        }
    }
}

fn fill(buf: &mut Buffer, x: u16, y: u16, width: u16, height: u16, style: Style) {
    for dy in 0..height {
        for dx in 0..width {
            buf[(x + dx, y + dy)].set_char(' ').set_style(style);
        }
    }
}

impl Widget for TimelineView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = TimelineLayout::new(area, self.rooms.len());
        if !layout.fits() {
            buf.set_stringn(
                area.x,
                area.y,
                "Terminal too small for the timeline",
                area.width as usize,
                Style::default().fg(Color::Red),
            );
            return;
        }

        self.render_header(&layout, buf);
        for (index, room) in self.rooms.iter().enumerate() {
            let y = layout.row_y(index as u16);
            if y + ROW_HEIGHT > area.bottom() {
                break;
            }
            self.render_room_row(&layout, index as u16, room, buf);
        }
        self.render_now_marker(&layout, buf);
    }
}
