//! Modal confirmation form for a pending booking.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::booking::PendingBooking;
use crate::grid::format_clock_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Organizer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Editing,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct Dialog {
    pub title: String,
    pub organizer: String,
    pub focus: Field,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both fields non-blank after trimming; gates the confirm action.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.organizer.trim().is_empty()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Organizer => &mut self.organizer,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => Outcome::Cancelled,
            KeyCode::Enter => {
                if self.is_complete() {
                    Outcome::Confirmed
                } else {
                    Outcome::Editing
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Title => Field::Organizer,
                    Field::Organizer => Field::Title,
                };
                Outcome::Editing
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                Outcome::Editing
            }
            KeyCode::Char(c) => {
                self.focused_mut().push(c);
                Outcome::Editing
            }
            _ => Outcome::Editing,
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> [Line<'a>; 2] {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::raw(marker), Span::styled(value, style)];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    [
        Line::from(Span::styled(
            label,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(spans),
    ]
}

pub fn render(dialog: &Dialog, pending: &PendingBooking, room_name: &str, frame: &mut Frame) {
    let area = centered(frame.area(), 46, 14);
    frame.render_widget(Clear, area);

    let duration = pending.end_minute - pending.start_minute;
    let when = format!(
        "{} — {}  ({duration} min)",
        format_clock_time(pending.start_minute),
        format_clock_time(pending.end_minute),
    );
    let date = pending.date.format("%A, %B %-d, %Y").to_string();

    let footer = if dialog.is_complete() {
        Line::from(Span::styled(
            "[Enter] Book  [Tab] Switch  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "Fill both fields  [Tab] Switch  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let [title_label, title_input] = input_line("Meeting Title", &dialog.title, dialog.focus == Field::Title);
    let [organizer_label, organizer_input] =
        input_line("Organizer", &dialog.organizer, dialog.focus == Field::Organizer);

    let lines = vec![
        Line::from(Span::styled(
            room_name.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(date),
        Line::from(when),
        Line::default(),
        title_label,
        title_input,
        organizer_label,
        organizer_input,
        Line::default(),
        footer,
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Booking "),
    );
    frame.render_widget(form, area);
}
