use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json as json;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::{Booking, Room};
use crate::grid::snap_to_grid;
use crate::paths::data_dirs;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] json::Error),
}

const FILE_NAME: &str = "seed.json";

/// A seed booking carries no id (assigned on load) and may omit its date,
/// which then defaults to the day the board opens on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBooking {
    pub room_id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub start_minute: u16,
    pub end_minute: u16,
    pub title: String,
    pub organizer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedData {
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub bookings: Vec<SeedBooking>,
}

impl SeedData {
    pub fn load(predefined_path: Option<&Path>) -> Result<Self, LoadError> {
        let paths = match predefined_path {
            Some(predefined) => {
                if predefined.is_dir() {
                    vec![Cow::Owned(predefined.join(FILE_NAME))]
                } else {
                    vec![Cow::Borrowed(predefined)]
                }
            }
            None => data_dirs()
                .into_iter()
                .map(|base_dir| Cow::Owned(base_dir.join(FILE_NAME)))
                .collect::<Vec<_>>(),
        };

        match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                let reader = BufReader::new(File::open(path)?);
                Ok(json::from_reader(reader)?)
            }
            None => {
                tracing::warn!("No seed file found. Using built-in mock data");
                Ok(Self::mock())
            }
        }
    }

    /// The built-in demo roster and schedule.
    pub fn mock() -> Self {
        let rooms = [
            ("h1", "Grand Ballroom", 200, "blue"),
            ("h2", "Boardroom A", 20, "emerald"),
            ("h3", "Boardroom B", 20, "amber"),
            ("h4", "Innovation Lab", 40, "violet"),
            ("h5", "Sky Lounge", 60, "rose"),
            ("h6", "Summit Room", 30, "cyan"),
            ("h7", "Training Center", 80, "orange"),
            ("h8", "Executive Suite", 12, "indigo"),
        ]
        .into_iter()
        .map(|(id, name, capacity, color)| Room {
            id: id.into(),
            name: name.into(),
            capacity,
            color: color.into(),
        })
        .collect();

        let bookings = [
            ("h1", 570, 660, "All-Hands Meeting", "Sarah Chen"),
            ("h1", 780, 900, "Product Launch Prep", "Mike Ross"),
            ("h2", 600, 690, "Sprint Planning", "Alex Kumar"),
            ("h3", 540, 630, "Design Review", "Lisa Park"),
            ("h4", 660, 780, "Hackathon Kickoff", "Tom Davis"),
            ("h5", 720, 810, "Client Lunch", "Emma White"),
            ("h6", 900, 990, "Strategy Session", "James Lee"),
            ("h7", 540, 720, "Onboarding Workshop", "Rachel Green"),
            ("h8", 600, 660, "Board Call", "David Kim"),
            ("h8", 840, 960, "Investor Meeting", "Julia Scott"),
        ]
        .into_iter()
        .map(
            |(room_id, start_minute, end_minute, title, organizer)| SeedBooking {
                room_id: room_id.into(),
                date: None,
                start_minute,
                end_minute,
                title: title.into(),
                organizer: organizer.into(),
            },
        )
        .collect();

        Self { rooms, bookings }
    }

    /// Materialize the seed: assign booking ids, stamp undated entries with
    /// `default_date`, and snap hand-written minutes onto the grid.
    pub fn into_parts(self, default_date: NaiveDate) -> (Vec<Room>, Vec<Booking>) {
        let bookings = self
            .bookings
            .into_iter()
            .map(|b| Booking {
                id: Uuid::new_v4(),
                room_id: b.room_id,
                date: b.date.unwrap_or(default_date),
                start_minute: snap_to_grid(b.start_minute),
                end_minute: snap_to_grid(b.end_minute),
                title: b.title,
                organizer: b.organizer,
            })
            .collect();
        (self.rooms, bookings)
    }
}
