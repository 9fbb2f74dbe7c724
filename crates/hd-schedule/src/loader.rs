//! CSV staffing / arrival-intensity loader.
//!
//! # CSV format
//!
//! One row per hour of day; all 24 hours must appear exactly once, in any
//! order.
//!
//! ```csv
//! hour,arrival_intensity,front_desk,housekeeping
//! 0,0.02,2,0
//! 1,0.02,2,0
//! ...
//! 15,0.12,6,12
//! ...
//! ```
//!
//! `arrival_intensity` is relative; pass `normalize = true` to scale the
//! column so it sums to 1 (then the configured base rate is arrivals/day).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hd_core::{CapacityProfile, HotelConfig, IntensityProfile, HOURS_PER_DAY};

use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProfileRecord {
    hour:              usize,
    arrival_intensity: f64,
    front_desk:        u32,
    housekeeping:      u32,
}

// ── ProfileTable ──────────────────────────────────────────────────────────────

/// The three hourly profiles of a hotel day, as loaded from one CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileTable {
    pub arrival:      IntensityProfile,
    pub front_desk:   CapacityProfile,
    pub housekeeping: CapacityProfile,
}

impl ProfileTable {
    /// Overwrite the matching profiles of `config`.
    pub fn apply_to(&self, config: &mut HotelConfig) {
        config.arrival_profile = self.arrival.clone();
        config.front_desk_staffing = self.front_desk.clone();
        config.housekeeping_staffing = self.housekeeping.clone();
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`ProfileTable`] from a CSV file.
pub fn load_profiles_csv(path: &Path, normalize: bool) -> Result<ProfileTable, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_profiles_reader(file, normalize)
}

/// Like [`load_profiles_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a profile in
/// the binary.
pub fn load_profiles_reader<R: Read>(
    reader: R,
    normalize: bool,
) -> Result<ProfileTable, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: [Option<ProfileRecord>; HOURS_PER_DAY] = std::array::from_fn(|_| None);

    for result in csv_reader.deserialize::<ProfileRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.hour >= HOURS_PER_DAY {
            return Err(ScheduleError::Parse(format!("hour {} out of range 0..24", row.hour)));
        }
        let hour = row.hour;
        if rows[hour].replace(row).is_some() {
            return Err(ScheduleError::Parse(format!("hour {hour} appears more than once")));
        }
    }

    let mut intensity    = [0.0; HOURS_PER_DAY];
    let mut front_desk   = [0; HOURS_PER_DAY];
    let mut housekeeping = [0; HOURS_PER_DAY];
    for (hour, row) in rows.iter().enumerate() {
        let row = row
            .as_ref()
            .ok_or_else(|| ScheduleError::Parse(format!("missing row for hour {hour}")))?;
        intensity[hour]    = row.arrival_intensity;
        front_desk[hour]   = row.front_desk;
        housekeeping[hour] = row.housekeeping;
    }

    let arrival = if normalize {
        IntensityProfile::normalized(intensity)?
    } else {
        IntensityProfile::new(intensity)?
    };

    Ok(ProfileTable {
        arrival,
        front_desk:   CapacityProfile::new(front_desk),
        housekeeping: CapacityProfile::new(housekeeping),
    })
}
