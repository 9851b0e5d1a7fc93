//! Connection descriptions accepted by the index.

use chrono::NaiveDate;

use super::Iata;

/// A one-way connection between two airports on a specific day.
///
/// The model is day-resolution only: a connection departs on `departure`
/// and arrives the same day, or the next day when `arrives_next_day` is
/// set (red-eye legs). `stops` counts intermediate stops: 0 is a direct
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Departure airport.
    pub origin: Iata,

    /// Arrival airport.
    pub destination: Iata,

    /// Departure day.
    pub departure: NaiveDate,

    /// Number of intermediate stops.
    pub stops: u8,

    /// Whether the connection lands the day after it departs.
    pub arrives_next_day: bool,
}

impl Connection {
    /// Create a same-day direct connection; adjust fields for anything else.
    pub fn direct(origin: Iata, destination: Iata, departure: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            departure,
            stops: 0,
            arrives_next_day: false,
        }
    }
}
