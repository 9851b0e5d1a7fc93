//! Data transfer objects for web requests and responses.
//!
//! The destination field names are part of the public contract and must
//! not drift; collaborators parse them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ranking::Destination;

/// Request to register an airport.
#[derive(Debug, Deserialize)]
pub struct RegisterAirportRequest {
    /// 3-letter IATA code
    pub code: String,
}

/// Response for airport registration.
#[derive(Debug, Serialize)]
pub struct RegisterAirportResponse {
    /// The normalized code
    pub code: String,

    /// Whether the airport was newly added
    pub created: bool,
}

/// Response listing registered airports.
#[derive(Debug, Serialize)]
pub struct AirportListResponse {
    /// Codes in registration order
    pub airports: Vec<String>,
}

/// Request to record a connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddConnectionRequest {
    /// Departure airport code
    pub origin: String,

    /// Arrival airport code
    pub destination: String,

    /// Departure day (YYYY-MM-DD)
    pub departure: NaiveDate,

    /// Intermediate stops (0 = direct)
    pub stops: u8,

    /// Whether the connection lands the next day
    #[serde(default)]
    pub arrives_next_day: bool,
}

/// One weighted origin in a ranking request.
#[derive(Debug, Deserialize)]
pub struct OriginEntry {
    /// Origin airport code
    pub code: String,

    /// Number of travelers departing from this origin
    pub travelers: u32,
}

/// Request to rank destinations for a meeting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankDestinationsRequest {
    /// Weighted group origins
    pub origins: Vec<OriginEntry>,

    /// First meeting day (YYYY-MM-DD)
    pub meeting_start: NaiveDate,

    /// Last meeting day (YYYY-MM-DD)
    pub meeting_end: NaiveDate,

    /// Tolerated nights before the meeting
    #[serde(default)]
    pub max_outbound_shoulder: u32,

    /// Tolerated nights after the meeting
    #[serde(default)]
    pub max_inbound_shoulder: u32,

    /// Number of destinations to return; 0 returns all
    #[serde(default)]
    pub take: usize,
}

/// A ranked destination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResult {
    /// Candidate airport code
    pub code: String,

    /// Served (direction, origin) pairs across both directions
    pub available_origins: u32,

    /// Weighted stop usage
    pub total_stops: u32,

    /// Origins with no tolerated way in
    pub unavailable_outbound_origins: Vec<String>,

    /// Origins with no tolerated way back
    pub unavailable_inbound_origins: Vec<String>,

    /// Traveler-weighted nights before the meeting
    pub outbound_shoulder_nights: u32,

    /// Traveler-weighted nights after the meeting
    pub inbound_shoulder_nights: u32,
}

/// Response for destination ranking.
#[derive(Debug, Serialize)]
pub struct RankDestinationsResponse {
    /// Ranked destinations, best first
    pub destinations: Vec<DestinationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl DestinationResult {
    /// Create from a domain Destination.
    pub fn from_destination(destination: &Destination) -> Self {
        Self {
            code: destination.code.as_str().to_string(),
            available_origins: destination.available_origins,
            total_stops: destination.total_stops,
            unavailable_outbound_origins: destination
                .unavailable_outbound_origins
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            unavailable_inbound_origins: destination
                .unavailable_inbound_origins
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            outbound_shoulder_nights: destination.outbound_shoulder_nights,
            inbound_shoulder_nights: destination.inbound_shoulder_nights,
        }
    }
}
