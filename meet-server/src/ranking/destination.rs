//! Per-candidate ranking results.

use crate::domain::Iata;

/// How well one candidate airport serves the whole group.
///
/// `available_origins` sums, over both directions, the distinct group
/// origins that can reach (or leave) the candidate inside the tolerated
/// window, so a fully served group of `n` origins scores `2 * n`. The
/// unavailable lists name the group origins that could not be served in
/// that direction, excluding the candidate itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// The candidate airport.
    pub code: Iata,

    /// Served (direction, origin) pairs across outbound and inbound.
    pub available_origins: u32,

    /// Weighted stop usage: 1 per one-stop leg, 2 per two-stop leg.
    pub total_stops: u32,

    /// Group origins with no tolerated way in, in registration order.
    pub unavailable_outbound_origins: Vec<Iata>,

    /// Group origins with no tolerated way back, in registration order.
    pub unavailable_inbound_origins: Vec<Iata>,

    /// Traveler-weighted nights spent before the meeting starts.
    pub outbound_shoulder_nights: u32,

    /// Traveler-weighted nights spent after the meeting ends.
    pub inbound_shoulder_nights: u32,
}
