//! Destination ranking over the bit-encoded connection index.
//!
//! For every registered airport the engine evaluates two mirrored halves:
//! outbound ("can each origin get there by the meeting start?") and inbound
//! ("can each origin get home after the meeting ends?"). Each half starts
//! at its anchor day and walks shoulder days away from the meeting while
//! some origins remain unserved, progressively shrinking an "origins still
//! needed" bit vector. All per-day work is bitwise: union the stop tiers,
//! intersect with the needed mask, count.

use chrono::{Days, NaiveDate};
use fixedbitset::FixedBitSet;

use crate::domain::Iata;
use crate::index::{ConnectionIndex, Direction, IndexError};

use super::destination::Destination;

/// Parameters for one ranking call.
#[derive(Debug, Clone)]
pub struct RankRequest {
    /// Group origins as (airport, traveler count) pairs. Duplicate codes
    /// fold into one entry; the last count wins.
    pub origins: Vec<(Iata, u32)>,

    /// First meeting day; outbound arrivals anchor here.
    pub meeting_start: NaiveDate,

    /// Last meeting day; inbound departures anchor here.
    pub meeting_end: NaiveDate,

    /// Nights a traveler may arrive before the meeting starts.
    pub max_outbound_shoulder: u32,

    /// Nights a traveler may leave after the meeting ends.
    pub max_inbound_shoulder: u32,

    /// Number of destinations to return; 0 returns all.
    pub take: usize,
}

impl RankRequest {
    /// Create a request.
    pub fn new(
        origins: Vec<(Iata, u32)>,
        meeting_start: NaiveDate,
        meeting_end: NaiveDate,
        max_outbound_shoulder: u32,
        max_inbound_shoulder: u32,
        take: usize,
    ) -> Self {
        Self {
            origins,
            meeting_start,
            meeting_end,
            max_outbound_shoulder,
            max_inbound_shoulder,
            take,
        }
    }
}

/// Accumulated result of scanning one direction for one candidate.
struct SideScan {
    /// Every airport served in this direction, across all scanned days.
    served: FixedBitSet,

    /// Group origins served so far.
    reached: u32,

    /// Weighted stop usage across all scanned days.
    stops: u32,

    /// Traveler-weighted shoulder nights consumed.
    shoulder_nights: u32,
}

/// Destination ranking engine.
///
/// A pure read-side view over an index snapshot: ranking mutates nothing
/// and two calls with the same inputs return the same output.
pub struct Ranker<'a> {
    index: &'a ConnectionIndex,
}

impl<'a> Ranker<'a> {
    /// Create a ranker over an index.
    pub fn new(index: &'a ConnectionIndex) -> Self {
        Self { index }
    }

    /// Rank every registered airport by how well it serves the group.
    ///
    /// Origins whose code is not registered are dropped from the bit
    /// vector but still count toward the group size the shoulder walk
    /// tries to satisfy. Results are sorted by `available_origins`
    /// descending; ties keep registration order.
    pub fn rank(&self, request: &RankRequest) -> Result<Vec<Destination>, IndexError> {
        let outbound_anchor = self.index.day_index(request.meeting_start)?;
        let inbound_anchor = self.index.day_index(request.meeting_end)?;

        // Every shoulder day the walk may probe must itself be inside the
        // horizon.
        self.check_probe_bound(request.meeting_start, -i64::from(request.max_outbound_shoulder))?;
        self.check_probe_bound(request.meeting_end, i64::from(request.max_inbound_shoulder))?;

        let registry = self.index.registry();
        let mut origins = FixedBitSet::with_capacity(registry.len());
        let mut weights = vec![0u32; registry.len()];
        for (code, travelers) in &request.origins {
            if let Some(index) = registry.index_of(*code) {
                origins.insert(index);
                weights[index] = *travelers;
            }
        }
        // The raw list length, not the folded cardinality: unknown and
        // duplicate codes still hold the shoulder walk open.
        let group_size = request.origins.len() as u32;

        let mut destinations = Vec::with_capacity(registry.len());
        for candidate in 0..registry.len() {
            let outbound = self.scan_side(
                Direction::Outbound,
                candidate,
                outbound_anchor,
                request.max_outbound_shoulder,
                &origins,
                &weights,
                group_size,
            );
            let inbound = self.scan_side(
                Direction::Inbound,
                candidate,
                inbound_anchor,
                request.max_inbound_shoulder,
                &origins,
                &weights,
                group_size,
            );

            destinations.push(Destination {
                code: registry.codes()[candidate],
                available_origins: outbound.reached + inbound.reached,
                total_stops: outbound.stops + inbound.stops,
                unavailable_outbound_origins: self.unavailable(&outbound.served, &origins, candidate),
                unavailable_inbound_origins: self.unavailable(&inbound.served, &origins, candidate),
                outbound_shoulder_nights: outbound.shoulder_nights,
                inbound_shoulder_nights: inbound.shoulder_nights,
            });
        }

        destinations.sort_by(|a, b| b.available_origins.cmp(&a.available_origins));
        if request.take > 0 {
            destinations.truncate(request.take);
        }
        Ok(destinations)
    }

    /// Validate the farthest day a shoulder walk could probe.
    fn check_probe_bound(&self, anchor: NaiveDate, offset_days: i64) -> Result<(), IndexError> {
        let extreme = match offset_days {
            0 => anchor,
            d if d < 0 => anchor
                .checked_sub_days(Days::new(d.unsigned_abs()))
                .ok_or(IndexError::DateOutOfRange { date: anchor })?,
            d => anchor
                .checked_add_days(Days::new(d as u64))
                .ok_or(IndexError::DateOutOfRange { date: anchor })?,
        };
        self.index.day_index(extreme)?;
        Ok(())
    }

    /// Scan one direction for one candidate: the anchor day first, then
    /// shoulder days walking away from the meeting while group origins
    /// remain unserved.
    #[allow(clippy::too_many_arguments)]
    fn scan_side(
        &self,
        direction: Direction,
        candidate: usize,
        anchor_day: usize,
        max_shoulder: u32,
        origins: &FixedBitSet,
        weights: &[u32],
        group_size: u32,
    ) -> SideScan {
        let mut served = self.day_coverage(direction, anchor_day, candidate);
        let mut reached = served.intersection(origins).count() as u32;
        let mut stops = self.stops_score(direction, anchor_day, candidate, origins);
        let mut shoulder_nights = 0u32;

        for night in 1..=max_shoulder {
            if reached >= group_size {
                break;
            }
            let day = match direction {
                Direction::Outbound => anchor_day - night as usize,
                Direction::Inbound => anchor_day + night as usize,
            };
            let layer = self.day_coverage(direction, day, candidate);

            // Origins no earlier day served; only these can score here.
            let mut needed = origins.clone();
            needed.difference_with(&served);

            stops += self.stops_score(direction, day, candidate, &needed);
            for origin in layer.intersection(&needed) {
                shoulder_nights += weights[origin] * night;
                reached += 1;
            }
            served.union_with(&layer);
        }

        SideScan {
            served,
            reached,
            stops,
            shoulder_nights,
        }
    }

    /// Union of all stop tiers for one (direction, day, anchor) cell.
    fn day_coverage(&self, direction: Direction, day: usize, anchor: usize) -> FixedBitSet {
        let mut coverage = FixedBitSet::with_capacity(self.index.registry().len());
        for stops in 0..=self.index.config().max_stops {
            coverage.union_with(self.index.side(direction, day, anchor, stops));
        }
        coverage
    }

    /// Weighted stop usage for the origins in `mask` on one day.
    ///
    /// A tier scores an origin only when no lower tier reaches it, so the
    /// same origin is never charged across tiers.
    fn stops_score(&self, direction: Direction, day: usize, anchor: usize, mask: &FixedBitSet) -> u32 {
        let mut remaining = mask.clone();
        remaining.difference_with(self.index.side(direction, day, anchor, 0));

        let mut score = 0u32;
        for stops in 1..=self.index.config().max_stops {
            let tier = self.index.side(direction, day, anchor, stops);
            score += u32::from(stops) * tier.intersection(&remaining).count() as u32;
            remaining.difference_with(tier);
        }
        score
    }

    /// Group origins not in `served`, minus the candidate itself, as codes
    /// in registration order.
    fn unavailable(&self, served: &FixedBitSet, origins: &FixedBitSet, candidate: usize) -> Vec<Iata> {
        let registry = self.index.registry();
        let mut missing = origins.clone();
        missing.difference_with(served);
        if candidate < missing.len() {
            // A city is trivially its own origin.
            missing.set(candidate, false);
        }
        missing
            .ones()
            .filter_map(|index| registry.code_of(index))
            .collect()
    }
}
