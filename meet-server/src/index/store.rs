//! Bit-matrix connection store.
//!
//! Connections are held as bit vectors indexed by (direction, day, anchor
//! airport, stop count), so that "which origins can reach airport X on day
//! d?" is a single lookup followed by bitwise set operations rather than a
//! scan over individual connections.
//!
//! The two directions are keyed asymmetrically on purpose: the outbound
//! store is keyed by *arrival* day and anchored on the *destination*, while
//! the inbound store is keyed by *departure* day and anchored on the
//! *origin*. The ranking engine can then treat "flights arriving at
//! candidate X on day d" and "flights leaving X on day d" as the same shape
//! of query.

use chrono::{Days, NaiveDate};
use fixedbitset::FixedBitSet;

use crate::domain::{Connection, Iata};

use super::config::IndexConfig;
use super::registry::AirportRegistry;

/// Errors from feeding or querying the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Stop count above the configured ceiling.
    #[error("stops must be at most {max}, got {got}")]
    InvalidStops { got: u8, max: u8 },

    /// A departure, arrival, meeting or shoulder day outside the horizon.
    #[error("date {date} is outside the indexed horizon")]
    DateOutOfRange { date: NaiveDate },
}

/// Which side of a trip a bit vector describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Flights arriving at the anchor airport. Keyed by arrival day; set
    /// bits are origin indices.
    Outbound,

    /// Flights leaving the anchor airport. Keyed by departure day; set
    /// bits are destination indices.
    Inbound,
}

/// One direction's `[day][anchor][stops]` lattice of bit vectors.
#[derive(Debug, Clone)]
struct DirectionStore {
    days: Vec<Vec<Vec<FixedBitSet>>>,
}

impl DirectionStore {
    fn new(max_days: usize) -> Self {
        Self {
            days: vec![Vec::new(); max_days],
        }
    }

    /// Extend every day cell by one anchor slot of empty bit vectors.
    fn add_anchor(&mut self, stop_tiers: usize) {
        for day in &mut self.days {
            day.push(vec![FixedBitSet::new(); stop_tiers]);
        }
    }

    fn get(&self, day: usize, anchor: usize, stops: usize) -> &FixedBitSet {
        &self.days[day][anchor][stops]
    }

    /// Set the bit for `other` in the addressed vector, growing it first.
    /// Setting an already-set bit is a no-op.
    fn set(&mut self, day: usize, anchor: usize, stops: usize, other: usize) {
        let cell = &mut self.days[day][anchor][stops];
        if other >= cell.len() {
            cell.grow(other + 1);
        }
        cell.insert(other);
    }
}

/// The connection index: airport registry plus both direction stores.
///
/// The store is append-only. Airports are only ever added, bits are only
/// ever set, and a failed `set_connection` leaves everything untouched.
#[derive(Debug, Clone)]
pub struct ConnectionIndex {
    start_date: NaiveDate,
    config: IndexConfig,
    registry: AirportRegistry,
    outbound: DirectionStore,
    inbound: DirectionStore,
}

impl ConnectionIndex {
    /// Create an index anchored at `start_date` with the default horizon
    /// and stop ceiling.
    pub fn new(start_date: NaiveDate) -> Self {
        Self::with_config(start_date, IndexConfig::default())
    }

    /// Create an index with explicit dimensions.
    pub fn with_config(start_date: NaiveDate, config: IndexConfig) -> Self {
        let outbound = DirectionStore::new(config.max_days);
        let inbound = DirectionStore::new(config.max_days);
        Self {
            start_date,
            config,
            registry: AirportRegistry::new(),
            outbound,
            inbound,
        }
    }

    /// The day all stored offsets are measured from.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The index dimensions.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The airport registry backing this index.
    pub fn registry(&self) -> &AirportRegistry {
        &self.registry
    }

    /// Day offset of `date` from the start date.
    ///
    /// Errors with [`IndexError::DateOutOfRange`] when the date falls
    /// before the start date or on/after `start_date + max_days`.
    pub fn day_index(&self, date: NaiveDate) -> Result<usize, IndexError> {
        let offset = date.signed_duration_since(self.start_date).num_days();
        if offset < 0 || offset >= self.config.max_days as i64 {
            return Err(IndexError::DateOutOfRange { date });
        }
        Ok(offset as usize)
    }

    /// Register an airport. Returns `true` iff the code was newly added.
    ///
    /// Registration extends both direction stores by one anchor slot on
    /// every day cell.
    pub fn register_airport(&mut self, code: Iata) -> bool {
        self.intern_airport(code).1
    }

    fn intern_airport(&mut self, code: Iata) -> (usize, bool) {
        let (index, created) = self.registry.intern(code);
        if created {
            let tiers = self.config.stop_tiers();
            self.outbound.add_anchor(tiers);
            self.inbound.add_anchor(tiers);
        }
        (index, created)
    }

    /// Record a connection in both direction stores.
    ///
    /// Validation happens before any mutation: a call that fails leaves
    /// the registry and the stores exactly as they were, even if the
    /// connection mentions airports that were never seen before.
    pub fn set_connection(&mut self, conn: &Connection) -> Result<(), IndexError> {
        if conn.stops > self.config.max_stops {
            return Err(IndexError::InvalidStops {
                got: conn.stops,
                max: self.config.max_stops,
            });
        }

        let departure_day = self.day_index(conn.departure)?;
        let arrival_day = departure_day + usize::from(conn.arrives_next_day);
        if arrival_day >= self.config.max_days {
            let arrival = conn
                .departure
                .checked_add_days(Days::new(1))
                .unwrap_or(conn.departure);
            return Err(IndexError::DateOutOfRange { date: arrival });
        }

        let (origin, _) = self.intern_airport(conn.origin);
        let (destination, _) = self.intern_airport(conn.destination);
        let stops = usize::from(conn.stops);

        self.outbound.set(arrival_day, destination, stops, origin);
        self.inbound.set(departure_day, origin, stops, destination);
        Ok(())
    }

    /// Origins with a `stops`-stop connection arriving at `anchor` on `day`.
    ///
    /// Low-level accessor; `day` must be below the horizon and `anchor`
    /// a registered index.
    pub fn outbound(&self, day: usize, anchor: usize, stops: u8) -> &FixedBitSet {
        self.outbound.get(day, anchor, usize::from(stops))
    }

    /// Destinations with a `stops`-stop connection leaving `anchor` on `day`.
    ///
    /// Low-level accessor; `day` must be below the horizon and `anchor`
    /// a registered index.
    pub fn inbound(&self, day: usize, anchor: usize, stops: u8) -> &FixedBitSet {
        self.inbound.get(day, anchor, usize::from(stops))
    }

    /// Direction-generic read accessor.
    pub fn side(&self, direction: Direction, day: usize, anchor: usize, stops: u8) -> &FixedBitSet {
        match direction {
            Direction::Outbound => self.outbound(day, anchor, stops),
            Direction::Inbound => self.inbound(day, anchor, stops),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iata(s: &str) -> Iata {
        Iata::parse(s).unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn conn(origin: &str, dest: &str, departure: NaiveDate, stops: u8, next_day: bool) -> Connection {
        Connection {
            origin: iata(origin),
            destination: iata(dest),
            departure,
            stops,
            arrives_next_day: next_day,
        }
    }

    #[test]
    fn day_index_offsets_from_start_date() {
        let index = ConnectionIndex::new(start());

        assert_eq!(index.day_index(date(2025, 1, 1)).unwrap(), 0);
        assert_eq!(index.day_index(date(2025, 1, 10)).unwrap(), 9);
        assert_eq!(index.day_index(date(2025, 12, 26)).unwrap(), 359);
    }

    #[test]
    fn day_index_rejects_outside_horizon() {
        let index = ConnectionIndex::new(start());

        assert_eq!(
            index.day_index(date(2024, 12, 31)),
            Err(IndexError::DateOutOfRange {
                date: date(2024, 12, 31)
            })
        );
        assert_eq!(
            index.day_index(date(2025, 12, 27)),
            Err(IndexError::DateOutOfRange {
                date: date(2025, 12, 27)
            })
        );
    }

    #[test]
    fn set_connection_sets_both_direction_bits() {
        let mut index = ConnectionIndex::new(start());

        index
            .set_connection(&conn("LHR", "JFK", date(2025, 1, 10), 1, false))
            .unwrap();

        let lhr = index.registry().index_of(iata("LHR")).unwrap();
        let jfk = index.registry().index_of(iata("JFK")).unwrap();

        // Outbound: anchored on the destination, keyed by arrival day.
        assert!(index.outbound(9, jfk, 1).contains(lhr));
        // Inbound: anchored on the origin, keyed by departure day.
        assert!(index.inbound(9, lhr, 1).contains(jfk));

        // No stray bits in other tiers.
        assert!(index.outbound(9, jfk, 0).is_clear());
        assert!(index.outbound(9, jfk, 2).is_clear());
    }

    #[test]
    fn next_day_arrival_shifts_only_the_outbound_day() {
        let mut index = ConnectionIndex::new(start());

        index
            .set_connection(&conn("LHR", "NRT", date(2025, 1, 10), 0, true))
            .unwrap();

        let lhr = index.registry().index_of(iata("LHR")).unwrap();
        let nrt = index.registry().index_of(iata("NRT")).unwrap();

        assert!(index.outbound(10, nrt, 0).contains(lhr));
        assert!(!index.outbound(9, nrt, 0).contains(lhr));
        assert!(index.inbound(9, lhr, 0).contains(nrt));
    }

    #[test]
    fn set_connection_is_idempotent() {
        let mut index = ConnectionIndex::new(start());
        let c = conn("LHR", "JFK", date(2025, 1, 10), 0, false);

        index.set_connection(&c).unwrap();
        index.set_connection(&c).unwrap();

        let lhr = index.registry().index_of(iata("LHR")).unwrap();
        let jfk = index.registry().index_of(iata("JFK")).unwrap();
        assert_eq!(index.outbound(9, jfk, 0).count_ones(..), 1);
        assert_eq!(index.inbound(9, lhr, 0).count_ones(..), 1);
        assert_eq!(index.registry().len(), 2);
    }

    #[test]
    fn bits_persist_across_later_writes() {
        let mut index = ConnectionIndex::new(start());

        index
            .set_connection(&conn("LHR", "JFK", date(2025, 1, 10), 0, false))
            .unwrap();
        index
            .set_connection(&conn("SFO", "JFK", date(2025, 1, 10), 0, false))
            .unwrap();
        index
            .set_connection(&conn("NRT", "JFK", date(2025, 1, 12), 2, false))
            .unwrap();

        let lhr = index.registry().index_of(iata("LHR")).unwrap();
        let sfo = index.registry().index_of(iata("SFO")).unwrap();
        let jfk = index.registry().index_of(iata("JFK")).unwrap();

        assert!(index.outbound(9, jfk, 0).contains(lhr));
        assert!(index.outbound(9, jfk, 0).contains(sfo));
    }

    #[test]
    fn invalid_stops_is_rejected_without_registering_airports() {
        let mut index = ConnectionIndex::new(start());

        let err = index
            .set_connection(&conn("LHR", "JFK", date(2025, 1, 10), 3, false))
            .unwrap_err();

        assert_eq!(err, IndexError::InvalidStops { got: 3, max: 2 });
        assert!(index.registry().is_empty());
    }

    #[test]
    fn out_of_range_departure_is_rejected_without_registering_airports() {
        let mut index = ConnectionIndex::new(start());

        let err = index
            .set_connection(&conn("LHR", "JFK", date(2024, 12, 31), 0, false))
            .unwrap_err();

        assert_eq!(
            err,
            IndexError::DateOutOfRange {
                date: date(2024, 12, 31)
            }
        );
        assert!(index.registry().is_empty());
    }

    #[test]
    fn next_day_arrival_at_horizon_edge_is_rejected() {
        let mut index = ConnectionIndex::new(start());

        // Day 359 is the last addressable day; arriving on day 360 is not.
        let err = index
            .set_connection(&conn("LHR", "JFK", date(2025, 12, 26), 0, true))
            .unwrap_err();

        assert_eq!(
            err,
            IndexError::DateOutOfRange {
                date: date(2025, 12, 27)
            }
        );
        assert!(index.registry().is_empty());

        // Same-day arrival on the last day is fine.
        index
            .set_connection(&conn("LHR", "JFK", date(2025, 12, 26), 0, false))
            .unwrap();
    }

    #[test]
    fn registration_extends_every_day_cell() {
        let mut index = ConnectionIndex::with_config(start(), IndexConfig::new(5, 2));

        assert!(index.register_airport(iata("LHR")));
        assert!(!index.register_airport(iata("LHR")));

        let lhr = index.registry().index_of(iata("LHR")).unwrap();
        for day in 0..5 {
            for stops in 0..=2 {
                assert!(index.outbound(day, lhr, stops).is_clear());
                assert!(index.inbound(day, lhr, stops).is_clear());
            }
        }
    }

    #[test]
    fn custom_stop_ceiling_is_enforced() {
        let mut index = ConnectionIndex::with_config(start(), IndexConfig::new(30, 1));

        let err = index
            .set_connection(&conn("LHR", "JFK", date(2025, 1, 10), 2, false))
            .unwrap_err();
        assert_eq!(err, IndexError::InvalidStops { got: 2, max: 1 });

        index
            .set_connection(&conn("LHR", "JFK", date(2025, 1, 10), 1, false))
            .unwrap();
    }

    #[test]
    fn error_display() {
        let err = IndexError::InvalidStops { got: 5, max: 2 };
        assert_eq!(err.to_string(), "stops must be at most 2, got 5");

        let err = IndexError::DateOutOfRange {
            date: date(2026, 6, 1),
        };
        assert_eq!(
            err.to_string(),
            "date 2026-06-01 is outside the indexed horizon"
        );
    }
}
