//! Destination ranking engine.
//!
//! Answers: "a group departs from these cities for a meeting window;
//! which destination serves everyone best?" Built entirely on the bit
//! vectors of the connection index; evaluating a candidate is a handful
//! of set operations per day rather than a scan over connections.

mod destination;
mod engine;

pub use destination::Destination;
pub use engine::{RankRequest, Ranker};
