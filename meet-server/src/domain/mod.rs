//! Domain types for the meeting-destination planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod airport;
mod connection;

pub use airport::{Iata, InvalidIata};
pub use connection::Connection;
