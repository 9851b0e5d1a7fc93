//! The bit-encoded connection index.
//!
//! This module is the data backbone of the planner: a dense airport
//! registry plus two mirrored 3-D lattices of bit vectors recording, per
//! day and stop count, which airports connect to which. It performs no
//! I/O and emits no logs; callers own locking and persistence.

mod config;
mod registry;
mod store;

pub use config::{IndexConfig, MAX_DAYS, MAX_STOPS};
pub use registry::AirportRegistry;
pub use store::{ConnectionIndex, Direction, IndexError};
