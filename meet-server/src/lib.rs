//! Meeting-destination ranking server.
//!
//! A web application that answers: "a group flies in from several cities
//! for a meeting, which destination serves everyone best?"

pub mod domain;
pub mod index;
pub mod ranking;
pub mod web;
