//! Direct route lookup server.
//!
//! Loads a route data file into a compact in-memory index and answers:
//! "is there a single route that serves both of these stops?"

pub mod cli;
pub mod dataset;
pub mod generator;
pub mod loader;
pub mod logging;
pub mod lookup;
pub mod web;
