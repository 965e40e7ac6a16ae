//! Static datasets.
//!
//! - `locations`: the highlighted Bangkok districts shown on both maps

pub mod locations;

pub use locations::{get_location, Location, LOCATIONS};
