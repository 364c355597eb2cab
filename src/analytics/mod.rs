//! Pure analytics over one user's record.
//!
//! Nothing in here reads the clock: every function takes the reference day
//! as an argument, so results are reproducible for any `today`.

pub mod day_key;
pub mod heatmap;
pub mod insights;
pub mod meta;
pub mod mood;
pub mod streak;
pub mod summary;
pub mod weekly;

pub use day_key::DayKey;
