//! Static reference data.
//!
//! Contains the dates at which the standards behind the lint corpus took
//! (or stopped taking) effect.

pub mod dates;
