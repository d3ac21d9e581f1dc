//! Core types for Freshpaw.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod pack;
pub mod status;
pub mod units;

pub use id::*;
pub use pack::PackPortionInfo;
pub use status::*;
pub use units::{GRAMS_PER_KILOGRAM, GRAMS_PER_POUND, grams_to_kilograms, grams_to_pounds};
