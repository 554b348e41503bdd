//! Eonix Core - Fundamental types
//!
//! This crate provides the core types used throughout Eonix:
//! - `TemporalValue`: a calendar timestamp with field-wise arithmetic
//! - `TimeAmount`: a calendar-field amount for addition
//! - `EonixError`: the error taxonomy shared across the workspace
//!
//! The `calendar` module exposes the Gregorian utilities (leap-year rule,
//! civil-date conversion) the difference engine builds on.

pub mod calendar;
mod error;
mod temporal;

pub use error::EonixError;
pub use temporal::{TemporalInput, TemporalValue, TimeAmount};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{EonixError, TemporalInput, TemporalValue, TimeAmount};
}
