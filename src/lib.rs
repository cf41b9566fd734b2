//! Presentation helpers for measured quantities.
//!
//! - [`sig_figs`] rounds a value and its uncertainty to a consistent,
//!   significant-figure-correct precision and renders them as strings.
//! - [`log_to_linear`], [`linear_to_log`] and [`determine_symmetry`] move
//!   error bars between log10 and linear space, folding them into a single
//!   ± value when both sides round alike.
//! - [`lookup`] finds the tabulated result nearest to a query, within a
//!   threshold.

mod error;
mod lookup;
mod notation;
mod sigfigs;
mod transform;
mod uncertainty;

pub use error::{Error, Result};
pub use lookup::{Bracket, LookupTable, SCAN_LIMIT, lookup};
pub use notation::{Scientific, round_up, scientific};
pub use sigfigs::{Rounded, decimal_places, format_fixed, sig_figs};
pub use transform::{Measurement, determine_symmetry, linear_to_log, log_to_linear};
pub use uncertainty::Uncertainty;
