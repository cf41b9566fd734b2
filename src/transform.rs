// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use crate::{
    Uncertainty,
    error::{Error, Result},
    sigfigs::sig_figs,
};

/// A central value with raw (unrounded) error bars.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub value: f64,
    pub uncertainty: Uncertainty,
}

impl Measurement {
    /// Returns `[value, dy]` or `[value, plus, minus]`.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut v = Vec::with_capacity(3);
        v.push(self.value);
        v.extend(self.uncertainty.iter().copied());
        v
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.uncertainty.is_symmetric()
    }

    /// Returns `(lower, upper)`.
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.value - self.uncertainty.minus(),
            self.value + self.uncertainty.plus(),
        )
    }
}

/// Builds a measurement from a central value and its two bounds, reporting a
/// single averaged error if both sides round to the same string.
///
/// The comparison happens on the output of [`sig_figs`], so sides that differ
/// by less than the applicable rounding precision count as symmetric. The
/// averaged error is taken from the raw differences, not the rounded ones.
///
/// # Example
///
/// ```
/// # use scifigs::determine_symmetry;
/// let m = determine_symmetry(10.0, 10.5, 9.52).unwrap();
/// assert!(m.is_symmetric());
/// assert!((m.uncertainty.plus() - 0.49).abs() < 1e-12);
/// ```
pub fn determine_symmetry(central: f64, upper: f64, lower: f64) -> Result<Measurement> {
    let dy_plus = upper - central;
    let dy_minus = central - lower;
    let rounded = sig_figs(central, [dy_plus, dy_minus])?;
    let uncertainty = if rounded.is_symmetric() {
        tracing::debug!(central, dy_plus, dy_minus, %rounded, "errors are symmetric");
        Uncertainty::Symmetric((dy_plus + dy_minus) / 2.0)
    } else {
        Uncertainty::Asymmetric {
            plus: dy_plus,
            minus: dy_minus,
        }
    };
    Ok(Measurement {
        value: central,
        uncertainty,
    })
}

fn measurement(
    central: f64,
    upper: f64,
    lower: f64,
    check_symmetry: bool,
) -> Result<Measurement> {
    if check_symmetry {
        determine_symmetry(central, upper, lower)
    } else {
        Ok(Measurement {
            value: central,
            uncertainty: Uncertainty::Asymmetric {
                plus: upper - central,
                minus: central - lower,
            },
        })
    }
}

/// Converts a value with a symmetric error in log10 space into linear space.
///
/// The linear errors are generally asymmetric. With `check_symmetry` off the
/// asymmetric form is always returned.
///
/// # Example
///
/// ```
/// # use scifigs::log_to_linear;
/// let m = log_to_linear(2.0, 0.1, false).unwrap();
/// assert_eq!(m.value, 100.0);
/// assert_eq!(m.to_vec().len(), 3);
/// ```
pub fn log_to_linear(
    log_central: f64,
    log_half_width: f64,
    check_symmetry: bool,
) -> Result<Measurement> {
    for (what, value) in [
        ("log central value", log_central),
        ("log half-width", log_half_width),
    ] {
        if !value.is_finite() {
            return Err(Error::InvalidInput { what, value });
        }
    }
    let central = 10_f64.powf(log_central);
    let upper = 10_f64.powf(log_central + log_half_width);
    let lower = 10_f64.powf(log_central - log_half_width);
    for value in [central, upper, lower] {
        if !value.is_finite() {
            return Err(Error::InvalidInput {
                what: "linear value",
                value,
            });
        }
    }
    measurement(central, upper, lower, check_symmetry)
}

/// Converts a value with a symmetric linear error into log10 space.
///
/// `half_width` must not be negative, and both `central` and
/// `central - half_width` must be positive.
pub fn linear_to_log(
    central: f64,
    half_width: f64,
    check_symmetry: bool,
) -> Result<Measurement> {
    if !(half_width >= 0.0) {
        return Err(Error::InvalidInput {
            what: "half-width",
            value: half_width,
        });
    }
    let lower = central - half_width;
    if !(lower > 0.0) || !central.is_finite() {
        return Err(Error::InvalidInput {
            what: "lower bound for log10",
            value: lower,
        });
    }
    let upper = central + half_width;
    if !upper.is_finite() {
        return Err(Error::InvalidInput {
            what: "upper bound for log10",
            value: upper,
        });
    }
    measurement(central.log10(), upper.log10(), lower.log10(), check_symmetry)
}
