// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::{
    error::{Error, Result},
    sigfigs::format_fixed,
};

/// A number split as _m_ × 10<sup><i>n</i></sup> with _m_ already rounded
/// and rendered in fixed-point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scientific {
    pub mantissa: String,
    pub exponent: i32,
}

impl fmt::Display for Scientific {
    /// Renders `m` for an exponent of 0 and `men` otherwise, e.g. `1.234e8`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 0 {
            write!(f, "{}", self.mantissa)
        } else {
            write!(f, "{}e{}", self.mantissa, self.exponent)
        }
    }
}

/// Splits `value` into a mantissa with `decimals` decimal places and a power
/// of ten.
///
/// By default the exponent is chosen so that 1 ≤ |m| < 10, moving up one
/// order if rounding carries the mantissa to 10. Passing `exponent` fixes
/// the order of magnitude instead, so several numbers can share one.
///
/// # Example
///
/// ```
/// # use scifigs::scientific;
/// assert_eq!(scientific(1.234e8, 3, None).unwrap().to_string(), "1.234e8");
/// assert_eq!(scientific(1.234e8, 1, Some(6)).unwrap().to_string(), "123.4e6");
/// ```
pub fn scientific(value: f64, decimals: u32, exponent: Option<i32>) -> Result<Scientific> {
    if !value.is_finite() {
        return Err(Error::InvalidInput {
            what: "value",
            value,
        });
    }
    let decimals = i32::try_from(decimals).map_err(|_e| Error::Unrepresentable {
        value,
        decimals: i32::MAX,
    })?;
    let split = |exponent: i32| -> Result<Scientific> {
        Ok(Scientific {
            mantissa: format_fixed(value / 10_f64.powi(exponent), decimals)?,
            exponent,
        })
    };
    if let Some(exponent) = exponent {
        return split(exponent);
    }
    if value == 0.0 {
        return split(0);
    }
    let exponent = value.abs().log10().floor() as i32;
    let scientific = split(exponent)?;
    if scientific.mantissa.trim_start_matches('-').starts_with("10") {
        split(exponent + 1)
    } else {
        Ok(scientific)
    }
}

/// Rounds `value` towards positive infinity at the given decimal position.
///
/// Negative `decimals` round up to tens, hundreds, and so on.
pub fn round_up(value: f64, decimals: i32) -> f64 {
    let multiplier = 10_f64.powi(decimals);
    (value * multiplier).ceil() / multiplier
}
