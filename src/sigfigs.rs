// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    Uncertainty,
    error::{Error, Result},
};

/// A central value and its uncertainty, rounded to a shared number of
/// decimal places and rendered as fixed-point strings.
///
/// The strings keep trailing zeros (`"0.030"`), which is why they are not
/// handed back as floats. Use [`Rounded::central_value`] and
/// [`Rounded::uncertainty_values`] to get numbers again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_with::DeserializeFromStr, serde_with::SerializeDisplay)
)]
pub struct Rounded {
    pub central: String,
    pub uncertainty: Uncertainty<String>,
}

impl Rounded {
    /// Returns the number of digits after the decimal point.
    ///
    /// Values rounded to tens or coarser report 0.
    pub fn decimals(&self) -> usize {
        self.central
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len())
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.uncertainty.is_symmetric()
    }

    /// Parses the rounded central value back into a float.
    pub fn central_value(&self) -> Result<f64> {
        parse_f64(&self.central)
    }

    /// Parses the rounded uncertainties back into floats.
    pub fn uncertainty_values(&self) -> Result<Uncertainty> {
        self.uncertainty.clone().try_map(|s| parse_f64(&s))
    }
}

fn parse_f64(s: &str) -> Result<f64> {
    f64::from_str(s).map_err(|_e| Error::Parse(s.into()))
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uncertainty {
            Uncertainty::Symmetric(dy) => write!(f, "{} ± {dy}", self.central),
            Uncertainty::Asymmetric { plus, minus } => {
                write!(f, "{} +{plus} -{minus}", self.central)
            }
        }
    }
}

static ROUNDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?\d+(?:\.\d+)?)\s*(?:(?:±|\+/-)\s*(\d+(?:\.\d+)?)|\+(\d+(?:\.\d+)?)\s+-(\d+(?:\.\d+)?))$",
    )
    .expect("hard-coded pattern is valid")
});

impl FromStr for Rounded {
    type Err = Error;

    /// Parses the `Display` forms `"123.46 ± 0.08"` (also `+/-`) and
    /// `"5.000 +0.030 -0.012"`.
    fn from_str(s: &str) -> Result<Self> {
        let caps = ROUNDED_RE
            .captures(s.trim())
            .ok_or(Error::Parse(s.into()))?;
        let central = caps.get(1).ok_or(Error::Parse(s.into()))?.as_str();
        let uncertainty = if let Some(dy) = caps.get(2) {
            Uncertainty::Symmetric(dy.as_str().to_string())
        } else {
            let plus = caps.get(3).ok_or(Error::Parse(s.into()))?;
            let minus = caps.get(4).ok_or(Error::Parse(s.into()))?;
            Uncertainty::Asymmetric {
                plus: plus.as_str().to_string(),
                minus: minus.as_str().to_string(),
            }
        };
        Ok(Self {
            central: central.to_string(),
            uncertainty,
        })
    }
}

/// Returns the number of decimal places an uncertainty should be quoted to.
///
/// The uncertainty keeps one significant figure, or two if its leading
/// digit (after rounding to one decimal place of the normalized factor) is
/// a 1. A negative result means rounding to the left of the decimal point,
/// e.g. -1 for tens.
///
/// # Example
///
/// ```
/// # use scifigs::decimal_places;
/// assert_eq!(decimal_places(0.08).unwrap(), 2);
/// assert_eq!(decimal_places(0.012).unwrap(), 3);
/// assert_eq!(decimal_places(56.0).unwrap(), -1);
/// ```
pub fn decimal_places(dy: f64) -> Result<i32> {
    let magnitude = dy.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(Error::InvalidInput {
            what: "uncertainty",
            value: dy,
        });
    }
    let mut exponent = magnitude.log10().floor() as i32;
    let mut factor = magnitude / 10_f64.powi(exponent);
    // log10 may land one ulp off an exact power of ten
    if factor >= 10.0 {
        exponent += 1;
        factor /= 10.0;
    } else if factor < 1.0 {
        exponent -= 1;
        factor *= 10.0;
    }
    if has_leading_one(factor) {
        exponent -= 1;
    }
    Ok(-exponent)
}

/// `factor` is in [1, 10).
#[inline]
fn has_leading_one(factor: f64) -> bool {
    (factor * 10.0).round() < 20.0
}

/// Rounds `value` to `decimals` places and renders it in fixed-point.
///
/// Exactly `decimals` digits follow the point; zero or negative `decimals`
/// render an integer with no point. Ties round to even, and a result that
/// rounds to zero carries no sign. Any finite value and any precision is
/// accepted.
///
/// # Example
///
/// ```
/// # use scifigs::format_fixed;
/// assert_eq!(format_fixed(0.03, 3).unwrap(), "0.030");
/// assert_eq!(format_fixed(1234.0, -1).unwrap(), "1230");
/// ```
pub fn format_fixed(value: f64, decimals: i32) -> Result<String> {
    let unrepresentable = || Error::Unrepresentable { value, decimals };
    if !value.is_finite() {
        return Err(unrepresentable());
    }
    let scaled = scaled_digits(value, decimals).ok_or_else(unrepresentable)?;
    let places = decimals.unsigned_abs() as usize;
    let mut out = String::with_capacity(scaled.len() + places + 2);
    if value < 0.0 && scaled != "0" {
        out.push('-');
    }
    if decimals > 0 {
        let padded = format!("{scaled:0>width$}", width = places + 1);
        let (int, frac) = padded.split_at(padded.len() - places);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else {
        out.push_str(&scaled);
        if scaled != "0" {
            out.push_str(&"0".repeat(places));
        }
    }
    Ok(out)
}

/// Returns the digits of |`value`| × 10<sup>`decimals`</sup>, rounded half
/// to even to an integer.
///
/// The float is read as its shortest round-trip decimal, split into an
/// integer mantissa of at most 17 digits and a power of ten. Only the
/// mantissa passes through `Decimal`, so neither the magnitude of `value`
/// nor `decimals` is limited by its 28-digit range.
fn scaled_digits(value: f64, decimals: i32) -> Option<String> {
    // e.g. `6.626e-34`
    let sci = format!("{:e}", value.abs());
    let (significand, exponent) = sci.split_once('e')?;
    let exponent: i64 = exponent.parse().ok()?;
    let (int, frac) = significand.split_once('.').unwrap_or((significand, ""));
    let mantissa: i128 = format!("{int}{frac}").parse().ok()?;
    if mantissa == 0 {
        return Some("0".to_string());
    }
    // |value| = mantissa × 10^power
    let power = exponent - i64::try_from(frac.len()).ok()?;
    let shift = -i64::from(decimals) - power;
    if shift <= 0 {
        let zeros = usize::try_from(-shift).ok()?;
        return Some(format!("{mantissa}{}", "0".repeat(zeros)));
    }
    let digits = i64::try_from(int.len() + frac.len()).ok()?;
    if shift > digits {
        // below 0.1 after scaling
        return Some("0".to_string());
    }
    let rounded = Decimal::try_from_i128_with_scale(mantissa, u32::try_from(shift).ok()?)
        .ok()?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    Some(rounded.to_string())
}

/// Rounds a central value and its uncertainty to the same, significant-
/// figure-correct number of decimal places.
///
/// Each uncertainty gets its own decimal count from [`decimal_places`]; the
/// finest one is applied to every string so the central value never claims
/// more precision than the best-known uncertainty. If an asymmetric pair
/// renders identically it collapses to a single symmetric string.
///
/// # Example
///
/// ```
/// # use scifigs::{sig_figs, Uncertainty};
/// let r = sig_figs(5.0, [0.03, 0.012]).unwrap();
/// assert_eq!(r.central, "5.000");
/// assert_eq!(
///     r.uncertainty,
///     Uncertainty::Asymmetric { plus: "0.030".into(), minus: "0.012".into() }
/// );
///
/// let r = sig_figs(123.456, 0.08).unwrap();
/// assert_eq!(r.to_string(), "123.46 ± 0.08");
/// ```
pub fn sig_figs(central: f64, uncertainty: impl Into<Uncertainty>) -> Result<Rounded> {
    if !central.is_finite() {
        return Err(Error::InvalidInput {
            what: "central value",
            value: central,
        });
    }
    let uncertainty = uncertainty.into();
    let decimals = uncertainty
        .iter()
        .try_fold(i32::MIN, |finest, &dy| Ok::<_, Error>(finest.max(decimal_places(dy)?)))?;
    tracing::trace!(central, ?uncertainty, decimals, "rounding to shared precision");
    let formatted = uncertainty
        .try_map(|dy| format_fixed(dy, decimals))?
        .collapse();
    Ok(Rounded {
        central: format_fixed(central, decimals)?,
        uncertainty: formatted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn fraction_digits(s: &str) -> usize {
        s.split_once('.').map_or(0, |(_, f)| f.len())
    }

    /// Positive values spread over 1e-40..1e40.
    fn magnitude() -> impl Strategy<Value = f64> {
        (1.0_f64..10.0, -40_i32..40).prop_map(|(m, e)| m * 10_f64.powi(e))
    }

    #[test]
    fn single_uncertainty() {
        let r = sig_figs(123.456, 0.08).unwrap();
        assert_eq!(r.central, "123.46");
        assert_eq!(r.uncertainty, Uncertainty::Symmetric("0.08".to_string()));
        assert_eq!(r.decimals(), 2);
    }

    #[test]
    fn asymmetric_shares_finest_precision() {
        let r = sig_figs(5.0, [0.03, 0.012]).unwrap();
        assert_eq!(r.central, "5.000");
        assert_eq!(r.uncertainty.into_vec(), vec!["0.030", "0.012"]);
    }

    #[test]
    fn leading_one_gets_extra_digit() {
        assert_eq!(decimal_places(0.012).unwrap(), 3);
        assert_eq!(decimal_places(0.018).unwrap(), 3);
        assert_eq!(decimal_places(0.025).unwrap(), 2);
        assert_eq!(decimal_places(0.0196).unwrap(), 2);
        assert_eq!(decimal_places(1.0).unwrap(), 1);
        assert_eq!(decimal_places(0.001).unwrap(), 4);
        let r = sig_figs(2.71828, 0.15).unwrap();
        assert_eq!(r.to_string(), "2.72 ± 0.15");
    }

    #[test]
    fn coarse_uncertainty_rounds_left_of_point() {
        assert_eq!(decimal_places(56.0).unwrap(), -1);
        assert_eq!(decimal_places(300.0).unwrap(), -2);
        let r = sig_figs(1234.0, 56.0).unwrap();
        assert_eq!(r.central, "1230");
        assert_eq!(r.uncertainty, Uncertainty::Symmetric("60".to_string()));
        assert_eq!(r.decimals(), 0);
        let r = sig_figs(98765.4, 4.0).unwrap();
        assert_eq!(r.to_string(), "98765 ± 4");
    }

    #[test]
    fn identical_pair_collapses() {
        let r = sig_figs(7.0, [0.2, 0.2]).unwrap();
        assert!(r.is_symmetric());
        assert_eq!(r.to_string(), "7.0 ± 0.2");
    }

    #[test]
    fn pair_equal_after_rounding_collapses() {
        let r = sig_figs(10.0, [0.5, 0.48]).unwrap();
        assert_eq!(r.uncertainty, Uncertainty::Symmetric("0.5".to_string()));
        let r = sig_figs(10.0, [0.6, 0.48]).unwrap();
        assert!(!r.is_symmetric());
        assert_eq!(r.to_string(), "10.0 +0.6 -0.5");
    }

    #[test]
    fn order_is_preserved() {
        let r = sig_figs(1.0, [0.012, 0.03]).unwrap();
        assert_eq!(r.uncertainty.into_vec(), vec!["0.012", "0.030"]);
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(
            sig_figs(f64::NAN, 0.1),
            Err(Error::InvalidInput {
                what: "central value",
                ..
            })
        ));
        assert!(matches!(
            sig_figs(1.0, 0.0),
            Err(Error::InvalidInput {
                what: "uncertainty",
                ..
            })
        ));
        assert!(sig_figs(1.0, [0.1, f64::INFINITY]).is_err());
    }

    #[test]
    fn format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(5.0, 3).unwrap(), "5.000");
        assert_eq!(format_fixed(0.48, 1).unwrap(), "0.5");
        assert_eq!(format_fixed(-2.5, 0).unwrap(), "-2");
        assert_eq!(format_fixed(1250.0, -2).unwrap(), "1200");
        let parsed = Decimal::from_str(&format_fixed(0.125, 2).unwrap()).unwrap();
        assert_eq!(parsed, dec!(0.12));
    }

    #[test]
    fn format_fixed_beyond_decimal_range() {
        let big = format_fixed(1e30, 2).unwrap();
        assert_eq!(big, format!("1{}.00", "0".repeat(30)));
        let fine = format_fixed(1.0, 40).unwrap();
        assert_eq!(fine, format!("1.{}", "0".repeat(40)));
        assert_eq!(format_fixed(2.5e-35, 35).unwrap(), format!("0.{}2", "0".repeat(34)));
        assert_eq!(format_fixed(1.5e-35, 35).unwrap(), format!("0.{}2", "0".repeat(34)));
        assert_eq!(format_fixed(3e-40, 2).unwrap(), "0.00");
        assert_eq!(format_fixed(-3e-40, 2).unwrap(), "0.00");
        assert_eq!(format_fixed(0.0, -3).unwrap(), "0");
        assert!(matches!(
            format_fixed(f64::NAN, 1),
            Err(Error::Unrepresentable { .. })
        ));
        assert!(format_fixed(f64::INFINITY, 1).is_err());
    }

    #[test]
    fn large_central_keeps_uncertainty_decimals() {
        let r = sig_figs(1e27, 0.01).unwrap();
        assert_eq!(r.central, format!("1{}.000", "0".repeat(27)));
        assert_eq!(r.uncertainty, Uncertainty::Symmetric("0.010".to_string()));
        assert_eq!(fraction_digits(&r.central), 3);
    }

    #[test]
    fn huge_values_round_left_of_point() {
        let r = sig_figs(1e30, 1e29).unwrap();
        assert_eq!(r.central, format!("1{}", "0".repeat(30)));
        assert_eq!(
            r.uncertainty,
            Uncertainty::Symmetric(format!("1{}", "0".repeat(29)))
        );
        assert_eq!(r.central_value().unwrap(), 1e30);
    }

    #[test]
    fn tiny_values_keep_all_decimals() {
        let r = sig_figs(6.626e-34, 8e-42).unwrap();
        assert_eq!(r.decimals(), 42);
        assert_eq!(r.central, format!("0.{}662600000", "0".repeat(33)));
        assert_eq!(
            r.uncertainty,
            Uncertainty::Symmetric(format!("0.{}8", "0".repeat(41)))
        );
    }

    #[test]
    fn display_from_str() {
        let r = sig_figs(5.0, [0.03, 0.012]).unwrap();
        let s = r.to_string();
        assert_eq!(s, "5.000 +0.030 -0.012");
        assert_eq!(Rounded::from_str(&s).unwrap(), r);

        let r = Rounded::from_str("-123.46 +/- 0.08").unwrap();
        assert_eq!(r.central, "-123.46");
        assert_eq!(r.uncertainty, Uncertainty::Symmetric("0.08".to_string()));
        assert_eq!(r.central_value().unwrap(), -123.46);

        assert!(Rounded::from_str("not a number").is_err());
        assert!(Rounded::from_str("1.0 ± -0.1").is_err());
    }

    #[test]
    fn uncertainty_values_reparse() {
        let r = sig_figs(5.0, [0.03, 0.012]).unwrap();
        assert_eq!(
            r.uncertainty_values().unwrap(),
            Uncertainty::<f64>::from([0.03, 0.012])
        );
    }

    proptest! {
        #[test]
        fn central_matches_uncertainty_precision(y in magnitude(), negative in any::<bool>(), dy in magnitude()) {
            let y = if negative { -y } else { y };
            let r = sig_figs(y, dy).unwrap();
            let Uncertainty::Symmetric(s) = &r.uncertainty else {
                panic!("single uncertainty must stay symmetric");
            };
            prop_assert_eq!(fraction_digits(&r.central), fraction_digits(s));
        }

        #[test]
        fn equal_pair_always_collapses(y in -1e6_f64..1e6, dy in 1e-6_f64..1e6) {
            let r = sig_figs(y, [dy, dy]).unwrap();
            prop_assert!(r.is_symmetric());
        }

        #[test]
        fn display_round_trips(y in -1e4_f64..1e4, plus in 1e-3_f64..1e3, minus in 1e-3_f64..1e3) {
            let r = sig_figs(y, [plus, minus]).unwrap();
            prop_assert_eq!(Rounded::from_str(&r.to_string()).unwrap(), r);
        }
    }
}
