// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use crate::error::{Error, Result};

/// A symmetric (±) or asymmetric (+/−) uncertainty.
///
/// The same shape is used for raw magnitudes (`Uncertainty<f64>`, the
/// default) and for their rounded renderings (`Uncertainty<String>`).
/// For the asymmetric form the order is always plus, then minus.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Uncertainty<T = f64> {
    Symmetric(T),
    Asymmetric { plus: T, minus: T },
}

impl<T> Uncertainty<T> {
    /// Returns the number of values held, 1 or 2.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Uncertainty::Symmetric(_) => 1,
            Uncertainty::Asymmetric { .. } => 2,
        }
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Uncertainty::Symmetric(_))
    }

    /// Iterates over the values in plus, minus order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (first, second) = match self {
            Uncertainty::Symmetric(dy) => (dy, None),
            Uncertainty::Asymmetric { plus, minus } => (plus, Some(minus)),
        };
        std::iter::once(first).chain(second)
    }

    pub fn try_map<U, E, F>(self, mut f: F) -> std::result::Result<Uncertainty<U>, E>
    where
        F: FnMut(T) -> std::result::Result<U, E>,
    {
        Ok(match self {
            Uncertainty::Symmetric(dy) => Uncertainty::Symmetric(f(dy)?),
            Uncertainty::Asymmetric { plus, minus } => Uncertainty::Asymmetric {
                plus: f(plus)?,
                minus: f(minus)?,
            },
        })
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Uncertainty::Symmetric(dy) => vec![dy],
            Uncertainty::Asymmetric { plus, minus } => vec![plus, minus],
        }
    }
}

impl<T: PartialEq> Uncertainty<T> {
    /// Collapses an asymmetric pair whose two sides are equal into the
    /// symmetric form.
    pub fn collapse(self) -> Self {
        match self {
            Uncertainty::Asymmetric { plus, minus } if plus == minus => {
                Uncertainty::Symmetric(plus)
            }
            other => other,
        }
    }
}

impl Uncertainty<f64> {
    /// Returns the upward error, which equals the downward one if symmetric.
    #[inline]
    pub fn plus(&self) -> f64 {
        match *self {
            Uncertainty::Symmetric(dy) => dy,
            Uncertainty::Asymmetric { plus, .. } => plus,
        }
    }

    /// Returns the downward error, which equals the upward one if symmetric.
    #[inline]
    pub fn minus(&self) -> f64 {
        match *self {
            Uncertainty::Symmetric(dy) => dy,
            Uncertainty::Asymmetric { minus, .. } => minus,
        }
    }
}

impl From<f64> for Uncertainty {
    fn from(dy: f64) -> Self {
        Uncertainty::Symmetric(dy)
    }
}

impl From<(f64, f64)> for Uncertainty {
    fn from((plus, minus): (f64, f64)) -> Self {
        Uncertainty::Asymmetric { plus, minus }
    }
}

impl From<[f64; 2]> for Uncertainty {
    fn from([plus, minus]: [f64; 2]) -> Self {
        Uncertainty::Asymmetric { plus, minus }
    }
}

impl TryFrom<&[f64]> for Uncertainty {
    type Error = Error;

    /// Accepts `[dy]` or `[plus, minus]`; any other length is rejected.
    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [dy] => Ok(Uncertainty::Symmetric(dy)),
            [plus, minus] => Ok(Uncertainty::Asymmetric { plus, minus }),
            _ => Err(Error::UncertaintyCount(values.len())),
        }
    }
}
