// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use num_traits::Float;

use crate::error::{Error, Result};

/// The default maximum number of keys read while scanning for a bracket.
pub const SCAN_LIMIT: usize = 10_000;

/// Indices of the two keys straddling a query.
///
/// `lower` is the last key strictly below the query and `upper` the first
/// key at or above it. Both clamp to 0 when the query precedes the first key.
/// When the query follows the last key, `upper` is the first key of the
/// trailing run of equal keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    pub lower: usize,
    pub upper: usize,
}

/// A sorted key slice and the results aligned with it.
///
/// Keys must be in ascending order; this is not checked.
#[derive(Copy, Clone, Debug)]
pub struct LookupTable<'a, F, T> {
    keys: &'a [F],
    results: &'a [T],
    scan_limit: usize,
}

impl<'a, F: Float, T> LookupTable<'a, F, T> {
    pub fn new(keys: &'a [F], results: &'a [T]) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::EmptyKeys);
        }
        if keys.len() != results.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                results: results.len(),
            });
        }
        Ok(Self {
            keys,
            results,
            scan_limit: SCAN_LIMIT,
        })
    }

    /// Sets the maximum number of keys [`LookupTable::bracket`] may read.
    #[inline]
    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Finds the keys straddling `query` by a forward scan.
    ///
    /// If the scan runs off the end, it backs up through any run of equal
    /// trailing keys so that `lower` and `upper` still differ where possible.
    pub fn bracket(&self, query: F) -> Result<Bracket> {
        let keys = self.keys;
        // `i` is one past the last key read
        let mut i = 0;
        let mut current = F::neg_infinity();
        while current < query {
            if i == keys.len() {
                // Bracket on the last two distinct keys, so `upper` is the
                // first key of the trailing run. Stepping back one key further
                // would bracket the third- and second-to-last keys instead.
                while i >= 2 && keys[i - 1] == keys[i - 2] {
                    i -= 1;
                }
                break;
            }
            current = keys[i];
            i += 1;
            if i > self.scan_limit {
                tracing::warn!(limit = self.scan_limit, "lookup scan limit exceeded");
                return Err(Error::ScanLimitExceeded {
                    limit: self.scan_limit,
                });
            }
        }
        let bracket = Bracket {
            lower: i.saturating_sub(2),
            upper: i.saturating_sub(1),
        };
        tracing::trace!(?bracket, "bracketed query");
        Ok(bracket)
    }

    /// Returns the result aligned with the key nearest to `query`, or `None`
    /// if that key is farther away than `threshold`.
    ///
    /// When both sides of the bracket are equally close the upper one wins.
    pub fn nearest(&self, query: F, threshold: F) -> Result<Option<&'a T>> {
        if threshold.is_nan() || threshold < F::zero() {
            return Err(Error::InvalidInput {
                what: "threshold",
                value: threshold.to_f64().unwrap_or(f64::NAN),
            });
        }
        let Bracket { lower, upper } = self.bracket(query)?;
        let upper_diff = (self.keys[upper] - query).abs();
        let lower_diff = (query - self.keys[lower]).abs();
        let (index, diff) = if upper_diff > lower_diff {
            (lower, lower_diff)
        } else {
            (upper, upper_diff)
        };
        if diff <= threshold {
            Ok(self.results.get(index))
        } else {
            tracing::debug!(index, "nearest key is beyond threshold");
            Ok(None)
        }
    }
}

/// Looks up the result aligned with the key nearest to `query`.
///
/// `keys` must be sorted in ascending order and `results` must have the same
/// length. Returns `Ok(None)` when the nearest key is more than `threshold`
/// away.
///
/// # Example
///
/// ```
/// # use scifigs::lookup;
/// let keys = [1.0, 3.0, 5.0, 9.0];
/// let results = ['a', 'b', 'c', 'd'];
/// assert_eq!(lookup(5.2, &keys, &results, 0.5).unwrap(), Some(&'c'));
/// assert_eq!(lookup(7.0, &keys, &results, 0.5).unwrap(), None);
/// ```
pub fn lookup<'a, F: Float, T>(
    query: F,
    keys: &'a [F],
    results: &'a [T],
    threshold: F,
) -> Result<Option<&'a T>> {
    LookupTable::new(keys, results)?.nearest(query, threshold)
}
