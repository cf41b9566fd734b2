// SPDX-FileCopyrightText: 2025 Matthew Milner <matterhorn103@proton.me>
// SPDX-License-Identifier: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("Invalid {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Expected one or two uncertainties, got {0}")]
    UncertaintyCount(usize),

    #[error("Lookup scanned more than {limit} elements; is the key array sorted?")]
    ScanLimitExceeded { limit: usize },

    #[error("Lookup key array is empty")]
    EmptyKeys,

    #[error("Lookup arrays differ in length (keys={keys}, results={results})")]
    LengthMismatch { keys: usize, results: usize },

    #[error("Cannot round {value} to {decimals} decimal places")]
    Unrepresentable { value: f64, decimals: i32 },

    #[error("Failed to parse: {0}")]
    Parse(String),
}
