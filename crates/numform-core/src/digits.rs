//! Digit normalization.
//!
//! Every entry point that turns raw text into a generator pool goes through
//! [`DigitSet::parse`]: non-digits are discarded, duplicates removed and the
//! remaining digits sorted ascending. Combination outputs inherit that order.

use std::fmt;

use serde::Serialize;

/// An ordered, duplicate-free set of decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub struct DigitSet(Vec<char>);

impl DigitSet {
    /// Normalize raw text into a digit pool.
    ///
    /// Input with no digits yields an empty set, which downstream generators
    /// treat as "no results".
    pub fn parse(raw: &str) -> Self {
        let mut digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
        digits.sort_unstable();
        digits.dedup();
        Self(digits)
    }

    /// Re-derive a pool from alphabet-shaped pipeline data.
    pub fn from_items<S: AsRef<str>>(items: &[S]) -> Self {
        let mut digits: Vec<char> = items
            .iter()
            .flat_map(|item| item.as_ref().chars())
            .filter(char::is_ascii_digit)
            .collect();
        digits.sort_unstable();
        digits.dedup();
        Self(digits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, digit: char) -> bool {
        self.0.binary_search(&digit).is_ok()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    /// One single-character string per digit, the initial pipeline data.
    pub fn as_strings(&self) -> Vec<String> {
        self.0.iter().map(char::to_string).collect()
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl From<DigitSet> for String {
    fn from(set: DigitSet) -> Self {
        set.to_string()
    }
}
