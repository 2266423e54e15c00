//! Derived statistics: display counts and percentages of all pages.

use std::fmt;

use crate::error::{FactsError, Result};
use crate::normalize::Results;
use crate::queries::Stat;

pub const DEFAULT_DECIMALS: u32 = 2;

/// Formats an integer with `,` between groups of three digits.
pub fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A percentage shown with a fixed number of decimals (`12.50`, not `12.5`).
/// Rounding happens at display time on the exact binary value, so ties such
/// as `6.25` to one decimal go to even (`6.2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent {
    pub value: f64,
    pub decimals: u32,
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.decimals as usize, self.value)
    }
}

/// The shared denominator: non-redirect pages in the snapshot. Constructed
/// once after every query has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTotals {
    non_redirect_pages: u64,
}

impl PageTotals {
    pub fn new(non_redirect_pages: u64) -> Result<Self> {
        if non_redirect_pages == 0 {
            return Err(FactsError::EmptySnapshot);
        }
        Ok(PageTotals { non_redirect_pages })
    }

    pub fn from_results(results: &Results) -> Result<Self> {
        PageTotals::new(results.count(Stat::NonRedirectPagesCount)?)
    }

    pub fn pages(&self) -> u64 {
        self.non_redirect_pages
    }

    /// `n / pages * 100`, displayed rounded to `decimals`.
    pub fn percent_of_total(&self, n: u64, decimals: u32) -> Percent {
        Percent {
            value: n as f64 / self.non_redirect_pages as f64 * 100.0,
            decimals,
        }
    }

    pub fn percent(&self, n: u64) -> Percent {
        self.percent_of_total(n, DEFAULT_DECIMALS)
    }
}
