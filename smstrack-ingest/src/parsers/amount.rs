//! Amount extraction from SMS / bank message text.
//!
//! Expected shapes:
//!   "Rs debited: ₹1,234.50 at AMAZON"   -> 1234.5
//!   "Paid ₹ 250 via UPI"                -> 250
//!   "Swiggy order"                      -> 0

use regex::Regex;
use std::sync::LazyLock;

use smstrack_core::DEFAULT_SYMBOL;

static DEFAULT_EXTRACTOR: LazyLock<Option<AmountExtractor>> =
    LazyLock::new(|| AmountExtractor::new(DEFAULT_SYMBOL).ok());

/// Extract the first ₹-marked amount from a message, or 0.
pub fn extract_amount(message: &str) -> f64 {
    DEFAULT_EXTRACTOR
        .as_ref()
        .map_or(0.0, |extractor| extractor.extract(message))
}

/// Amount extractor for one currency symbol
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    symbol: String,
    re: Regex,
}

impl AmountExtractor {
    pub fn new(symbol: &str) -> Result<Self, regex::Error> {
        // ASCII digits only: `\d` is Unicode-aware in `regex`.
        let pattern = format!(r"{}\s?(?P<amt>[0-9,]+\.?[0-9]*)", regex::escape(symbol));
        Ok(Self {
            symbol: symbol.to_string(),
            re: Regex::new(&pattern)?,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Leftmost match only. Grouping commas are dropped before parsing;
    /// anything that still fails to parse yields 0.
    pub fn extract(&self, message: &str) -> f64 {
        let Some(caps) = self.re.captures(message) else {
            return 0.0;
        };

        let amt_raw = caps["amt"].replace(',', "");
        match amt_raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::debug!(raw = &caps["amt"], "unparseable amount after currency symbol");
                0.0
            }
        }
    }

    /// Best-effort read of a structured amount cell ("1,200", "₹ 45.5", "-20").
    pub fn parse_cell(&self, cell: &str) -> Option<f64> {
        let cleaned: String = cell
            .trim()
            .trim_start_matches(self.symbol.as_str())
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
