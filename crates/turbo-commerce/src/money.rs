//! Money type for representing prices.
//!
//! Uses cents-based integer representation so that formatting a price never
//! shows floating-point noise such as `$9.990000001`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A US dollar amount, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a value from a dollar amount, as the catalog API reports
    /// prices. Rounds to the nearest cent.
    ///
    /// ```
    /// use turbo_commerce::money::Money;
    /// let price = Money::from_dollars(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_dollars(amount: f64) -> Self {
        Self {
            amount_cents: (amount * 100.0).round() as i64,
        }
    }

    /// Format as a display string with grouped thousands (e.g., "$1,299.00").
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Insert a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_dollars() {
        assert_eq!(Money::from_dollars(49.99).amount_cents, 4999);
        assert_eq!(Money::from_dollars(0.1 + 0.2).amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_dollars(49.99).display(), "$49.99");
        assert_eq!(Money::from_dollars(0.05).display(), "$0.05");
    }

    #[test]
    fn test_money_display_groups_thousands() {
        assert_eq!(Money::from_dollars(1299.0).display(), "$1,299.00");
        assert_eq!(Money::from_dollars(1_234_567.89).display(), "$1,234,567.89");
        assert_eq!(Money::from_dollars(-2500.0).to_string(), "-$2,500.00");
    }
}
