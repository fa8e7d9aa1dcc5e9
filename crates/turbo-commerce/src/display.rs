//! Formatting helpers for prices, names, dates and ratings.

use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// Number of glyphs in a star bar.
const MAX_STARS: usize = 5;

/// Format a dollar amount the en-US way, e.g. `$1,234.56`.
pub fn format_price(price: f64) -> String {
    Money::from_dollars(price).display()
}

/// Up to two uppercase initials from a space-separated name.
///
/// Empty words contribute nothing, so `"Ada  Lovelace"` still yields `"AL"`.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect()
}

/// A five-glyph star bar for a rating, rounded to the nearest star.
pub fn render_stars(rating: f64) -> String {
    let filled = if rating.is_nan() {
        0
    } else {
        rating.round().clamp(0.0, MAX_STARS as f64) as usize
    };
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(MAX_STARS - filled));
    stars
}

/// Granularity of relative review dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDateStyle {
    /// Today, Yesterday, then days, months and years.
    #[default]
    Days,
    /// Down to minutes: just now, minutes, hours, then days and up.
    Fine,
}

impl RelativeDateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeDateStyle::Days => "days",
            RelativeDateStyle::Fine => "fine",
        }
    }
}

impl FromStr for RelativeDateStyle {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" => Ok(RelativeDateStyle::Days),
            "fine" => Ok(RelativeDateStyle::Fine),
            _ => Err(CommerceError::invalid_option("relative date style", s)),
        }
    }
}

impl fmt::Display for RelativeDateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describe `date` relative to `now`, e.g. `3 days ago`.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates. Anything else
/// is returned unchanged. Dates in the future count as today.
pub fn format_relative_date(date: &str, now: DateTime<Utc>, style: RelativeDateStyle) -> String {
    let Some(then) = parse_date(date) else {
        return date.to_string();
    };
    let elapsed = now.signed_duration_since(then);

    match style {
        RelativeDateStyle::Days => match elapsed.num_days().max(0) {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            days => coarse(days),
        },
        RelativeDateStyle::Fine => {
            let minutes = elapsed.num_minutes().max(0);
            match minutes {
                0 => "just now".to_string(),
                1..=59 => ago(minutes, "minute"),
                60..=1439 => ago(minutes / 60, "hour"),
                _ => coarse(elapsed.num_days()),
            }
        }
    }
}

fn coarse(days: i64) -> String {
    if days < 30 {
        ago(days, "day")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn days_before(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(9.99), "$9.99");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("mary jane watson"), "MJ");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("Ada  Lovelace"), "AL");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars(4.94), "★★★★★");
        assert_eq!(render_stars(3.2), "★★★☆☆");
        assert_eq!(render_stars(0.0), "☆☆☆☆☆");
        assert_eq!(render_stars(9.0), "★★★★★");
        assert_eq!(render_stars(f64::NAN), "☆☆☆☆☆");
    }

    #[test]
    fn test_relative_days_buckets() {
        let style = RelativeDateStyle::Days;
        assert_eq!(format_relative_date(&days_before(0), now(), style), "Today");
        assert_eq!(format_relative_date(&days_before(1), now(), style), "Yesterday");
        assert_eq!(format_relative_date(&days_before(5), now(), style), "5 days ago");
        assert_eq!(format_relative_date(&days_before(45), now(), style), "1 month ago");
        assert_eq!(format_relative_date(&days_before(200), now(), style), "6 months ago");
        assert_eq!(format_relative_date(&days_before(800), now(), style), "2 years ago");
    }

    #[test]
    fn test_relative_fine_buckets() {
        let style = RelativeDateStyle::Fine;
        let at = |d: Duration| (now() - d).to_rfc3339();
        assert_eq!(format_relative_date(&at(Duration::seconds(20)), now(), style), "just now");
        assert_eq!(format_relative_date(&at(Duration::minutes(1)), now(), style), "1 minute ago");
        assert_eq!(format_relative_date(&at(Duration::minutes(42)), now(), style), "42 minutes ago");
        assert_eq!(format_relative_date(&at(Duration::hours(5)), now(), style), "5 hours ago");
        assert_eq!(format_relative_date(&at(Duration::days(3)), now(), style), "3 days ago");
    }

    #[test]
    fn test_relative_date_edge_cases() {
        let style = RelativeDateStyle::Days;
        assert_eq!(format_relative_date("not a date", now(), style), "not a date");
        assert_eq!(format_relative_date("2024-05-30", now(), style), "2 days ago");
        let future = (now() + Duration::days(3)).to_rfc3339();
        assert_eq!(format_relative_date(&future, now(), style), "Today");
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Fine".parse::<RelativeDateStyle>().unwrap(), RelativeDateStyle::Fine);
        assert!("weeks".parse::<RelativeDateStyle>().is_err());
        assert_eq!(RelativeDateStyle::default(), RelativeDateStyle::Days);
    }
}
