//! Relative time-range parsing for aggregation queries.

use chrono::{DateTime, Duration, Utc};

const DEFAULT_LABEL: &str = "7d";
const DEFAULT_DAYS: i64 = 7;

/// A relative lookback window such as `"7d"`, `"2w"`, or `"1m"`.
///
/// `label` preserves the accepted input for echoing back to clients;
/// `days` is the resolved absolute lookback. Unparseable or non-positive
/// input falls back to the 7-day default rather than erroring — the
/// aggregation endpoints always prefer returning data over rejecting a
/// malformed range parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub label: String,
    pub days: i64,
}

impl Range {
    /// Parse `<N>d|w|m` (days, weeks, months at 30 days) with default fallback.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let raw = raw.trim();

        let Some(unit) = raw.chars().last() else {
            return Self::default();
        };
        let digits = &raw[..raw.len() - unit.len_utf8()];
        let Ok(n) = digits.parse::<i64>() else {
            return Self::default();
        };
        if n <= 0 {
            return Self::default();
        }

        let days = match unit {
            'd' => n,
            'w' => n * 7,
            'm' => n * 30,
            _ => return Self::default(),
        };

        Self {
            label: raw.to_string(),
            days,
        }
    }

    /// The inclusive lower bound of the window, `now - days`.
    #[must_use]
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            days: DEFAULT_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_days() {
        let r = Range::parse(Some("7d"));
        assert_eq!(r.days, 7);
        assert_eq!(r.label, "7d");
    }

    #[test]
    fn parses_weeks() {
        assert_eq!(Range::parse(Some("2w")).days, 14);
    }

    #[test]
    fn parses_months_as_thirty_days() {
        assert_eq!(Range::parse(Some("1m")).days, 30);
    }

    #[test]
    fn bogus_input_falls_back_to_default() {
        let r = Range::parse(Some("bogus"));
        assert_eq!(r.days, 7);
        assert_eq!(r.label, "7d");
    }

    #[test]
    fn missing_input_falls_back_to_default() {
        assert_eq!(Range::parse(None), Range::default());
    }

    #[test]
    fn zero_and_negative_fall_back_to_default() {
        assert_eq!(Range::parse(Some("0d")).days, 7);
        assert_eq!(Range::parse(Some("-3d")).days, 7);
    }

    #[test]
    fn empty_string_falls_back_to_default() {
        assert_eq!(Range::parse(Some("")).days, 7);
        assert_eq!(Range::parse(Some("   ")).days, 7);
    }

    #[test]
    fn unknown_unit_falls_back_to_default() {
        assert_eq!(Range::parse(Some("3y")).days, 7);
    }

    #[test]
    fn since_subtracts_days() {
        let now = Utc::now();
        let r = Range::parse(Some("3d"));
        assert_eq!(now - r.since(now), Duration::days(3));
    }
}
