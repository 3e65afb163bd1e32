//! Rotation intervals
//!
//! An interval is a positive magnitude plus a unit, written the same way on
//! the command line and in the settings file: `90s`, `30m`, `3h`, `1d`.
//! A bare number means minutes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl IntervalUnit {
    pub fn secs(&self) -> u64 {
        match self {
            IntervalUnit::Seconds => 1,
            IntervalUnit::Minutes => 60,
            IntervalUnit::Hours => 60 * 60,
            IntervalUnit::Days => 24 * 60 * 60,
        }
    }

    fn suffix(&self) -> char {
        match self {
            IntervalUnit::Seconds => 's',
            IntervalUnit::Minutes => 'm',
            IntervalUnit::Hours => 'h',
            IntervalUnit::Days => 'd',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            's' => Some(IntervalUnit::Seconds),
            'm' => Some(IntervalUnit::Minutes),
            'h' => Some(IntervalUnit::Hours),
            'd' => Some(IntervalUnit::Days),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    pub value: u64,
    pub unit: IntervalUnit,
}

impl Interval {
    pub const fn new(value: u64, unit: IntervalUnit) -> Self {
        Self { value, unit }
    }

    pub fn as_secs(&self) -> u64 {
        self.value.saturating_mul(self.unit.secs())
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.as_secs())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalParseError {
    #[error("empty interval")]
    Empty,
    #[error("unknown interval unit in {0:?} (expected s, m, h or d)")]
    UnknownUnit(String),
    #[error("invalid interval magnitude in {0:?}")]
    InvalidNumber(String),
    #[error("interval {0:?} must be greater than zero")]
    Zero(String),
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let last = s.chars().last().ok_or(IntervalParseError::Empty)?;

        let (digits, unit) = if last.is_ascii_digit() {
            (s.as_str(), IntervalUnit::Minutes)
        } else {
            let unit = IntervalUnit::from_suffix(last)
                .ok_or_else(|| IntervalParseError::UnknownUnit(s.clone()))?;
            (s[..s.len() - last.len_utf8()].trim_end(), unit)
        };

        let value = digits
            .parse::<u64>()
            .map_err(|_| IntervalParseError::InvalidNumber(s.clone()))?;
        if value == 0 {
            return Err(IntervalParseError::Zero(s));
        }

        Ok(Interval { value, unit })
    }
}

impl TryFrom<String> for Interval {
    type Error = IntervalParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

/// Inclusive range the next wait is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalBounds {
    pub min: Interval,
    pub max: Interval,
}

impl Default for IntervalBounds {
    fn default() -> Self {
        Self {
            min: Interval::new(1, IntervalUnit::Minutes),
            max: Interval::new(3, IntervalUnit::Hours),
        }
    }
}

impl IntervalBounds {
    pub fn new(min: Interval, max: Interval) -> Result<Self, String> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min.value == 0 || self.max.value == 0 {
            return Err("interval bounds must be greater than zero".to_string());
        }
        if self.min.as_secs() > self.max.as_secs() {
            return Err(format!(
                "minimum interval {} is longer than maximum {}",
                self.min, self.max
            ));
        }
        Ok(())
    }

    /// Draw a delay uniformly from `[min, max]` whole seconds.
    pub fn draw_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min = self.min.as_secs();
        let max = self.max.as_secs().max(min);
        Duration::from_secs(rng.gen_range(min..=max))
    }
}

impl fmt::Display for IntervalBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn secs(value: u64) -> Interval {
        Interval::new(value, IntervalUnit::Seconds)
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("90s".parse::<Interval>().unwrap().as_secs(), 90);
        assert_eq!("30m".parse::<Interval>().unwrap().as_secs(), 30 * 60);
        assert_eq!("3h".parse::<Interval>().unwrap().as_secs(), 3 * 3600);
        assert_eq!("1d".parse::<Interval>().unwrap().as_secs(), 86_400);
        assert_eq!(" 2H ".parse::<Interval>().unwrap().as_secs(), 7200);
    }

    #[test]
    fn test_bare_number_is_minutes() {
        let interval: Interval = "5".parse().unwrap();
        assert_eq!(interval, Interval::new(5, IntervalUnit::Minutes));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Interval>(), Err(IntervalParseError::Empty));
        assert!(matches!(
            "0m".parse::<Interval>(),
            Err(IntervalParseError::Zero(_))
        ));
        assert!(matches!(
            "-5m".parse::<Interval>(),
            Err(IntervalParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "5w".parse::<Interval>(),
            Err(IntervalParseError::UnknownUnit(_))
        ));
        assert!(matches!(
            "m".parse::<Interval>(),
            Err(IntervalParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for text in ["90s", "30m", "3h", "1d"] {
            let interval: Interval = text.parse().unwrap();
            assert_eq!(interval.to_string(), text);
        }
    }

    #[test]
    fn test_bounds_reject_inverted_range() {
        assert!(IntervalBounds::new(secs(2), secs(3)).is_ok());
        assert!(IntervalBounds::new(secs(3), secs(3)).is_ok());
        assert!(IntervalBounds::new(secs(4), secs(3)).is_err());
        // Compared in seconds, not raw magnitude.
        assert!(IntervalBounds::new(
            Interval::new(90, IntervalUnit::Minutes),
            Interval::new(2, IntervalUnit::Hours)
        )
        .is_ok());
    }

    #[test]
    fn test_draw_delay_stays_inclusive() {
        let bounds = IntervalBounds::new(secs(2), secs(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut saw_two = false;
        let mut saw_three = false;
        for _ in 0..1000 {
            let d = bounds.draw_delay(&mut rng).as_secs();
            assert!(d == 2 || d == 3, "delay {d} outside [2, 3]");
            saw_two |= d == 2;
            saw_three |= d == 3;
        }
        assert!(saw_two && saw_three, "both bounds should be observed");
    }

    #[test]
    fn test_draw_delay_converts_units() {
        let bounds = IntervalBounds::new(
            Interval::new(1, IntervalUnit::Minutes),
            Interval::new(2, IntervalUnit::Minutes),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let d = bounds.draw_delay(&mut rng).as_secs();
            assert!((60..=120).contains(&d));
        }
    }
}
