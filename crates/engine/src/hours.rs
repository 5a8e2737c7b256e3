use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Billable time represented as **hundredths of an hour**.
///
/// Hours mirror the integer-cents money representation so consumption folds
/// and utilization math stay exact: 1.25h is stored as `125`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct HoursCenti(i64);

impl HoursCenti {
    pub const ZERO: HoursCenti = HoursCenti(0);

    /// Creates a new value from hundredths of an hour.
    #[must_use]
    pub const fn new(centi: i64) -> Self {
        Self(centi)
    }

    /// Returns the raw value in hundredths of an hour.
    #[must_use]
    pub const fn centi(self) -> i64 {
        self.0
    }

    /// Returns `true` if the value is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `self` as a percentage of `authorized`.
    ///
    /// Returns `None` when `authorized` is zero or negative ("utilization
    /// not applicable").
    #[must_use]
    pub fn percent_of(self, authorized: HoursCenti) -> Option<f64> {
        if authorized.0 <= 0 {
            return None;
        }
        Some(self.0 as f64 * 100.0 / authorized.0 as f64)
    }
}

impl fmt::Display for HoursCenti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}h", abs / 100, abs % 100)
    }
}

impl From<i64> for HoursCenti {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<HoursCenti> for i64 {
    fn from(value: HoursCenti) -> Self {
        value.0
    }
}

impl Add for HoursCenti {
    type Output = HoursCenti;

    fn add(self, rhs: HoursCenti) -> Self::Output {
        HoursCenti(self.0 + rhs.0)
    }
}

impl AddAssign for HoursCenti {
    fn add_assign(&mut self, rhs: HoursCenti) {
        self.0 += rhs.0;
    }
}

impl Sub for HoursCenti {
    type Output = HoursCenti;

    fn sub(self, rhs: HoursCenti) -> Self::Output {
        HoursCenti(self.0 - rhs.0)
    }
}

impl SubAssign for HoursCenti {
    fn sub_assign(&mut self, rhs: HoursCenti) {
        self.0 -= rhs.0;
    }
}

impl Sum for HoursCenti {
    fn sum<I: Iterator<Item = HoursCenti>>(iter: I) -> Self {
        HoursCenti(iter.map(|h| h.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_hours() {
        assert_eq!(HoursCenti::new(0).to_string(), "0.00h");
        assert_eq!(HoursCenti::new(125).to_string(), "1.25h");
        assert_eq!(HoursCenti::new(8500).to_string(), "85.00h");
    }

    #[test]
    fn percent_of_full_budget() {
        let pct = HoursCenti::new(8500)
            .percent_of(HoursCenti::new(10000))
            .unwrap();
        assert!((pct - 85.0).abs() < f64::EPSILON);
        assert_eq!(HoursCenti::new(10).percent_of(HoursCenti::ZERO), None);
    }
}
