//! Calendar range with day and hour iteration.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::DayRangeError;

/// An inclusive range of calendar days (UTC).
///
/// The daily series spans the repository's creation day through today; the
/// hourly series spans the trailing-window days. Both are driven by the
/// iterators on this type so the dense, gap-free shape of the output comes
/// from the range itself rather than from the observed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DayRange {
    /// Creates a new day range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DayRangeError> {
        if start > end {
            return Err(DayRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns an iterator over every day in the range.
    pub fn days(&self) -> DayIterator {
        DayIterator {
            current: self.start,
            end: self.end,
        }
    }

    /// Returns an iterator over every hour in the range.
    pub fn hours(&self) -> HourIterator {
        HourIterator::new(self.start, self.end)
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over all days in a range.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: NaiveDate,
    end: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            return None;
        }

        let result = self.current;
        self.current += chrono::TimeDelta::days(1);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current > self.end {
            return (0, Some(0));
        }
        let days = (self.end - self.current).num_days() as usize + 1;
        (days, Some(days))
    }
}

impl ExactSizeIterator for DayIterator {}

/// Iterator over all hours in a day range.
#[derive(Debug, Clone)]
pub struct HourIterator {
    current: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl HourIterator {
    /// Creates a new hour iterator for the given day range.
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let start_dt =
            Utc.from_utc_datetime(&start.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()));
        // End at 23:00 of the end date (last hour of the day)
        let end_dt =
            Utc.from_utc_datetime(&end.and_time(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));

        Self {
            current: start_dt,
            end: end_dt,
        }
    }
}

impl Iterator for HourIterator {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            return None;
        }

        let result = self.current;
        self.current += chrono::TimeDelta::hours(1);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current > self.end {
            return (0, Some(0));
        }
        let hours = (self.end - self.current).num_hours() as usize + 1;
        (hours, Some(hours))
    }
}

impl ExactSizeIterator for HourIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_day_range_new() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DayRange::new(start, end).unwrap();

        assert_eq!(range.start, start);
        assert_eq!(range.end, end);
        assert_eq!(range.total_days(), 31);
    }

    #[test]
    fn test_day_range_invalid() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DayRange::new(start, end).is_err());
    }

    #[test]
    fn test_day_iterator_dense() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days: Vec<_> = DayRange::new(start, end).unwrap().days().collect();

        // Leap year: Feb 27, 28, 29, Mar 1
        assert_eq!(days.len(), 4);
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        for pair in days.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn test_hour_iterator() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let hours: Vec<_> = DayRange::single_day(date).hours().collect();

        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].hour(), 0);
        assert_eq!(hours[23].hour(), 23);
    }

    #[test]
    fn test_trailing_window_hours() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let start = end - chrono::TimeDelta::days(7);
        let range = DayRange::new(start, end).unwrap();

        assert_eq!(range.hours().len(), 8 * 24);
    }

    #[test]
    fn test_contains() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let range = DayRange::new(start, end).unwrap();

        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()));
    }
}
