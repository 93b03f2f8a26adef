//! Month-aligned project timeline
//!
//! The Gantt grid covers whole calendar months: from the first day of the
//! month holding the earliest start date to the last day of the month
//! holding the latest due date. Each day becomes one grid column.
//!
//! ```text
//!  |      January 2024       |      February 2024      |
//!  | 1 | 2 | 3 | ... | 30 |31| 1 | 2 | ... | 28 | 29 |
//!    ^ offset 0                ^ offset 31         ^ offset 59
//! ```

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Activity, ReportError};

/// One column of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub date: NaiveDate,
    /// Saturday or Sunday
    pub weekend: bool,
}

/// A maximal run of days sharing the same year and month
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSegment {
    pub year: i32,
    pub month: u32,
    /// First day of the segment
    pub first_day: NaiveDate,
    /// Number of days (columns) in the segment
    pub day_count: u32,
    /// Column offset of `first_day` from the start of the timeline
    pub offset: usize,
}

impl MonthSegment {
    /// "January 2024" style label
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Duration::days(i64::from(self.day_count) - 1)
    }
}

/// Day-by-day layout of a project span
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Always the 1st of a month
    pub start: NaiveDate,
    /// Always the last day of a month
    pub end: NaiveDate,
    pub days: Vec<TimelineDay>,
    pub months: Vec<MonthSegment>,
}

impl Timeline {
    /// Compute the span covering every activity.
    ///
    /// Fails with `EmptyInput` when there are no activities.
    pub fn compute(activities: &[Activity]) -> Result<Self, ReportError> {
        let earliest = activities
            .iter()
            .map(|a| a.start_date)
            .min()
            .ok_or(ReportError::EmptyInput)?;
        let latest = activities
            .iter()
            .map(|a| a.due_date)
            .max()
            .ok_or(ReportError::EmptyInput)?;

        Self::spanning(earliest, latest)
    }

    /// Compute the month-aligned span covering `[earliest, latest]`
    pub fn spanning(earliest: NaiveDate, latest: NaiveDate) -> Result<Self, ReportError> {
        let start = first_of_month(earliest)?;
        let end = last_of_month(latest)?;
        if start > end {
            return Err(ReportError::MalformedInput(format!(
                "timeline starts after it ends ({start} > {end})"
            )));
        }

        let days: Vec<TimelineDay> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| TimelineDay {
                date,
                weekend: is_weekend(date),
            })
            .collect();

        let mut months: Vec<MonthSegment> = Vec::new();
        for (offset, day) in days.iter().enumerate() {
            match months.last_mut() {
                Some(seg) if seg.year == day.date.year() && seg.month == day.date.month() => {
                    seg.day_count += 1;
                }
                _ => months.push(MonthSegment {
                    year: day.date.year(),
                    month: day.date.month(),
                    first_day: day.date,
                    day_count: 1,
                    offset,
                }),
            }
        }

        debug!(%start, %end, days = days.len(), months = months.len(), "computed timeline");

        Ok(Self {
            start,
            end,
            days,
            months,
        })
    }

    /// Number of day columns
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Column offset of a date from `start`, or `None` outside the span
    pub fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from((date - self.start).num_days()).ok()
    }

    /// Inclusive column offsets covered by an activity's planned range.
    ///
    /// Returns `None` when either end lies outside the span or the range
    /// is inverted.
    pub fn columns_of(&self, activity: &Activity) -> Option<(usize, usize)> {
        let first = self.offset_of(activity.start_date)?;
        let last = self.offset_of(activity.due_date)?;
        (first <= last).then_some((first, last))
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    date.with_day(1)
        .ok_or_else(|| ReportError::MalformedInput(format!("no first day of month for {date}")))
}

/// Last day of the month containing `date`.
///
/// Advances to the first day of the following month (December rolls into
/// January of the next year) and steps back one day.
pub fn last_of_month(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| ReportError::MalformedInput(format!("no last day of month for {date}")))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn activity(start: NaiveDate, due: NaiveDate) -> Activity {
        Activity::new("task", "Director de Proyecto", start, due)
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(Timeline::compute(&[]), Err(ReportError::EmptyInput));
    }

    #[test]
    fn single_month_span() {
        let timeline =
            Timeline::compute(&[activity(date(2024, 1, 10), date(2024, 1, 20))]).unwrap();
        assert_eq!(timeline.start, date(2024, 1, 1));
        assert_eq!(timeline.end, date(2024, 1, 31));
        assert_eq!(timeline.day_count(), 31);
        assert_eq!(timeline.months.len(), 1);
        assert_eq!(timeline.months[0].day_count, 31);
        assert_eq!(timeline.months[0].label(), "January 2024");
    }

    #[test]
    fn leap_february() {
        assert_eq!(last_of_month(date(2024, 2, 3)).unwrap(), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 2, 3)).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(last_of_month(date(2024, 12, 5)).unwrap(), date(2024, 12, 31));
        assert_eq!(first_of_month(date(2024, 12, 5)).unwrap(), date(2024, 12, 1));
    }

    #[test]
    fn segments_across_year_boundary() {
        let timeline =
            Timeline::compute(&[activity(date(2024, 12, 20), date(2025, 1, 5))]).unwrap();
        assert_eq!(timeline.start, date(2024, 12, 1));
        assert_eq!(timeline.end, date(2025, 1, 31));
        assert_eq!(timeline.day_count(), 62);

        let dec = timeline.months[0];
        let jan = timeline.months[1];
        assert_eq!((dec.year, dec.month, dec.day_count, dec.offset), (2024, 12, 31, 0));
        assert_eq!((jan.year, jan.month, jan.day_count, jan.offset), (2025, 1, 31, 31));
        assert_eq!(dec.last_day(), date(2024, 12, 31));
    }

    #[test]
    fn weekend_flags() {
        // 2024-01-06 is a Saturday
        let timeline = Timeline::compute(&[activity(date(2024, 1, 1), date(2024, 1, 2))]).unwrap();
        assert!(!timeline.days[0].weekend);
        assert!(timeline.days[5].weekend);
        assert!(timeline.days[6].weekend);
        assert!(!timeline.days[7].weekend);
    }

    #[test]
    fn offsets_and_columns() {
        let a = activity(date(2024, 1, 10), date(2024, 1, 20));
        let timeline = Timeline::compute(&[a.clone()]).unwrap();
        assert_eq!(timeline.offset_of(date(2024, 1, 1)), Some(0));
        assert_eq!(timeline.offset_of(date(2024, 2, 1)), None);
        assert_eq!(timeline.columns_of(&a), Some((9, 19)));
    }

    #[test]
    fn inverted_range_has_no_columns() {
        let ok = activity(date(2024, 1, 1), date(2024, 1, 31));
        let inverted = activity(date(2024, 1, 20), date(2024, 1, 10));
        let timeline = Timeline::compute(&[ok, inverted.clone()]).unwrap();
        assert_eq!(timeline.columns_of(&inverted), None);
    }

    #[test]
    fn fully_inverted_span_is_malformed() {
        let inverted = activity(date(2024, 3, 5), date(2024, 1, 10));
        assert!(matches!(
            Timeline::compute(&[inverted]),
            Err(ReportError::MalformedInput(_))
        ));
    }
}
