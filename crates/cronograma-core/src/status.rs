//! Activity status classification
//!
//! A finished activity is classified by how far its completion date lands
//! from its deadline. Unfinished activities are always `Pending`.
//!
//! | completion - due (days) | category      |
//! |-------------------------|---------------|
//! | < -7                    | `Early`       |
//! | -7 ..= 0                | `OnTime`      |
//! | 1 ..= 7                 | `SlightDelay` |
//! | > 7                     | `SevereDelay` |
//!
//! The category is never stored; it is recomputed from the dates every
//! time a report is built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Activity, ReportError};

/// Window (in days) around the deadline that separates the buckets
pub const DELAY_WINDOW_DAYS: i64 = 7;

// ============================================================================
// Core Types
// ============================================================================

/// Completion timing of an activity relative to its deadline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Not finished yet
    Pending,
    /// Finished more than a week before the deadline
    Early,
    /// Finished within the week before the deadline, or on it
    OnTime,
    /// Finished up to a week late
    SlightDelay,
    /// Finished more than a week late
    SevereDelay,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 5] = [
        StatusCategory::Pending,
        StatusCategory::Early,
        StatusCategory::OnTime,
        StatusCategory::SlightDelay,
        StatusCategory::SevereDelay,
    ];

    /// Categories a finished activity can fall into, in legend order
    pub const FINISHED: [StatusCategory; 4] = [
        StatusCategory::Early,
        StatusCategory::OnTime,
        StatusCategory::SlightDelay,
        StatusCategory::SevereDelay,
    ];

    /// Stable machine key
    pub fn key(&self) -> &'static str {
        match self {
            StatusCategory::Pending => "pending",
            StatusCategory::Early => "early",
            StatusCategory::OnTime => "on_time",
            StatusCategory::SlightDelay => "slight_delay",
            StatusCategory::SevereDelay => "severe_delay",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Pending => "In progress",
            StatusCategory::Early => "Early",
            StatusCategory::OnTime => "On time",
            StatusCategory::SlightDelay => "Slight delay",
            StatusCategory::SevereDelay => "Severe delay",
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, StatusCategory::Pending)
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify an activity from its completion flag and dates.
///
/// Fails with `InvalidInput` when `completed` is set but no completion
/// date is given; the classifier never guesses one.
pub fn classify(
    completed: bool,
    due_date: NaiveDate,
    completion_date: Option<NaiveDate>,
) -> Result<StatusCategory, ReportError> {
    if !completed {
        return Ok(StatusCategory::Pending);
    }
    let completion_date = completion_date.ok_or_else(|| {
        ReportError::InvalidInput("completed activity has no completion date".into())
    })?;
    Ok(classify_delay((completion_date - due_date).num_days()))
}

/// Bucket a signed delay in days (negative = finished early)
pub fn classify_delay(diff_days: i64) -> StatusCategory {
    match diff_days {
        d if d < -DELAY_WINDOW_DAYS => StatusCategory::Early,
        d if d <= 0 => StatusCategory::OnTime,
        d if d <= DELAY_WINDOW_DAYS => StatusCategory::SlightDelay,
        _ => StatusCategory::SevereDelay,
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Activity counts per status category
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub early: usize,
    pub on_time: usize,
    pub slight_delay: usize,
    pub severe_delay: usize,
}

impl StatusSummary {
    /// Count the categories of a set of activities.
    ///
    /// Fails on the first completed activity without a completion date.
    pub fn from_activities(activities: &[Activity]) -> Result<Self, ReportError> {
        let mut summary = Self::default();
        for activity in activities {
            summary.record(activity.status()?);
        }
        Ok(summary)
    }

    pub fn record(&mut self, status: StatusCategory) {
        self.total += 1;
        *self.count_mut(status) += 1;
    }

    pub fn count(&self, status: StatusCategory) -> usize {
        match status {
            StatusCategory::Pending => self.pending,
            StatusCategory::Early => self.early,
            StatusCategory::OnTime => self.on_time,
            StatusCategory::SlightDelay => self.slight_delay,
            StatusCategory::SevereDelay => self.severe_delay,
        }
    }

    fn count_mut(&mut self, status: StatusCategory) -> &mut usize {
        match status {
            StatusCategory::Pending => &mut self.pending,
            StatusCategory::Early => &mut self.early,
            StatusCategory::OnTime => &mut self.on_time,
            StatusCategory::SlightDelay => &mut self.slight_delay,
            StatusCategory::SevereDelay => &mut self.severe_delay,
        }
    }

    /// Finished activities, whatever their timing
    pub fn finished(&self) -> usize {
        self.total - self.pending
    }
}

// ============================================================================
// Tests
// ============================================================================
