//! # cronograma-core
//!
//! Core domain model for cronograma project-tracking reports.
//!
//! This crate provides:
//! - Domain types: `Activity`, `FinanceEntry`, `Role`
//! - Status classification of finished activities (`status`)
//! - Month-aligned timeline layout for Gantt grids (`timeline`)
//! - Status and role color tables (`palette`)
//! - Raw persistence records and their validation (`record`)
//! - Error types
//!
//! Everything here is a pure function of an in-memory snapshot: no I/O,
//! no global state, nothing retained between calls.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cronograma_core::{Activity, StatusCategory};
//!
//! let due = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! let activity = Activity::new(
//!     "Wiring harness",
//!     "Director de Procesos Electronicos",
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     due,
//! )
//! .completed_on(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//!
//! assert_eq!(activity.status().unwrap(), StatusCategory::OnTime);
//! ```

pub mod palette;
pub mod record;
pub mod role;
pub mod status;
pub mod timeline;

pub use palette::{Palette, Rgb};
pub use record::{ActivityRecord, FinanceRecord, Snapshot};
pub use role::{AccessLevel, Role};
pub use status::{classify, StatusCategory, StatusSummary};
pub use timeline::{MonthSegment, Timeline, TimelineDay};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Activity
// ============================================================================

/// A tracked task with an owner, a planned date range and completion state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Human-readable name
    pub name: String,
    /// Owner title (normally one of the `Role` labels)
    pub owner: String,
    /// Planned start date
    pub start_date: NaiveDate,
    /// Deadline
    pub due_date: NaiveDate,
    /// Whether the activity has been finished
    pub completed: bool,
    /// Date the activity was finished; present iff `completed`
    pub completion_date: Option<NaiveDate>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl Activity {
    /// Create a pending activity
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        start_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            start_date,
            due_date,
            completed: false,
            completion_date: None,
            notes: None,
        }
    }

    /// Mark the activity as finished on the given date
    pub fn completed_on(mut self, date: NaiveDate) -> Self {
        self.completed = true;
        self.completion_date = Some(date);
        self
    }

    /// Attach notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Classify completion timing (see [`status::classify`])
    pub fn status(&self) -> Result<StatusCategory, ReportError> {
        classify(self.completed, self.due_date, self.completion_date).map_err(|e| match e {
            ReportError::InvalidInput(_) => ReportError::InvalidInput(format!(
                "activity '{}' is completed but has no completion date",
                self.name
            )),
            other => other,
        })
    }

    /// The owner's role, if the owner title is a known one
    pub fn role(&self) -> Option<Role> {
        Role::from_label(&self.owner)
    }

    /// Length of the planned range in calendar days, both ends included
    pub fn span_days(&self) -> i64 {
        (self.due_date - self.start_date).num_days() + 1
    }
}

// ============================================================================
// Finance
// ============================================================================

/// A purchase recorded against the project budget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceEntry {
    /// Purchase date
    pub date: NaiveDate,
    /// What was bought
    pub concept: String,
    pub category: String,
    pub supplier: String,
    /// Units bought (at least 1)
    pub quantity: u32,
    /// Price per unit
    pub unit_value: Decimal,
    /// Stored total, normally `quantity * unit_value`
    pub total: Decimal,
    pub payment_method: String,
    pub owner: String,
    pub notes: Option<String>,
}

impl FinanceEntry {
    /// Create an entry, computing the total from quantity and unit value
    pub fn new(
        date: NaiveDate,
        concept: impl Into<String>,
        quantity: u32,
        unit_value: Decimal,
    ) -> Self {
        Self {
            date,
            concept: concept.into(),
            category: String::new(),
            supplier: String::new(),
            quantity,
            unit_value,
            total: Decimal::from(quantity) * unit_value,
            payment_method: String::new(),
            owner: String::new(),
            notes: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// `quantity * unit_value`, independent of the stored total
    pub fn computed_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_value
    }
}

/// Sum of the stored totals of all entries
pub fn finance_total(entries: &[FinanceEntry]) -> Decimal {
    entries.iter().map(|e| e.total).sum()
}

// ============================================================================
// Errors
// ============================================================================

/// Report generation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty input: no activities to lay out")]
    EmptyInput,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn activity_builder_defaults_to_pending() {
        let activity = Activity::new(
            "Frame",
            "Director de Proyecto",
            date(2024, 1, 1),
            date(2024, 1, 5),
        );
        assert!(!activity.completed);
        assert!(activity.completion_date.is_none());
        assert_eq!(activity.status().unwrap(), StatusCategory::Pending);
        assert_eq!(activity.span_days(), 5);
    }

    #[test]
    fn completed_activity_without_date_names_the_activity() {
        let mut activity = Activity::new(
            "Frame",
            "Director de Proyecto",
            date(2024, 1, 1),
            date(2024, 1, 5),
        );
        activity.completed = true;

        let err = activity.status().unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(ref msg) if msg.contains("Frame")));
    }

    #[test]
    fn activity_role_lookup() {
        let known = Activity::new("a", "Director Financiero", date(2024, 1, 1), date(2024, 1, 1));
        let unknown = Activity::new("b", "Intern", date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(known.role(), Some(Role::FinancialDirector));
        assert_eq!(unknown.role(), None);
    }

    #[test]
    fn finance_entry_computes_total() {
        let entry = FinanceEntry::new(date(2024, 2, 1), "Servo motors", 3, dec!(45.50));
        assert_eq!(entry.total, dec!(136.50));
        assert_eq!(entry.computed_total(), entry.total);
    }

    #[test]
    fn finance_total_sums_stored_totals() {
        let entries = vec![
            FinanceEntry::new(date(2024, 2, 1), "Servo motors", 3, dec!(45.50)),
            FinanceEntry::new(date(2024, 2, 3), "Aluminium profile", 2, dec!(12.25)),
        ];
        assert_eq!(finance_total(&entries), dec!(161.00));
        assert_eq!(finance_total(&[]), Decimal::ZERO);
    }
}
