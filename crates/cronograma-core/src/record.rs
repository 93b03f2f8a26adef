//! Raw records as delivered by the persistence layer
//!
//! Dates arrive as ISO `YYYY-MM-DD` strings. Converting a record into its
//! domain type is where malformed values are caught: nothing is coerced,
//! a bad record fails the conversion.
//!
//! Field names accept both the English names and the Spanish column names
//! of the `actividades` / `finanzas` store tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Activity, FinanceEntry, ReportError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Activity row as stored
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "responsable")]
    pub owner: String,
    #[serde(alias = "fecha_inicio")]
    pub start_date: String,
    #[serde(alias = "fecha_limite")]
    pub due_date: String,
    #[serde(default, alias = "completada")]
    pub completed: bool,
    #[serde(default, alias = "fecha_completado")]
    pub completion_date: Option<String>,
    #[serde(default, alias = "observaciones")]
    pub notes: Option<String>,
}

/// Finance row as stored
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceRecord {
    #[serde(alias = "fecha_compra")]
    pub date: String,
    #[serde(alias = "concepto")]
    pub concept: String,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
    #[serde(default, alias = "proveedor")]
    pub supplier: Option<String>,
    #[serde(default = "default_quantity", alias = "cantidad")]
    pub quantity: i64,
    #[serde(alias = "valor_unitario")]
    pub unit_value: Decimal,
    /// Stored total; computed from quantity and unit value when absent
    #[serde(default, alias = "valor_total")]
    pub total: Option<Decimal>,
    #[serde(default, alias = "metodo_pago")]
    pub payment_method: Option<String>,
    #[serde(default, alias = "responsable")]
    pub owner: Option<String>,
    #[serde(default, alias = "observaciones")]
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

/// Point-in-time export of both tables
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, alias = "actividades")]
    pub activities: Vec<ActivityRecord>,
    #[serde(default, alias = "finanzas")]
    pub finances: Vec<FinanceRecord>,
}

impl Snapshot {
    /// Convert every record, failing on the first invalid one
    pub fn into_domain(self) -> Result<(Vec<Activity>, Vec<FinanceEntry>), ReportError> {
        let activities = self
            .activities
            .into_iter()
            .map(Activity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let finances = self
            .finances
            .into_iter()
            .map(FinanceEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((activities, finances))
    }
}

/// Parse an ISO date, naming the field in the error
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ReportError::MalformedInput(format!("{field} '{value}': {e}")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = ReportError;

    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        let start_date = parse_date("start_date", &record.start_date)?;
        let due_date = parse_date("due_date", &record.due_date)?;
        let completion_date = non_blank(record.completion_date)
            .map(|d| parse_date("completion_date", &d))
            .transpose()?;

        match (record.completed, completion_date) {
            (true, None) => {
                return Err(ReportError::InvalidInput(format!(
                    "activity '{}' is completed but has no completion date",
                    record.name
                )))
            }
            (false, Some(date)) => {
                return Err(ReportError::InvalidInput(format!(
                    "activity '{}' is not completed but has completion date {date}",
                    record.name
                )))
            }
            _ => {}
        }

        Ok(Activity {
            name: record.name,
            owner: record.owner,
            start_date,
            due_date,
            completed: record.completed,
            completion_date,
            notes: non_blank(record.notes),
        })
    }
}

impl TryFrom<FinanceRecord> for FinanceEntry {
    type Error = ReportError;

    fn try_from(record: FinanceRecord) -> Result<Self, Self::Error> {
        let date = parse_date("date", &record.date)?;
        let quantity = u32::try_from(record.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| {
                ReportError::MalformedInput(format!(
                    "finance entry '{}' has quantity {}, expected at least 1",
                    record.concept, record.quantity
                ))
            })?;

        let mut entry = FinanceEntry::new(date, record.concept, quantity, record.unit_value)
            .category(record.category.unwrap_or_default())
            .supplier(record.supplier.unwrap_or_default())
            .payment_method(record.payment_method.unwrap_or_default())
            .owner(record.owner.unwrap_or_default());
        entry.notes = non_blank(record.notes);
        if let Some(total) = record.total {
            entry.total = total;
        }
        Ok(entry)
    }
}
