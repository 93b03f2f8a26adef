//! Report builder
//!
//! Turns a snapshot of activities and finance entries into a [`Document`]
//! with three sheets:
//!
//! - **Activities**: one row per activity, ordered by due date, with the
//!   derived status label painted in its status color
//! - **Finances**: one row per purchase, newest first
//! - **Gantt**: a day-per-column grid spanning whole months, one colored
//!   bar per activity, and a color legend underneath
//!
//! The Gantt sheet is omitted when there are no activities.
//!
//! ## Gantt Layout
//!
//! ```text
//! row 0 | TITLE (merged over every column)                          |
//! row 1 | Activity | Owner | January 2024          | February 2024  |
//! row 2 |          |       | 1 | 2 | 3 | ... | 31  | 1 | 2 | ...    |
//! row 3 | Frame    | Dir.  |       [=== bar ===]   |                |
//! ...
//!       | Completed activities:    | Early | On time | ...          |
//!       | Activities in progress:  | Dir. Proyecto | ...            |
//! ```
//!
//! Building is a pure, single pass over the snapshot; the builder keeps no
//! state between calls.

use chrono::Datelike;
use cronograma_core::{
    finance_total, Activity, FinanceEntry, ReportError, Rgb, Role, StatusCategory, Timeline,
};
use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::document::{
    Border, CellStyle, CellValue, Document, FontStyle, HAlign, MergeRange, Sheet, VAlign,
};

/// Gantt column holding activity names
pub const GANTT_ACTIVITY_COL: u16 = 0;
/// Gantt column holding owners
pub const GANTT_OWNER_COL: u16 = 1;
/// First day column of the Gantt grid
pub const GANTT_FIRST_DAY_COL: u16 = 2;
pub const GANTT_TITLE_ROW: u32 = 0;
pub const GANTT_MONTH_ROW: u32 = 1;
pub const GANTT_DAY_ROW: u32 = 2;
/// First activity row of the Gantt grid
pub const GANTT_FIRST_DATA_ROW: u32 = 3;
/// Empty rows between the last activity and the legend
const LEGEND_GAP: u32 = 2;
/// Column limit of a spreadsheet (XFD)
pub const MAX_COLUMNS: u16 = 16_384;

const ACTIVITY_HEADERS: [&str; 7] = [
    "Activity",
    "Owner",
    "Start date",
    "Due date",
    "Completion date",
    "Status",
    "Notes",
];
const ACTIVITY_WIDTHS: [f64; 7] = [40.0, 30.0, 15.0, 15.0, 17.0, 18.0, 40.0];

const FINANCE_HEADERS: [&str; 8] = [
    "Date",
    "Concept",
    "Category",
    "Supplier",
    "Quantity",
    "Unit value",
    "Total",
    "Payment method",
];
const FINANCE_WIDTHS: [f64; 8] = [12.0, 35.0, 15.0, 20.0, 10.0, 12.0, 12.0, 15.0];

/// Builds report documents from activity and finance snapshots
#[derive(Clone, Debug, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the full document.
    ///
    /// Fails with `InvalidInput` if a completed activity lacks a completion
    /// date; no partial document is produced in that case.
    pub fn build(
        &self,
        activities: &[Activity],
        finances: &[FinanceEntry],
    ) -> Result<Document, ReportError> {
        let ordered = sorted_by_due_date(activities);
        let classified = ordered
            .into_iter()
            .map(|a| a.status().map(|s| (a, s)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sheets = vec![
            self.activities_sheet(&classified),
            self.finances_sheet(finances),
        ];

        match Timeline::compute(activities) {
            Ok(timeline) => sheets.push(self.gantt_sheet(&classified, &timeline)?),
            Err(ReportError::EmptyInput) => {
                debug!("no activities, skipping Gantt sheet");
            }
            Err(e) => return Err(e),
        }

        let total = finance_total(finances);
        debug!(
            activities = activities.len(),
            finances = finances.len(),
            sheets = sheets.len(),
            %total,
            "built report document"
        );

        Ok(Document {
            sheets,
            finance_total: total,
        })
    }

    fn header_style(&self) -> CellStyle {
        CellStyle::new()
            .fill(self.config.header_color)
            .font(FontStyle::new().bold().size(11.0).color(Rgb::WHITE))
            .centered()
            .border(Border::Thin)
    }

    fn write_headers(&self, sheet: &mut Sheet, headers: &[&str], widths: &[f64]) {
        let style = self.header_style();
        for (col, (header, width)) in headers.iter().zip(widths).enumerate() {
            sheet.write(0, col as u16, *header, &style);
            sheet.set_column_width(col as u16, *width);
        }
        sheet.freeze = Some((1, 0));
    }

    // ------------------------------------------------------------------------
    // Activities
    // ------------------------------------------------------------------------

    fn activities_sheet(&self, classified: &[(&Activity, StatusCategory)]) -> Sheet {
        let mut sheet = Sheet::new(&self.config.activities_sheet);
        self.write_headers(&mut sheet, &ACTIVITY_HEADERS, &ACTIVITY_WIDTHS);

        let text = CellStyle::new().border(Border::Thin);
        let palette = &self.config.palette;

        for (i, (activity, status)) in classified.iter().enumerate() {
            let row = i as u32 + 1;
            let completion = activity
                .completion_date
                .map(|d| d.to_string())
                .unwrap_or_default();

            sheet.write(row, 0, activity.name.as_str(), &text);
            sheet.write(row, 1, activity.owner.as_str(), &text);
            sheet.write(row, 2, activity.start_date.to_string(), &text);
            sheet.write(row, 3, activity.due_date.to_string(), &text);
            sheet.write(row, 4, completion, &text);

            let status_style = CellStyle::new()
                .fill(palette.status_color(*status))
                .font(FontStyle::new().bold().color(palette.status_text_color(*status)))
                .align(HAlign::Center)
                .border(Border::Thin);
            sheet.write(row, 5, status.label(), &status_style);

            sheet.write(row, 6, activity.notes.clone().unwrap_or_default(), &text);
        }

        sheet
    }

    // ------------------------------------------------------------------------
    // Finances
    // ------------------------------------------------------------------------

    fn finances_sheet(&self, finances: &[FinanceEntry]) -> Sheet {
        let mut sheet = Sheet::new(&self.config.finances_sheet);
        self.write_headers(&mut sheet, &FINANCE_HEADERS, &FINANCE_WIDTHS);

        let text = CellStyle::new().border(Border::Thin);
        let integer = CellStyle::new().border(Border::Thin).num_format("#,##0");
        let money = CellStyle::new()
            .border(Border::Thin)
            .num_format(self.config.money_format());

        for (i, entry) in sorted_by_date_desc(finances).into_iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write(row, 0, entry.date.to_string(), &text);
            sheet.write(row, 1, entry.concept.as_str(), &text);
            sheet.write(row, 2, entry.category.as_str(), &text);
            sheet.write(row, 3, entry.supplier.as_str(), &text);
            sheet.write(row, 4, f64::from(entry.quantity), &integer);
            sheet.write(row, 5, entry.unit_value, &money);
            sheet.write(row, 6, entry.total, &money);
            sheet.write(row, 7, entry.payment_method.as_str(), &text);
        }

        sheet
    }

    // ------------------------------------------------------------------------
    // Gantt
    // ------------------------------------------------------------------------

    fn gantt_sheet(
        &self,
        classified: &[(&Activity, StatusCategory)],
        timeline: &Timeline,
    ) -> Result<Sheet, ReportError> {
        let theme = &self.config.theme;
        let mut sheet = Sheet::new(&self.config.gantt_sheet);
        sheet.show_gridlines = false;
        sheet.freeze = Some((GANTT_FIRST_DATA_ROW, GANTT_FIRST_DAY_COL));

        let last_col = day_column(timeline.day_count() - 1).map_err(|_| {
            ReportError::MalformedInput(format!(
                "timeline of {} days does not fit in a sheet",
                timeline.day_count()
            ))
        })?;
        let font = || FontStyle::new().name(theme.font.as_str());

        // Title
        sheet.set_row_height(GANTT_TITLE_ROW, 36.0);
        sheet.merge(
            MergeRange::row(GANTT_TITLE_ROW, GANTT_ACTIVITY_COL, last_col),
            self.config.title.as_str(),
            &CellStyle::new()
                .fill(theme.background)
                .font(font().bold().size(15.0).color(theme.text))
                .centered(),
        );

        // Fixed column headers span the month and day rows
        sheet.set_row_height(GANTT_MONTH_ROW, 22.0);
        sheet.set_row_height(GANTT_DAY_ROW, 16.0);
        let fixed_header = CellStyle::new()
            .fill(theme.header)
            .font(font().bold().size(10.0).color(theme.text))
            .centered();
        for (label, col) in [("Activity", GANTT_ACTIVITY_COL), ("Owner", GANTT_OWNER_COL)] {
            sheet.merge(
                MergeRange::new(GANTT_MONTH_ROW, col, GANTT_DAY_ROW, col),
                label,
                &fixed_header,
            );
        }
        sheet.set_column_width(GANTT_ACTIVITY_COL, self.config.activity_column_width);
        sheet.set_column_width(GANTT_OWNER_COL, self.config.owner_column_width);

        // Months and days
        let month_style = CellStyle::new()
            .fill(theme.month)
            .font(font().bold().size(10.0).color(theme.text))
            .centered();
        for segment in &timeline.months {
            let first = day_column(segment.offset)?;
            let last = day_column(segment.offset + segment.day_count as usize - 1)?;
            sheet.merge(
                MergeRange::row(GANTT_MONTH_ROW, first, last),
                segment.label(),
                &month_style,
            );
        }
        for (offset, day) in timeline.days.iter().enumerate() {
            let col = day_column(offset)?;
            let number_color = if day.weekend {
                theme.weekend_number
            } else {
                theme.weekday_number
            };
            let style = CellStyle::new()
                .fill(theme.month)
                .font(font().size(7.0).color(number_color))
                .centered();
            sheet.write(GANTT_DAY_ROW, col, f64::from(day.date.day()), &style);
            sheet.set_column_width(col, self.config.day_column_width);
        }

        // Activity rows
        let name_style = CellStyle::new()
            .fill(theme.sidebar)
            .font(font().size(9.0).color(theme.text))
            .align(HAlign::Left)
            .valign(VAlign::Center)
            .wrap()
            .indent(1)
            .border(Border::Bottom(theme.month));
        let owner_style = CellStyle::new()
            .fill(theme.sidebar)
            .font(font().size(8.0).italic().color(theme.owner_text))
            .align(HAlign::Left)
            .valign(VAlign::Center)
            .indent(1)
            .border(Border::Bottom(theme.month));

        for (i, (activity, status)) in classified.iter().enumerate() {
            let row = GANTT_FIRST_DATA_ROW + i as u32;
            sheet.set_row_height(row, 20.0);
            sheet.write(row, GANTT_ACTIVITY_COL, activity.name.as_str(), &name_style);
            sheet.write(row, GANTT_OWNER_COL, activity.owner.as_str(), &owner_style);

            let band = if i % 2 == 0 { theme.band_odd } else { theme.band_even };
            let band_style = CellStyle::new()
                .fill(band)
                .border(Border::Bottom(theme.header));
            for col in GANTT_FIRST_DAY_COL..=last_col {
                sheet.write(row, col, CellValue::Blank, &band_style);
            }

            if let Some(range) = self.bar_range(row, activity, timeline)? {
                if !activity.completed && activity.role().is_none() {
                    warn!(
                        owner = %activity.owner,
                        activity = %activity.name,
                        "unknown owner, using fallback color"
                    );
                }
                let bar_style = CellStyle::new()
                    .fill(self.config.palette.bar_color(activity, *status))
                    .font(font().bold().size(7.0).color(theme.text))
                    .centered();
                sheet.merge(range, CellValue::Blank, &bar_style);
            }
        }

        self.write_legend(
            &mut sheet,
            GANTT_FIRST_DATA_ROW + classified.len() as u32 + LEGEND_GAP,
        )?;

        debug!(
            rows = classified.len(),
            days = timeline.day_count(),
            months = timeline.months.len(),
            "laid out Gantt sheet"
        );
        Ok(sheet)
    }

    /// Bar region for an activity row, `None` for an inverted date range
    fn bar_range(
        &self,
        row: u32,
        activity: &Activity,
        timeline: &Timeline,
    ) -> Result<Option<MergeRange>, ReportError> {
        if activity.start_date > activity.due_date {
            warn!(
                activity = %activity.name,
                start = %activity.start_date,
                due = %activity.due_date,
                "start date after due date, no bar drawn"
            );
            return Ok(None);
        }
        let (first, last) = timeline.columns_of(activity).ok_or_else(|| {
            ReportError::Internal(format!(
                "activity '{}' ({} - {}) lies outside the timeline {} - {}",
                activity.name, activity.start_date, activity.due_date, timeline.start, timeline.end
            ))
        })?;
        Ok(Some(MergeRange::row(row, day_column(first)?, day_column(last)?)))
    }

    fn write_legend(&self, sheet: &mut Sheet, first_row: u32) -> Result<(), ReportError> {
        let theme = &self.config.theme;
        let palette = &self.config.palette;
        let font = || FontStyle::new().name(theme.font.as_str());
        let caption = CellStyle::new()
            .fill(theme.background)
            .font(font().bold().size(9.0).color(theme.text))
            .align(HAlign::Left)
            .valign(VAlign::Center)
            .indent(1);

        let status_blocks: Vec<(&str, Rgb)> = StatusCategory::FINISHED
            .iter()
            .map(|s| (s.label(), palette.status_color(*s)))
            .collect();
        let role_blocks: Vec<(&str, Rgb)> = Role::ALL
            .iter()
            .map(|r| (r.short_label(), palette.role_color(*r)))
            .collect();

        let rows = [
            (first_row, "Completed activities:", status_blocks),
            (first_row + 1, "Activities in progress:", role_blocks),
        ];
        for (row, label, blocks) in rows {
            sheet.set_row_height(row, 18.0);
            sheet.write(row, GANTT_ACTIVITY_COL, label, &caption);
            sheet.write(
                row,
                GANTT_OWNER_COL,
                CellValue::Blank,
                &CellStyle::new().fill(theme.background),
            );
            self.write_legend_blocks(sheet, row, &blocks)?;
        }
        Ok(())
    }

    fn write_legend_blocks(
        &self,
        sheet: &mut Sheet,
        row: u32,
        blocks: &[(&str, Rgb)],
    ) -> Result<(), ReportError> {
        let width = self.config.legend_block_width.max(1);
        let stride = self.config.legend_stride.max(width);
        let font = FontStyle::new()
            .name(self.config.theme.font.as_str())
            .bold()
            .size(8.0)
            .color(self.config.theme.text);

        for (i, (label, color)) in blocks.iter().enumerate() {
            let (first, last) = legend_block_columns(i, width, stride).ok_or_else(|| {
                ReportError::MalformedInput(format!(
                    "legend block {} (width {width}, stride {stride}) exceeds {} columns",
                    i + 1,
                    MAX_COLUMNS
                ))
            })?;
            sheet.merge(
                MergeRange::row(row, first, last),
                format!("  {label}  "),
                &CellStyle::new().fill(*color).font(font.clone()).centered(),
            );
        }
        Ok(())
    }
}

/// Sheet column of a day offset within the timeline
fn day_column(offset: usize) -> Result<u16, ReportError> {
    u16::try_from(offset)
        .ok()
        .and_then(|o| o.checked_add(GANTT_FIRST_DAY_COL))
        .filter(|col| *col < MAX_COLUMNS)
        .ok_or_else(|| {
            ReportError::MalformedInput(format!(
                "day offset {offset} exceeds {MAX_COLUMNS} columns"
            ))
        })
}

/// First and last column of the `index`-th legend block
fn legend_block_columns(index: usize, width: u16, stride: u16) -> Option<(u16, u16)> {
    let first = u16::try_from(index)
        .ok()?
        .checked_mul(stride)?
        .checked_add(GANTT_FIRST_DAY_COL)?;
    let last = first.checked_add(width.checked_sub(1)?)?;
    (last < MAX_COLUMNS).then_some((first, last))
}

/// Activities ordered by due date; ties keep their input order
pub fn sorted_by_due_date(activities: &[Activity]) -> Vec<&Activity> {
    let mut ordered: Vec<&Activity> = activities.iter().collect();
    ordered.sort_by_key(|a| a.due_date);
    ordered
}

/// Finance entries newest first; ties keep their input order
pub fn sorted_by_date_desc(entries: &[FinanceEntry]) -> Vec<&FinanceEntry> {
    let mut ordered: Vec<&FinanceEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}
