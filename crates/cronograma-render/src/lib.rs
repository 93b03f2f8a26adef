//! # cronograma-render
//!
//! Report generation for cronograma snapshots.
//!
//! The [`ReportBuilder`] lays out activities, finances and the Gantt chart
//! as a renderer-agnostic [`Document`]; a [`Renderer`] serializes it.
//!
//! ## Renderers
//!
//! - `XlsxRenderer`: Excel workbook bytes
//! - `TextRenderer`: tab-separated plain text, one block per sheet
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cronograma_core::Activity;
//! use cronograma_render::{Renderer, ReportBuilder, TextRenderer};
//!
//! let activity = Activity::new(
//!     "Frame welding",
//!     "Director de Procesos Mecanicos",
//!     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//! );
//! let document = ReportBuilder::new().build(&[activity], &[]).unwrap();
//! let text = TextRenderer::new().render(&document).unwrap();
//! assert!(text.contains("Frame welding"));
//! ```

pub mod config;
pub mod document;
pub mod excel;
pub mod report;

pub use config::{GanttSheetTheme, ReportConfig};
pub use document::{Cell, CellStyle, CellValue, Document, MergeRange, Sheet};
pub use excel::XlsxRenderer;
pub use report::ReportBuilder;

use cronograma_core::RenderError;

/// Serializes a report document into an output format
pub trait Renderer {
    type Output;

    fn render(&self, document: &Document) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Text Renderer
// ============================================================================

/// Plain-text renderer for terminals and diffs.
///
/// Each sheet becomes a `== name ==` header followed by one tab-separated
/// line per row. A merged region shows its value once, in its top-left
/// column. Filled blank merges (Gantt bars, legend swatches) are drawn with
/// `bar_char` in every column they cover.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    pub bar_char: char,
    /// Append the finance total after the last sheet
    pub show_total: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            bar_char: '#',
            show_total: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bar_char(mut self, c: char) -> Self {
        self.bar_char = c;
        self
    }

    pub fn without_total(mut self) -> Self {
        self.show_total = false;
        self
    }

    fn render_sheet(&self, sheet: &Sheet, out: &mut String) {
        out.push_str(&format!("== {} ==\n", sheet.name));

        let cols = usize::from(sheet.col_count());
        for row in 0..sheet.row_count() {
            let mut fields = vec![String::new(); cols];
            for (col, field) in fields.iter_mut().enumerate() {
                // col < col_count, which is a u16
                *field = sheet.text(row, col as u16);
            }
            for merge in sheet.merges().iter().filter(|m| m.first_row == row) {
                let filled = sheet
                    .cell(merge.first_row, merge.first_col)
                    .is_some_and(|c| c.value == CellValue::Blank && c.style.fill.is_some());
                if filled {
                    for col in merge.first_col..=merge.last_col {
                        fields[usize::from(col)] = self.bar_char.to_string();
                    }
                }
            }

            let line = fields.join("\t");
            out.push_str(line.trim_end_matches('\t'));
            out.push('\n');
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, document: &Document) -> Result<String, RenderError> {
        if document.sheets.is_empty() {
            return Err(RenderError::InvalidData("No sheets to render".into()));
        }

        let mut out = String::new();
        for (i, sheet) in document.sheets.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.render_sheet(sheet, &mut out);
        }
        if self.show_total {
            out.push_str(&format!("\nTotal: {:.2}\n", document.finance_total.round_dp(2)));
        }
        Ok(out)
    }
}
