//! XLSX renderer
//!
//! Serializes a [`Document`] into an Excel workbook: one worksheet per
//! sheet, with cell values, fills, fonts, alignment, borders, merge
//! regions, column widths, row heights, frozen panes and gridline
//! visibility carried over.
//!
//! Merged regions are written with `merge_range`, which only takes a
//! string; numeric top-left values are written over the merged cell
//! afterwards so they stay numbers in the workbook.

use std::path::Path;

use cronograma_core::{RenderError, Rgb};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::document::{Border, Cell, CellStyle, CellValue, Document, HAlign, Sheet, VAlign};
use crate::Renderer;

/// Excel workbook renderer
#[derive(Clone, Debug)]
pub struct XlsxRenderer {
    /// Whether to apply the frozen panes requested by each sheet
    pub freeze_panes: bool,
}

impl Default for XlsxRenderer {
    fn default() -> Self {
        Self { freeze_panes: true }
    }
}

impl XlsxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore frozen panes
    pub fn no_freeze_panes(mut self) -> Self {
        self.freeze_panes = false;
        self
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();

        for sheet in &document.sheets {
            let worksheet = workbook.add_worksheet();
            self.write_sheet(worksheet, sheet).map_err(format_error)?;
        }

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        debug!(sheets = document.sheets.len(), bytes = buffer.len(), "rendered workbook");
        Ok(buffer)
    }

    /// Generate the workbook and write it to `path`
    pub fn render_to_file(&self, document: &Document, path: &Path) -> Result<(), RenderError> {
        let bytes = self.render(document)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, sheet: &Sheet) -> Result<(), XlsxError> {
        worksheet.set_name(&sheet.name)?;
        worksheet.set_screen_gridlines(sheet.show_gridlines);

        for (col, width) in sheet.column_widths() {
            worksheet.set_column_width(*col, *width)?;
        }
        for (row, height) in sheet.row_heights() {
            worksheet.set_row_height(*row, *height)?;
        }

        for ((row, col), cell) in sheet.cells() {
            if sheet.merge_at(row, col).is_none() {
                write_cell(worksheet, row, col, cell)?;
            }
        }

        for merge in sheet.merges() {
            let cell = sheet
                .cell(merge.first_row, merge.first_col)
                .cloned()
                .unwrap_or_else(|| Cell::blank(CellStyle::default()));

            // merge_range rejects single cells
            if merge.is_single_cell() {
                write_cell(worksheet, merge.first_row, merge.first_col, &cell)?;
                continue;
            }

            let text = match &cell.value {
                CellValue::Text(s) => s.as_str(),
                _ => "",
            };
            worksheet.merge_range(
                merge.first_row,
                merge.first_col,
                merge.last_row,
                merge.last_col,
                text,
                &to_format(&cell.style),
            )?;
            if let CellValue::Number(_) | CellValue::Money(_) = cell.value {
                write_cell(worksheet, merge.first_row, merge.first_col, &cell)?;
            }
        }

        if self.freeze_panes {
            if let Some((row, col)) = sheet.freeze {
                worksheet.set_freeze_panes(row, col)?;
            }
        }

        Ok(())
    }
}

impl Renderer for XlsxRenderer {
    type Output = Vec<u8>;

    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        if document.sheets.is_empty() {
            return Err(RenderError::InvalidData("No sheets to render".into()));
        }
        self.render_to_bytes(document)
    }
}

fn format_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    let format = to_format(&cell.style);
    match &cell.value {
        CellValue::Blank => {
            worksheet.write_blank(row, col, &format)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, &format)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, &format)?;
        }
        CellValue::Money(d) => {
            worksheet.write_number_with_format(row, col, d.to_f64().unwrap_or_default(), &format)?;
        }
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::RGB(rgb.0)
}

/// Translate a cell style into an xlsx format
fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if let Some(fill) = style.fill {
        format = format.set_background_color(color(fill));
    }
    if let Some(font) = &style.font {
        if let Some(name) = &font.name {
            format = format.set_font_name(name);
        }
        if let Some(size) = font.size {
            format = format.set_font_size(size);
        }
        if font.bold {
            format = format.set_bold();
        }
        if font.italic {
            format = format.set_italic();
        }
        if let Some(c) = font.color {
            format = format.set_font_color(color(c));
        }
    }
    if let Some(align) = style.align {
        format = format.set_align(match align {
            HAlign::Left => FormatAlign::Left,
            HAlign::Center => FormatAlign::Center,
            HAlign::Right => FormatAlign::Right,
        });
    }
    if let Some(valign) = style.valign {
        format = format.set_align(match valign {
            VAlign::Top => FormatAlign::Top,
            VAlign::Center => FormatAlign::VerticalCenter,
            VAlign::Bottom => FormatAlign::Bottom,
        });
    }
    match style.border {
        Some(Border::Thin) => format = format.set_border(FormatBorder::Thin),
        Some(Border::Bottom(c)) => {
            format = format
                .set_border_bottom(FormatBorder::Thin)
                .set_border_bottom_color(color(c));
        }
        None => {}
    }
    if style.wrap {
        format = format.set_text_wrap();
    }
    if style.indent > 0 {
        format = format.set_indent(style.indent);
    }
    if let Some(num_format) = &style.num_format {
        format = format.set_num_format(num_format);
    }

    format
}
