//! Renderer-agnostic document model
//!
//! A [`Document`] is an ordered list of [`Sheet`]s. Each sheet is a sparse
//! grid of styled cells addressed by zero-based `(row, col)`, a list of
//! merge regions, and advisory column widths / row heights.
//!
//! A merge region maps to exactly one logical value: the cell at its
//! top-left corner. Cells inside the region other than the top-left are
//! never populated. A region may cover a single cell.

use std::collections::BTreeMap;

use cronograma_core::Rgb;
use rust_decimal::Decimal;

/// Cell content
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Styled but empty
    Blank,
    Text(String),
    Number(f64),
    /// Currency amount, kept exact until serialization
    Money(Decimal),
}

impl CellValue {
    /// Plain-text rendering of the value
    pub fn display(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Money(d) => format!("{:.2}", d.round_dp(2)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        CellValue::Money(d)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Thin border on all sides or only at the bottom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    Thin,
    Bottom(Rgb),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontStyle {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Presentation attributes of a cell
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellStyle {
    pub fill: Option<Rgb>,
    pub font: Option<FontStyle>,
    pub align: Option<HAlign>,
    pub valign: Option<VAlign>,
    pub border: Option<Border>,
    pub wrap: bool,
    pub indent: u8,
    /// Spreadsheet number format, e.g. `#,##0.00`
    pub num_format: Option<String>,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn align(mut self, align: HAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = Some(valign);
        self
    }

    /// Center on both axes
    pub fn centered(self) -> Self {
        self.align(HAlign::Center).valign(VAlign::Center)
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn num_format(mut self, format: impl Into<String>) -> Self {
        self.num_format = Some(format.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>, style: CellStyle) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    pub fn blank(style: CellStyle) -> Self {
        Self {
            value: CellValue::Blank,
            style,
        }
    }
}

/// Inclusive rectangular region
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergeRange {
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// Single-row region
    pub fn row(row: u32, first_col: u16, last_col: u16) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    pub fn width(&self) -> u16 {
        self.last_col - self.first_col + 1
    }

    pub fn height(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.first_row == self.last_row && self.first_col == self.last_col
    }

    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    pub fn overlaps(&self, other: &MergeRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }
}

/// One worksheet
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    merges: Vec<MergeRange>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    /// Whether the renderer should draw the default cell gridlines
    pub show_gridlines: bool,
    /// Rows and columns kept visible while scrolling
    pub freeze: Option<(u32, u16)>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show_gridlines: true,
            ..Self::default()
        }
    }

    pub fn set(&mut self, row: u32, col: u16, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    pub fn write(&mut self, row: u32, col: u16, value: impl Into<CellValue>, style: &CellStyle) {
        self.set(row, col, Cell::new(value, style.clone()));
    }

    /// Merge a region holding a single value.
    ///
    /// Single-cell regions are recorded like any other; renderers that
    /// cannot merge one cell write it as a plain cell.
    pub fn merge(&mut self, range: MergeRange, value: impl Into<CellValue>, style: &CellStyle) {
        debug_assert!(
            !self.merges.iter().any(|m| m.overlaps(&range)),
            "overlapping merge {range:?} on sheet {}",
            self.name
        );
        self.cells.retain(|&(r, c), _| !range.contains(r, c));
        self.merges.push(range);
        self.set(range.first_row, range.first_col, Cell::new(value, style.clone()));
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Text of a cell, empty when the cell is missing or blank
    pub fn text(&self, row: u32, col: u16) -> String {
        self.cell(row, col).map(|c| c.value.display()).unwrap_or_default()
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Merge region whose top-left corner is `(row, col)`
    pub fn merge_at(&self, row: u32, col: u16) -> Option<&MergeRange> {
        self.merges
            .iter()
            .find(|m| m.first_row == row && m.first_col == col)
    }

    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Index one past the last populated row
    pub fn row_count(&self) -> u32 {
        let cell_rows = self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0);
        let merge_rows = self.merges.iter().map(|m| m.last_row + 1).max().unwrap_or(0);
        cell_rows.max(merge_rows)
    }

    /// Index one past the last populated column
    pub fn col_count(&self) -> u16 {
        let cell_cols = self.cells.keys().map(|(_, c)| c + 1).max().unwrap_or(0);
        let merge_cols = self.merges.iter().map(|m| m.last_col + 1).max().unwrap_or(0);
        cell_cols.max(merge_cols)
    }
}

/// Complete report ready for a renderer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub sheets: Vec<Sheet>,
    /// Sum of all finance entry totals
    pub finance_total: Decimal,
}

impl Document {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_only_top_left_value() {
        let mut sheet = Sheet::new("Test");
        let style = CellStyle::new();
        sheet.write(0, 1, "stale", &style);
        sheet.merge(MergeRange::row(0, 0, 3), "Title", &style);

        assert_eq!(sheet.text(0, 0), "Title");
        assert!(sheet.cell(0, 1).is_none());
        assert_eq!(sheet.merges().len(), 1);
        assert_eq!(sheet.merge_at(0, 0).map(|m| m.width()), Some(4));
    }

    #[test]
    fn single_cell_merge_is_recorded() {
        let mut sheet = Sheet::new("Test");
        sheet.merge(
            MergeRange::row(2, 5, 5),
            CellValue::Blank,
            &CellStyle::new().fill(Rgb(0xFF0000)),
        );

        assert_eq!(sheet.merges(), &[MergeRange::row(2, 5, 5)]);
        assert!(sheet.merge_at(2, 5).is_some_and(MergeRange::is_single_cell));
        assert_eq!(sheet.cell(2, 5).and_then(|c| c.style.fill), Some(Rgb(0xFF0000)));
    }

    #[test]
    fn overlap_detection() {
        let a = MergeRange::new(0, 0, 1, 3);
        assert!(a.overlaps(&MergeRange::row(1, 3, 6)));
        assert!(!a.overlaps(&MergeRange::row(2, 0, 3)));
        assert!(!a.overlaps(&MergeRange::row(0, 4, 9)));
    }

    #[test]
    fn extent_counts_merges() {
        let mut sheet = Sheet::new("Test");
        sheet.merge(MergeRange::new(0, 0, 4, 7), "x", &CellStyle::new());
        assert_eq!(sheet.row_count(), 5);
        assert_eq!(sheet.col_count(), 8);
    }

    #[test]
    fn money_display_rounds_to_cents() {
        assert_eq!(CellValue::Money(Decimal::new(123456, 3)).display(), "123.46");
        assert_eq!(CellValue::Money(Decimal::from(80)).display(), "80.00");
        assert_eq!(CellValue::Blank.display(), "");
    }
}
