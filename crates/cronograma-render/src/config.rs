//! Report configuration
//!
//! Every field has a default, so a configuration file only needs to name
//! what it overrides:
//!
//! ```toml
//! title = "PROJECT SCHEDULE"
//! currency = "$"
//!
//! [palette]
//! early = "1565C0"
//!
//! [theme]
//! background = "000000"
//! ```

use cronograma_core::{Palette, Rgb};
use serde::{Deserialize, Serialize};

/// Colors of the Gantt sheet chrome (everything except bars and legend)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttSheetTheme {
    /// Title and legend caption background
    pub background: Rgb,
    /// "Activity" / "Owner" header cells
    pub header: Rgb,
    /// Name and owner cells of each row
    pub sidebar: Rgb,
    /// Day cells of even-indexed rows (first row is index 0)
    pub band_odd: Rgb,
    /// Day cells of odd-indexed rows
    pub band_even: Rgb,
    /// Month and day number headers
    pub month: Rgb,
    pub text: Rgb,
    /// Owner name text
    pub owner_text: Rgb,
    pub weekday_number: Rgb,
    pub weekend_number: Rgb,
    pub font: String,
}

impl Default for GanttSheetTheme {
    fn default() -> Self {
        Self::navy()
    }
}

impl GanttSheetTheme {
    pub fn navy() -> Self {
        Self {
            background: Rgb(0x0D1B3E),
            header: Rgb(0x1A2E5C),
            sidebar: Rgb(0x1E3A6E),
            band_odd: Rgb(0x0F2347),
            band_even: Rgb(0x112A54),
            month: Rgb(0x243F72),
            text: Rgb::WHITE,
            owner_text: Rgb(0xAABBDD),
            weekday_number: Rgb(0xAAAAAA),
            weekend_number: Rgb(0xFF6666),
            font: "Arial".into(),
        }
    }
}

/// Layout and labelling of the generated report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Gantt sheet title
    pub title: String,
    pub activities_sheet: String,
    pub finances_sheet: String,
    pub gantt_sheet: String,
    /// Currency symbol shown in money cells
    pub currency: String,
    /// Table header fill
    pub header_color: Rgb,
    /// Width of each day column in the Gantt grid
    pub day_column_width: f64,
    pub activity_column_width: f64,
    pub owner_column_width: f64,
    /// Day columns covered by one legend block
    pub legend_block_width: u16,
    /// Day columns from the start of one legend block to the next
    pub legend_stride: u16,
    pub palette: Palette,
    pub theme: GanttSheetTheme,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "PROJECT SCHEDULE - GANTT CHART".into(),
            activities_sheet: "Activities".into(),
            finances_sheet: "Finances".into(),
            gantt_sheet: "Gantt".into(),
            currency: "$".into(),
            header_color: Rgb(0x003B71),
            day_column_width: 2.2,
            activity_column_width: 40.0,
            owner_column_width: 24.0,
            legend_block_width: 10,
            legend_stride: 11,
            palette: Palette::default(),
            theme: GanttSheetTheme::default(),
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Gantt title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Replace the status/owner color tables
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn theme(mut self, theme: GanttSheetTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set legend block width and stride (in day columns)
    pub fn legend_layout(mut self, block_width: u16, stride: u16) -> Self {
        self.legend_block_width = block_width.max(1);
        self.legend_stride = stride.max(self.legend_block_width);
        self
    }

    /// Number format for money cells
    pub fn money_format(&self) -> String {
        format!("\"{}\"#,##0.00", self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReportConfig::new();
        assert_eq!(config.gantt_sheet, "Gantt");
        assert_eq!(config.legend_block_width, 10);
        assert_eq!(config.legend_stride, 11);
        assert_eq!(config.theme.background, Rgb(0x0D1B3E));
    }

    #[test]
    fn builder_options() {
        let config = ReportConfig::new()
            .title("Schedule")
            .currency("EUR")
            .legend_layout(4, 2);

        assert_eq!(config.title, "Schedule");
        assert_eq!(config.money_format(), "\"EUR\"#,##0.00");
        // Stride never shorter than a block, so blocks cannot overlap
        assert_eq!((config.legend_block_width, config.legend_stride), (4, 4));
    }
}
