//! Layout parameters of the ranking document.
//!
//! The detailed and compact layouts differ only in numbers and in whether the timestamp and footer
//! are drawn, so both are expressed as presets of the same [`RankingStyle`].

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::fonts::FontSource;

/// Width of an A4 page in millimetres.
pub const A4_WIDTH_MM: f64 = 210.0;
/// Height of an A4 page in millimetres.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Attribution printed at the bottom of every page by the detailed layout.
pub const DEFAULT_FOOTER_TEXT: &str = "Powered by Mahjong Tracker - mahjongtracker.com";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const WIDTH_TOLERANCE_MM: f64 = 0.01;

/// Inconsistent layout parameters.
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error(
        "columns ({columns} mm) plus side margins ({margins} mm) must fill the page width ({page} mm)"
    )]
    ColumnsDoNotFit { columns: f64, margins: f64, page: f64 },

    #[error("footer offset {offset} mm must lie within the page-break margin of {margin} mm")]
    FooterOutsideMargin { offset: f64, margin: f64 },

    #[error("top and bottom margins leave no room for content on a {page} mm page")]
    NoContentHeight { page: f64 },
}

/// Fixed widths of the three table columns in whole millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnWidths {
    pub place: usize,
    pub player_name: usize,
    pub total_points: usize,
}

impl ColumnWidths {
    pub const fn new(place: usize, player_name: usize, total_points: usize) -> Self {
        Self {
            place,
            player_name,
            total_points,
        }
    }

    pub fn total(&self) -> usize {
        self.place + self.player_name + self.total_points
    }

    /// Widths in column order, usable as `genpdf` table weights.
    pub fn as_weights(&self) -> Vec<usize> {
        vec![self.place, self.player_name, self.total_points]
    }
}

/// Footer line drawn on every page.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterStyle {
    pub text: String,
    /// Distance of the footer's top edge from the bottom edge of the page.
    pub offset_mm: f64,
    pub font_size: u8,
}

impl FooterStyle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset_mm: 10.0,
            font_size: 6,
        }
    }
}

/// Everything that controls how the ranking is laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingStyle {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_left_mm: f64,
    pub margin_top_mm: f64,
    pub margin_right_mm: f64,
    /// Content never extends closer than this to the bottom edge; overflow moves to a new page.
    pub page_break_margin_mm: f64,
    pub title_font_size: u8,
    pub subtitle_font_size: u8,
    pub table_font_size: u8,
    /// Vertical gap between the heading block and the table.
    pub title_gap_mm: f64,
    pub cell_padding_mm: f64,
    pub columns: ColumnWidths,
    pub footer: Option<FooterStyle>,
    pub show_timestamp: bool,
    /// Fixed generation time; the current local time is used when unset.
    pub generated_at: Option<NaiveDateTime>,
    pub fonts: FontSource,
}

impl Default for RankingStyle {
    fn default() -> Self {
        Self::detailed()
    }
}

impl RankingStyle {
    /// Layout with a generation timestamp under the title and an attribution footer.
    pub fn detailed() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_left_mm: 10.0,
            margin_top_mm: 10.0,
            margin_right_mm: 10.0,
            page_break_margin_mm: 15.0,
            title_font_size: 12,
            subtitle_font_size: 8,
            table_font_size: 9,
            title_gap_mm: 10.0,
            cell_padding_mm: 1.0,
            columns: ColumnWidths::new(15, 140, 35),
            footer: Some(FooterStyle::new(DEFAULT_FOOTER_TEXT)),
            show_timestamp: true,
            generated_at: None,
            fonts: FontSource::Search,
        }
    }

    /// Plain layout: larger type, wider margins, no timestamp and no footer.
    pub fn compact() -> Self {
        Self {
            margin_left_mm: 15.0,
            margin_top_mm: 15.0,
            margin_right_mm: 15.0,
            page_break_margin_mm: 20.0,
            title_font_size: 16,
            subtitle_font_size: 10,
            table_font_size: 10,
            title_gap_mm: 8.0,
            cell_padding_mm: 1.5,
            columns: ColumnWidths::new(20, 130, 30),
            footer: None,
            show_timestamp: false,
            ..Self::detailed()
        }
    }

    pub fn with_paper_size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.page_width_mm = width_mm;
        self.page_height_mm = height_mm;
        self
    }

    pub fn with_margins(mut self, left_mm: f64, top_mm: f64, right_mm: f64) -> Self {
        self.margin_left_mm = left_mm;
        self.margin_top_mm = top_mm;
        self.margin_right_mm = right_mm;
        self
    }

    pub fn with_page_break_margin(mut self, margin_mm: f64) -> Self {
        self.page_break_margin_mm = margin_mm;
        self
    }

    pub fn with_columns(mut self, columns: ColumnWidths) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<Option<FooterStyle>>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn with_timestamp(mut self, show_timestamp: bool) -> Self {
        self.show_timestamp = show_timestamp;
        self
    }

    /// Pins the generation time, which makes repeated renders byte-for-byte comparable.
    pub fn with_generated_at(mut self, generated_at: impl Into<Option<NaiveDateTime>>) -> Self {
        self.generated_at = generated_at.into();
        self
    }

    pub fn with_fonts(mut self, fonts: FontSource) -> Self {
        self.fonts = fonts;
        self
    }

    /// Width available to the table between the side margins.
    pub fn content_width_mm(&self) -> f64 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Checks that the parameters describe a drawable page.
    pub fn validate(&self) -> Result<(), StyleError> {
        let columns = self.columns.total() as f64;
        if (columns - self.content_width_mm()).abs() > WIDTH_TOLERANCE_MM {
            return Err(StyleError::ColumnsDoNotFit {
                columns,
                margins: self.margin_left_mm + self.margin_right_mm,
                page: self.page_width_mm,
            });
        }

        if self.margin_top_mm + self.page_break_margin_mm >= self.page_height_mm {
            return Err(StyleError::NoContentHeight {
                page: self.page_height_mm,
            });
        }

        if let Some(footer) = &self.footer {
            if footer.offset_mm <= 0.0 || footer.offset_mm > self.page_break_margin_mm {
                return Err(StyleError::FooterOutsideMargin {
                    offset: footer.offset_mm,
                    margin: self.page_break_margin_mm,
                });
            }
        }

        Ok(())
    }
}

/// Formats the generation time the way the subtitle prints it.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
