//! Rendering of a tournament ranking into a PDF table.
//!
//! The document is laid out as a centered title, an optional generation timestamp, a gap and a
//! framed three-column table.  Rendering happens entirely in memory and the output file is
//! replaced in one rename once the PDF bytes are on disk, so a failure never leaves a partial file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use genpdf::elements::{FrameCellDecorator, LinearLayout, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Element};
use log::{debug, info, warn};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::builder::DocumentBuilder;
use crate::elements::{table_cell, text_line, VerticalSpace};
use crate::model::{RankingEntry, RankingTable};
use crate::style::{format_timestamp, RankingStyle, StyleError};

/// File name used when the caller does not pick an output path.
pub const DEFAULT_OUTPUT_PATH: &str = "ranking.pdf";

const COLUMN_ALIGNMENTS: [Alignment; 3] = [Alignment::Center, Alignment::Left, Alignment::Right];

/// Failures raised while producing the ranking PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid layout: {0}")]
    InvalidStyle(#[from] StyleError),

    #[error("Failed to load fonts")]
    ResourceLoad(#[source] genpdf::error::Error),

    #[error("Failed to lay out the ranking document")]
    Layout(#[source] genpdf::error::Error),

    #[error("Failed to write PDF to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A fully rendered document held in memory.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Number of table rows drawn, header included.
    pub table_rows: usize,
}

/// Renders the ranking of one tournament.
pub struct RankingDocument<'a> {
    tournament_name: &'a str,
    table: RankingTable,
    style: RankingStyle,
}

impl<'a> RankingDocument<'a> {
    /// Prepares a document for `entries`, listed in rank order.
    pub fn new(tournament_name: &'a str, entries: &[RankingEntry]) -> Self {
        Self {
            tournament_name,
            table: RankingTable::from_entries(entries),
            style: RankingStyle::default(),
        }
    }

    /// Replaces the layout parameters.
    pub fn with_style(mut self, style: RankingStyle) -> Self {
        self.style = style;
        self
    }

    /// Renders the PDF into memory.
    pub fn render(&self) -> Result<RenderedPdf, RenderError> {
        self.style.validate()?;
        let font_family = self.style.fonts.load().map_err(RenderError::ResourceLoad)?;

        if self.table.is_empty() {
            warn!("'{}' has no ranking entries", self.tournament_name);
        }

        let builder = self.document_builder();
        debug!(
            "Laying out '{}' (footer: {})",
            self.tournament_name,
            builder.has_footer()
        );
        let mut document = builder.build(font_family);
        document.set_font_size(self.style.table_font_size);
        document.push(self.heading());
        document.push(VerticalSpace::new(self.style.title_gap_mm));
        document.push(self.table_layout()?);

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(RenderError::Layout)?;
        debug!(
            "Rendered {} table rows into {} bytes",
            self.table.rendered_row_count(),
            bytes.len()
        );

        Ok(RenderedPdf {
            bytes,
            table_rows: self.table.rendered_row_count(),
        })
    }

    fn document_builder(&self) -> DocumentBuilder {
        let style = &self.style;
        let builder = DocumentBuilder::new()
            .with_title(self.tournament_name)
            .with_paper_size(style.page_width_mm, style.page_height_mm)
            .with_margins(
                style.margin_left_mm,
                style.margin_top_mm,
                style.margin_right_mm,
            )
            .with_page_break_margin(style.page_break_margin_mm);

        match style.footer.clone() {
            Some(footer) => builder.with_footer(footer.offset_mm, move |_page| {
                text_line(
                    footer.text.clone(),
                    Alignment::Center,
                    Style::new().with_font_size(footer.font_size),
                )
            }),
            None => builder,
        }
    }

    fn heading(&self) -> LinearLayout {
        let mut heading = LinearLayout::vertical();
        heading.push(text_line(
            self.tournament_name,
            Alignment::Center,
            Style::new()
                .bold()
                .with_font_size(self.style.title_font_size),
        ));

        if let Some(subtitle) = self.subtitle() {
            heading.push(text_line(
                subtitle,
                Alignment::Center,
                Style::new().with_font_size(self.style.subtitle_font_size),
            ));
        }

        heading
    }

    fn subtitle(&self) -> Option<String> {
        if !self.style.show_timestamp {
            return None;
        }
        let generated_at = self
            .style
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());
        Some(format!("(generated at {})", format_timestamp(&generated_at)))
    }

    fn table_layout(&self) -> Result<TableLayout, RenderError> {
        let padding = self.style.cell_padding_mm;
        let mut table = TableLayout::new(self.style.columns.as_weights());
        table.set_cell_decorator(FrameCellDecorator::new(true, true, true));

        let mut header = table.row();
        for heading in self.table.headers() {
            let cell = table_cell(heading, Alignment::Center, padding).styled(Style::new().bold());
            header = header.element(cell);
        }
        header.push().map_err(RenderError::Layout)?;

        for row in self.table.rows() {
            let mut table_row = table.row();
            for (cell, alignment) in row.cells().into_iter().zip(COLUMN_ALIGNMENTS) {
                table_row = table_row.element(table_cell(cell, alignment, padding));
            }
            table_row.push().map_err(RenderError::Layout)?;
        }

        Ok(table)
    }
}

/// Writes rendered bytes to `path`.
///
/// The bytes go to a temporary file next to `path` which then replaces it, so an existing file
/// is either left alone or fully replaced.
pub fn write_pdf(pdf: &RenderedPdf, path: impl AsRef<Path>) -> Result<PathBuf, RenderError> {
    let path = path.as_ref();
    let write_error = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
    file.write_all(&pdf.bytes).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    info!("Wrote {} bytes to {}", pdf.bytes.len(), path.display());
    Ok(path.to_path_buf())
}

/// Renders `entries` under `tournament_name` and writes the PDF to `output_path`.
///
/// Returns the path that was written.
pub fn generate_pdf(
    entries: &[RankingEntry],
    tournament_name: &str,
    output_path: impl AsRef<Path>,
    style: &RankingStyle,
) -> Result<PathBuf, RenderError> {
    let pdf = RankingDocument::new(tournament_name, entries)
        .with_style(style.clone())
        .render()?;
    write_pdf(&pdf, output_path)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{generate_pdf, write_pdf, RankingDocument, RenderError, RenderedPdf};
    use crate::fonts::FontSource;
    use crate::model::RankingEntry;
    use crate::style::{ColumnWidths, RankingStyle};

    #[test]
    fn invalid_style_is_rejected_before_fonts_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ranking.pdf");
        let style = RankingStyle::detailed()
            .with_columns(ColumnWidths::new(10, 10, 10))
            .with_fonts(FontSource::Directory(dir.path().join("missing")));

        let err = generate_pdf(&[RankingEntry::new("Alice", 1)], "Cup", &output, &style)
            .unwrap_err();

        assert!(matches!(err, RenderError::InvalidStyle(_)), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn missing_fonts_leave_no_output_behind() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ranking.pdf");
        let style =
            RankingStyle::detailed().with_fonts(FontSource::Directory(dir.path().join("fonts")));

        let err = generate_pdf(&[RankingEntry::new("Alice", 1)], "Cup", &output, &style)
            .unwrap_err();

        assert!(matches!(err, RenderError::ResourceLoad(_)), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn unwritable_output_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("no-such-dir").join("ranking.pdf");
        let pdf = RenderedPdf {
            bytes: b"%PDF-1.3\n".to_vec(),
            table_rows: 1,
        };

        let err = write_pdf(&pdf, &output).unwrap_err();
        match err {
            RenderError::Write { path, .. } => assert_eq!(path, output),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn existing_output_is_replaced_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ranking.pdf");
        std::fs::write(&output, b"previous export with more bytes than the new one").unwrap();
        let pdf = RenderedPdf {
            bytes: b"%PDF-1.3\n".to_vec(),
            table_rows: 1,
        };

        let written = write_pdf(&pdf, &output).unwrap();

        assert_eq!(written, output);
        assert_eq!(std::fs::read(&output).unwrap(), pdf.bytes);
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1, "temporary file should be renamed into place");
    }

    #[test]
    fn detailed_layout_shows_timestamp_and_footer() {
        let generated_at = NaiveDate::from_ymd_opt(2024, 4, 14)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let document = RankingDocument::new("Cup", &[RankingEntry::new("Alice", 1)])
            .with_style(RankingStyle::detailed().with_generated_at(generated_at));

        assert_eq!(
            document.subtitle().as_deref(),
            Some("(generated at 2024-04-14 18:30)")
        );
        assert!(document.document_builder().has_footer());
    }

    #[test]
    fn compact_layout_omits_timestamp_and_footer() {
        let document = RankingDocument::new("Cup", &[RankingEntry::new("Alice", 1)])
            .with_style(RankingStyle::compact());

        assert_eq!(document.subtitle(), None);
        assert!(!document.document_builder().has_footer());
    }
}
