//! The end-to-end export: fetch details, fetch ranking, render, write.

use std::path::{Path, PathBuf};

use log::info;

use crate::api::TournamentApi;
use crate::render::{write_pdf, RankingDocument, DEFAULT_OUTPUT_PATH};
use crate::style::RankingStyle;
use crate::Result;

/// Milestones reported while an export runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress<'a> {
    FetchingDetails,
    FetchingRanking { tournament_name: &'a str },
    Rendering { entries: usize },
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSummary {
    pub tournament_name: String,
    pub output_path: PathBuf,
    /// Table rows drawn, header included.
    pub table_rows: usize,
}

/// Exports the ranking of a tournament to a PDF file.
pub struct RankingReport {
    api: TournamentApi,
    style: RankingStyle,
    output_path: PathBuf,
}

impl RankingReport {
    /// Creates an export writing to [`DEFAULT_OUTPUT_PATH`] with the default layout.
    pub fn new(api: TournamentApi) -> Self {
        Self {
            api,
            style: RankingStyle::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    pub fn with_style(mut self, style: RankingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs the export for `tournament_id`.
    ///
    /// Both requests complete before anything is rendered, and the file is written only after the
    /// whole document has been rendered, so any failure leaves the output path untouched.
    pub fn run(
        &self,
        tournament_id: &str,
        mut progress: impl FnMut(Progress<'_>),
    ) -> Result<ReportSummary> {
        progress(Progress::FetchingDetails);
        let details = self.api.fetch_tournament_details(tournament_id)?;
        let tournament_name = details.display_name();

        progress(Progress::FetchingRanking { tournament_name });
        let entries = self.api.fetch_ranking(tournament_id)?;

        progress(Progress::Rendering {
            entries: entries.len(),
        });
        let pdf = RankingDocument::new(tournament_name, &entries)
            .with_style(self.style.clone())
            .render()?;
        let output_path = write_pdf(&pdf, &self.output_path)?;

        info!(
            "Exported {} ranking entries of '{}' to {}",
            entries.len(),
            tournament_name,
            output_path.display()
        );

        Ok(ReportSummary {
            tournament_name: tournament_name.to_owned(),
            output_path,
            table_rows: pdf.table_rows,
        })
    }
}
