//! Fetches a tournament ranking from the Mahjong Tracker API and renders it as a PDF table.
//!
//! The pipeline is deliberately linear: [`api::TournamentApi`] performs two blocking requests,
//! [`model::RankingTable`] turns the decoded entries into display rows and
//! [`render::RankingDocument`] lays them out with `genpdf` before the bytes are written to disk.

pub mod api;
pub mod builder;
pub mod elements;
pub mod fonts;
pub mod model;
pub mod render;
pub mod report;
pub mod style;

use thiserror::Error;

pub use api::{ApiConfig, FetchError, TournamentApi};
pub use model::{RankingEntry, RankingTable, TournamentDetails};
pub use render::{generate_pdf, RankingDocument, RenderError, DEFAULT_OUTPUT_PATH};
pub use report::{RankingReport, ReportSummary};
pub use style::RankingStyle;

/// Any failure of a ranking export.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
