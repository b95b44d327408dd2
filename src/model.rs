//! Typed representations of the tournament API payloads and the table rendered from them.
//!
//! The wire types decode straight from the JSON returned by the ranking API and fail fast when a
//! required field is missing.  [`RankingTable`] turns the decoded entries into display rows so the
//! renderer only ever deals with strings that are ready to be printed.

use std::fmt;

use serde::Deserialize;

/// Title used when the tournament details do not carry a name.
pub const DEFAULT_TOURNAMENT_NAME: &str = "Tournament Ranking";

/// Column headings of the ranking table, in display order.
pub const TABLE_HEADERS: [&str; 3] = ["Place", "Player Name", "Total Points"];

/// Tournament metadata. Only the name is consumed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TournamentDetails {
    #[serde(default)]
    name: Option<String>,
}

impl TournamentDetails {
    /// Creates details carrying the given name.
    pub fn new(name: impl Into<Option<String>>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the raw name, if the API provided one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name to print as the document title.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_TOURNAMENT_NAME)
    }
}

/// Player reference embedded in a ranking entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
}

/// Total points of a ranking entry, kept as the JSON number that was received.
///
/// Keeping the original number means integers print without a fractional part and decimals print
/// exactly as they were sent, without rounding or grouping separators.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Points(serde_json::Number);

impl From<serde_json::Number> for Points {
    fn from(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One player's placement record as returned by the ranking endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RankingEntry {
    pub player: Player,
    pub total_points: Points,
}

impl RankingEntry {
    /// Convenience constructor used by callers that build rankings by hand.
    pub fn new(
        player_name: impl Into<String>,
        total_points: impl Into<serde_json::Number>,
    ) -> Self {
        Self {
            player: Player {
                name: player_name.into(),
            },
            total_points: Points(total_points.into()),
        }
    }
}

/// A table row with every cell already formatted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingRow {
    pub place: String,
    pub player_name: String,
    pub total_points: String,
}

impl RankingRow {
    /// Returns the cells in column order.
    pub fn cells(&self) -> [&str; 3] {
        [&self.place, &self.player_name, &self.total_points]
    }
}

impl fmt::Display for RankingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.place, self.player_name, self.total_points
        )
    }
}

/// The ranking laid out as a header plus one display row per entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankingTable {
    rows: Vec<RankingRow>,
}

impl RankingTable {
    /// Builds the table from entries in rank order.
    ///
    /// The place column is the 1-based position in `entries`; any rank carried by the source data
    /// has already been dropped during decoding.
    pub fn from_entries(entries: &[RankingEntry]) -> Self {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| RankingRow {
                place: (index + 1).to_string(),
                player_name: entry.player.name.clone(),
                total_points: entry.total_points.to_string(),
            })
            .collect();
        Self { rows }
    }

    /// Returns the header cells.
    pub fn headers(&self) -> [&'static str; 3] {
        TABLE_HEADERS
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[RankingRow] {
        &self.rows
    }

    /// Number of rows drawn, header included.
    pub fn rendered_row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
