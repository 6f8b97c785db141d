use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MatchRecord, ParseError, RANKED_MODES, parse_records};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(
        "no matches remain after filtering — check the cutoff date, and that the export \
         contains the required columns (UTC Timestamp, Total XP, ...)"
    )]
    Empty,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Counters from one run of the load pipeline, for user-facing reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Data rows tokenized from the CSV
    pub parsed: usize,
    /// Rows whose field count differed from the header's (kept anyway)
    pub ragged: usize,
    /// Rows discarded during normalization (invalid timestamp)
    pub discarded: usize,
    /// Normalized records dropped by the cutoff/quality filter
    pub filtered_out: usize,
    /// Records in the working dataset
    pub loaded: usize,
}

/// The working dataset: normalized records that passed the recency cutoff
/// and the data-quality filter, sorted by timestamp
///
/// Built once per load and replaced wholesale on reload; there is no
/// incremental update path.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<MatchRecord>,
}

impl Dataset {
    /// Filter normalized records down to the working dataset.
    ///
    /// Keeps records with `timestamp >= cutoff` and `total_xp > 0` (a
    /// zero-XP row is a bot or incomplete match), then sorts by timestamp.
    /// Fails closed with [`DatasetError::Empty`] when nothing survives.
    pub fn build(
        records: Vec<MatchRecord>,
        cutoff: NaiveDateTime,
    ) -> Result<Self, DatasetError> {
        let mut records: Vec<MatchRecord> = records
            .into_iter()
            .filter(|record| record.timestamp >= cutoff && record.total_xp > 0.0)
            .collect();

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        records.sort_by_key(|record| record.timestamp);

        Ok(Self { records })
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return the records matching a selection, preserving dataset order.
    ///
    /// Pure and idempotent: the same selection over the same dataset always
    /// yields the same subset.
    pub fn select(&self, selection: &Selection) -> Vec<&MatchRecord> {
        self.records
            .iter()
            .filter(|record| selection.matches(record))
            .collect()
    }

    /// Unique named maps in the dataset, sorted. Feeds the map selector.
    pub fn maps(&self) -> Vec<String> {
        let mut maps: Vec<String> = self
            .records
            .iter()
            .map(|record| record.map.clone())
            .filter(|map| map != "Unknown")
            .collect();
        maps.sort();
        maps.dedup();
        maps
    }

    /// Unique game types in the dataset, sorted
    pub fn game_types(&self) -> Vec<String> {
        let mut game_types: Vec<String> = self
            .records
            .iter()
            .map(|record| record.game_type.clone())
            .filter(|game_type| game_type != "Unknown")
            .collect();
        game_types.sort();
        game_types.dedup();
        game_types
    }
}

/// Game-mode side of a [`Selection`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameModeFilter {
    /// Every game type
    #[default]
    All,
    /// Only the competitive set: Hardpoint, Control, Search and Destroy
    Ranked,
    /// One specific game type, matched exactly
    #[serde(untagged)]
    Mode(String),
}

impl From<&str> for GameModeFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "ranked" => Self::Ranked,
            mode => Self::Mode(mode.to_string()),
        }
    }
}

/// Map side of a [`Selection`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapFilter {
    #[default]
    All,
    #[serde(untagged)]
    Map(String),
}

impl From<&str> for MapFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            map => Self::Map(map.to_string()),
        }
    }
}

/// What the user currently has selected in the mode and map dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub game_mode: GameModeFilter,
    pub map: MapFilter,
}

impl Selection {
    pub fn new(game_mode: impl Into<GameModeFilter>, map: impl Into<MapFilter>) -> Self {
        Self {
            game_mode: game_mode.into(),
            map: map.into(),
        }
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        let mode_matches = match &self.game_mode {
            GameModeFilter::All => true,
            GameModeFilter::Ranked => RANKED_MODES.contains(&record.game_type.as_str()),
            GameModeFilter::Mode(mode) => record.game_type == *mode,
        };

        let map_matches = match &self.map {
            MapFilter::All => true,
            MapFilter::Map(map) => record.map == *map,
        };

        mode_matches && map_matches
    }
}

/// Run the whole load pipeline: tokenize, normalize, filter.
///
/// Malformed rows are dropped individually and counted in the summary;
/// only an empty input or an empty post-filter dataset fails the load.
pub fn load_records(
    text: &str,
    cutoff: NaiveDateTime,
) -> Result<(Dataset, LoadSummary), LoadError> {
    let parsed = parse_records(text)?;

    let mut summary = LoadSummary {
        parsed: parsed.records.len(),
        ragged: parsed.ragged_rows,
        ..LoadSummary::default()
    };

    let records: Vec<MatchRecord> = parsed
        .records
        .iter()
        .filter_map(MatchRecord::from_raw)
        .collect();
    summary.discarded = summary.parsed - records.len();

    let normalized = records.len();
    let dataset = Dataset::build(records, cutoff)?;
    summary.filtered_out = normalized - dataset.len();
    summary.loaded = dataset.len();

    Ok((dataset, summary))
}
