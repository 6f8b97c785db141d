use std::path::{Path, PathBuf};

use matchlog::{Dataset, LoadError, LoadSummary, MatchRecord, Selection, load_records};
use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "no data file configured. Pass `--data <csv>` or set `data_file` in settings.toml"
    )]
    NoDataFile,

    #[error(
        "failed to read {}: {source}. Make sure the export exists and is readable",
        path.display()
    )]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Owns the session state: the current working dataset and its load report
///
/// The dataset is built once per load; a reload builds a whole new `App`,
/// so views never observe a half-updated dataset. Every view derives its
/// numbers from the dataset on demand.
#[derive(Debug)]
pub struct App {
    dataset: Dataset,
    summary: LoadSummary,
}

impl App {
    /// Load the export named on the command line or in the settings
    pub fn load(settings: Settings, data_override: Option<PathBuf>) -> Result<Self, AppError> {
        let data_file = data_override
            .or_else(|| settings.data_file.clone())
            .ok_or(AppError::NoDataFile)?;

        let (dataset, summary) = run_pipeline(&data_file, &settings)?;

        Ok(Self { dataset, summary })
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    pub fn select(&self, selection: &Selection) -> Vec<&MatchRecord> {
        self.dataset.select(selection)
    }
}

fn run_pipeline(path: &Path, settings: &Settings) -> Result<(Dataset, LoadSummary), AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadData {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(load_records(&text, settings.cutoff())?)
}
