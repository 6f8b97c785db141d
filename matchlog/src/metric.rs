use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{Float, MatchRecord};

/// A numeric per-match metric that charts and correlations can be run over
///
/// Display labels match the export's column headers (and the derived-field
/// names the dashboard shows), so a label round-trips through
/// `Display`/`FromStr` and can come straight from user input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
pub enum Metric {
    #[strum(serialize = "Kills")]
    #[serde(rename = "Kills")]
    Kills,
    #[strum(serialize = "Deaths")]
    #[serde(rename = "Deaths")]
    Deaths,
    #[strum(serialize = "Assists")]
    #[serde(rename = "Assists")]
    Assists,
    #[strum(serialize = "Score")]
    #[serde(rename = "Score")]
    Score,
    #[strum(serialize = "Damage Done")]
    #[serde(rename = "Damage Done")]
    DamageDone,
    #[strum(serialize = "Damage Taken")]
    #[serde(rename = "Damage Taken")]
    DamageTaken,
    #[strum(serialize = "Skill")]
    #[serde(rename = "Skill")]
    Skill,
    #[strum(serialize = "Total XP")]
    #[serde(rename = "Total XP")]
    TotalXp,
    #[strum(serialize = "Percentage Of Time Moving")]
    #[serde(rename = "Percentage Of Time Moving")]
    TimeMoving,
    #[strum(serialize = "K/D Ratio")]
    #[serde(rename = "K/D Ratio")]
    KdRatio,
    #[strum(serialize = "EKIA")]
    #[serde(rename = "EKIA")]
    Ekia,
    #[strum(serialize = "EKIA/D Ratio")]
    #[serde(rename = "EKIA/D Ratio")]
    EkiaRatio,
    #[strum(serialize = "Headshot %")]
    #[serde(rename = "Headshot %")]
    HeadshotPct,
    #[strum(serialize = "Accuracy %")]
    #[serde(rename = "Accuracy %")]
    AccuracyPct,
}

impl Metric {
    /// The fixed metric set the correlation matrix view is built over
    pub const CORRELATION_SET: [Self; 9] = [
        Self::Kills,
        Self::Deaths,
        Self::DamageDone,
        Self::Score,
        Self::Skill,
        Self::KdRatio,
        Self::EkiaRatio,
        Self::AccuracyPct,
        Self::HeadshotPct,
    ];

    /// Every known metric, in declaration order
    pub fn all() -> &'static [Self] {
        Self::VARIANTS
    }

    /// Read this metric's value from a record
    pub fn value(self, record: &MatchRecord) -> Float {
        match self {
            Self::Kills => record.kills,
            Self::Deaths => record.deaths,
            Self::Assists => record.assists,
            Self::Score => record.score,
            Self::DamageDone => record.damage_done,
            Self::DamageTaken => record.damage_taken,
            Self::Skill => record.skill,
            Self::TotalXp => record.total_xp,
            Self::TimeMoving => record.percent_time_moving,
            Self::KdRatio => record.kd_ratio,
            Self::Ekia => record.ekia,
            Self::EkiaRatio => record.ekia_ratio,
            Self::HeadshotPct => record.headshot_pct,
            Self::AccuracyPct => record.accuracy_pct,
        }
    }
}
