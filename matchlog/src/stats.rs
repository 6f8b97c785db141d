use serde::Serialize;

use crate::{Float, MatchRecord, Metric, Outcome};

/// Win/loss tallies over a record subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLoss {
    pub wins: usize,
    pub losses: usize,
}

impl WinLoss {
    /// Matches with a known outcome
    pub fn decided(&self) -> usize {
        self.wins + self.losses
    }
}

/// Count wins and losses. Records with an unknown outcome count as neither.
pub fn win_loss_counts(records: &[&MatchRecord]) -> WinLoss {
    let mut counts = WinLoss::default();

    for record in records {
        match record.outcome {
            Outcome::Win => counts.wins += 1,
            Outcome::Loss => counts.losses += 1,
            Outcome::Unknown => {}
        }
    }

    counts
}

/// Win rate as a percentage of decided matches, 0 when none are decided
pub fn win_rate(records: &[&MatchRecord]) -> Float {
    let counts = win_loss_counts(records);

    if counts.decided() == 0 {
        return 0.0;
    }

    counts.wins as Float / counts.decided() as Float * 100.0
}

/// Arithmetic mean of the finite values, or `None` when there are none
pub fn average(values: impl IntoIterator<Item = Float>) -> Option<Float> {
    let mut sum = 0.0;
    let mut count = 0;

    for value in values.into_iter().filter(|value| value.is_finite()) {
        sum += value;
        count += 1;
    }

    (count > 0).then(|| sum / count as Float)
}

/// Mean of one metric over a record subset
pub fn metric_average(records: &[&MatchRecord], metric: Metric) -> Option<Float> {
    average(records.iter().map(|record| metric.value(record)))
}
