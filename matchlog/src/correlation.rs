use serde::Serialize;
use thiserror::Error;

use crate::{Float, MatchRecord, Metric};

/// A correlation needs strictly more than this many paired observations
/// before the engine will report a coefficient
pub const MIN_OBSERVATIONS: usize = 5;

#[derive(Debug, Error)]
pub enum CorrelationError {
    #[error(
        "insufficient data for {primary} vs {candidate}: {observed} valid pairs, \
         more than {MIN_OBSERVATIONS} required"
    )]
    InsufficientData {
        primary: Metric,
        candidate: Metric,
        observed: usize,
    },
}

/// Qualitative bucket for a coefficient's absolute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Strength {
    #[strum(serialize = "Very weak")]
    #[serde(rename = "Very weak")]
    VeryWeak,
    #[strum(serialize = "Weak")]
    Weak,
    #[strum(serialize = "Moderate")]
    Moderate,
    #[strum(serialize = "Strong")]
    Strong,
    #[strum(serialize = "Very strong")]
    #[serde(rename = "Very strong")]
    VeryStrong,
}

impl Strength {
    pub fn classify(coefficient: Float) -> Self {
        match coefficient.abs() {
            r if r >= 0.8 => Self::VeryStrong,
            r if r >= 0.6 => Self::Strong,
            r if r >= 0.4 => Self::Moderate,
            r if r >= 0.2 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

/// One entry of a ranked-correlations listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCorrelation {
    pub metric: Metric,
    pub coefficient: Float,
    pub strength: Strength,
    pub direction: Direction,
}

/// Pearson correlation coefficient between two equal-length series.
///
/// Means are taken in one pass, covariance and variances in a second;
/// the result is `cov / (sqrt(var_x) * sqrt(var_y))`, in `[-1, 1]` up to
/// floating-point tolerance. When either series has zero variance (which
/// covers empty and single-element input) the coefficient is 0, never NaN.
pub fn pearson(x: &[Float], y: &[Float]) -> Float {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as Float;

    let x_mean = x.iter().sum::<Float>() / n;
    let y_mean = y.iter().sum::<Float>() / n;

    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    let mut y_variance = 0.0;

    for (&x_value, &y_value) in x.iter().zip(y) {
        let x_diff = x_value - x_mean;
        let y_diff = y_value - y_mean;
        covariance += x_diff * y_diff;
        x_variance += x_diff * x_diff;
        y_variance += y_diff * y_diff;
    }

    if x_variance == 0.0 || y_variance == 0.0 {
        return 0.0;
    }

    covariance / (x_variance.sqrt() * y_variance.sqrt())
}

/// Correlate two metrics over a record subset.
///
/// Pairs where either value is non-finite are screened out first; if no
/// more than [`MIN_OBSERVATIONS`] valid pairs remain the result is
/// [`CorrelationError::InsufficientData`] instead of a misleading number.
pub fn metric_correlation(
    records: &[&MatchRecord],
    primary: Metric,
    candidate: Metric,
) -> Result<Float, CorrelationError> {
    let (x, y) = paired_values(records, primary, candidate);

    if x.len() <= MIN_OBSERVATIONS {
        return Err(CorrelationError::InsufficientData {
            primary,
            candidate,
            observed: x.len(),
        });
    }

    Ok(pearson(&x, &y))
}

/// Correlate a primary metric against a candidate set, strongest first.
///
/// Candidates equal to the primary metric are skipped, as are candidates
/// without enough valid pairs; ties in |r| keep the candidate order (the
/// sort is stable). When no candidate has enough data the whole call
/// reports the shortfall.
pub fn ranked_correlations(
    records: &[&MatchRecord],
    primary: Metric,
    candidates: &[Metric],
) -> Result<Vec<RankedCorrelation>, CorrelationError> {
    let mut insufficient = None;
    let mut correlations = Vec::new();

    for &candidate in candidates {
        if candidate == primary {
            continue;
        }

        match metric_correlation(records, primary, candidate) {
            Ok(coefficient) => correlations.push(RankedCorrelation {
                metric: candidate,
                coefficient,
                strength: Strength::classify(coefficient),
                direction: if coefficient >= 0.0 {
                    Direction::Positive
                } else {
                    Direction::Negative
                },
            }),
            Err(error) => insufficient = Some(error),
        }
    }

    if correlations.is_empty()
        && let Some(error) = insufficient
    {
        return Err(error);
    }

    correlations.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));
    Ok(correlations)
}

/// All-pairs correlation matrix over a metric set, diagonal included.
///
/// The diagonal is 1 for any metric that varies across the subset, and 0
/// for a constant metric (the zero-variance guard in [`pearson`] wins over
/// the `corr(x, x) = 1` identity).
pub fn correlation_matrix(records: &[&MatchRecord], metrics: &[Metric]) -> Vec<Vec<Float>> {
    metrics
        .iter()
        .map(|&row_metric| {
            metrics
                .iter()
                .map(|&column_metric| {
                    let (x, y) = paired_values(records, row_metric, column_metric);
                    pearson(&x, &y)
                })
                .collect()
        })
        .collect()
}

// Extract the two series, dropping pairs with a non-finite side
fn paired_values(
    records: &[&MatchRecord],
    a: Metric,
    b: Metric,
) -> (Vec<Float>, Vec<Float>) {
    records
        .iter()
        .map(|record| (a.value(record), b.value(record)))
        .filter(|(a_value, b_value)| a_value.is_finite() && b_value.is_finite())
        .unzip()
}
