//! Materialized payloads for the rendering boundary
//!
//! Each struct here is one fully prepared series for the external charting
//! layer: ordered points, labels, or a matrix, serialized as JSON. Nothing
//! downstream ever sees raw or partially filtered records.

use chrono::NaiveDateTime;
use matchlog::{
    CorrelationError, Float, MatchRecord, Metric, Outcome, RankedCorrelation, correlation_matrix,
    metric_average, ranked_correlations, win_loss_counts, win_rate,
};
use serde::Serialize;

/// The overview tab's stat cards
#[derive(Debug, Clone, Serialize)]
pub struct OverviewSummary {
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Float,
    pub average_kd: Float,
}

impl OverviewSummary {
    pub fn compute(records: &[&MatchRecord]) -> Self {
        let counts = win_loss_counts(records);

        Self {
            total_matches: records.len(),
            wins: counts.wins,
            losses: counts.losses,
            win_rate: win_rate(records),
            // The card shows 0 rather than a hole when no K/D is available
            average_kd: metric_average(records, Metric::KdRatio).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePoint {
    pub timestamp: NaiveDateTime,
    pub value: Float,
}

/// One metric over time, with the mean for the chart's average line
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub metric: Metric,
    pub points: Vec<TimePoint>,
    pub average: Option<Float>,
}

impl TimeSeries {
    pub fn compute(records: &[&MatchRecord], metric: Metric) -> Self {
        let points = records
            .iter()
            .map(|record| TimePoint {
                timestamp: record.timestamp,
                value: metric.value(record),
            })
            .collect();

        Self {
            metric,
            points,
            average: metric_average(records, metric),
        }
    }
}

/// The correlations tab: ranked bars for a primary metric plus the
/// all-pairs matrix over the fixed metric set
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub primary: Metric,
    pub bars: Vec<RankedCorrelation>,
    pub matrix_metrics: Vec<Metric>,
    pub matrix: Vec<Vec<Float>>,
}

impl CorrelationReport {
    pub fn compute(
        records: &[&MatchRecord],
        primary: Metric,
    ) -> Result<Self, CorrelationError> {
        let bars = ranked_correlations(records, primary, &Metric::CORRELATION_SET)?;
        let matrix = correlation_matrix(records, &Metric::CORRELATION_SET);

        Ok(Self {
            primary,
            bars,
            matrix_metrics: Metric::CORRELATION_SET.to_vec(),
            matrix,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub x: Float,
    pub y: Float,
    /// Win/loss/unknown, for point coloring
    pub outcome: Outcome,
}

/// Paired values of two metrics, one point per match
#[derive(Debug, Clone, Serialize)]
pub struct ScatterSeries {
    pub x_metric: Metric,
    pub y_metric: Metric,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    pub fn compute(records: &[&MatchRecord], x_metric: Metric, y_metric: Metric) -> Self {
        let points = records
            .iter()
            .map(|record| ScatterPoint {
                x: x_metric.value(record),
                y: y_metric.value(record),
                outcome: record.outcome,
            })
            .collect();

        Self {
            x_metric,
            y_metric,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use matchlog::RawRecord;

    use super::*;

    fn record(timestamp: &str, outcome: &str, kills: &str, deaths: &str) -> MatchRecord {
        let raw: RawRecord = [
            ("UTC Timestamp", timestamp),
            ("Match Outcome", outcome),
            ("Kills", kills),
            ("Deaths", deaths),
            ("Total XP", "5000"),
        ]
        .into_iter()
        .collect();
        MatchRecord::from_raw(&raw).unwrap()
    }

    #[test]
    fn test_overview_summary() {
        let records = vec![
            record("2024-03-01 9:00", "win", "10", "5"),
            record("2024-03-02 9:00", "loss", "6", "4"),
            record("2024-03-03 9:00", "", "8", "8"),
        ];
        let refs: Vec<&MatchRecord> = records.iter().collect();

        let summary = OverviewSummary::compute(&refs);
        assert_eq!(summary.total_matches, 3);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.win_rate, 50.0);
        assert!((summary.average_kd - (2.0 + 1.5 + 1.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_overview_summary_of_nothing() {
        let summary = OverviewSummary::compute(&[]);
        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.average_kd, 0.0);
    }

    #[test]
    fn test_time_series_preserves_order_and_mean() {
        let records = vec![
            record("2024-03-01 9:00", "win", "10", "5"),
            record("2024-03-02 9:00", "loss", "6", "4"),
        ];
        let refs: Vec<&MatchRecord> = records.iter().collect();

        let series = TimeSeries::compute(&refs, Metric::Kills);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].value, 10.0);
        assert_eq!(series.points[1].value, 6.0);
        assert_eq!(series.average, Some(8.0));
    }

    #[test]
    fn test_scatter_series_carries_outcomes() {
        let records = vec![record("2024-03-01 9:00", "win", "10", "5")];
        let refs: Vec<&MatchRecord> = records.iter().collect();

        let series = ScatterSeries::compute(&refs, Metric::Kills, Metric::Deaths);
        assert_eq!(series.points[0].x, 10.0);
        assert_eq!(series.points[0].y, 5.0);
        assert_eq!(series.points[0].outcome, Outcome::Win);
    }

    #[test]
    fn test_correlation_report_payload_shape() {
        let records: Vec<MatchRecord> = (0..10)
            .map(|i| {
                record(
                    &format!("2024-03-{:02} 9:00", i + 1),
                    if i % 2 == 0 { "win" } else { "loss" },
                    &format!("{}", 8 + i),
                    &format!("{}", 5 + i % 3),
                )
            })
            .collect();
        let refs: Vec<&MatchRecord> = records.iter().collect();

        let report = CorrelationReport::compute(&refs, Metric::Kills).unwrap();
        let set_len = Metric::CORRELATION_SET.len();
        assert_eq!(report.matrix.len(), set_len);
        assert!(report.matrix.iter().all(|row| row.len() == set_len));
        // Primary metric excluded from its own bar list
        assert!(report.bars.iter().all(|bar| bar.metric != Metric::Kills));
        // Strongest first
        let coefficients: Vec<Float> =
            report.bars.iter().map(|bar| bar.coefficient.abs()).collect();
        assert!(coefficients.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
