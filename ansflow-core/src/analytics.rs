//! Simulated statistics
//!
//! Dashboard and analytics views fall back to generated numbers when the
//! backend's analytics endpoints fail or return nothing. Everything produced
//! here has `simulated = true`.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::domain::analytics::{
    AnalyticsOverview, ExecutionTrend, ExecutionTrendPoint, PipelineStats,
};

/// Daily execution counts for the `days` days ending at `today` (inclusive)
pub fn simulate_execution_trend<R: Rng>(
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> ExecutionTrend {
    let points = (0..days)
        .rev()
        .map(|offset| {
            let total = rng.gen_range(5..=40u64);
            let failed = rng.gen_range(0..=total / 4);
            ExecutionTrendPoint {
                date: today - Duration::days(offset as i64),
                total,
                success: total - failed,
                failed,
            }
        })
        .collect();

    ExecutionTrend {
        days,
        points,
        simulated: true,
    }
}

/// Per-pipeline aggregates for the given `(id, name)` pairs
pub fn simulate_pipeline_stats<R: Rng>(
    pipelines: &[(i64, &str)],
    rng: &mut R,
) -> Vec<PipelineStats> {
    pipelines
        .iter()
        .map(|(id, name)| PipelineStats {
            pipeline_id: *id,
            pipeline_name: name.to_string(),
            total_executions: rng.gen_range(1..=120),
            success_rate: round1(rng.gen_range(60.0..=100.0)),
            average_duration: Some(round1(rng.gen_range(20.0..=900.0))),
            simulated: true,
        })
        .collect()
}

/// Headline numbers consistent with a simulated trend
pub fn simulate_overview<R: Rng>(trend: &ExecutionTrend, rng: &mut R) -> AnalyticsOverview {
    let total_pipelines = rng.gen_range(3..=25u64);
    AnalyticsOverview {
        total_pipelines,
        active_pipelines: rng.gen_range(1..=total_pipelines),
        total_executions: trend.total(),
        success_rate: round1(trend.success_rate()),
        average_duration: Some(round1(rng.gen_range(20.0..=900.0))),
        simulated: true,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn test_trend_covers_window_ending_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let trend = simulate_execution_trend(7, today(), &mut rng);

        assert!(trend.simulated);
        assert_eq!(trend.points.len(), 7);
        assert_eq!(trend.points.last().unwrap().date, today());
        assert_eq!(
            trend.points.first().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 7, 9).unwrap()
        );
        for point in &trend.points {
            assert_eq!(point.success + point.failed, point.total);
        }
    }

    #[test]
    fn test_pipeline_stats_are_flagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let stats = simulate_pipeline_stats(&[(1, "build"), (2, "deploy")], &mut rng);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].pipeline_name, "deploy");
        assert!(stats.iter().all(|s| s.simulated));
        assert!(stats.iter().all(|s| (60.0..=100.0).contains(&s.success_rate)));
    }

    #[test]
    fn test_overview_matches_trend() {
        let mut rng = StdRng::seed_from_u64(3);
        let trend = simulate_execution_trend(14, today(), &mut rng);
        let overview = simulate_overview(&trend, &mut rng);

        assert!(overview.simulated);
        assert_eq!(overview.total_executions, trend.total());
        assert!(overview.active_pipelines <= overview.total_pipelines);
    }

    #[test]
    fn test_empty_window() {
        let mut rng = StdRng::seed_from_u64(0);
        let trend = simulate_execution_trend(0, today(), &mut rng);
        assert!(trend.points.is_empty());
        assert_eq!(trend.success_rate(), 0.0);
    }
}
