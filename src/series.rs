//! Ramp-then-stabilize measurement series.
//!
//! A series steps progress from 0.0 to 1.0 in 2% increments. While progress
//! is below the ramp threshold the sampling center climbs linearly, after it
//! the center holds steady, and the reported figure is one final independent
//! draw made after the animation finishes. That last draw is the whole
//! point: the number shown in the results box is allowed to differ slightly
//! from the last animated frame.

use crate::config::{PingProfile, SeriesProfile};
use crate::sampler::SpeedModel;
use crate::traits::ProgressSink;
use log::debug;

/// Progress steps per series (0%, 2%, ..., 100%).
pub const SERIES_STEPS: usize = 50;

/// Distribution center and spread at a given progress fraction.
pub fn center_at(profile: &SeriesProfile, progress: f64) -> (f64, f64) {
    if progress < profile.ramp_threshold {
        (
            profile.ramp_base + progress * profile.ramp_slope,
            profile.ramp_variance,
        )
    } else {
        (profile.steady_base, profile.steady_variance)
    }
}

/// Run one measurement series, reporting every step to `sink`, and return
/// the final independently-sampled figure.
pub fn run_series(model: &SpeedModel, profile: &SeriesProfile, sink: &mut dyn ProgressSink) -> f64 {
    let mut peak: f64 = 0.0;

    for i in 0..=SERIES_STEPS {
        let progress = i as f64 / SERIES_STEPS as f64;
        let (base, variance) = center_at(profile, progress);
        let value = model.sample(base, variance);

        peak = peak.max(value);
        sink.report(progress, value);
    }

    debug!("[Series] Peak during animation: {:.2}", peak);

    model.sample(profile.final_base, profile.final_variance)
}

/// Measure latency: an arithmetic mean of independent ping samples, plus one
/// uncorrelated jitter sample. Each ping sample is reported to `sink`.
pub fn measure_ping(model: &SpeedModel, profile: &PingProfile, sink: &mut dyn ProgressSink) -> (f64, f64) {
    let mut sum = 0.0;
    for i in 0..profile.sample_count {
        let ping = model.sample(profile.ping_base, profile.ping_variance);
        sum += ping;
        sink.report((i + 1) as f64 / profile.sample_count as f64, ping);
    }
    let avg = sum / profile.sample_count as f64;

    let jitter = model.sample(profile.jitter_base, profile.jitter_variance);
    (avg, jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::traits::{CollectingSink, MockProgressSink, NullSink};

    fn download() -> SeriesProfile {
        ModelConfig::default().download
    }

    #[test]
    fn test_center_monotone_during_ramp_then_flat() {
        let profile = download();
        let mut prev = f64::MIN;
        for i in 0..=SERIES_STEPS {
            let progress = i as f64 / SERIES_STEPS as f64;
            let (base, _) = center_at(&profile, progress);
            if progress < profile.ramp_threshold {
                assert!(base >= prev, "ramp center decreased at {}", progress);
                prev = base;
            } else {
                assert_eq!(base, profile.steady_base);
            }
        }
    }

    #[test]
    fn test_series_reports_51_steps_from_0_to_1() {
        let model = SpeedModel::new(Some(21));
        let mut sink = CollectingSink::new();
        let _ = run_series(&model, &download(), &mut sink);

        assert_eq!(sink.steps.len(), SERIES_STEPS + 1);
        assert_eq!(sink.steps[0].0, 0.0);
        assert_eq!(sink.steps[SERIES_STEPS].0, 1.0);
        // 2% increments
        assert!((sink.steps[1].0 - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_early_steps_average_below_late_steps() {
        // Statistical check of the ramp shape: the first step samples around
        // 50 and the steady phase around 95; averaged over many runs the gap
        // cannot close.
        let model = SpeedModel::new(Some(22));
        let profile = download();
        let runs = 200;

        let mut first_sum = 0.0;
        let mut steady_sum = 0.0;
        for _ in 0..runs {
            let mut sink = CollectingSink::new();
            let _ = run_series(&model, &profile, &mut sink);
            first_sum += sink.steps[0].1;
            steady_sum += sink.steps[SERIES_STEPS].1;
        }

        let first_avg = first_sum / runs as f64;
        let steady_avg = steady_sum / runs as f64;
        assert!(
            first_avg + 20.0 < steady_avg,
            "ramp start {:.1} not clearly below steady {:.1}",
            first_avg,
            steady_avg
        );
    }

    #[test]
    fn test_final_value_independent_of_last_frame() {
        let model = SpeedModel::new(Some(23));
        let profile = download();

        let mut ever_differs = false;
        for _ in 0..50 {
            let mut sink = CollectingSink::new();
            let final_value = run_series(&model, &profile, &mut sink);
            assert!(final_value >= 1.0);
            if sink.last_value() != Some(final_value) {
                ever_differs = true;
            }
        }
        assert!(
            ever_differs,
            "final value always equals last animated frame; it must be an independent draw"
        );
    }

    #[test]
    fn test_series_drives_mock_sink() {
        let model = SpeedModel::new(Some(24));
        let mut sink = MockProgressSink::new();
        sink.expect_report()
            .times(SERIES_STEPS + 1)
            .returning(|_, _| ());

        let _ = run_series(&model, &download(), &mut sink);
    }

    #[test]
    fn test_ping_is_average_of_samples() {
        let model = SpeedModel::new(Some(25));
        let profile = ModelConfig::default().ping;
        let mut sink = CollectingSink::new();

        let (ping, jitter) = measure_ping(&model, &profile, &mut sink);

        assert_eq!(sink.steps.len(), profile.sample_count);
        let mean: f64 = sink.steps.iter().map(|&(_, v)| v).sum::<f64>() / sink.steps.len() as f64;
        assert!((ping - mean).abs() < 1e-9);
        assert!(ping >= 1.0);
        assert!(jitter >= 1.0);
    }

    #[test]
    fn test_null_sink_accepts_series() {
        let model = SpeedModel::new(Some(26));
        let v = run_series(&model, &download(), &mut NullSink);
        assert!(v >= 1.0);
    }
}
