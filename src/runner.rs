//! Terminal test orchestration: the fixed stage sequence of a full run.

use crate::config::{ModelConfig, UiConfig};
use crate::host::{self, ServerInfo};
use crate::sampler::SpeedModel;
use crate::series;
use crate::traits::ProgressSink;
use crate::ui::{self, SpinnerSink, TerminalSink};
use log::debug;
use serde::Serialize;
use std::time::Duration;

/// The one artifact a completed run produces.
#[derive(Debug, Clone, Serialize)]
pub struct SpeedResult {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
    pub jitter_ms: f64,
    pub server: ServerInfo,
}

pub struct SpeedTest {
    model: SpeedModel,
    config: ModelConfig,
    ui: UiConfig,
    server_info: ServerInfo,
}

impl SpeedTest {
    /// Capture the host environment once; it is never re-queried mid-run.
    pub fn new(config: ModelConfig, ui: UiConfig, seed: Option<u64>) -> Self {
        let mut spinner = ui::Spinner::new();
        spinner.spin("Detecting location...");
        let server_info = host::detect();
        spinner.spin("Finding best server...");
        spinner.stop();

        SpeedTest {
            model: SpeedModel::new(seed),
            config,
            ui,
            server_info,
        }
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Averaged ping plus one independent jitter sample.
    pub fn measure_ping(&self, sink: &mut dyn ProgressSink) -> (f64, f64) {
        series::measure_ping(&self.model, &self.config.ping, sink)
    }

    pub fn measure_download(&self, sink: &mut dyn ProgressSink) -> f64 {
        series::run_series(&self.model, &self.config.download, sink)
    }

    pub fn measure_upload(&self, sink: &mut dyn ProgressSink) -> f64 {
        series::run_series(&self.model, &self.config.upload, sink)
    }

    /// Run the full animated sequence and assemble the result.
    pub fn run_full_test(&self) -> SpeedResult {
        let step_delay = Duration::from_millis(self.ui.step_delay_ms);
        let ping_delay = Duration::from_millis(self.ui.ping_delay_ms);

        ui::print_server_info(&self.server_info);

        println!("  Testing latency...");
        let mut ping_sink = SpinnerSink::new("Testing ping...", ping_delay);
        let (ping_ms, jitter_ms) = self.measure_ping(&mut ping_sink);
        ping_sink.finish();
        ui::complete_line("Ping", ping_ms, "ms");
        ui::complete_line("Jitter", jitter_ms, "ms");
        println!();

        let mut download_sink = TerminalSink::new("Download", step_delay);
        let download_mbps = self.measure_download(&mut download_sink);
        ui::clear_line();
        ui::complete_line("Download", download_mbps, "Mbps");
        println!();

        let mut upload_sink = TerminalSink::new("Upload", step_delay);
        let upload_mbps = self.measure_upload(&mut upload_sink);
        ui::clear_line();
        ui::complete_line("Upload", upload_mbps, "Mbps");

        debug!(
            "[Runner] Run complete: down {:.2} up {:.2} ping {:.2}",
            download_mbps, upload_mbps, ping_ms
        );

        SpeedResult {
            download_mbps,
            upload_mbps,
            ping_ms,
            jitter_ms,
            server: self.server_info.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SERIES_STEPS;
    use crate::traits::CollectingSink;

    fn quiet_test() -> SpeedTest {
        let ui = UiConfig {
            step_delay_ms: 0,
            ping_delay_ms: 0,
        };
        SpeedTest::new(ModelConfig::default(), ui, Some(99))
    }

    #[test]
    fn test_measurements_respect_floor() {
        let test = quiet_test();
        let mut sink = CollectingSink::new();

        let (ping, jitter) = test.measure_ping(&mut sink);
        assert!(ping >= 1.0);
        assert!(jitter >= 1.0);

        assert!(test.measure_download(&mut sink) >= 1.0);
        assert!(test.measure_upload(&mut sink) >= 1.0);
    }

    #[test]
    fn test_download_reports_full_series() {
        let test = quiet_test();
        let mut sink = CollectingSink::new();
        let _ = test.measure_download(&mut sink);
        assert_eq!(sink.steps.len(), SERIES_STEPS + 1);
    }

    #[test]
    fn test_result_serializes_with_server_info() {
        let test = quiet_test();
        let result = SpeedResult {
            download_mbps: 92.1,
            upload_mbps: 41.8,
            ping_ms: 14.2,
            jitter_ms: 2.9,
            server: test.server_info().clone(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["download_mbps"], 92.1);
        assert!(json["server"]["ip_address"].is_string());
    }
}
