use serde::{Deserialize, Serialize};

/// Parameters for one ramp-then-stabilize measurement series.
///
/// The ramp/steady/final constants are product tuning inherited from the
/// original curves; behavioral parity depends on them, so they are carried
/// as defaults rather than re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesProfile {
    /// Distribution center at progress 0.
    pub ramp_base: f64,
    /// Linear growth of the center per unit of progress during the ramp.
    pub ramp_slope: f64,
    pub ramp_variance: f64,
    /// Progress fraction at which the center stops growing.
    pub ramp_threshold: f64,
    pub steady_base: f64,
    pub steady_variance: f64,
    /// The reported figure is an independent draw from these, not the last
    /// animated frame.
    pub final_base: f64,
    pub final_variance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingProfile {
    /// Independent ping samples averaged into the reported latency.
    pub sample_count: usize,
    pub ping_base: f64,
    pub ping_variance: f64,
    pub jitter_base: f64,
    pub jitter_variance: f64,
}

/// A single-draw model backing one HTTP endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointModel {
    pub base: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub download: SeriesProfile,
    pub upload: SeriesProfile,
    pub ping: PingProfile,
    /// `/api/download` uses a wider spread than the terminal series.
    pub api_download: PointModel,
    pub api_upload: PointModel,
    pub api_ping: PointModel,
    pub api_jitter: PointModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchMode {
    /// One connection fully served before the next accept (default).
    Serial,
    /// One worker thread per accepted connection.
    PerConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub backlog: i32,
    /// Single bounded read per connection; anything past this is ignored.
    pub read_buffer: usize,
    pub dispatch: DispatchMode,
}

/// Terminal animation pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub step_delay_ms: u64,
    pub ping_delay_ms: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            download: SeriesProfile {
                ramp_base: 50.0,
                ramp_slope: 200.0, // 50 + p*200 while ramping
                ramp_variance: 10.0,
                ramp_threshold: 0.3,
                steady_base: 95.0,
                steady_variance: 8.0,
                final_base: 92.0,
                final_variance: 5.0,
            },
            upload: SeriesProfile {
                ramp_base: 20.0,
                ramp_slope: 80.0, // 20 + p*80, upload ramps shallower
                ramp_variance: 8.0,
                ramp_threshold: 0.3,
                steady_base: 45.0,
                steady_variance: 6.0,
                final_base: 42.0,
                final_variance: 4.0,
            },
            ping: PingProfile {
                sample_count: 10,
                ping_base: 15.0,
                ping_variance: 5.0,
                jitter_base: 3.0,
                jitter_variance: 1.5,
            },
            api_download: PointModel {
                base: 95.0,
                variance: 15.0,
            },
            api_upload: PointModel {
                base: 45.0,
                variance: 10.0,
            },
            api_ping: PointModel {
                base: 15.0,
                variance: 5.0,
            },
            api_jitter: PointModel {
                base: 3.0,
                variance: 1.5,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 8080,
            backlog: 10,
            read_buffer: 4096,
            dispatch: DispatchMode::Serial,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            step_delay_ms: 50,
            ping_delay_ms: 150, // 50ms "round trip" + 100ms pause per sample
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_download_profile_matches_tuning() {
        let m = ModelConfig::default();
        assert_eq!(m.download.ramp_base, 50.0);
        assert_eq!(m.download.ramp_slope, 200.0);
        assert_eq!(m.download.ramp_threshold, 0.3);
        assert_eq!(m.download.steady_base, 95.0);
        assert_eq!(m.download.final_base, 92.0);
    }

    #[test]
    fn test_default_upload_profile_matches_tuning() {
        let m = ModelConfig::default();
        assert_eq!(m.upload.ramp_base, 20.0);
        assert_eq!(m.upload.ramp_slope, 80.0);
        assert_eq!(m.upload.steady_base, 45.0);
        assert_eq!(m.upload.final_base, 42.0);
    }

    #[test]
    fn test_default_server_config() {
        let s = ServerConfig::default();
        assert_eq!(s.port, 8080);
        assert_eq!(s.backlog, 10);
        assert_eq!(s.read_buffer, 4096);
        assert_eq!(s.dispatch, DispatchMode::Serial);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let m = ModelConfig::default();
        let json = serde_json::to_string(&m).unwrap();
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ping.sample_count, 10);
        assert_eq!(back.api_download.base, 95.0);
    }
}
