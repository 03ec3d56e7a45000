/// Sink that a running measurement reports progress to.
///
/// The terminal front end redraws a progress bar synchronously; tests and
/// non-interactive callers collect or discard the reports.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    fn report(&mut self, progress: f64, value: f64);
}

/// Discards all progress reports.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _progress: f64, _value: f64) {}
}

/// Buffers progress reports for later inspection (polling front ends, tests).
#[derive(Default)]
pub struct CollectingSink {
    pub steps: Vec<(f64, f64)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        CollectingSink { steps: Vec::new() }
    }

    /// Last reported value, if any step was recorded.
    pub fn last_value(&self) -> Option<f64> {
        self.steps.last().map(|&(_, v)| v)
    }
}

impl ProgressSink for CollectingSink {
    fn report(&mut self, progress: f64, value: f64) {
        self.steps.push((progress, value));
    }
}
