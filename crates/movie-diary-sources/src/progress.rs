use std::cell::Cell;

/// Fire-and-forget progress reporting for long imports. The CLI implements
/// this over an indicatif bar; tests and quiet mode use `NullProgress`.
pub trait ProgressSink {
    fn report(&self, percent: u8, message: &str);
}

pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _percent: u8, _message: &str) {}
}

/// Wrapper that keeps reported percentages monotonic. The fetch path can jump
/// between pagination and the RSS fallback, whose milestone values overlap;
/// consumers are promised a bar that never moves backwards.
pub struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressSink,
    last: Cell<u8>,
}

impl<'a> MonotonicProgress<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            last: Cell::new(0),
        }
    }
}

impl ProgressSink for MonotonicProgress<'_> {
    fn report(&self, percent: u8, message: &str) {
        let percent = percent.max(self.last.get()).min(100);
        self.last.set(percent);
        self.inner.report(percent, message);
    }
}
