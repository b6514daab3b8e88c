use std::collections::VecDeque;

/// Maximum number of submission timestamps kept in the window.
pub const RATE_WINDOW: usize = 1000;

/// Minimum seconds between two rate reports.
pub const REPORT_INTERVAL_SECS: f64 = 5.0;

/// Sliding window of submission times (monotonic seconds) producing a
/// solutions-per-second estimate scaled by the rate divisor.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    window: VecDeque<f64>,
    rate_div: u64,
    last_report: f64,
    last_rate: Option<f64>,
}

impl RateEstimator {
    /// `started_at` counts as the previous report time.
    pub fn new(rate_div: u64, started_at: f64) -> Self {
        Self {
            window: VecDeque::with_capacity(RATE_WINDOW),
            rate_div,
            last_report: started_at,
            last_rate: None,
        }
    }

    pub fn record(&mut self, now: f64) {
        self.window.push_back(now);
        while self.window.len() > RATE_WINDOW {
            self.window.pop_front();
        }
    }

    /// Rate over the window if a report is due. Yields nothing while the
    /// window spans no time.
    pub fn maybe_report(&mut self, now: f64) -> Option<f64> {
        if now - self.last_report < REPORT_INTERVAL_SECS {
            return None;
        }
        let (oldest, newest) = (*self.window.front()?, *self.window.back()?);
        let span = newest - oldest;
        if self.window.len() < 2 || span <= 0.0 {
            return None;
        }

        let rate = (self.window.len() - 1) as f64 / span * self.rate_div as f64;
        self.last_report = now;
        self.last_rate = Some(rate);
        Some(rate)
    }

    pub fn last_rate(&self) -> Option<f64> {
        self.last_rate
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_samples_over_four_seconds() {
        let mut rate = RateEstimator::new(1, 0.0);
        rate.record(0.0);
        rate.record(2.0);
        rate.record(4.0);
        assert_eq!(rate.maybe_report(5.0), Some(0.5));
        assert_eq!(rate.last_rate(), Some(0.5));
    }

    #[test]
    fn rate_div_scales_report() {
        let mut rate = RateEstimator::new(8, 0.0);
        rate.record(0.0);
        rate.record(2.0);
        rate.record(4.0);
        assert_eq!(rate.maybe_report(5.0), Some(4.0));
    }

    #[test]
    fn reports_at_most_every_five_seconds() {
        let mut rate = RateEstimator::new(1, 0.0);
        rate.record(1.0);
        rate.record(2.0);
        assert_eq!(rate.maybe_report(4.9), None);
        assert!(rate.maybe_report(5.0).is_some());
        rate.record(6.0);
        assert_eq!(rate.maybe_report(9.0), None);
        assert_eq!(rate.maybe_report(10.0), Some(2.0 / 5.0));
    }

    #[test]
    fn fewer_than_two_samples_never_report() {
        let mut rate = RateEstimator::new(1, 0.0);
        assert_eq!(rate.maybe_report(10.0), None);
        rate.record(3.0);
        assert_eq!(rate.maybe_report(20.0), None);
        assert_eq!(rate.last_rate(), None);
    }

    #[test]
    fn zero_span_does_not_produce_infinity() {
        let mut rate = RateEstimator::new(1, 0.0);
        rate.record(3.0);
        rate.record(3.0);
        assert_eq!(rate.maybe_report(10.0), None);
    }

    #[test]
    fn window_is_bounded() {
        let mut rate = RateEstimator::new(1, 0.0);
        for i in 0..2500 {
            rate.record(i as f64);
        }
        assert_eq!(rate.len(), RATE_WINDOW);
        // oldest kept is 1500, newest 2499
        assert_eq!(rate.maybe_report(3000.0), Some(999.0 / 999.0));
    }
}
