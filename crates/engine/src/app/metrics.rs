use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub tps: f32,
    pub mean_body_ms: f32,
    pub mean_sleep_ms: f32,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    ticks: u32,
    body_time_sum: Duration,
    sleep_time_sum: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval_start: start,
            interval,
            ticks: 0,
            body_time_sum: Duration::ZERO,
            sleep_time_sum: Duration::ZERO,
        }
    }

    pub(crate) fn record_tick(&mut self, body: Duration, sleep: Duration) {
        self.ticks = self.ticks.saturating_add(1);
        self.body_time_sum = self.body_time_sum.saturating_add(body);
        self.sleep_time_sum = self.sleep_time_sum.saturating_add(sleep);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let snapshot = LoopMetricsSnapshot {
            tps: self.ticks as f32 / elapsed_seconds,
            mean_body_ms: mean_ms(self.body_time_sum, self.ticks),
            mean_sleep_ms: mean_ms(self.sleep_time_sum, self.ticks),
        };

        self.interval_start = now;
        self.ticks = 0;
        self.body_time_sum = Duration::ZERO;
        self.sleep_time_sum = Duration::ZERO;

        Some(snapshot)
    }
}

fn mean_ms(total: Duration, count: u32) -> f32 {
    if count == 0 {
        0.0
    } else {
        total.as_secs_f32() * 1000.0 / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_computes_expected_values() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);

        for _ in 0..4 {
            accumulator.record_tick(Duration::from_millis(10), Duration::from_millis(52));
        }

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot should be emitted");

        assert!((snapshot.tps - 4.0).abs() < 0.05);
        assert!((snapshot.mean_body_ms - 10.0).abs() < 0.001);
        assert!((snapshot.mean_sleep_ms - 52.0).abs() < 0.001);
    }

    #[test]
    fn snapshot_not_emitted_before_interval() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);
        accumulator.record_tick(Duration::from_millis(16), Duration::ZERO);

        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn snapshot_resets_the_interval() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), base);
        accumulator.record_tick(Duration::from_millis(16), Duration::ZERO);

        let first = base + Duration::from_secs(1);
        assert!(accumulator.maybe_snapshot(first).is_some());
        assert!(accumulator
            .maybe_snapshot(first + Duration::from_millis(999))
            .is_none());

        let idle = accumulator
            .maybe_snapshot(first + Duration::from_secs(1))
            .expect("second snapshot");
        assert_eq!(idle.tps, 0.0);
        assert_eq!(idle.mean_body_ms, 0.0);
    }
}
