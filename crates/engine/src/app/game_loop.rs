use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::collision_resolver::resolve_collisions;
use super::input::{InputEvent, InputSource};
use super::metrics::MetricsAccumulator;
use super::registry::EntityRegistry;
use super::rendering::{PresentError, Presenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Holds a fixed tick rate by sleeping away whatever the tick body left of
/// the target. Overshoot, from a slow body or from oversleeping, is carried
/// as debt and taken out of later sleeps.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    debt: Duration,
    max_debt: Duration,
}

impl FramePacer {
    pub fn new(target: Duration, max_debt: Duration) -> Self {
        Self {
            target,
            debt: Duration::ZERO,
            max_debt,
        }
    }

    pub fn target_for_fps(fps: f32) -> Option<Duration> {
        if !fps.is_finite() || fps <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / f64::from(fps)).ok()
    }

    pub fn debt(&self) -> Duration {
        self.debt
    }

    pub fn plan_sleep(&mut self, body: Duration) -> Duration {
        let spent = body.saturating_add(self.debt);
        match self.target.checked_sub(spent) {
            Some(sleep) => {
                self.debt = Duration::ZERO;
                sleep
            }
            None => {
                self.set_debt(spent - self.target);
                Duration::ZERO
            }
        }
    }

    pub fn record_sleep(&mut self, planned: Duration, actual: Duration) {
        if let Some(oversleep) = actual.checked_sub(planned) {
            self.set_debt(self.debt.saturating_add(oversleep));
        }
    }

    fn set_debt(&mut self, debt: Duration) {
        if debt > self.max_debt {
            warn!(
                debt_ms = debt.as_millis() as u64,
                dropped_ms = (debt - self.max_debt).as_millis() as u64,
                "pacer_debt_clamped"
            );
            self.debt = self.max_debt;
        } else {
            self.debt = debt;
        }
    }
}

pub struct GameLoop {
    registry: EntityRegistry,
    pacer: FramePacer,
    metrics: MetricsAccumulator,
    state: LoopState,
    tick_count: u64,
}

impl GameLoop {
    pub fn new(registry: EntityRegistry, pacer: FramePacer, metrics_interval: Duration) -> Self {
        Self {
            registry,
            pacer,
            metrics: MetricsAccumulator::new(metrics_interval, Instant::now()),
            state: LoopState::Running,
            tick_count: 0,
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick<I, P>(
        &mut self,
        input: &mut I,
        presenter: &mut P,
        now: Instant,
    ) -> Result<LoopState, PresentError>
    where
        I: InputSource + ?Sized,
        P: Presenter + ?Sized,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        while let Some(event) = input.poll_event() {
            match event {
                InputEvent::Key { key, state } => self.registry.dispatch_input(state, key),
                InputEvent::Quit => {
                    debug!(tick = self.tick_count, "quit_event_received");
                    self.state = LoopState::Stopped;
                    return Ok(LoopState::Stopped);
                }
            }
        }

        self.registry.advance_dynamics();
        resolve_collisions(self.registry.entities_mut());

        if let Err(error) = self.render(presenter, now) {
            self.state = LoopState::Stopped;
            return Err(error);
        }

        self.registry.compact_removed();
        self.registry.apply_pending();
        self.tick_count += 1;
        Ok(LoopState::Running)
    }

    fn render<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
        now: Instant,
    ) -> Result<(), PresentError> {
        presenter.begin_frame()?;
        self.registry.draw_all(presenter, now);
        presenter.end_frame()
    }

    pub fn step<I, P>(&mut self, input: &mut I, presenter: &mut P) -> Result<LoopState, PresentError>
    where
        I: InputSource + ?Sized,
        P: Presenter + ?Sized,
    {
        let started = Instant::now();
        let state = self.tick(input, presenter, started)?;
        if state == LoopState::Stopped {
            return Ok(state);
        }

        let body = started.elapsed();
        let planned = self.pacer.plan_sleep(body);
        let mut slept = Duration::ZERO;
        if !planned.is_zero() {
            let sleep_started = Instant::now();
            thread::sleep(planned);
            slept = sleep_started.elapsed();
            self.pacer.record_sleep(planned, slept);
        }

        self.metrics.record_tick(body, slept);
        if let Some(snapshot) = self.metrics.maybe_snapshot(Instant::now()) {
            info!(
                tps = snapshot.tps,
                mean_body_ms = snapshot.mean_body_ms,
                mean_sleep_ms = snapshot.mean_sleep_ms,
                entity_count = self.registry.entity_count(),
                "loop_metrics"
            );
        }
        Ok(state)
    }

    pub fn run<I, P>(&mut self, input: &mut I, presenter: &mut P) -> Result<u64, PresentError>
    where
        I: InputSource + ?Sized,
        P: Presenter + ?Sized,
    {
        while self.step(input, presenter)? == LoopState::Running {}
        Ok(self.tick_count)
    }
}
