//! Outer loop: poll the platform, step, draw
//!
//! The platform decides how long each tick is and when to stop; the renderer
//! consumes one [`Frame`](crate::render::Frame) per tick. Windowed front ends
//! implement both traits over their own surface; [`FixedStep`] and
//! [`WallClock`] cover headless runs.

use crate::core_types::units::Seconds;
use crate::render::{compose_frame, Renderer};
use crate::simulation::{SimulationContext, TickReport};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::info;

/// Timing and termination source for [`run`]
pub trait Platform {
    /// Time elapsed since the previous call; becomes the next tick's `dt`
    fn elapsed_since_last_tick(&mut self) -> Seconds;

    /// Checked before every tick; `true` ends the loop
    fn should_terminate(&mut self) -> bool;
}

/// Totals for one call to [`run`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Ticks stepped by this run
    pub ticks: u64,
    /// Simulated time covered by this run
    pub simulated: Seconds,
    /// Largest live drop count seen after a tick
    pub peak_drops: usize,
    /// Wind changes during this run
    pub wind_changes: u64,
}

/// Step `ctx` until `platform` asks to stop, submitting a frame per tick
pub fn run<R, P, D>(ctx: &mut SimulationContext<R>, platform: &mut P, renderer: &mut D) -> RunSummary
where
    R: Rng,
    P: Platform + ?Sized,
    D: Renderer + ?Sized,
{
    run_with(ctx, platform, renderer, |_, _| {})
}

/// [`run`], calling `on_tick` with the stepped state after each frame is
/// submitted
pub fn run_with<R, P, D, F>(
    ctx: &mut SimulationContext<R>,
    platform: &mut P,
    renderer: &mut D,
    mut on_tick: F,
) -> RunSummary
where
    R: Rng,
    P: Platform + ?Sized,
    D: Renderer + ?Sized,
    F: FnMut(&SimulationContext<R>, &TickReport),
{
    let mut summary = RunSummary::default();
    info!("Run started at {}", ctx.clock());

    while !platform.should_terminate() {
        let dt = platform.elapsed_since_last_tick();
        let report = ctx.step(dt);

        summary.ticks += 1;
        summary.simulated += dt;
        summary.peak_drops = summary.peak_drops.max(report.particles.live);
        if report.wind_changed {
            summary.wind_changes += 1;
        }

        renderer.submit(&compose_frame(ctx));
        on_tick(ctx, &report);
    }

    info!(
        "Run finished: {} ticks, {} simulated, peak {} drops, {} wind changes",
        summary.ticks, summary.simulated, summary.peak_drops, summary.wind_changes
    );
    summary
}

/// Constant `dt` for a fixed number of ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    dt: Seconds,
    remaining: u64,
}

impl FixedStep {
    #[must_use]
    pub fn new(dt: Seconds, ticks: u64) -> Self {
        FixedStep { dt, remaining: ticks }
    }

    /// Enough ticks of `dt` to cover `duration` (rounded up)
    #[must_use]
    pub fn covering(dt: Seconds, duration: Seconds) -> Self {
        assert!(*dt > 0.0, "fixed step must be positive, got {dt}");
        Self::new(dt, (*duration / *dt).ceil() as u64)
    }

    /// Ticks left before termination
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Platform for FixedStep {
    fn elapsed_since_last_tick(&mut self) -> Seconds {
        self.remaining = self.remaining.saturating_sub(1);
        self.dt
    }

    fn should_terminate(&mut self) -> bool {
        self.remaining == 0
    }
}

/// Real elapsed time between ticks, optionally stopping after a wall-clock
/// budget
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last_tick: Instant,
    deadline: Option<Instant>,
}

impl WallClock {
    /// Start timing now; run for `budget` if given, otherwise forever
    #[must_use]
    pub fn start(budget: Option<Duration>) -> Self {
        let now = Instant::now();
        WallClock {
            last_tick: now,
            deadline: budget.map(|b| now + b),
        }
    }
}

impl Platform for WallClock {
    fn elapsed_since_last_tick(&mut self) -> Seconds {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        Seconds::from(elapsed)
    }

    fn should_terminate(&mut self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::render::{Rgba, ScreenPoint};

    #[derive(Default)]
    struct Tally {
        clears: usize,
        points: usize,
        lines: usize,
        presents: usize,
    }

    impl Renderer for Tally {
        fn clear(&mut self, _color: Rgba) {
            self.clears += 1;
        }
        fn draw_point(&mut self, _at: ScreenPoint, _color: Rgba) {
            self.points += 1;
        }
        fn draw_line(&mut self, _from: ScreenPoint, _to: ScreenPoint, _color: Rgba) {
            self.lines += 1;
        }
        fn present(&mut self) {
            self.presents += 1;
        }
    }

    #[test]
    fn test_fixed_step_runs_exact_tick_count() {
        let mut sim = SimulationContext::seeded(SimulationConfig::default(), 11).unwrap();
        let mut platform = FixedStep::new(Seconds::new(0.25), 8);
        let mut renderer = Tally::default();

        let summary = run(&mut sim, &mut platform, &mut renderer);

        assert_eq!(summary.ticks, 8);
        assert_eq!(summary.simulated, Seconds::new(2.0));
        assert_eq!(sim.clock(), Seconds::new(2.0));
        assert_eq!(platform.remaining(), 0);
        assert_eq!(renderer.clears, 8);
        assert_eq!(renderer.presents, 8);
        // 110 cloth cells with 10×10 left edges and 11×9 up edges per frame
        assert_eq!(renderer.lines, 8 * (100 + 99));
        assert!(renderer.points >= 8 * 110);
    }

    #[test]
    fn test_tick_hook_sees_every_report() {
        let mut sim = SimulationContext::seeded(SimulationConfig::default(), 13).unwrap();
        let mut renderer = Tally::default();
        let mut seen = Vec::new();

        let summary = run_with(
            &mut sim,
            &mut FixedStep::new(Seconds::new(0.5), 22),
            &mut renderer,
            |ctx, report| {
                assert_eq!(ctx.ticks(), report.tick);
                assert_eq!(ctx.particles().len(), report.particles.live);
                seen.push((report.tick, report.wind_changed));
            },
        );

        assert_eq!(seen.len(), 22);
        assert_eq!(seen.first(), Some(&(1, false)));
        // The first change lands on the tick that takes the clock to 10.5 s
        let changes: Vec<u64> = seen.iter().filter(|(_, c)| *c).map(|(t, _)| *t).collect();
        assert_eq!(changes, vec![21]);
        assert_eq!(summary.wind_changes, 1);
        assert_eq!(renderer.presents, 22);
    }

    #[test]
    fn test_terminated_platform_never_steps() {
        let mut sim = SimulationContext::seeded(SimulationConfig::default(), 12).unwrap();
        let mut renderer = Tally::default();
        let summary = run(&mut sim, &mut FixedStep::new(Seconds::new(0.1), 0), &mut renderer);
        assert_eq!(summary, RunSummary::default());
        assert_eq!(sim.ticks(), 0);
        assert_eq!(renderer.presents, 0);
    }

    #[test]
    fn test_covering_rounds_up() {
        assert_eq!(FixedStep::covering(Seconds::new(0.5), Seconds::new(2.2)).remaining(), 5);
        assert_eq!(FixedStep::covering(Seconds::new(0.5), Seconds::new(2.0)).remaining(), 4);
    }

    #[test]
    fn test_wall_clock_budget() {
        let mut clock = WallClock::start(Some(Duration::ZERO));
        assert!(clock.should_terminate());
        let mut open_ended = WallClock::start(None);
        assert!(!open_ended.should_terminate());
        assert!(*open_ended.elapsed_since_last_tick() >= 0.0);
    }
}
