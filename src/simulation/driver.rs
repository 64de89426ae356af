//! Frame loop owning the live field

use super::RunSummary;
use crate::config::Settings;
use crate::model::{Field, GrayScottStepper, Parameters};
use crate::render::{Frame, Renderer};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative stop request, checked between frames only
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Frame loop options
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub frames: usize,
    pub steps_per_frame: usize,
    pub frame_delay: Duration,
    pub check_finite: bool,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            frames: settings.animation.frames,
            steps_per_frame: settings.animation.steps_per_frame,
            frame_delay: settings.frame_delay(),
            check_finite: settings.output.check_finite,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 200,
            steps_per_frame: 1,
            frame_delay: Duration::ZERO,
            check_finite: true,
        }
    }
}

/// A running Gray-Scott simulation.
///
/// The simulation is the single owner and writer of the field; each call to
/// [`Simulation::advance`] replaces it with the stepped field.
pub struct Simulation {
    field: Field,
    params: Parameters,
    steps: usize,
}

impl Simulation {
    pub fn new(field: Field, params: Parameters) -> Self {
        Self {
            field,
            params,
            steps: 0,
        }
    }

    /// Build the initial state from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate().context("Configuration validation failed")?;
        let params = settings.parameters();
        if !params.is_stable() {
            tracing::warn!(
                dt = params.dt,
                limit = params.stability_limit(),
                "time step exceeds the explicit Euler stability limit; the field may diverge"
            );
        }
        Ok(Self::new(settings.initial_field()?, params))
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Simulated time, `steps * dt`
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.params.dt
    }

    /// Advance by exactly one time step
    pub fn advance(&mut self) {
        self.field = GrayScottStepper::step(&self.field, &self.params);
        self.steps += 1;
    }

    pub fn advance_by(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    pub fn into_field(self) -> Field {
        self.field
    }

    fn frame(&self, index: usize) -> Frame<'_> {
        Frame {
            index,
            step: self.steps,
            time: self.time(),
            width: self.field.width(),
            height: self.field.height(),
            v: self.field.v(),
        }
    }

    /// Render the initial state, then step and render `options.frames` frames.
    ///
    /// A non-finite field is fatal when `options.check_finite` is set, since
    /// every later step depends on it.
    pub fn run<R: Renderer + ?Sized>(
        &mut self,
        options: &RunOptions,
        renderer: &mut R,
        stop: &StopSignal,
    ) -> Result<RunSummary> {
        let start_time = Instant::now();
        let start_steps = self.steps;

        tracing::info!(
            width = self.field.width(),
            height = self.field.height(),
            frames = options.frames,
            steps_per_frame = options.steps_per_frame,
            "starting simulation"
        );

        renderer
            .render(&self.frame(0))
            .context("Failed to render initial frame")?;
        let mut frames_rendered = 1;
        let mut stopped_early = false;

        for index in 1..=options.frames {
            if stop.is_stopped() {
                tracing::info!(frame = index, "stop requested");
                stopped_early = true;
                break;
            }

            self.advance_by(options.steps_per_frame);

            if options.check_finite {
                self.field.check_finite().with_context(|| {
                    format!("Simulation diverged at step {} (frame {})", self.steps, index)
                })?;
            }

            renderer
                .render(&self.frame(index))
                .with_context(|| format!("Failed to render frame {}", index))?;
            frames_rendered += 1;

            if !options.frame_delay.is_zero() && index < options.frames {
                std::thread::sleep(options.frame_delay);
            }
        }

        renderer.finish().context("Failed to finish rendering")?;

        let summary = RunSummary {
            width: self.field.width(),
            height: self.field.height(),
            parameters: self.params,
            frames_rendered,
            steps: self.steps - start_steps,
            simulated_time: self.time(),
            elapsed_ms: start_time.elapsed().as_millis() as u64,
            stopped_early,
            final_stats: self.field.stats(),
        };
        tracing::info!(
            frames = summary.frames_rendered,
            steps = summary.steps,
            elapsed_ms = summary.elapsed_ms,
            "simulation finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Seed;

    /// Records frame metadata and a copy of `v`
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(usize, usize, f64, Vec<f64>)>,
        finished: bool,
        stop_after: Option<(usize, StopSignal)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
            self.frames
                .push((frame.index, frame.step, frame.time, frame.v.to_vec()));
            if let Some((after, stop)) = &self.stop_after {
                if frame.index >= *after {
                    stop.stop();
                }
            }
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn small_simulation(dt: f64) -> Simulation {
        let field = Field::initialize(16, 16, Seed::new((8, 8), 3.0)).unwrap();
        Simulation::new(field, Parameters::new(0.16, 0.08, 0.035, 0.065, dt))
    }

    #[test]
    fn test_advance_tracks_time() {
        let mut sim = small_simulation(0.5);
        sim.advance_by(4);
        assert_eq!(sim.steps(), 4);
        assert_eq!(sim.time(), 2.0);
    }

    #[test]
    fn test_advance_matches_stepper() {
        let mut sim = small_simulation(1.0);
        let expected = GrayScottStepper::step_n(sim.field().clone(), sim.parameters(), 3);
        sim.advance_by(3);
        assert_eq!(sim.field(), &expected);
    }

    #[test]
    fn test_run_renders_initial_and_every_frame() {
        let mut sim = small_simulation(1.0);
        let options = RunOptions {
            frames: 5,
            steps_per_frame: 2,
            ..Default::default()
        };
        let mut renderer = RecordingRenderer::default();

        let summary = sim.run(&options, &mut renderer, &StopSignal::new()).unwrap();

        assert!(renderer.finished);
        assert_eq!(renderer.frames.len(), 6);
        assert_eq!(summary.frames_rendered, 6);
        assert_eq!(summary.steps, 10);
        assert_eq!(summary.simulated_time, 10.0);
        assert!(!summary.stopped_early);

        let indices: Vec<usize> = renderer.frames.iter().map(|f| f.0).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(renderer.frames[3].1, 6);

        // Last rendered frame is the live field
        assert_eq!(renderer.frames[5].3, sim.field().v());
    }

    #[test]
    fn test_stop_signal_halts_between_frames() {
        let mut sim = small_simulation(1.0);
        let stop = StopSignal::new();
        let mut renderer = RecordingRenderer {
            stop_after: Some((2, stop.clone())),
            ..Default::default()
        };
        let options = RunOptions {
            frames: 50,
            ..Default::default()
        };

        let summary = sim.run(&options, &mut renderer, &stop).unwrap();
        assert!(summary.stopped_early);
        assert_eq!(summary.frames_rendered, 3);
        assert_eq!(sim.steps(), 2);
    }

    #[test]
    fn test_divergence_is_fatal_when_checked() {
        let mut sim = small_simulation(20.0);
        let options = RunOptions {
            frames: 500,
            ..Default::default()
        };
        let result = sim.run(&options, &mut RecordingRenderer::default(), &StopSignal::new());
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("non-finite"));
    }

    #[test]
    fn test_divergence_passes_through_when_unchecked() {
        let mut sim = small_simulation(20.0);
        let options = RunOptions {
            frames: 500,
            check_finite: false,
            ..Default::default()
        };
        let summary = sim
            .run(&options, &mut crate::render::NullRenderer, &StopSignal::new())
            .unwrap();
        assert!(summary.final_stats.non_finite > 0);
    }

    #[test]
    fn test_from_settings_rejects_invalid_config() {
        let mut settings = Settings::default();
        settings.seed.radius = -2.0;
        assert!(Simulation::from_settings(&settings).is_err());

        let sim = Simulation::from_settings(&Settings::default()).unwrap();
        assert_eq!(sim.field().seeded_count(), 1257);
        assert_eq!(sim.steps(), 0);
    }
}
