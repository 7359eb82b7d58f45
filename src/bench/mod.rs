//! Benchmark runner.
//!
//! A session measures the bound plugin at three presets (all controls at
//! minimum, at maximum, at default) and optionally sweeps the whole control
//! grid. Each measurement is one untimed warm-up call followed by `n_frames`
//! timed calls:
//!
//! ```text
//!   Idle ─► MinRun ─► MaxRun ─► DefaultRun ─┬─────────────► Done
//!                                           └─► SweepRun ─► Done
//! ```
//!
//! The sweep branch is only taken when `full_test` is set. After the sweep the
//! three preset results are folded into the best/worst trackers too, so best
//! and worst span the presets and every sweep point.

pub mod plan;
pub mod result;
pub mod sweep;

use std::error::Error as StdError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use self::{
    plan::SamplePlan,
    result::{BenchResult, LoadTracker},
    sweep::SweepEngine,
};
use crate::{
    config::BenchConfig,
    error::{BenchError, Result},
    host::{signal::SignalSource, urid::UridMap, PluginHost, Preset},
    timer::Timer,
};

/// Where a session is. Each state names the last run that completed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchState {
    Idle,
    MinRun,
    MaxRun,
    DefaultRun,
    SweepRun,
    Done,
}

impl BenchState {
    fn next(self, full_test: bool) -> Self {
        match self {
            BenchState::Idle => BenchState::MinRun,
            BenchState::MinRun => BenchState::MaxRun,
            BenchState::MaxRun => BenchState::DefaultRun,
            BenchState::DefaultRun if full_test => BenchState::SweepRun,
            BenchState::DefaultRun | BenchState::SweepRun | BenchState::Done => BenchState::Done,
        }
    }
}

/// The five named results of a finished session.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub plugin: String,
    pub minimum: BenchResult,
    pub maximum: BenchResult,
    pub default: BenchResult,
    /// Lowest load seen. Only set when the sweep ran.
    pub best: Option<BenchResult>,
    /// Highest load seen. Only set when the sweep ran.
    pub worst: Option<BenchResult>,
}

/// One benchmark session over one bound plugin.
pub struct Bench<H: PluginHost> {
    host: H,
    config: BenchConfig,
    plan: SamplePlan,
    state: BenchState,
    minimum: Option<BenchResult>,
    maximum: Option<BenchResult>,
    default: Option<BenchResult>,
    tracker: LoadTracker,
}

impl<H: PluginHost> Bench<H> {
    pub fn new(host: H, config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let plan = SamplePlan::new(host.control_axes(), config.points_per_axis);

        Ok(Self {
            host,
            config,
            plan,
            state: BenchState::Idle,
            minimum: None,
            maximum: None,
            default: None,
            tracker: LoadTracker::new(),
        })
    }

    /// Bind a host with `make_host` and start a session on it.
    ///
    /// The session creates the URID registry and hands it to `make_host`; the
    /// host keeps it for as long as the plugin is bound. A host error is
    /// returned unchanged inside [`BenchError::Host`].
    pub fn try_new<F, E>(make_host: F, config: BenchConfig) -> Result<Self>
    where
        F: FnOnce(&BenchConfig, UridMap) -> std::result::Result<H, E>,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        config.validate()?;
        let host = make_host(&config, UridMap::new()).map_err(BenchError::host)?;
        Self::new(host, config)
    }

    pub fn state(&self) -> BenchState {
        self.state
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn plan(&self) -> &SamplePlan {
        &self.plan
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Feed one frame from `source` to every audio input. The same frame is
    /// used for the whole session.
    pub fn connect_input<S: SignalSource + ?Sized>(&mut self, source: &mut S) {
        let frame = source.next_frame(self.config.frame_size as usize);
        self.host.connect_input(frame);
    }

    /// Run the whole session and return its report.
    pub fn process<S: SignalSource + ?Sized>(&mut self, source: &mut S) -> Report {
        self.connect_input(source);

        loop {
            self.step();
            if let Some(report) = self.report() {
                return report;
            }
        }
    }

    /// Advance to the next state and perform its run.
    pub fn step(&mut self) -> BenchState {
        let next = self.state.next(self.config.full_test);

        match next {
            BenchState::MinRun => self.minimum = Some(self.run_preset(Preset::Minimum)),
            BenchState::MaxRun => self.maximum = Some(self.run_preset(Preset::Maximum)),
            BenchState::DefaultRun => self.default = Some(self.run_preset(Preset::Default)),
            BenchState::SweepRun => self.run_sweep(),
            BenchState::Idle | BenchState::Done => {}
        }

        self.state = next;
        next
    }

    /// Results, once the session is done.
    pub fn report(&self) -> Option<Report> {
        if self.state != BenchState::Done {
            return None;
        }

        let (best, worst) = if self.config.full_test {
            (self.tracker.best(), self.tracker.worst())
        } else {
            (None, None)
        };

        Some(Report {
            plugin: self.host.uri().to_owned(),
            minimum: self.minimum?,
            maximum: self.maximum?,
            default: self.default?,
            best,
            worst,
        })
    }

    /// Measure the host with its controls as they are now.
    pub fn run_and_calc(&mut self) -> BenchResult {
        measure(&mut self.host, &self.config)
    }

    fn run_preset(&mut self, preset: Preset) -> BenchResult {
        self.host.set_preset(preset);
        let result = self.run_and_calc();
        info!(
            plugin = self.host.uri(),
            preset = preset.label(),
            total = result.total,
            average = result.average,
            load = result.load,
            "preset measured"
        );
        result
    }

    fn run_sweep(&mut self) {
        info!(
            plugin = self.host.uri(),
            axes = self.plan.len(),
            combinations = self.plan.combinations(),
            "starting full sweep"
        );

        let config = &self.config;
        let measurements =
            SweepEngine::new(&self.plan).run(&mut self.host, &mut self.tracker, |host| {
                let result = measure(host, config);
                debug!(load = result.load, "sweep point measured");
                result
            });

        for result in [self.minimum, self.maximum, self.default].into_iter().flatten() {
            self.tracker.observe(result);
        }

        info!(
            plugin = self.host.uri(),
            measurements,
            best = self.tracker.best().map(|r| r.load),
            worst = self.tracker.worst().map(|r| r.load),
            "full sweep done"
        );
    }
}

/// One warm-up call, then `n_frames` timed calls.
fn measure<H: PluginHost + ?Sized>(host: &mut H, config: &BenchConfig) -> BenchResult {
    let frame_size = config.frame_size as usize;

    // First call may allocate or initialise; keep it out of the timing
    host.run(frame_size);

    let timer = Timer::start();
    for _ in 0..config.n_frames {
        host.run(frame_size);
    }
    let total = timer.elapsed();

    BenchResult::from_total(total, config.n_frames, config.frame_size, config.sample_rate)
}
