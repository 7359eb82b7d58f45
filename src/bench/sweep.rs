//! Cartesian sweep over every axis' sample points.
//!
//! The combination vector works like an odometer: the last axis is the
//! outermost recursion level and the first axis is fixed last. Once a full
//! combination is fixed, the axes are applied one at a time, first to last,
//! and a measurement is taken after each application. A grid of `C`
//! combinations over `N` axes therefore yields `C * N` measurements, most of
//! them on a partially applied combination (axes `0..=i` from the current
//! combination, the rest still holding the previous one). The best/worst
//! results reflect that.

use crate::{
    bench::{
        plan::{value_at, SamplePlan},
        result::{BenchResult, LoadTracker},
    },
    host::PluginHost,
};

pub struct SweepEngine<'p> {
    plan: &'p SamplePlan,
    combination: Vec<u32>,
    measurements: usize,
}

impl<'p> SweepEngine<'p> {
    pub fn new(plan: &'p SamplePlan) -> Self {
        Self {
            plan,
            combination: vec![0; plan.len()],
            measurements: 0,
        }
    }

    /// Current position in the sample grid.
    pub fn combination(&self) -> &[u32] {
        &self.combination
    }

    /// Walk the whole grid, calling `measure` after every axis application and
    /// folding each result into `tracker`. Returns the number of measurements.
    pub fn run<H, M>(
        &mut self,
        host: &mut H,
        tracker: &mut LoadTracker,
        mut measure: M,
    ) -> usize
    where
        H: PluginHost + ?Sized,
        M: FnMut(&mut H) -> BenchResult,
    {
        self.measurements = 0;
        self.combination.iter_mut().for_each(|index| *index = 0);
        self.descend(self.plan.len(), host, tracker, &mut measure);
        self.measurements
    }

    fn descend<H, M>(
        &mut self,
        depth: usize,
        host: &mut H,
        tracker: &mut LoadTracker,
        measure: &mut M,
    ) where
        H: PluginHost + ?Sized,
        M: FnMut(&mut H) -> BenchResult,
    {
        if depth > 0 {
            let axis = depth - 1;
            for index in 0..self.plan.counts()[axis] {
                self.combination[axis] = index;
                self.descend(axis, host, tracker, measure);
            }
            return;
        }

        for axis in 0..self.combination.len() {
            let count = self.plan.counts()[axis];
            let value = value_at(&host.control_axes()[axis], self.combination[axis], count);
            host.set_axis_value(axis, value);

            tracker.observe(measure(host));
            self.measurements += 1;
        }
    }
}
