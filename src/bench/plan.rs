//! Which values of each control axis get measured.
//!
//! Every axis is sampled at a fixed number of points:
//!
//! | Axis kind              | Points                     |
//! |------------------------|----------------------------|
//! | enumerated             | one per scale point        |
//! | toggle / trigger       | 2                          |
//! | everything else        | configured default (4)     |
//!
//! A point index maps to a value by spreading the points evenly over
//! `min..=max`, or by taking the scale point at that index for enumerated axes.

use crate::host::{AxisKind, ControlAxis};

/// Per-axis sample counts for one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    counts: Vec<u32>,
}

impl SamplePlan {
    pub fn new(axes: &[ControlAxis], default_points: u32) -> Self {
        Self {
            counts: axes
                .iter()
                .map(|axis| sample_count(axis, default_points))
                .collect(),
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of points in the full grid, saturating at `u64::MAX`.
    pub fn combinations(&self) -> u64 {
        self.counts
            .iter()
            .fold(1u64, |acc, &count| acc.saturating_mul(count as u64))
    }
}

/// Number of points to test on `axis`. Always at least 1.
pub fn sample_count(axis: &ControlAxis, default_points: u32) -> u32 {
    let count = match &axis.kind {
        AxisKind::Enumerated { scale_points } => scale_points.len() as u32,
        AxisKind::Toggle { .. } | AxisKind::Trigger { .. } => 2,
        AxisKind::Continuous | AxisKind::Integer | AxisKind::Logarithmic { .. } => default_points,
    };
    count.max(1)
}

/// Value of point `index` out of `count` points on `axis`.
pub fn value_at(axis: &ControlAxis, index: u32, count: u32) -> f32 {
    match &axis.kind {
        AxisKind::Continuous => linear(axis, index, count),
        AxisKind::Integer => linear(axis, index, count).round(),
        AxisKind::Enumerated { scale_points } => scale_points
            .get(index as usize)
            .or(scale_points.last())
            .map_or(axis.min, |point| point.value),
        // No logarithmic mapping is defined yet; points are spread linearly.
        AxisKind::Logarithmic { integer } => linear_rounded(axis, index, count, *integer),
        // No toggle/trigger mapping is defined yet; with their two planned
        // points the linear spread lands on min and max.
        AxisKind::Toggle { integer } | AxisKind::Trigger { integer } => {
            linear_rounded(axis, index, count, *integer)
        }
    }
}

fn linear_rounded(axis: &ControlAxis, index: u32, count: u32, integer: bool) -> f32 {
    let value = linear(axis, index, count);
    if integer {
        value.round()
    } else {
        value
    }
}

fn linear(axis: &ControlAxis, index: u32, count: u32) -> f32 {
    if count <= 1 {
        return axis.min;
    }
    let step = (axis.max - axis.min) / (count - 1) as f32;
    axis.min + step * index as f32
}
