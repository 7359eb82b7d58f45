//! Contract between the benchmark and the plugin host.
//!
//! Loading plugin metadata and instantiating the native plugin happen outside
//! this crate. A host binds one plugin instance and exposes it through
//! [`PluginHost`]: its control inputs as [`ControlAxis`] values, a way to set
//! them, and a `run` call that processes one frame.
//!
//! A host built through [`Bench::try_new`](crate::Bench::try_new) receives the
//! session's [`UridMap`](urid::UridMap) and owns it for the plugin's lifetime.
//!
//! Hosts whose plugin asks for non-realtime work own a
//! [`Worker`](crate::worker::Worker): requests are scheduled from inside `run`,
//! and `run` drains responses with
//! [`Worker::emit_responses`](crate::worker::Worker::emit_responses) after
//! processing, once per cycle.

pub mod signal;
pub mod urid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A labelled value a control port advertises.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePoint {
    pub label: String,
    pub value: f32,
}

impl ScalePoint {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Raw port property flags as a plugin description declares them.
///
/// Several flags can be set at once; [`AxisKind::classify`] decides which one
/// governs the axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortProperties {
    pub integer: bool,
    pub logarithmic: bool,
    pub enumeration: bool,
    pub scale_point: bool,
    pub toggled: bool,
    pub trigger: bool,
}

/// How a control axis is sampled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum AxisKind {
    /// Any value in `min..=max`.
    Continuous,
    /// Whole numbers in `min..=max`.
    Integer,
    /// Declared logarithmic. No logarithmic mapping is defined yet.
    Logarithmic { integer: bool },
    /// Only the listed values are meaningful.
    Enumerated { scale_points: Vec<ScalePoint> },
    /// On/off switch. No value mapping is defined yet.
    Toggle { integer: bool },
    /// Momentary trigger. No value mapping is defined yet.
    Trigger { integer: bool },
}

impl AxisKind {
    /// Pick the governing kind from raw port flags.
    ///
    /// Priority: enumeration/scale points, then toggle/trigger, then
    /// logarithmic, then integer, then continuous. Enumeration flags without
    /// any usable scale point fall through to the next rule.
    pub fn classify(props: PortProperties, scale_points: Vec<ScalePoint>) -> Self {
        if (props.enumeration || props.scale_point) && !scale_points.is_empty() {
            AxisKind::Enumerated { scale_points }
        } else if props.toggled {
            AxisKind::Toggle {
                integer: props.integer,
            }
        } else if props.trigger {
            AxisKind::Trigger {
                integer: props.integer,
            }
        } else if props.logarithmic {
            AxisKind::Logarithmic {
                integer: props.integer,
            }
        } else if props.integer {
            AxisKind::Integer
        } else {
            AxisKind::Continuous
        }
    }
}

/// One control input of the bound plugin.
///
/// Populated once when the host binds the plugin. The current value lives in
/// the host and is overwritten before every measurement.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ControlAxis {
    pub symbol: String,
    pub name: String,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub kind: AxisKind,
}

impl ControlAxis {
    pub fn new(symbol: impl Into<String>, min: f32, max: f32, default: f32) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            min,
            max,
            default,
            kind: AxisKind::Continuous,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: AxisKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build an axis from raw port flags and scale points.
    pub fn from_port(
        symbol: impl Into<String>,
        min: f32,
        max: f32,
        default: f32,
        props: PortProperties,
        scale_points: Vec<ScalePoint>,
    ) -> Self {
        Self::new(symbol, min, max, default).with_kind(AxisKind::classify(props, scale_points))
    }
}

/// Baseline control assignments.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Minimum,
    Maximum,
    Default,
}

impl Preset {
    pub fn value_for(self, axis: &ControlAxis) -> f32 {
        match self {
            Preset::Minimum => axis.min,
            Preset::Maximum => axis.max,
            Preset::Default => axis.default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Minimum => "minimum",
            Preset::Maximum => "maximum",
            Preset::Default => "default",
        }
    }
}

/// A bound plugin instance the benchmark can drive.
pub trait PluginHost {
    /// Identifier of the bound plugin, used in reports.
    fn uri(&self) -> &str;

    /// Control inputs in port order.
    fn control_axes(&self) -> &[ControlAxis];

    /// Set the current value of control input `index`.
    fn set_axis_value(&mut self, index: usize, value: f32);

    /// Copy one frame of samples into every audio input.
    fn connect_input(&mut self, samples: &[f32]);

    /// Process one frame of `frame_size` samples.
    ///
    /// This is the processing-thread cycle: any work the plugin schedules is
    /// queued here, and pending work responses are drained here.
    fn run(&mut self, frame_size: usize);

    /// Set every control input to the preset's value.
    fn set_preset(&mut self, preset: Preset) {
        let values: Vec<f32> = self
            .control_axes()
            .iter()
            .map(|axis| preset.value_for(axis))
            .collect();

        for (index, value) in values.into_iter().enumerate() {
            self.set_axis_value(index, value);
        }
    }
}

impl<H: PluginHost + ?Sized> PluginHost for Box<H> {
    fn uri(&self) -> &str {
        (**self).uri()
    }

    fn control_axes(&self) -> &[ControlAxis] {
        (**self).control_axes()
    }

    fn set_axis_value(&mut self, index: usize, value: f32) {
        (**self).set_axis_value(index, value)
    }

    fn connect_input(&mut self, samples: &[f32]) {
        (**self).connect_input(samples)
    }

    fn run(&mut self, frame_size: usize) {
        (**self).run(frame_size)
    }

    fn set_preset(&mut self, preset: Preset) {
        (**self).set_preset(preset)
    }
}
