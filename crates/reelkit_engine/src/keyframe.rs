// SPDX-License-Identifier: MIT OR Apache-2.0
//! Piecewise-linear keyframe interpolation.
//!
//! A frame number is mapped to a value by locating the segment of an
//! increasing input sequence that contains it, easing the normalized
//! progress inside that segment, and blending the two neighbouring outputs.
//! Frames outside the domain are handled by a per-side [`Extrapolation`].

use crate::easing::Easing;
use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};

/// What to do with a frame outside the keyframe domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolation {
    /// Hold the boundary output
    Clamp,
    /// Continue the slope of the nearest segment
    Extend,
    /// Return the frame itself
    Identity,
}

/// Extrapolation policies and easing for one interpolation call
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolateOptions {
    /// Policy for frames before the first input
    pub extrapolate_left: Option<Extrapolation>,
    /// Policy for frames after the last input
    pub extrapolate_right: Option<Extrapolation>,
    /// Easing applied to in-segment progress
    pub easing: Option<Easing>,
}

impl InterpolateOptions {
    /// Clamp on both sides
    pub fn clamped() -> Self {
        Self::both(Extrapolation::Clamp)
    }

    /// Extend linearly on both sides
    pub fn extended() -> Self {
        Self::both(Extrapolation::Extend)
    }

    /// Same policy on both sides
    pub fn both(policy: Extrapolation) -> Self {
        Self {
            extrapolate_left: Some(policy),
            extrapolate_right: Some(policy),
            easing: None,
        }
    }

    /// Set the easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Linear blend between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `frame` through the keyframes `inputs` -> `outputs`.
///
/// `inputs` must be strictly increasing and the same length as `outputs`,
/// with at least two points.
pub fn interpolate(
    frame: f64,
    inputs: &[f64],
    outputs: &[f64],
    options: InterpolateOptions,
) -> Result<f64> {
    validate(inputs, outputs)?;
    evaluate(frame, inputs, outputs, &options)
}

fn validate(inputs: &[f64], outputs: &[f64]) -> Result<()> {
    if inputs.len() != outputs.len() {
        return Err(ConfigurationError::LengthMismatch {
            inputs: inputs.len(),
            outputs: outputs.len(),
        });
    }
    if inputs.len() < 2 {
        return Err(ConfigurationError::TooFewKeyframes(inputs.len()));
    }
    for (index, (input, output)) in inputs.iter().zip(outputs).enumerate() {
        if !input.is_finite() || !output.is_finite() {
            return Err(ConfigurationError::NonFiniteKeyframe(index));
        }
    }
    for (index, pair) in inputs.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(ConfigurationError::NotIncreasing {
                index: index + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

/// Evaluation over already-validated keyframes
fn evaluate(
    frame: f64,
    inputs: &[f64],
    outputs: &[f64],
    options: &InterpolateOptions,
) -> Result<f64> {
    let last = inputs.len() - 1;
    let out_of_domain = || ConfigurationError::OutOfDomain {
        frame,
        start: inputs[0],
        end: inputs[last],
    };

    if frame.is_nan() {
        return Err(out_of_domain());
    }

    if frame < inputs[0] {
        let policy = options.extrapolate_left.ok_or_else(out_of_domain)?;
        return Ok(extrapolate(frame, policy, inputs, outputs, 0, 1));
    }

    if frame > inputs[last] {
        let policy = options.extrapolate_right.ok_or_else(out_of_domain)?;
        return Ok(extrapolate(frame, policy, inputs, outputs, last, last - 1));
    }

    // Number of inputs <= frame is at least 1 here
    let segment = (inputs.partition_point(|&input| input <= frame) - 1).min(last - 1);
    let (x0, x1) = (inputs[segment], inputs[segment + 1]);
    let mut t = (frame - x0) / (x1 - x0);
    if let Some(easing) = options.easing {
        t = easing.apply(t);
    }
    Ok(lerp(outputs[segment], outputs[segment + 1], t))
}

/// `edge` is the boundary keyframe, `inner` its neighbour in the same segment
fn extrapolate(
    frame: f64,
    policy: Extrapolation,
    inputs: &[f64],
    outputs: &[f64],
    edge: usize,
    inner: usize,
) -> f64 {
    match policy {
        Extrapolation::Clamp => outputs[edge],
        Extrapolation::Identity => frame,
        Extrapolation::Extend => {
            let slope = (outputs[edge] - outputs[inner]) / (inputs[edge] - inputs[inner]);
            outputs[edge] + slope * (frame - inputs[edge])
        }
    }
}

/// A (frame, value) control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Input frame
    pub frame: f64,
    /// Output value
    pub value: f64,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(frame: f64, value: f64) -> Self {
        Self { frame, value }
    }
}

/// A validated keyframe set with its extrapolation policies and easing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyframeSet")]
pub struct KeyframeSet {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    extrapolate_left: Option<Extrapolation>,
    extrapolate_right: Option<Extrapolation>,
    easing: Option<Easing>,
}

#[derive(Deserialize)]
struct RawKeyframeSet {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    #[serde(default)]
    extrapolate_left: Option<Extrapolation>,
    #[serde(default)]
    extrapolate_right: Option<Extrapolation>,
    #[serde(default)]
    easing: Option<Easing>,
}

impl TryFrom<RawKeyframeSet> for KeyframeSet {
    type Error = ConfigurationError;

    fn try_from(raw: RawKeyframeSet) -> Result<Self> {
        let options = InterpolateOptions {
            extrapolate_left: raw.extrapolate_left,
            extrapolate_right: raw.extrapolate_right,
            easing: raw.easing,
        };
        Self::new(raw.inputs, raw.outputs, options)
    }
}

impl KeyframeSet {
    /// Validate and create a keyframe set
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>, options: InterpolateOptions) -> Result<Self> {
        validate(&inputs, &outputs)?;
        Ok(Self {
            inputs,
            outputs,
            extrapolate_left: options.extrapolate_left,
            extrapolate_right: options.extrapolate_right,
            easing: options.easing,
        })
    }

    /// Build from control points
    pub fn from_keyframes(keyframes: &[Keyframe], options: InterpolateOptions) -> Result<Self> {
        let inputs = keyframes.iter().map(|k| k.frame).collect();
        let outputs = keyframes.iter().map(|k| k.value).collect();
        Self::new(inputs, outputs, options)
    }

    /// Value at `frame`
    pub fn sample(&self, frame: f64) -> Result<f64> {
        evaluate(frame, &self.inputs, &self.outputs, &self.options())
    }

    /// The policies and easing this set was built with
    pub fn options(&self) -> InterpolateOptions {
        InterpolateOptions {
            extrapolate_left: self.extrapolate_left,
            extrapolate_right: self.extrapolate_right,
            easing: self.easing,
        }
    }

    /// Control points in order
    pub fn keyframes(&self) -> impl Iterator<Item = Keyframe> + '_ {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(&frame, &value)| Keyframe::new(frame, value))
    }

    /// Number of control points
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the set has no points
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// First and last input frame
    pub fn domain(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }
}
