// SPDX-License-Identifier: MIT OR Apache-2.0
//! Audio gain envelopes anchored to the timeline length.

use crate::error::{ConfigurationError, Result};
use crate::keyframe::{InterpolateOptions, Keyframe, KeyframeSet};
use serde::{Deserialize, Serialize};

/// Piecewise-linear gain curve
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    curve: KeyframeSet,
    total_frames: u32,
}

impl Envelope {
    /// Fade from silence up to `target_gain` over `fade_in` frames, hold, and
    /// fade back to silence so the curve reaches zero exactly at `total_frames`.
    pub fn fade(total_frames: u32, fade_in: u32, fade_out: u32, target_gain: f64) -> Result<Self> {
        if !(target_gain.is_finite() && target_gain >= 0.0) {
            return Err(ConfigurationError::InvalidGain(target_gain));
        }
        if u64::from(fade_in) + u64::from(fade_out) > u64::from(total_frames) {
            return Err(ConfigurationError::InvalidEnvelope {
                total: total_frames,
                fade_in,
                fade_out,
            });
        }

        let total = f64::from(total_frames);
        let hold_start = f64::from(fade_in);
        let hold_end = f64::from(total_frames - fade_out);

        let mut points = Vec::with_capacity(4);
        if fade_in > 0 {
            points.push(Keyframe::new(0.0, 0.0));
        }
        points.push(Keyframe::new(hold_start, target_gain));
        if hold_end > hold_start {
            points.push(Keyframe::new(hold_end, target_gain));
        }
        if fade_out > 0 {
            points.push(Keyframe::new(total, 0.0));
        }

        let curve = KeyframeSet::from_keyframes(&points, InterpolateOptions::clamped())?;
        Ok(Self { curve, total_frames })
    }

    /// Gain at `frame`
    pub fn gain_at(&self, frame: f64) -> f64 {
        // Clamped on both sides, so sampling cannot leave the domain
        self.curve.sample(frame).unwrap_or(0.0)
    }

    /// The control points
    pub fn points(&self) -> impl Iterator<Item = Keyframe> + '_ {
        self.curve.keyframes()
    }

    /// Length the envelope was built for
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }
}

/// Gain at `frame` for a fade-in / fade-out envelope over `total_frames`.
pub fn gain_at(
    frame: f64,
    total_frames: u32,
    fade_in: u32,
    fade_out: u32,
    target_gain: f64,
) -> Result<f64> {
    Ok(Envelope::fade(total_frames, fade_in, fade_out, target_gain)?.gain_at(frame))
}

/// Soundtrack level settings carried by a timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundtrackConfig {
    /// Gain while fully faded in
    pub target_gain: f64,
    /// Fade-in length in frames
    pub fade_in_frames: u32,
    /// Fade-out length in frames
    pub fade_out_frames: u32,
}

impl Default for SoundtrackConfig {
    fn default() -> Self {
        Self {
            target_gain: 1.0,
            fade_in_frames: 30,
            fade_out_frames: 30,
        }
    }
}

impl SoundtrackConfig {
    /// Envelope for a timeline of `total_frames`
    pub fn envelope(&self, total_frames: u32) -> Result<Envelope> {
        Envelope::fade(
            total_frames,
            self.fade_in_frames,
            self.fade_out_frames,
            self.target_gain,
        )
    }
}
