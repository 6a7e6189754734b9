// SPDX-License-Identifier: MIT OR Apache-2.0
//! Everything a renderer needs to draw one output frame.
//!
//! [`ResolvedTimeline::frame_state`] combines the active-state lookup with
//! scene content sampling, transition blending and the soundtrack level, and
//! returns the layers bottom to top.

use crate::error::Result;
use crate::scene::SceneSample;
use crate::timeline::{ActiveState, ResolvedTimeline, SceneFrame};
use crate::transition::{LayerBlend, TransitionRole};
use serde::Serialize;

/// One scene layer of an output frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerState {
    /// Scene id
    pub scene_id: String,
    /// Frame relative to the scene start
    pub local_frame: u32,
    /// Side of the transition, if one is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TransitionRole>,
    /// Transition alpha and offset
    pub blend: LayerBlend,
    /// `blend.offset` in pixels, when the timeline has a frame size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_offset: Option<[f64; 2]>,
    /// Scene content at `local_frame`
    pub sample: SceneSample,
}

impl LayerState {
    /// Final opacity: content opacity times transition alpha
    pub fn opacity(&self) -> f64 {
        self.sample.opacity * self.blend.alpha
    }
}

/// Full description of one output frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    /// Global frame number
    pub frame: u32,
    /// Presentation time in seconds
    pub time_secs: f64,
    /// Active scene or transition
    pub active: ActiveState,
    /// Layers bottom to top
    pub layers: Vec<LayerState>,
    /// Soundtrack gain, when the timeline has a soundtrack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soundtrack_gain: Option<f64>,
}

impl ResolvedTimeline {
    /// Describe `global_frame`; `Ok(None)` outside the timeline.
    pub fn frame_state(&self, global_frame: i64) -> Result<Option<FrameState>> {
        let Some(active) = self.query_frame(global_frame) else {
            return Ok(None);
        };

        let layers = match &active {
            ActiveState::Scene(scene) => vec![self.layer(scene, None, LayerBlend::REST)?],
            ActiveState::Transition(transition) => {
                let mut layers = Vec::with_capacity(2);
                for (role, blend) in transition.composite.draw_order() {
                    let scene = match role {
                        TransitionRole::Outgoing => &transition.outgoing,
                        TransitionRole::Incoming => &transition.incoming,
                    };
                    layers.push(self.layer(scene, Some(role), blend)?);
                }
                layers
            }
        };

        let soundtrack_gain = self
            .soundtrack()
            .map(|envelope| envelope.gain_at(global_frame as f64));

        Ok(Some(FrameState {
            frame: global_frame as u32,
            time_secs: self.frame_to_time(global_frame),
            active,
            layers,
            soundtrack_gain,
        }))
    }

    fn layer(
        &self,
        scene: &SceneFrame,
        role: Option<TransitionRole>,
        blend: LayerBlend,
    ) -> Result<LayerState> {
        let content = &self.scenes()[scene.index].content;
        let sample = content.sample(i64::from(scene.local_frame), self.fps())?;
        let pixel_offset = self
            .frame_size()
            .map(|size| blend.pixel_offset(size.width, size.height));
        Ok(LayerState {
            scene_id: scene.id.clone(),
            local_frame: scene.local_frame,
            role,
            blend,
            pixel_offset,
            sample,
        })
    }
}
