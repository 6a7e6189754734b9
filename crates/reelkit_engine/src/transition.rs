// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transition presentations and their blend parameters.
//!
//! During a transition window two scenes are visible. Given the window
//! progress, a presentation decides the alpha and offset of each. Offsets
//! are in frame-dimension units: `1.0` on x is one full frame width.

use serde::{Deserialize, Serialize};

/// Edge the incoming scene enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    /// Enters from the left edge
    FromLeft,
    /// Enters from the right edge
    FromRight,
    /// Enters from the top edge
    FromTop,
    /// Enters from the bottom edge
    FromBottom,
}

impl SlideDirection {
    /// Offset at which the incoming scene starts, fully offscreen
    pub fn entry_offset(&self) -> [f64; 2] {
        match self {
            Self::FromLeft => [-1.0, 0.0],
            Self::FromRight => [1.0, 0.0],
            Self::FromTop => [0.0, -1.0],
            Self::FromBottom => [0.0, 1.0],
        }
    }
}

/// How two scenes are blended inside a transition window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Cross-fade
    Fade,
    /// Incoming scene slides over the outgoing one
    Slide {
        /// Entry edge
        direction: SlideDirection,
        /// Also push the outgoing scene off the opposite edge
        #[serde(default)]
        push: bool,
    },
}

impl Presentation {
    /// Short label for logs and tables
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide { push: false, .. } => "slide",
            Self::Slide { push: true, .. } => "push",
        }
    }
}

/// Alpha and offset applied to one scene's layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBlend {
    /// Opacity multiplier
    pub alpha: f64,
    /// Offset in frame-dimension units
    pub offset: [f64; 2],
}

impl LayerBlend {
    /// Fully opaque at rest
    pub const REST: Self = Self {
        alpha: 1.0,
        offset: [0.0, 0.0],
    };

    /// Offset in pixels for a frame of `width` x `height`
    pub fn pixel_offset(&self, width: u32, height: u32) -> [f64; 2] {
        [
            self.offset[0] * f64::from(width),
            self.offset[1] * f64::from(height),
        ]
    }
}

impl Default for LayerBlend {
    fn default() -> Self {
        Self::REST
    }
}

/// Which side of a transition a layer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionRole {
    /// The scene that is ending
    Outgoing,
    /// The scene that is starting
    Incoming,
}

/// Blend parameters for both scenes of a transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeParams {
    /// Scene being left
    pub outgoing: LayerBlend,
    /// Scene being entered
    pub incoming: LayerBlend,
}

impl CompositeParams {
    /// Layers bottom to top: the incoming scene is always drawn last
    pub fn draw_order(&self) -> [(TransitionRole, LayerBlend); 2] {
        [
            (TransitionRole::Outgoing, self.outgoing),
            (TransitionRole::Incoming, self.incoming),
        ]
    }
}

/// Blend parameters for `presentation` at `progress` (clamped to [0, 1]).
pub fn composite(presentation: &Presentation, progress: f64) -> CompositeParams {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };

    match *presentation {
        Presentation::Fade => CompositeParams {
            outgoing: LayerBlend {
                alpha: 1.0 - progress,
                ..LayerBlend::REST
            },
            incoming: LayerBlend {
                alpha: progress,
                ..LayerBlend::REST
            },
        },
        Presentation::Slide { direction, push } => {
            let [ex, ey] = direction.entry_offset();
            let remaining = 1.0 - progress;
            let incoming = LayerBlend {
                offset: [ex * remaining, ey * remaining],
                ..LayerBlend::REST
            };
            let outgoing = if push {
                LayerBlend {
                    offset: [-ex * progress, -ey * progress],
                    ..LayerBlend::REST
                }
            } else {
                LayerBlend::REST
            };
            CompositeParams { outgoing, incoming }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(direction: SlideDirection, push: bool) -> Presentation {
        Presentation::Slide { direction, push }
    }

    #[test]
    fn test_fade_endpoints() {
        let start = composite(&Presentation::Fade, 0.0);
        assert_eq!(start.outgoing.alpha, 1.0);
        assert_eq!(start.incoming.alpha, 0.0);

        let end = composite(&Presentation::Fade, 1.0);
        assert_eq!(end.outgoing.alpha, 0.0);
        assert_eq!(end.incoming.alpha, 1.0);

        let mid = composite(&Presentation::Fade, 0.25);
        assert!((mid.outgoing.alpha - 0.75).abs() < 1e-12);
        assert_eq!(mid.incoming.offset, [0.0, 0.0]);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(composite(&Presentation::Fade, -2.0), composite(&Presentation::Fade, 0.0));
        assert_eq!(composite(&Presentation::Fade, 3.0), composite(&Presentation::Fade, 1.0));
    }

    #[test]
    fn test_slide_directions() {
        let cases = [
            (SlideDirection::FromLeft, [-1.0, 0.0]),
            (SlideDirection::FromRight, [1.0, 0.0]),
            (SlideDirection::FromTop, [0.0, -1.0]),
            (SlideDirection::FromBottom, [0.0, 1.0]),
        ];
        for (direction, entry) in cases {
            let start = composite(&slide(direction, false), 0.0);
            assert_eq!(start.incoming.offset, entry);
            assert_eq!(start.outgoing, LayerBlend::REST);

            let end = composite(&slide(direction, false), 1.0);
            assert_eq!(end.incoming.offset, [0.0, 0.0]);
            assert_eq!(end.incoming.alpha, 1.0);
        }
    }

    #[test]
    fn test_push_moves_outgoing_opposite() {
        let mid = composite(&slide(SlideDirection::FromRight, true), 0.5);
        assert_eq!(mid.incoming.offset, [0.5, 0.0]);
        assert_eq!(mid.outgoing.offset, [-0.5, 0.0]);

        let end = composite(&slide(SlideDirection::FromBottom, true), 1.0);
        assert_eq!(end.outgoing.offset, [0.0, -1.0]);
    }

    #[test]
    fn test_incoming_drawn_last() {
        let params = composite(&slide(SlideDirection::FromLeft, false), 0.3);
        let order = params.draw_order();
        assert_eq!(order[0].0, TransitionRole::Outgoing);
        assert_eq!(order[1].0, TransitionRole::Incoming);
    }

    #[test]
    fn test_pixel_offset() {
        let params = composite(&slide(SlideDirection::FromLeft, false), 0.5);
        assert_eq!(params.incoming.pixel_offset(1920, 1080), [-960.0, 0.0]);
    }

    #[test]
    fn test_presentation_ron() {
        let parsed: Presentation = ron::from_str("Slide(direction: FromTop)").unwrap();
        assert_eq!(parsed, slide(SlideDirection::FromTop, false));
        assert_eq!(parsed.name(), "slide");
    }
}
