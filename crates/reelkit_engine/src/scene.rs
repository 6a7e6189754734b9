// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene descriptors and built-in scene content kinds.
//!
//! Each scene kind has an explicit parameter struct; any field left out of a
//! timeline file takes the default listed on the struct. Content that the
//! engine does not render itself is an [`SceneContent::External`] reference
//! that a downstream renderer resolves.

use crate::error::{ConfigurationError, Result};
use crate::keyframe::{interpolate, InterpolateOptions};
use crate::spring::{spring_between, SpringConfig};
use crate::text::{cursor_visible, reveal};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// A scene as authored: id, requested length and content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    /// Unique id within the timeline
    pub id: String,
    /// Requested length in frames
    pub duration_frames: u32,
    /// What the scene shows
    pub content: SceneContent,
}

impl SceneDesc {
    /// Create a scene
    pub fn new(id: impl Into<String>, duration_frames: u32, content: SceneContent) -> Self {
        Self {
            id: id.into(),
            duration_frames,
            content,
        }
    }

    /// Scene whose content is drawn by the named external renderer
    pub fn external(id: impl Into<String>, duration_frames: u32, renderer: impl Into<String>) -> Self {
        Self::new(
            id,
            duration_frames,
            SceneContent::External {
                renderer: renderer.into(),
            },
        )
    }
}

/// Scene content kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneContent {
    /// Rendered outside the engine
    External {
        /// Renderer identifier
        renderer: String,
    },
    /// Typewriter title with a spring entrance
    Title(TitleParams),
    /// Flat color fill
    Solid(SolidParams),
}

fn default_frames_per_char() -> NonZeroU32 {
    NonZeroU32::new(2).unwrap_or(NonZeroU32::MIN)
}

fn default_cursor_cycle() -> NonZeroU32 {
    NonZeroU32::new(30).unwrap_or(NonZeroU32::MIN)
}

fn default_fade_in_frames() -> u32 {
    10
}

fn default_entrance_scale() -> f64 {
    0.8
}

/// Parameters of a title scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleParams {
    /// Full text
    pub text: String,
    /// Frames per revealed character (default 2)
    #[serde(default = "default_frames_per_char")]
    pub frames_per_char: NonZeroU32,
    /// Cursor blink period in frames (default 30)
    #[serde(default = "default_cursor_cycle")]
    pub cursor_cycle: NonZeroU32,
    /// Scale-in spring (default mass 1, stiffness 100, damping 10)
    #[serde(default)]
    pub entrance: SpringConfig,
    /// Scale the entrance starts from (default 0.8)
    #[serde(default = "default_entrance_scale")]
    pub entrance_scale: f64,
    /// Opacity ramp length in frames (default 10)
    #[serde(default = "default_fade_in_frames")]
    pub fade_in_frames: u32,
}

impl TitleParams {
    /// Title with default timing
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frames_per_char: default_frames_per_char(),
            cursor_cycle: default_cursor_cycle(),
            entrance: SpringConfig::default(),
            entrance_scale: default_entrance_scale(),
            fade_in_frames: default_fade_in_frames(),
        }
    }
}

/// Parameters of a solid fill scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidParams {
    /// RGBA fill
    pub color: [u8; 4],
}

/// What a scene looks like at one of its local frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneSample {
    /// Content opacity before any transition blend
    pub opacity: f64,
    /// Uniform content scale
    pub scale: f64,
    /// Visible text, for text scenes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Whether a text cursor is drawn
    pub cursor_visible: bool,
    /// Fill color, for solid scenes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<[u8; 4]>,
    /// Renderer to hand the frame to, for external scenes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
}

impl SceneContent {
    /// Check the parameters once, at timeline build
    pub fn validate(&self) -> Result<()> {
        match self {
            SceneContent::Title(params) => {
                params.entrance.validate()?;
                if !params.entrance_scale.is_finite() {
                    return Err(ConfigurationError::InvalidSpring {
                        parameter: "entrance_scale",
                        value: params.entrance_scale,
                    });
                }
                Ok(())
            }
            SceneContent::External { .. } | SceneContent::Solid(_) => Ok(()),
        }
    }

    /// Sample the content at `local_frame`
    pub fn sample(&self, local_frame: i64, fps: f64) -> Result<SceneSample> {
        match self {
            SceneContent::External { renderer } => Ok(SceneSample {
                opacity: 1.0,
                scale: 1.0,
                renderer: Some(renderer.clone()),
                ..SceneSample::default()
            }),
            SceneContent::Solid(params) => Ok(SceneSample {
                opacity: 1.0,
                scale: 1.0,
                fill: Some(params.color),
                ..SceneSample::default()
            }),
            SceneContent::Title(params) => {
                let frame = local_frame as f64;
                let opacity = if params.fade_in_frames == 0 {
                    1.0
                } else {
                    interpolate(
                        frame,
                        &[0.0, f64::from(params.fade_in_frames)],
                        &[0.0, 1.0],
                        InterpolateOptions::clamped(),
                    )?
                };
                let scale = spring_between(frame, fps, &params.entrance, params.entrance_scale, 1.0)?;
                let text = reveal(&params.text, local_frame, params.frames_per_char);
                let typing = text.len() < params.text.len();
                Ok(SceneSample {
                    opacity,
                    scale,
                    text: Some(text.to_string()),
                    cursor_visible: typing || cursor_visible(local_frame, params.cursor_cycle),
                    ..SceneSample::default()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_defaults_from_ron() {
        let content: SceneContent = ron::from_str(r#"Title((text: "Hello"))"#).unwrap();
        match content {
            SceneContent::Title(params) => {
                assert_eq!(params, TitleParams::new("Hello"));
                assert_eq!(params.frames_per_char.get(), 2);
                assert_eq!(params.cursor_cycle.get(), 30);
            }
            other => panic!("expected title, got {other:?}"),
        }
    }

    #[test]
    fn test_title_sample_progression() {
        let content = SceneContent::Title(TitleParams::new("HELLO"));

        let first = content.sample(0, 30.0).unwrap();
        assert_eq!(first.opacity, 0.0);
        assert!((first.scale - 0.8).abs() < 1e-12);
        assert_eq!(first.text.as_deref(), Some(""));
        assert!(first.cursor_visible);

        let typing = content.sample(5, 30.0).unwrap();
        assert_eq!(typing.text.as_deref(), Some("HE"));
        assert!((typing.opacity - 0.5).abs() < 1e-12);

        let done = content.sample(300, 30.0).unwrap();
        assert_eq!(done.text.as_deref(), Some("HELLO"));
        assert_eq!(done.opacity, 1.0);
        assert!((done.scale - 1.0).abs() < 1e-6);
        // Blinks once typing has finished: 300 % 30 == 0 is visible, 315 is not
        assert!(done.cursor_visible);
        assert!(!content.sample(315, 30.0).unwrap().cursor_visible);
    }

    #[test]
    fn test_external_and_solid_samples() {
        let external = SceneContent::External {
            renderer: "chart".into(),
        };
        assert_eq!(external.sample(3, 30.0).unwrap().renderer.as_deref(), Some("chart"));

        let solid = SceneContent::Solid(SolidParams {
            color: [255, 0, 0, 255],
        });
        assert_eq!(solid.sample(0, 30.0).unwrap().fill, Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_validate_rejects_bad_spring() {
        let mut params = TitleParams::new("x");
        params.entrance.stiffness = 0.0;
        assert!(SceneContent::Title(params).validate().is_err());
    }
}
