// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-indexed animation engine for programmatic video.
//!
//! This crate turns a declarative timeline into per-frame drawing
//! instructions:
//! - Keyframe interpolation with extrapolation policies and easing
//! - Damped spring physics
//! - Typewriter text reveal and cursor blink
//! - Audio gain envelopes
//! - Fade and slide transitions
//! - Timeline composition and frame lookup
//!
//! ## Architecture
//!
//! Every function of time takes an explicit frame number and is pure, so any
//! frame can be computed in isolation, in any order and in parallel. A
//! [`TimelineConfig`] is validated once by [`ResolvedTimeline::build`]; the
//! resolved timeline then answers [`ResolvedTimeline::query_frame`] and
//! [`ResolvedTimeline::frame_state`] without further checks.

pub mod easing;
pub mod envelope;
pub mod error;
pub mod frame;
pub mod keyframe;
pub mod scene;
pub mod spring;
pub mod text;
pub mod timeline;
pub mod transition;

pub use easing::Easing;
pub use envelope::{gain_at, Envelope, SoundtrackConfig};
pub use error::{ConfigurationError, DurationError, TimelineError};
pub use frame::{FrameState, LayerState};
pub use keyframe::{interpolate, lerp, Extrapolation, InterpolateOptions, Keyframe, KeyframeSet};
pub use scene::{SceneContent, SceneDesc, SceneSample, SolidParams, TitleParams};
pub use spring::{spring_between, spring_value, DampingRegime, SpringConfig};
pub use text::{cursor_visible, reveal, reveal_duration};
pub use timeline::{
    build, ActiveState, FrameSize, ResolvedScene, ResolvedTimeline, ResolvedTransition,
    SceneFrame, TimelineConfig, TransitionDesc, TransitionFrame, TIMELINE_FORMAT_VERSION,
};
pub use transition::{
    composite, CompositeParams, LayerBlend, Presentation, SlideDirection, TransitionRole,
};
