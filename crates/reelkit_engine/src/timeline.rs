// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline composition: scenes, transitions and frame lookup.
//!
//! A timeline is authored as an ordered list of scenes with requested
//! lengths, one transition between each adjacent pair, and a required total
//! length. Building it reconciles the requested lengths with the total by
//! stretching or shrinking the last scene, lays the scenes out so each
//! transition window overlaps the tail of one scene with the head of the
//! next, and validates that every scene can host its windows.
//!
//! The resolved timeline is read-only. [`ResolvedTimeline::query_frame`] is
//! a pure lookup, so frames may be queried in any order and from any thread.

use crate::envelope::{Envelope, SoundtrackConfig};
use crate::error::{ConfigurationError, DurationError, TimelineError};
use crate::scene::{SceneContent, SceneDesc};
use crate::transition::{composite, CompositeParams, Presentation};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Current timeline file format version
pub const TIMELINE_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    TIMELINE_FORMAT_VERSION
}

/// A transition as authored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionDesc {
    /// Blend style
    pub presentation: Presentation,
    /// Window length in frames
    pub duration_frames: u32,
}

impl TransitionDesc {
    /// Create a transition
    pub fn new(presentation: Presentation, duration_frames: u32) -> Self {
        Self {
            presentation,
            duration_frames,
        }
    }

    /// Cross-fade of `duration_frames`
    pub fn fade(duration_frames: u32) -> Self {
        Self::new(Presentation::Fade, duration_frames)
    }
}

/// Output frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Declarative timeline, as loaded from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// File format version
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Frames per second
    pub fps: f64,
    /// Required length of the whole video
    pub total_frames: u32,
    /// Output size; slide offsets are reported in pixels when set
    #[serde(default)]
    pub frame_size: Option<FrameSize>,
    /// Scenes in playback order
    pub scenes: Vec<SceneDesc>,
    /// `transitions[i]` sits between `scenes[i]` and `scenes[i + 1]`
    #[serde(default)]
    pub transitions: Vec<TransitionDesc>,
    /// Background audio levels
    #[serde(default)]
    pub soundtrack: Option<SoundtrackConfig>,
}

impl TimelineConfig {
    /// Empty timeline at `fps` with a required total length
    pub fn new(fps: f64, total_frames: u32) -> Self {
        Self {
            format_version: TIMELINE_FORMAT_VERSION,
            fps,
            total_frames,
            frame_size: None,
            scenes: Vec::new(),
            transitions: Vec::new(),
            soundtrack: None,
        }
    }

    /// Append a scene
    pub fn with_scene(mut self, scene: SceneDesc) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Append a transition after the most recent scene
    pub fn with_transition(mut self, transition: TransitionDesc) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Set the frame size
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some(FrameSize { width, height });
        self
    }

    /// Set the soundtrack levels
    pub fn with_soundtrack(mut self, soundtrack: SoundtrackConfig) -> Self {
        self.soundtrack = Some(soundtrack);
        self
    }

    /// Parse a RON timeline
    pub fn from_ron(content: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            ron::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.check_version()?;
        Ok(config)
    }

    /// Parse a JSON timeline
    pub fn from_json(content: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.check_version()?;
        Ok(config)
    }

    /// Pretty RON form
    pub fn to_ron(&self) -> Result<String, ConfigurationError> {
        let pretty = ron::ser::PrettyConfig::default().struct_names(true);
        ron::ser::to_string_pretty(self, pretty).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    fn check_version(&self) -> Result<(), ConfigurationError> {
        if self.format_version > TIMELINE_FORMAT_VERSION {
            return Err(ConfigurationError::UnsupportedVersion {
                found: self.format_version,
                supported: TIMELINE_FORMAT_VERSION,
            });
        }
        Ok(())
    }

    /// Validate and lay out
    pub fn build(&self) -> Result<ResolvedTimeline, TimelineError> {
        ResolvedTimeline::build(self)
    }
}

/// Build a timeline from its parts
pub fn build(
    scenes: Vec<SceneDesc>,
    transitions: Vec<TransitionDesc>,
    total_frames: u32,
    fps: f64,
) -> Result<ResolvedTimeline, TimelineError> {
    let config = TimelineConfig {
        scenes,
        transitions,
        ..TimelineConfig::new(fps, total_frames)
    };
    ResolvedTimeline::build(&config)
}

/// A scene placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedScene {
    /// Scene id
    pub id: String,
    /// Length as authored
    pub requested_frames: u32,
    /// Length after reconciling with the total
    pub effective_frames: u32,
    /// First global frame
    pub start: u32,
    /// Content
    pub content: SceneContent,
}

impl ResolvedScene {
    /// One past the last global frame
    pub fn end(&self) -> u32 {
        self.start + self.effective_frames
    }

    /// Whether `frame` lies in this scene's span
    pub fn contains(&self, frame: i64) -> bool {
        frame >= i64::from(self.start) && frame < i64::from(self.end())
    }
}

/// A transition window placed on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedTransition {
    /// Blend style
    pub presentation: Presentation,
    /// Window length
    pub duration_frames: u32,
    /// First global frame of the window
    pub start: u32,
    /// Index of the scene ending
    pub outgoing: usize,
    /// Index of the scene starting
    pub incoming: usize,
}

impl ResolvedTransition {
    /// One past the last global frame of the window
    pub fn end(&self) -> u32 {
        self.start + self.duration_frames
    }

    /// Whether `frame` lies in the window
    pub fn contains(&self, frame: i64) -> bool {
        frame >= i64::from(self.start) && frame < i64::from(self.end())
    }

    /// Window progress at `frame`, clamped to [0, 1]
    pub fn progress(&self, frame: i64) -> f64 {
        if self.duration_frames == 0 {
            return 1.0;
        }
        let elapsed = (frame - i64::from(self.start)) as f64;
        (elapsed / f64::from(self.duration_frames)).clamp(0.0, 1.0)
    }
}

/// A scene and the frame within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneFrame {
    /// Scene position in the timeline
    pub index: usize,
    /// Scene id
    pub id: String,
    /// Frame relative to the scene start
    pub local_frame: u32,
}

/// Two scenes sharing a transition window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionFrame {
    /// Transition position in the timeline
    pub index: usize,
    /// Scene being left
    pub outgoing: SceneFrame,
    /// Scene being entered
    pub incoming: SceneFrame,
    /// Window progress in [0, 1]
    pub progress: f64,
    /// Blend style
    pub presentation: Presentation,
    /// Blend parameters at `progress`
    pub composite: CompositeParams,
}

/// What is on screen at a global frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveState {
    /// Exactly one scene
    Scene(SceneFrame),
    /// Two scenes blending
    Transition(TransitionFrame),
}

impl ActiveState {
    /// Active scenes, outgoing first
    pub fn scenes(&self) -> Vec<&SceneFrame> {
        match self {
            ActiveState::Scene(scene) => vec![scene],
            ActiveState::Transition(t) => vec![&t.outgoing, &t.incoming],
        }
    }

    /// Transition progress, if blending
    pub fn progress(&self) -> Option<f64> {
        match self {
            ActiveState::Scene(_) => None,
            ActiveState::Transition(t) => Some(t.progress),
        }
    }
}

/// A validated, laid-out timeline
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTimeline {
    fps: f64,
    total_frames: u32,
    frame_size: Option<FrameSize>,
    scenes: Vec<ResolvedScene>,
    transitions: Vec<ResolvedTransition>,
    ids: IndexSet<String>,
    soundtrack: Option<Envelope>,
}

impl ResolvedTimeline {
    /// Validate `config`, reconcile lengths with the total and lay out.
    pub fn build(config: &TimelineConfig) -> Result<Self, TimelineError> {
        let ids = validate_config(config)?;
        let lengths = reconcile_lengths(config)?;

        let mut scenes = Vec::with_capacity(config.scenes.len());
        let mut transitions = Vec::with_capacity(config.transitions.len());
        let mut start: u32 = 0;

        for (index, (desc, &length)) in config.scenes.iter().zip(&lengths).enumerate() {
            let scene = ResolvedScene {
                id: desc.id.clone(),
                requested_frames: desc.duration_frames,
                effective_frames: length,
                start,
                content: desc.content.clone(),
            };
            tracing::debug!(
                "Scene '{}' at [{}, {}) ({} frames)",
                scene.id,
                scene.start,
                scene.end(),
                length
            );

            if let Some(transition) = config.transitions.get(index) {
                // Window is the tail of this scene
                start = scene.end() - transition.duration_frames;
                transitions.push(ResolvedTransition {
                    presentation: transition.presentation,
                    duration_frames: transition.duration_frames,
                    start,
                    outgoing: index,
                    incoming: index + 1,
                });
            }
            scenes.push(scene);
        }

        let soundtrack = config
            .soundtrack
            .map(|s| s.envelope(config.total_frames))
            .transpose()?;

        tracing::info!(
            "Resolved timeline: {} scenes, {} transitions, {} frames at {} fps",
            scenes.len(),
            transitions.len(),
            config.total_frames,
            config.fps
        );

        Ok(Self {
            fps: config.fps,
            total_frames: config.total_frames,
            frame_size: config.frame_size,
            scenes,
            transitions,
            ids,
            soundtrack,
        })
    }

    /// What is active at `global_frame`; `None` outside `[0, total_frames)`.
    pub fn query_frame(&self, global_frame: i64) -> Option<ActiveState> {
        if global_frame < 0 || global_frame >= i64::from(self.total_frames) {
            return None;
        }

        // Last scene starting at or before the frame; scene 0 starts at 0
        let current = self
            .scenes
            .partition_point(|s| i64::from(s.start) <= global_frame)
            - 1;

        if current > 0 {
            let transition = &self.transitions[current - 1];
            if transition.contains(global_frame) {
                let progress = transition.progress(global_frame);
                return Some(ActiveState::Transition(TransitionFrame {
                    index: current - 1,
                    outgoing: self.scene_frame(current - 1, global_frame),
                    incoming: self.scene_frame(current, global_frame),
                    progress,
                    presentation: transition.presentation,
                    composite: composite(&transition.presentation, progress),
                }));
            }
        }

        Some(ActiveState::Scene(self.scene_frame(current, global_frame)))
    }

    fn scene_frame(&self, index: usize, global_frame: i64) -> SceneFrame {
        let scene = &self.scenes[index];
        SceneFrame {
            index,
            id: scene.id.clone(),
            local_frame: (global_frame - i64::from(scene.start)) as u32,
        }
    }

    /// Frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Total length in frames
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Output size, if configured
    pub fn frame_size(&self) -> Option<FrameSize> {
        self.frame_size
    }

    /// Scenes in order
    pub fn scenes(&self) -> &[ResolvedScene] {
        &self.scenes
    }

    /// Transition windows in order
    pub fn transitions(&self) -> &[ResolvedTransition] {
        &self.transitions
    }

    /// Scene by id
    pub fn scene(&self, id: &str) -> Option<&ResolvedScene> {
        self.ids.get_index_of(id).map(|index| &self.scenes[index])
    }

    /// Soundtrack envelope, if configured
    pub fn soundtrack(&self) -> Option<&Envelope> {
        self.soundtrack.as_ref()
    }

    /// Convert a frame number to seconds
    pub fn frame_to_time(&self, frame: i64) -> f64 {
        frame as f64 / self.fps
    }

    /// Convert seconds to the frame containing that instant
    pub fn time_to_frame(&self, seconds: f64) -> i64 {
        (seconds * self.fps).floor() as i64
    }
}

/// Structural checks; returns the scene ids in order
fn validate_config(config: &TimelineConfig) -> Result<IndexSet<String>, ConfigurationError> {
    if !(config.fps.is_finite() && config.fps > 0.0) {
        return Err(ConfigurationError::InvalidFps(config.fps));
    }
    if config.scenes.is_empty() {
        return Err(ConfigurationError::EmptyTimeline);
    }
    let expected = config.scenes.len() - 1;
    if config.transitions.len() != expected {
        return Err(ConfigurationError::TransitionCount {
            scenes: config.scenes.len(),
            expected,
            actual: config.transitions.len(),
        });
    }

    let mut ids = IndexSet::with_capacity(config.scenes.len());
    for scene in &config.scenes {
        if scene.duration_frames == 0 {
            return Err(ConfigurationError::EmptyScene(scene.id.clone()));
        }
        if !ids.insert(scene.id.clone()) {
            return Err(ConfigurationError::DuplicateScene(scene.id.clone()));
        }
        scene.content.validate()?;
    }
    Ok(ids)
}

/// Effective scene lengths: all as requested except the last, which absorbs
/// the difference between the required total and the naive total.
fn reconcile_lengths(config: &TimelineConfig) -> Result<Vec<u32>, DurationError> {
    let requested: i64 = config
        .scenes
        .iter()
        .map(|s| i64::from(s.duration_frames))
        .sum();
    let overlap: i64 = config
        .transitions
        .iter()
        .map(|t| i64::from(t.duration_frames))
        .sum();
    let naive_total = requested - overlap;
    let delta = i64::from(config.total_frames) - naive_total;

    let last = config.scenes.len() - 1;
    let mut lengths: Vec<i64> = config
        .scenes
        .iter()
        .map(|s| i64::from(s.duration_frames))
        .collect();
    lengths[last] += delta;

    if delta != 0 {
        tracing::debug!(
            "Last scene '{}' adjusted by {} frames to {}",
            config.scenes[last].id,
            delta,
            lengths[last]
        );
    }

    if lengths[last] <= 0 {
        return Err(DurationError::LastSceneCollapsed {
            scene: config.scenes[last].id.clone(),
            length: lengths[last],
        });
    }
    if delta < 0 && lengths[last] < i64::from(config.scenes[last].duration_frames) / 2 {
        tracing::warn!(
            "Last scene '{}' shrank from {} to {} frames to fit the total length",
            config.scenes[last].id,
            config.scenes[last].duration_frames,
            lengths[last]
        );
    }

    for (index, (scene, &length)) in config.scenes.iter().zip(&lengths).enumerate() {
        let before = index
            .checked_sub(1)
            .and_then(|i| config.transitions.get(i))
            .map_or(0, |t| i64::from(t.duration_frames));
        let after = config
            .transitions
            .get(index)
            .map_or(0, |t| i64::from(t.duration_frames));
        let required = before + after;
        if length < required {
            return Err(DurationError::SceneTooShort {
                scene: scene.id.clone(),
                length,
                required,
            });
        }
    }

    // Positive here; only the absorbed delta can exceed u32
    lengths
        .into_iter()
        .zip(&config.scenes)
        .map(|(length, scene)| {
            u32::try_from(length).map_err(|_| DurationError::SceneTooShort {
                scene: scene.id.clone(),
                length,
                required: i64::from(u32::MAX),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::SlideDirection;

    fn scenes(lengths: &[u32]) -> Vec<SceneDesc> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| SceneDesc::external(format!("s{i}"), len, "test"))
            .collect()
    }

    fn fades(count: usize, duration: u32) -> Vec<TransitionDesc> {
        vec![TransitionDesc::fade(duration); count]
    }

    fn five_scene() -> ResolvedTimeline {
        build(scenes(&[120, 150, 150, 180, 150]), fades(4, 15), 780, 30.0).unwrap()
    }

    #[test]
    fn test_five_scene_scenario() {
        let timeline = five_scene();
        let lengths: Vec<u32> = timeline.scenes().iter().map(|s| s.effective_frames).collect();
        assert_eq!(lengths, [120, 150, 150, 180, 240]);

        let starts: Vec<u32> = timeline.scenes().iter().map(|s| s.start).collect();
        assert_eq!(starts, [0, 105, 240, 375, 540]);

        let total: u32 = lengths.iter().sum::<u32>() - 4 * 15;
        assert_eq!(total, 780);
        assert_eq!(timeline.scenes().last().unwrap().end(), 780);
    }

    #[test]
    fn test_duration_identity_holds() {
        let cases: [(&[u32], u32, u32); 4] = [
            (&[30], 0, 90),
            (&[60, 60], 10, 100),
            (&[40, 50, 60], 20, 200),
            (&[100, 80, 80, 100], 5, 300),
        ];
        for (lengths, duration, total) in cases {
            let transitions = fades(lengths.len() - 1, duration);
            let timeline = build(scenes(lengths), transitions, total, 24.0).unwrap();
            let effective: i64 = timeline.scenes().iter().map(|s| i64::from(s.effective_frames)).sum();
            let overlap: i64 = timeline.transitions().iter().map(|t| i64::from(t.duration_frames)).sum();
            assert_eq!(effective - overlap, i64::from(total));
        }
    }

    #[test]
    fn test_query_single_scene() {
        let timeline = five_scene();
        match timeline.query_frame(50) {
            Some(ActiveState::Scene(scene)) => {
                assert_eq!(scene.id, "s0");
                assert_eq!(scene.local_frame, 50);
            }
            other => panic!("expected scene, got {other:?}"),
        }
        match timeline.query_frame(120) {
            Some(ActiveState::Scene(scene)) => {
                assert_eq!(scene.index, 1);
                assert_eq!(scene.local_frame, 15);
            }
            other => panic!("expected scene, got {other:?}"),
        }
        match timeline.query_frame(779) {
            Some(ActiveState::Scene(scene)) => {
                assert_eq!(scene.id, "s4");
                assert_eq!(scene.local_frame, 239);
            }
            other => panic!("expected scene, got {other:?}"),
        }
    }

    #[test]
    fn test_query_transition_window() {
        let timeline = five_scene();
        let Some(ActiveState::Transition(start)) = timeline.query_frame(105) else {
            panic!("expected transition at 105");
        };
        assert_eq!(start.index, 0);
        assert_eq!(start.progress, 0.0);
        assert_eq!(start.outgoing.local_frame, 105);
        assert_eq!(start.incoming.local_frame, 0);
        assert_eq!(start.composite.outgoing.alpha, 1.0);

        let Some(ActiveState::Transition(last)) = timeline.query_frame(119) else {
            panic!("expected transition at 119");
        };
        assert!((last.progress - 14.0 / 15.0).abs() < 1e-12);
        assert_eq!(last.outgoing.local_frame, 119);
        assert_eq!(last.incoming.local_frame, 14);

        assert!(matches!(timeline.query_frame(104), Some(ActiveState::Scene(_))));
    }

    #[test]
    fn test_query_out_of_range() {
        let timeline = five_scene();
        assert_eq!(timeline.query_frame(-1), None);
        assert_eq!(timeline.query_frame(780), None);
    }

    #[test]
    fn test_every_frame_is_consistent() {
        let timeline = five_scene();
        for frame in 0..i64::from(timeline.total_frames()) {
            let state = timeline.query_frame(frame).unwrap();
            let in_window = timeline.transitions().iter().any(|t| t.contains(frame));
            match state {
                ActiveState::Scene(scene) => {
                    assert!(!in_window, "frame {frame}");
                    let resolved = &timeline.scenes()[scene.index];
                    assert!(resolved.contains(frame));
                    assert_eq!(i64::from(scene.local_frame), frame - i64::from(resolved.start));
                }
                ActiveState::Transition(t) => {
                    assert!(in_window, "frame {frame}");
                    assert_eq!(t.incoming.index, t.outgoing.index + 1);
                    assert!((0.0..1.0).contains(&t.progress));
                }
            }
        }
    }

    #[test]
    fn test_zero_length_transition_is_a_cut() {
        let timeline = build(scenes(&[10, 10]), fades(1, 0), 20, 30.0).unwrap();
        assert!(matches!(timeline.query_frame(9), Some(ActiveState::Scene(SceneFrame { index: 0, .. }))));
        assert!(matches!(timeline.query_frame(10), Some(ActiveState::Scene(SceneFrame { index: 1, .. }))));
    }

    #[test]
    fn test_middle_scene_too_short() {
        let err = build(scenes(&[30, 20, 30]), fades(2, 15), 50, 30.0).unwrap_err();
        assert_eq!(
            err,
            TimelineError::Duration(DurationError::SceneTooShort {
                scene: "s1".into(),
                length: 20,
                required: 30,
            })
        );
    }

    #[test]
    fn test_first_scene_shorter_than_transition() {
        let err = build(scenes(&[10, 30]), fades(1, 15), 25, 30.0).unwrap_err();
        assert!(matches!(
            err,
            TimelineError::Duration(DurationError::SceneTooShort { ref scene, .. }) if scene == "s0"
        ));
    }

    #[test]
    fn test_last_scene_collapse_and_shortfall() {
        let collapsed = build(scenes(&[100, 100]), fades(1, 10), 50, 30.0).unwrap_err();
        assert_eq!(
            collapsed,
            TimelineError::Duration(DurationError::LastSceneCollapsed {
                scene: "s1".into(),
                length: -40,
            })
        );

        // Positive but cannot host the incoming window
        let short = build(scenes(&[100, 100]), fades(1, 10), 99, 30.0).unwrap_err();
        assert!(matches!(
            short,
            TimelineError::Duration(DurationError::SceneTooShort { length: 9, required: 10, .. })
        ));

        let fits = build(scenes(&[100, 100]), fades(1, 10), 100, 30.0).unwrap();
        assert_eq!(fits.scenes()[1].effective_frames, 10);
    }

    #[test]
    fn test_configuration_errors() {
        let err = |result: Result<ResolvedTimeline, TimelineError>| match result {
            Err(TimelineError::Configuration(e)) => e,
            other => panic!("expected configuration error, got {other:?}"),
        };

        assert_eq!(err(build(Vec::new(), Vec::new(), 10, 30.0)), ConfigurationError::EmptyTimeline);
        assert_eq!(
            err(build(scenes(&[10, 0]), fades(1, 0), 10, 30.0)),
            ConfigurationError::EmptyScene("s1".into())
        );
        assert!(matches!(
            err(build(scenes(&[10, 10]), Vec::new(), 20, 30.0)),
            ConfigurationError::TransitionCount { expected: 1, actual: 0, .. }
        ));
        assert_eq!(
            err(build(scenes(&[10]), Vec::new(), 10, 0.0)),
            ConfigurationError::InvalidFps(0.0)
        );

        let duplicate = vec![
            SceneDesc::external("a", 10, "x"),
            SceneDesc::external("a", 10, "x"),
        ];
        assert_eq!(
            err(build(duplicate, fades(1, 0), 20, 30.0)),
            ConfigurationError::DuplicateScene("a".into())
        );
    }

    #[test]
    fn test_scene_lookup_and_time_conversion() {
        let timeline = five_scene();
        assert_eq!(timeline.scene("s3").map(|s| s.start), Some(375));
        assert!(timeline.scene("missing").is_none());
        assert_eq!(timeline.frame_to_time(45), 1.5);
        assert_eq!(timeline.time_to_frame(1.5), 45);
    }

    #[test]
    fn test_slide_transition_reports_composite() {
        let transitions = vec![TransitionDesc::new(
            Presentation::Slide {
                direction: SlideDirection::FromRight,
                push: false,
            },
            20,
        )];
        let timeline = build(scenes(&[60, 60]), transitions, 100, 30.0).unwrap();
        let Some(ActiveState::Transition(t)) = timeline.query_frame(50) else {
            panic!("expected transition");
        };
        assert_eq!(t.progress, 0.5);
        assert_eq!(t.composite.incoming.offset, [0.5, 0.0]);
    }

    #[test]
    fn test_config_ron_roundtrip() {
        let config = TimelineConfig::new(30.0, 780)
            .with_frame_size(1920, 1080)
            .with_scene(SceneDesc::external("intro", 120, "intro"))
            .with_transition(TransitionDesc::fade(15))
            .with_scene(SceneDesc::external("outro", 150, "outro"))
            .with_soundtrack(SoundtrackConfig::default());
        let ron_str = config.to_ron().unwrap();
        let loaded = TimelineConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_json_and_version_check() {
        let json = r#"{
            "fps": 30.0,
            "total_frames": 60,
            "scenes": [{ "id": "only", "duration_frames": 60, "content": { "External": { "renderer": "r" } } }]
        }"#;
        let config = TimelineConfig::from_json(json).unwrap();
        assert_eq!(config.format_version, TIMELINE_FORMAT_VERSION);
        assert!(config.build().is_ok());

        let newer = json.replacen("\"fps\"", "\"format_version\": 99, \"fps\"", 1);
        assert_eq!(
            TimelineConfig::from_json(&newer),
            Err(ConfigurationError::UnsupportedVersion {
                found: 99,
                supported: TIMELINE_FORMAT_VERSION
            })
        );
    }

    #[test]
    fn test_parallel_queries_match_sequential() {
        use rayon::prelude::*;

        let timeline = five_scene();
        let sequential: Vec<Option<ActiveState>> =
            (0..780).map(|f| timeline.query_frame(f)).collect();
        let parallel: Vec<Option<ActiveState>> =
            (0..780).into_par_iter().map(|f| timeline.query_frame(f)).collect();
        assert_eq!(sequential, parallel);
    }
}
