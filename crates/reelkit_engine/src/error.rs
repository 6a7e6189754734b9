// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for timeline building and primitive evaluation.

use thiserror::Error;

/// A malformed parameter passed to a primitive or found in a timeline file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Fewer than two keyframes
    #[error("Keyframe set needs at least 2 points, got {0}")]
    TooFewKeyframes(usize),

    /// Inputs and outputs differ in length
    #[error("Keyframe inputs ({inputs}) and outputs ({outputs}) differ in length")]
    LengthMismatch {
        /// Number of inputs
        inputs: usize,
        /// Number of outputs
        outputs: usize,
    },

    /// Inputs are not strictly increasing
    #[error("Keyframe inputs must be strictly increasing (index {index}: {previous} -> {current})")]
    NotIncreasing {
        /// Index of the offending input
        index: usize,
        /// Previous input
        previous: f64,
        /// Offending input
        current: f64,
    },

    /// A keyframe input or output is NaN or infinite
    #[error("Keyframe value at index {0} is not finite")]
    NonFiniteKeyframe(usize),

    /// Frame outside the keyframe domain and no policy for that side
    #[error("Frame {frame} is outside [{start}, {end}] and no extrapolation policy was given")]
    OutOfDomain {
        /// Queried frame
        frame: f64,
        /// First input
        start: f64,
        /// Last input
        end: f64,
    },

    /// Bad spring coefficient
    #[error("Invalid spring {parameter}: {value}")]
    InvalidSpring {
        /// Parameter name
        parameter: &'static str,
        /// Offending value
        value: f64,
    },

    /// Frame rate not positive or not finite
    #[error("Invalid frame rate: {0}")]
    InvalidFps(f64),

    /// Envelope fades do not fit the total length
    #[error("Fade in ({fade_in}) + fade out ({fade_out}) exceed total length {total}")]
    InvalidEnvelope {
        /// Total frames
        total: u32,
        /// Fade-in frames
        fade_in: u32,
        /// Fade-out frames
        fade_out: u32,
    },

    /// Gain must be finite and non-negative
    #[error("Invalid gain: {0}")]
    InvalidGain(f64),

    /// Timeline has no scenes
    #[error("Timeline has no scenes")]
    EmptyTimeline,

    /// Scene requested zero frames
    #[error("Scene '{0}' requests zero frames")]
    EmptyScene(String),

    /// Scene id used twice
    #[error("Duplicate scene id: {0}")]
    DuplicateScene(String),

    /// Transitions must sit between each adjacent pair of scenes
    #[error("Expected {expected} transitions for {scenes} scenes, got {actual}")]
    TransitionCount {
        /// Scene count
        scenes: usize,
        /// Required transition count
        expected: usize,
        /// Supplied transition count
        actual: usize,
    },

    /// Timeline file is from a newer format
    #[error("Timeline format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest supported version
        supported: u32,
    },

    /// Timeline file could not be parsed
    #[error("Failed to parse timeline: {0}")]
    Parse(String),
}

/// A scene length that cannot host its transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Scene shorter than the transition windows touching it
    #[error("Scene '{scene}' is {length} frames but its transitions need {required}")]
    SceneTooShort {
        /// Scene id
        scene: String,
        /// Effective length
        length: i64,
        /// Sum of touching transition durations
        required: i64,
    },

    /// Total-length adjustment left the last scene empty
    #[error("Adjusting to the total length leaves last scene '{scene}' at {length} frames")]
    LastSceneCollapsed {
        /// Scene id
        scene: String,
        /// Adjusted length
        length: i64,
    },
}

/// Any failure while building a timeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// Malformed configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Durations do not reconcile
    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Result type for primitive evaluation
pub type Result<T> = std::result::Result<T, ConfigurationError>;
