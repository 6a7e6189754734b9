// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loading and saving timeline files.

use anyhow::{bail, Context, Result};
use reelkit_engine::{
    Presentation, SceneContent, SceneDesc, SlideDirection, SolidParams, SoundtrackConfig,
    TimelineConfig, TitleParams, TransitionDesc,
};
use std::path::Path;

/// On-disk encoding of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineFormat {
    /// Rusty Object Notation
    Ron,
    /// JSON
    Json,
}

impl TimelineFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ron") => Ok(Self::Ron),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "Unsupported timeline file '{}': expected a .ron or .json extension",
                path.display()
            ),
        }
    }
}

/// Read and parse a timeline file
pub fn load(path: &Path) -> Result<TimelineConfig> {
    let format = TimelineFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = match format {
        TimelineFormat::Ron => TimelineConfig::from_ron(&content),
        TimelineFormat::Json => TimelineConfig::from_json(&content),
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!(
        "Loaded timeline {} ({} scenes)",
        path.display(),
        config.scenes.len()
    );
    Ok(config)
}

/// Write a timeline file in the format its extension names
pub fn save(config: &TimelineConfig, path: &Path) -> Result<()> {
    let content = match TimelineFormat::from_path(path)? {
        TimelineFormat::Ron => config.to_ron()?,
        TimelineFormat::Json => serde_json::to_string_pretty(config)?,
    };
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote timeline {}", path.display());
    Ok(())
}

/// Five scenes at 30 fps, 26 seconds, joined by 15-frame transitions
pub fn sample_config() -> TimelineConfig {
    TimelineConfig::new(30.0, 780)
        .with_frame_size(1920, 1080)
        .with_scene(SceneDesc::new(
            "intro",
            120,
            SceneContent::Title(TitleParams::new("reelkit")),
        ))
        .with_transition(TransitionDesc::fade(15))
        .with_scene(SceneDesc::external("overview", 150, "overview"))
        .with_transition(TransitionDesc::new(
            Presentation::Slide {
                direction: SlideDirection::FromRight,
                push: false,
            },
            15,
        ))
        .with_scene(SceneDesc::external("details", 150, "details"))
        .with_transition(TransitionDesc::new(
            Presentation::Slide {
                direction: SlideDirection::FromBottom,
                push: true,
            },
            15,
        ))
        .with_scene(SceneDesc::external("demo", 180, "demo"))
        .with_transition(TransitionDesc::fade(15))
        .with_scene(SceneDesc::new(
            "outro",
            150,
            SceneContent::Solid(SolidParams {
                color: [16, 16, 24, 255],
            }),
        ))
        .with_soundtrack(SoundtrackConfig::default())
}
