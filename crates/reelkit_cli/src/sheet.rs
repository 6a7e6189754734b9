// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parallel evaluation of frame ranges to JSON lines.

use anyhow::{Context, Result};
use rayon::prelude::*;
use reelkit_engine::ResolvedTimeline;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;

/// Evaluate `frames` in parallel; one JSON document per frame, in frame order.
pub fn frame_lines(timeline: &ResolvedTimeline, frames: Range<u32>) -> Result<Vec<String>> {
    let end = frames.end.min(timeline.total_frames());
    let start = frames.start.min(end);

    (start..end)
        .into_par_iter()
        .map(|frame| {
            let state = timeline
                .frame_state(i64::from(frame))
                .with_context(|| format!("Failed to evaluate frame {frame}"))?
                .with_context(|| format!("Frame {frame} is outside the timeline"))?;
            Ok(serde_json::to_string(&state)?)
        })
        .collect()
}

/// Write the sheet for `frames` to `output`, or stdout when `None`
pub fn write_sheet(
    timeline: &ResolvedTimeline,
    frames: Range<u32>,
    output: Option<&Path>,
) -> Result<()> {
    let lines = frame_lines(timeline, frames.clone())?;
    tracing::info!(
        "Evaluated {} frames ({}..{})",
        lines.len(),
        frames.start,
        frames.end
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_lines(BufWriter::new(file), &lines)?;
            println!("Wrote {} frames to {}", lines.len(), path.display());
        }
        None => write_lines(std::io::stdout().lock(), &lines)?,
    }
    Ok(())
}

fn write_lines(mut writer: impl Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_file::sample_config;

    #[test]
    fn test_lines_in_frame_order() {
        let timeline = sample_config().build().unwrap();
        let lines = frame_lines(&timeline, 100..130).unwrap();
        assert_eq!(lines.len(), 30);
        for (offset, line) in lines.iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["frame"], 100 + offset as u64);
        }
    }

    #[test]
    fn test_range_clamped_to_timeline() {
        let timeline = sample_config().build().unwrap();
        assert_eq!(frame_lines(&timeline, 770..900).unwrap().len(), 10);
        assert!(frame_lines(&timeline, 900..1000).unwrap().is_empty());
    }

    #[test]
    fn test_write_lines_newline_terminated() {
        let mut buffer = Vec::new();
        write_lines(&mut buffer, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(buffer, b"a\nb\n");
    }
}
