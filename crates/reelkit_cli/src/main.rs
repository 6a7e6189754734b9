// SPDX-License-Identifier: MIT OR Apache-2.0
//! reelkit command-line tool
//!
//! Validates timeline files, prints the resolved layout, and evaluates frames
//! to JSON for downstream renderers.

mod sheet;
mod timeline_file;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reelkit_engine::{ResolvedTimeline, TimelineConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "reelkit")]
#[command(about = "Frame-indexed timeline engine for programmatic video")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a timeline and print its layout
    Check {
        /// Timeline file (.ron or .json)
        file: PathBuf,
    },

    /// Print the state of a single frame as JSON
    Frame {
        /// Timeline file (.ron or .json)
        file: PathBuf,

        /// Global frame number
        #[arg(short, long)]
        frame: i64,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Evaluate a frame range and write one JSON line per frame
    Sheet {
        /// Timeline file (.ron or .json)
        file: PathBuf,

        /// First frame (inclusive)
        #[arg(long, default_value = "0")]
        start: u32,

        /// Last frame (exclusive), defaults to the timeline length
        #[arg(long)]
        end: Option<u32>,

        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a sample five-scene timeline
    Init {
        /// Destination file (.ron or .json)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("reelkit_cli=info".parse()?)
        .add_directive("reelkit_engine=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check(&file)?,
        Commands::Frame {
            file,
            frame,
            pretty,
        } => print_frame(&file, frame, pretty)?,
        Commands::Sheet {
            file,
            start,
            end,
            output,
        } => {
            let timeline = resolve(&file)?;
            let end = end.unwrap_or(timeline.total_frames());
            sheet::write_sheet(&timeline, start..end, output.as_deref())?;
        }
        Commands::Init { file } => {
            timeline_file::save(&timeline_file::sample_config(), &file)?;
            println!("Wrote sample timeline to {}", file.display());
        }
    }

    Ok(())
}

fn resolve(path: &Path) -> Result<ResolvedTimeline> {
    let config: TimelineConfig = timeline_file::load(path)?;
    config
        .build()
        .with_context(|| format!("Invalid timeline {}", path.display()))
}

fn check(path: &Path) -> Result<()> {
    let timeline = resolve(path)?;
    print_layout(&timeline);
    Ok(())
}

fn print_frame(path: &Path, frame: i64, pretty: bool) -> Result<()> {
    let timeline = resolve(path)?;
    let state = timeline
        .frame_state(frame)
        .with_context(|| format!("Failed to evaluate frame {frame}"))?
        .with_context(|| {
            format!(
                "Frame {frame} is outside the timeline (0..{})",
                timeline.total_frames()
            )
        })?;

    let json = if pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{json}");
    Ok(())
}

fn print_layout(timeline: &ResolvedTimeline) {
    println!("=== Timeline ===");
    println!(
        "Length: {} frames ({:.2} s at {} fps)",
        timeline.total_frames(),
        timeline.frame_to_time(i64::from(timeline.total_frames())),
        timeline.fps()
    );
    if let Some(size) = timeline.frame_size() {
        println!("Frame size: {}x{}", size.width, size.height);
    }

    println!();
    println!("=== Scenes ({}) ===", timeline.scenes().len());
    for scene in timeline.scenes() {
        let adjusted = if scene.effective_frames == scene.requested_frames {
            String::new()
        } else {
            format!(" (requested {})", scene.requested_frames)
        };
        println!(
            "  {:<16} [{:>6}, {:>6})  {} frames{}",
            scene.id,
            scene.start,
            scene.end(),
            scene.effective_frames,
            adjusted
        );
    }

    if !timeline.transitions().is_empty() {
        println!();
        println!("=== Transitions ({}) ===", timeline.transitions().len());
        for transition in timeline.transitions() {
            let scenes = timeline.scenes();
            println!(
                "  {:<6} [{:>6}, {:>6})  {} -> {}",
                transition.presentation.name(),
                transition.start,
                transition.end(),
                scenes[transition.outgoing].id,
                scenes[transition.incoming].id
            );
        }
    }

    if let Some(envelope) = timeline.soundtrack() {
        println!();
        println!("=== Soundtrack ===");
        for point in envelope.points() {
            println!("  frame {:>6}  gain {:.3}", point.frame, point.value);
        }
    }
}
