//! luxeplan - command-line access to scene analysis and placement
//!
//! - `place`: read a placement request as JSON, print the placement result
//! - `analyze`: run the scene analyzer on an image file or bare dimensions
//! - `policies`: print the category policy table

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::placement::{Layout, PlacementEngine, PlacementRequest};
use crate::vision::{analyze_dimensions, analyze_image, StubAnalyzer, MAX_IMAGE_BYTES};

#[derive(Parser, Debug)]
#[command(name = "luxeplan", version, about = "Scene analysis and product placement")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a placement from a JSON request (file or stdin)
    Place {
        /// Request file; reads stdin when omitted.
        #[arg(long)]
        request: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },

    /// Analyze a room photograph, or a scene of the given size
    Analyze {
        /// JPEG or PNG photograph.
        #[arg(long, conflicts_with_all = ["width", "height"])]
        image: Option<PathBuf>,
        #[arg(long, requires = "height")]
        width: Option<u32>,
        #[arg(long, requires = "width")]
        height: Option<u32>,
        /// Image id used with --width/--height.
        #[arg(long, default_value = "scene")]
        image_id: String,
        #[arg(long)]
        pretty: bool,
    },

    /// List registered placement policies
    Policies,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match args.command {
        Command::Place { request, pretty } => cmd_place(request.as_deref(), pretty),
        Command::Analyze {
            image,
            width,
            height,
            image_id,
            pretty,
        } => cmd_analyze(image.as_deref(), width, height, &image_id, pretty),
        Command::Policies => cmd_policies(),
    }
}

fn cmd_place(request_path: Option<&Path>, pretty: bool) -> Result<()> {
    let raw = match request_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read request {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("read request from stdin")?;
            raw
        }
    };
    let request: PlacementRequest = serde_json::from_str(&raw).context("parse placement request")?;
    let result = PlacementEngine::new().compute(&request)?;
    print_json(&result, pretty)
}

fn cmd_analyze(
    image: Option<&Path>,
    width: Option<u32>,
    height: Option<u32>,
    image_id: &str,
    pretty: bool,
) -> Result<()> {
    let analyzer = StubAnalyzer::new();
    let analysis = match (image, width, height) {
        (Some(path), _, _) => {
            let size = std::fs::metadata(path)
                .with_context(|| format!("stat image {}", path.display()))?
                .len();
            if size > MAX_IMAGE_BYTES as u64 {
                return Err(anyhow!(
                    "image {} is {} bytes; limit is {}",
                    path.display(),
                    size,
                    MAX_IMAGE_BYTES
                ));
            }
            let bytes =
                std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
            analyze_image(&analyzer, &bytes)?
        }
        (None, Some(width), Some(height)) => analyze_dimensions(&analyzer, image_id, width, height)?,
        _ => return Err(anyhow!("provide --image or both --width and --height")),
    };
    print_json(&analysis, pretty)
}

fn cmd_policies() -> Result<()> {
    let engine = PlacementEngine::new();
    let registry = engine.registry();
    println!(
        "{:<12} {:<18} {:<11} {:<11} {:>3} {:>6}  layout",
        "category", "snap_to", "align", "shadow", "z", "scale"
    );
    for category in registry.categories() {
        let Some(policy) = registry.get(&category) else {
            continue;
        };
        let layout = match policy.layout {
            Layout::Anchored => "anchored".to_string(),
            Layout::FaucetOverSink => "above sink".to_string(),
            Layout::FixedSurface { y_fraction } => format!("fixed y={y_fraction}"),
        };
        let snap_to = if policy.snap_to.is_empty() {
            "-"
        } else {
            policy.snap_to
        };
        println!(
            "{:<12} {:<18} {:<11} {:<11} {:>3} {:>6.2}  {}",
            policy.category,
            snap_to,
            policy.align_plane.as_str(),
            policy.shadow_plane.as_str(),
            policy.default_z_order,
            policy.scale_factor,
            layout
        );
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
