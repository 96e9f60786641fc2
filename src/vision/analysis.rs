use anyhow::{anyhow, Context, Result};
use image::ImageReader;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::anchor::AnchorPoint;

use super::analyzer::{SceneAnalyzer, SceneFrame, SegmentationMask};
use super::planes::{infer_planes, PlaneInfo};
use super::room::{classify_room, RoomType};

/// Largest encoded image accepted for analysis.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Everything the placement layer needs to know about a scene.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneAnalysis {
    pub image_id: String,
    pub width: u32,
    pub height: u32,
    pub segments: Vec<SegmentationMask>,
    pub anchors: Vec<AnchorPoint>,
    pub depth_map_url: String,
    pub planes: Vec<PlaneInfo>,
    pub room_type: RoomType,
}

/// Content-derived image id: hex of the first 16 bytes of SHA-256.
pub fn image_id_for(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..16])
}

/// Analyze an encoded JPEG or PNG photograph.
pub fn analyze_image(analyzer: &dyn SceneAnalyzer, bytes: &[u8]) -> Result<SceneAnalysis> {
    if bytes.is_empty() {
        return Err(anyhow!("image is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(anyhow!(
            "image is {} bytes; limit is {}",
            bytes.len(),
            MAX_IMAGE_BYTES
        ));
    }
    // Only the header is read; pixel data is never allocated.
    let (width, height) = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .context("detect image format")?
        .into_dimensions()
        .context("decode image header")?;
    let image_id = image_id_for(bytes);
    run(
        analyzer,
        SceneFrame {
            image_id: &image_id,
            width,
            height,
            encoded: bytes,
        },
    )
}

/// Analyze a scene known only by its dimensions.
pub fn analyze_dimensions(
    analyzer: &dyn SceneAnalyzer,
    image_id: &str,
    width: u32,
    height: u32,
) -> Result<SceneAnalysis> {
    run(
        analyzer,
        SceneFrame {
            image_id,
            width,
            height,
            encoded: &[],
        },
    )
}

fn run(analyzer: &dyn SceneAnalyzer, frame: SceneFrame<'_>) -> Result<SceneAnalysis> {
    if frame.width == 0 || frame.height == 0 {
        return Err(anyhow!(
            "image dimensions must be positive, got {}x{}",
            frame.width,
            frame.height
        ));
    }
    let segments = analyzer
        .segment(&frame)
        .with_context(|| format!("{} segmentation", analyzer.name()))?;
    let anchors = analyzer
        .detect(&frame)
        .with_context(|| format!("{} detection", analyzer.name()))?;
    let depth_map_url = analyzer
        .estimate_depth(&frame)
        .with_context(|| format!("{} depth estimation", analyzer.name()))?;

    let planes = infer_planes(&segments, frame.width, frame.height);
    let room_type = classify_room(&anchors);
    log::info!(
        "analyzed image {} ({}x{}) with {}: {} segments, {} anchors, {}",
        frame.image_id,
        frame.width,
        frame.height,
        analyzer.name(),
        segments.len(),
        anchors.len(),
        room_type
    );

    Ok(SceneAnalysis {
        image_id: frame.image_id.to_string(),
        width: frame.width,
        height: frame.height,
        segments,
        anchors,
        depth_map_url,
        planes,
        room_type,
    })
}
