use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPoint;

/// A labeled region produced by segmentation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SegmentationMask {
    pub label: String,
    pub mask_url: String,
    /// Outline vertices `[x, y]` in pixel space.
    pub polygon: Vec<[f64; 2]>,
    /// Area in square pixels.
    pub area: f64,
}

/// The image handed to an analyzer.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    pub image_id: &'a str,
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes. Empty when only dimensions are known.
    pub encoded: &'a [u8],
}

/// Segmentation, detection and depth collaborators behind one seam.
///
/// Implementations must treat `SceneFrame::encoded` as read-only and must not
/// retain it beyond the call.
pub trait SceneAnalyzer: Send + Sync {
    /// Analyzer identifier.
    fn name(&self) -> &'static str;

    /// Label room surfaces.
    fn segment(&self, frame: &SceneFrame<'_>) -> Result<Vec<SegmentationMask>>;

    /// Detect fixture anchors.
    fn detect(&self, frame: &SceneFrame<'_>) -> Result<Vec<AnchorPoint>>;

    /// Produce a depth map and return a reference to it.
    fn estimate_depth(&self, frame: &SceneFrame<'_>) -> Result<String>;
}
