use anyhow::Result;

use crate::anchor::{AnchorPoint, Plane};

use super::analyzer::{SceneAnalyzer, SceneFrame, SegmentationMask};

/// Surface labels a segmentation model is expected to produce.
pub const ROOM_SEGMENT_LABELS: [&str; 10] = [
    "wall",
    "floor",
    "ceiling",
    "cabinet_faces",
    "countertop",
    "backsplash",
    "vanity",
    "mirror",
    "window",
    "door",
];

/// Fixture labels a detector is expected to produce.
pub const DETECTABLE_LABELS: [&str; 15] = [
    "sink",
    "faucet",
    "stove",
    "fridge",
    "toilet",
    "shower_head",
    "bathtub",
    "mirror",
    "lighting_fixture",
    "cabinet_run",
    "island",
    "range_hood",
    "oven",
    "dishwasher",
    "vanity",
];

/// (label, mask file stem, left, top, right, bottom) as image fractions.
const STUB_SEGMENTS: [(&str, &str, f64, f64, f64, f64); 6] = [
    ("wall", "wall", 0.0, 0.0, 1.0, 0.6),
    ("floor", "floor", 0.0, 0.7, 1.0, 1.0),
    ("countertop", "countertop", 0.1, 0.45, 0.9, 0.55),
    ("cabinet_faces", "cabinets", 0.1, 0.55, 0.9, 0.7),
    ("backsplash", "backsplash", 0.1, 0.3, 0.9, 0.45),
    ("ceiling", "ceiling", 0.0, 0.0, 1.0, 0.08),
];

/// (label, center x, center y, width, height, confidence, plane), geometry as
/// image fractions.
const STUB_ANCHORS: [(&str, f64, f64, f64, f64, f64, Plane); 7] = [
    ("sink", 0.5, 0.48, 0.15, 0.08, 0.92, Plane::Countertop),
    ("faucet", 0.5, 0.42, 0.05, 0.08, 0.88, Plane::Countertop),
    ("stove", 0.25, 0.5, 0.18, 0.18, 0.85, Plane::Countertop),
    ("fridge", 0.85, 0.4, 0.12, 0.35, 0.90, Plane::Floor),
    ("lighting_fixture", 0.5, 0.05, 0.1, 0.06, 0.78, Plane::Ceiling),
    ("cabinet_run", 0.5, 0.62, 0.7, 0.15, 0.94, Plane::Wall),
    ("range_hood", 0.25, 0.2, 0.15, 0.12, 0.72, Plane::Wall),
];

/// Fixed-output analyzer for development and tests.
///
/// Produces a plausible kitchen layout scaled to the frame dimensions. Pixel
/// content is never inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubAnalyzer;

impl StubAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneAnalyzer for StubAnalyzer {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn segment(&self, frame: &SceneFrame<'_>) -> Result<Vec<SegmentationMask>> {
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);
        Ok(STUB_SEGMENTS
            .iter()
            .map(|&(label, stem, left, top, right, bottom)| {
                let (x0, y0, x1, y1) = (w * left, h * top, w * right, h * bottom);
                SegmentationMask {
                    label: label.to_string(),
                    mask_url: format!("/api/masks/{}/{}.png", frame.image_id, stem),
                    polygon: vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]],
                    area: (x1 - x0) * (y1 - y0),
                }
            })
            .collect())
    }

    fn detect(&self, frame: &SceneFrame<'_>) -> Result<Vec<AnchorPoint>> {
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);
        Ok(STUB_ANCHORS
            .iter()
            .enumerate()
            .map(|(index, &(label, cx, cy, bw, bh, confidence, plane))| AnchorPoint {
                id: format!("{}-{:02}", frame.image_id, index),
                label: label.to_string(),
                x: w * cx,
                y: h * cy,
                width: w * bw,
                height: h * bh,
                confidence,
                plane,
            })
            .collect())
    }

    fn estimate_depth(&self, frame: &SceneFrame<'_>) -> Result<String> {
        Ok(format!("/api/depth/{}/depth_map.png", frame.image_id))
    }
}
