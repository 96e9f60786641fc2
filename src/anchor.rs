//! Detected scene anchors and anchor resolution.
//!
//! Anchors arrive from the scene analyzer and are never mutated by the
//! placement layer. Several anchors may share a label (two light fixtures,
//! two sinks); resolution picks the most confident one.

use serde::{Deserialize, Serialize};

/// A named flat surface in the scene.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    Wall,
    Floor,
    Countertop,
    Ceiling,
}

impl Plane {
    /// All planes in inference order.
    pub const ALL: [Plane; 4] = [Plane::Wall, Plane::Floor, Plane::Countertop, Plane::Ceiling];

    pub fn as_str(self) -> &'static str {
        match self {
            Plane::Wall => "wall",
            Plane::Floor => "floor",
            Plane::Countertop => "countertop",
            Plane::Ceiling => "ceiling",
        }
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected scene feature in pixel space.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnchorPoint {
    /// Opaque detection id. Not used for placement.
    #[serde(default)]
    pub id: String,
    pub label: String,
    /// Bounding box center.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Detector confidence in 0.0..=1.0.
    pub confidence: f64,
    /// Surface the feature sits on.
    pub plane: Plane,
}

impl AnchorPoint {
    /// True when the bounding box has positive area and can drive scaling.
    pub fn has_extent(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Select the most confident anchor carrying `label`.
///
/// Returns `None` when no anchor matches. Equal confidences resolve to the
/// earliest anchor in `anchors`, so the same input always yields the same
/// anchor. A NaN confidence ranks below any number regardless of position.
pub fn find_anchor<'a>(anchors: &'a [AnchorPoint], label: &str) -> Option<&'a AnchorPoint> {
    anchors
        .iter()
        .filter(|anchor| anchor.label == label)
        .fold(None, |best: Option<&AnchorPoint>, candidate| match best {
            Some(current) if !outranks(candidate.confidence, current.confidence) => Some(current),
            _ => Some(candidate),
        })
}

/// Strictly greater, with NaN ranking below every number.
fn outranks(candidate: f64, current: f64) -> bool {
    candidate > current || (current.is_nan() && !candidate.is_nan())
}
